//! End-to-end behavior of chain composition and the recovery boundary.

use std::fmt;
use std::sync::{Arc, Mutex};

use strata::recovery;
use strata::{
    chain, chain_fn, BoxedHandler, Error, Handler, HandlerFuture, Logger, Method, Middleware,
    Recovery, Request, ResponseWriter, StatusCode,
};

// ── Fixtures ──────────────────────────────────────────────────────────────────

/// Shared, ordered record of which layers ran.
type CallLog = Arc<Mutex<Vec<&'static str>>>;

fn call_log() -> CallLog {
    Arc::new(Mutex::new(Vec::new()))
}

fn request() -> Request {
    Request::new(Method::GET, "/", Vec::new(), Vec::new())
}

#[derive(Default)]
struct TestLogger {
    lines: Mutex<Vec<String>>,
}

impl TestLogger {
    fn lines(&self) -> Vec<String> {
        self.lines.lock().unwrap().clone()
    }
}

impl Logger for TestLogger {
    fn log(&self, args: fmt::Arguments<'_>) {
        self.lines.lock().unwrap().push(args.to_string());
    }
}

/// Middleware that appends its name to the call log before calling inward.
struct Tagged {
    name: &'static str,
    log: CallLog,
    next: BoxedHandler,
}

impl Handler for Tagged {
    fn serve<'a>(&'a self, req: &'a Request, res: &'a mut ResponseWriter) -> HandlerFuture<'a> {
        Box::pin(async move {
            self.log.lock().unwrap().push(self.name);
            self.next.serve(req, res).await
        })
    }
}

fn tagged(name: &'static str, log: &CallLog) -> Middleware {
    let log = Arc::clone(log);
    Arc::new(move |next| Arc::new(Tagged { name, log: Arc::clone(&log), next }) as BoxedHandler)
}

/// Middleware that sets a response header before calling inward.
struct SetHeader {
    name: &'static str,
    value: &'static str,
    next: BoxedHandler,
}

impl Handler for SetHeader {
    fn serve<'a>(&'a self, req: &'a Request, res: &'a mut ResponseWriter) -> HandlerFuture<'a> {
        Box::pin(async move {
            res.set_header(self.name, self.value);
            self.next.serve(req, res).await
        })
    }
}

fn set_header(name: &'static str, value: &'static str) -> Middleware {
    Arc::new(move |next| Arc::new(SetHeader { name, value, next }) as BoxedHandler)
}

/// Terminal handler: records "T", writes a body.
struct Terminal {
    log: CallLog,
}

impl Handler for Terminal {
    fn serve<'a>(&'a self, _req: &'a Request, res: &'a mut ResponseWriter) -> HandlerFuture<'a> {
        Box::pin(async move {
            self.log.lock().unwrap().push("T");
            res.write(b"terminal");
            Ok(())
        })
    }
}

/// Terminal handler that always panics.
struct Panics;

impl Handler for Panics {
    fn serve<'a>(&'a self, _req: &'a Request, _res: &'a mut ResponseWriter) -> HandlerFuture<'a> {
        Box::pin(async { panic!("boom") })
    }
}

/// Terminal handler that always returns an error.
struct Failing;

impl Handler for Failing {
    fn serve<'a>(&'a self, _req: &'a Request, _res: &'a mut ResponseWriter) -> HandlerFuture<'a> {
        Box::pin(async { Err(Error::new("terminal unavailable")) })
    }
}

// ── Chain composition ─────────────────────────────────────────────────────────

#[tokio::test]
async fn chain_matches_manual_nesting() {
    let chained_log = call_log();
    let manual_log = call_log();

    let chained = chain(
        Terminal { log: Arc::clone(&chained_log) },
        &[Some(tagged("m0", &chained_log)), Some(tagged("m1", &chained_log))],
    );
    let manual = {
        let m0 = tagged("m0", &manual_log);
        let m1 = tagged("m1", &manual_log);
        m0(m1(Arc::new(Terminal { log: Arc::clone(&manual_log) }) as BoxedHandler))
    };

    let req = request();
    let mut chained_res = ResponseWriter::new();
    chained.serve(&req, &mut chained_res).await.unwrap();
    let mut manual_res = ResponseWriter::new();
    manual.serve(&req, &mut manual_res).await.unwrap();

    assert_eq!(*chained_log.lock().unwrap(), *manual_log.lock().unwrap());
    assert_eq!(chained_res.status(), manual_res.status());
    assert_eq!(chained_res.body(), manual_res.body());
}

#[tokio::test]
async fn absent_entries_are_skipped_in_place() {
    let log = call_log();
    let app = chain(
        Terminal { log: Arc::clone(&log) },
        &[None, Some(tagged("m0", &log)), None, Some(tagged("m1", &log)), None],
    );

    let req = request();
    let mut res = ResponseWriter::new();
    app.serve(&req, &mut res).await.unwrap();

    assert_eq!(*log.lock().unwrap(), ["m0", "m1", "T"]);
}

#[tokio::test]
async fn empty_chain_is_the_terminal() {
    let log = call_log();
    let app = chain(Terminal { log: Arc::clone(&log) }, &[]);

    let req = request();
    let mut res = ResponseWriter::new();
    app.serve(&req, &mut res).await.unwrap();

    assert_eq!(*log.lock().unwrap(), ["T"]);
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.body(), b"terminal");
}

#[tokio::test]
async fn middlewares_run_outside_in() {
    let log = call_log();
    let app = chain(
        Terminal { log: Arc::clone(&log) },
        &[Some(tagged("A", &log)), Some(tagged("B", &log)), Some(tagged("C", &log))],
    );

    let req = request();
    let mut res = ResponseWriter::new();
    app.serve(&req, &mut res).await.unwrap();

    assert_eq!(*log.lock().unwrap(), ["A", "B", "C", "T"]);
}

#[tokio::test]
async fn a_chain_embeds_as_a_terminal() {
    let log = call_log();
    let inner = chain(Terminal { log: Arc::clone(&log) }, &[Some(tagged("B", &log))]);
    let app = chain(inner, &[Some(tagged("A", &log))]);

    let req = request();
    let mut res = ResponseWriter::new();
    app.serve(&req, &mut res).await.unwrap();

    assert_eq!(*log.lock().unwrap(), ["A", "B", "T"]);
}

#[tokio::test]
async fn chain_fn_adapts_a_bare_function() {
    fn index<'a>(_req: &'a Request, res: &'a mut ResponseWriter) -> HandlerFuture<'a> {
        Box::pin(async move {
            res.write(b"index");
            Ok(())
        })
    }

    let app = chain_fn(index, &[]);
    let req = request();
    let mut res = ResponseWriter::new();
    app.serve(&req, &mut res).await.unwrap();

    assert_eq!(res.body(), b"index");
}

// ── Recovery boundary ─────────────────────────────────────────────────────────

#[tokio::test]
async fn returned_errors_pass_through_unchanged() {
    let logger = Arc::new(TestLogger::default());
    let app = Recovery::new(Failing, Arc::clone(&logger));

    let req = request();
    let mut res = ResponseWriter::new();
    let err = app.serve(&req, &mut res).await.unwrap_err();

    assert_eq!(err.to_string(), "terminal unavailable");
    assert!(logger.lines().is_empty());
    assert_eq!(res.status(), StatusCode::OK);
    assert!(res.body().is_empty());
}

#[tokio::test]
async fn panics_become_logged_500s() {
    let logger = Arc::new(TestLogger::default());
    let app = Recovery::new(Panics, Arc::clone(&logger));

    let req = request();
    let mut res = ResponseWriter::new();
    app.serve(&req, &mut res).await.unwrap();

    assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(res.body(), b"Internal Server Error");
    let lines = logger.lines();
    assert_eq!(lines.len(), 1);
    assert!(lines[0].contains("boom"));
}

#[tokio::test]
async fn headers_set_before_a_panic_survive_recovery() {
    let logger = Arc::new(TestLogger::default());
    let app = chain(
        Panics,
        &[
            Some(recovery::middleware(Arc::clone(&logger))),
            Some(set_header("x-request-id", "req-1")),
        ],
    );

    let req = request();
    let mut res = ResponseWriter::new();
    app.serve(&req, &mut res).await.unwrap();

    assert_eq!(res.header("x-request-id"), Some("req-1"));
    assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(res.body(), b"Internal Server Error");
    let lines = logger.lines();
    assert_eq!(lines.len(), 1);
    assert!(lines[0].contains("boom"));
}

#[tokio::test]
async fn recovery_does_not_touch_successful_responses() {
    let log = call_log();
    let logger = Arc::new(TestLogger::default());
    let app = Recovery::new(
        chain(Terminal { log: Arc::clone(&log) }, &[Some(tagged("A", &log))]),
        Arc::clone(&logger),
    );

    let req = request();
    let mut res = ResponseWriter::new();
    app.serve(&req, &mut res).await.unwrap();

    assert_eq!(*log.lock().unwrap(), ["A", "T"]);
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.body(), b"terminal");
    assert!(logger.lines().is_empty());
}
