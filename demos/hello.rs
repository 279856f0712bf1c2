//! Minimal strata example — a traced, panic-safe chain driving synthetic
//! requests. No server: the "host transport" here is stdout.
//!
//! Run with:
//!   RUST_LOG=info cargo run --example hello

use strata::{chain_fn, middleware, recovery, Handler, HandlerFuture, Method, Request,
             ResponseWriter, TracingLogger};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    let layers = [
        Some(recovery::middleware(TracingLogger)),
        Some(middleware::trace()),
        None, // auth would slot in here when enabled
    ];

    let req = Request::new(
        Method::GET,
        "/hello",
        vec![("host".to_owned(), "localhost".to_owned())],
        Vec::new(),
    );
    let mut out = tokio::io::stdout();

    // A healthy handler: 200, body written by the terminal layer.
    let app = chain_fn(hello, &layers);
    let mut res = ResponseWriter::new();
    app.serve(&req, &mut res).await.unwrap();
    res.write_to(&mut out).await.unwrap();

    // A buggy handler: the panic is contained by the recovery layer and
    // comes out as a clean 500. The diagnostic lands on the log, not in
    // the response body.
    let app = chain_fn(broken, &layers);
    let mut res = ResponseWriter::new();
    app.serve(&req, &mut res).await.unwrap();
    res.write_to(&mut out).await.unwrap();
}

fn hello<'a>(req: &'a Request, res: &'a mut ResponseWriter) -> HandlerFuture<'a> {
    Box::pin(async move {
        res.set_header("content-type", "text/plain; charset=utf-8");
        res.write(b"hello from ");
        res.write(req.path().as_bytes());
        res.write(b"\n");
        Ok(())
    })
}

fn broken<'a>(_req: &'a Request, _res: &'a mut ResponseWriter) -> HandlerFuture<'a> {
    Box::pin(async { panic!("flag file missing") })
}
