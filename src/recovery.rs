//! Panic recovery boundary.
//!
//! A handler that panics must not take the serving task down with it.
//! [`Recovery`] wraps an inner handler and catches any panic raised while it
//! runs, logging the payload once and finalizing the response as a generic
//! `500 Internal Server Error`. No panic detail reaches the client; the
//! diagnostic goes only to the [`Logger`].
//!
//! Panics and returned errors are deliberately different things here. An
//! `Err` from the inner handler is an *expected* failure — it passes through
//! this boundary untouched, unlogged, for the caller to deal with. A panic is
//! a programming bug (slice out of range, unwrap on `None`) and gets the
//! contain-log-and-500 treatment. A chain that is not wrapped in a boundary
//! keeps the host's default panic behavior.

use std::any::Any;
use std::fmt;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use futures::FutureExt;
use http::StatusCode;
use tracing::error;

use crate::handler::{BoxedHandler, Handler, HandlerFuture};
use crate::middleware::Middleware;
use crate::request::Request;
use crate::response::ResponseWriter;

/// A diagnostic sink for recovered panics.
///
/// Called exactly once per recovered panic, with the formatted payload. The
/// logger is shared by every in-flight request, so implementations must be
/// safe to call concurrently. Best-effort: the boundary does not handle
/// logger failures.
pub trait Logger: Send + Sync {
    fn log(&self, args: fmt::Arguments<'_>);
}

/// One logger for many chains.
impl<L: Logger + ?Sized> Logger for Arc<L> {
    fn log(&self, args: fmt::Arguments<'_>) {
        (**self).log(args)
    }
}

/// The default [`Logger`]: forwards diagnostics to `tracing::error!`.
#[derive(Clone, Copy)]
pub struct TracingLogger;

impl Logger for TracingLogger {
    fn log(&self, args: fmt::Arguments<'_>) {
        error!("{args}");
    }
}

/// A [`Handler`] that recovers from all panics raised by `inner`.
///
/// Wrap it outermost — typically around an entire [`chain`](crate::chain) —
/// so it contains panics from every layer beneath it:
///
/// ```rust,no_run
/// use strata::{chain_fn, Recovery, TracingLogger};
/// # use strata::{HandlerFuture, Request, ResponseWriter};
/// # fn index<'a>(_r: &'a Request, _w: &'a mut ResponseWriter) -> HandlerFuture<'a> {
/// #     Box::pin(async { Ok(()) })
/// # }
///
/// let app = Recovery::new(chain_fn(index, &[]), TracingLogger);
/// ```
pub struct Recovery<H, L> {
    inner: H,
    logger: L,
}

impl<H: Handler, L: Logger> Recovery<H, L> {
    pub fn new(inner: H, logger: L) -> Self {
        Self { inner, logger }
    }
}

impl<H: Handler, L: Logger> Handler for Recovery<H, L> {
    fn serve<'a>(&'a self, req: &'a Request, res: &'a mut ResponseWriter) -> HandlerFuture<'a> {
        Box::pin(async move {
            // The sink crosses the unwind boundary on purpose: whatever
            // partial state the failed handler left behind is finalized by
            // the 500 write below.
            let attempt = AssertUnwindSafe(self.inner.serve(req, &mut *res))
                .catch_unwind()
                .await;

            match attempt {
                Ok(outcome) => outcome,
                Err(payload) => {
                    self.logger
                        .log(format_args!("handler panic: {}", panic_message(&*payload)));
                    res.error(StatusCode::INTERNAL_SERVER_ERROR);
                    Ok(())
                }
            }
        })
    }
}

/// [`Recovery`] as a [`Middleware`], for use in slot zero of a chain list.
///
/// The logger is cloned into each chain the middleware wraps.
pub fn middleware<L>(logger: L) -> Middleware
where
    L: Logger + Clone + 'static,
{
    Arc::new(move |next| Arc::new(Recovery::new(next, logger.clone())) as BoxedHandler)
}

/// Textual form of a panic payload.
///
/// `panic!("…")` carries `&str`, `panic!("{x}")` carries `String`. Anything
/// else has no known representation.
fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(s) = payload.downcast_ref::<&'static str>() {
        s
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.as_str()
    } else {
        "non-string panic payload"
    }
}
