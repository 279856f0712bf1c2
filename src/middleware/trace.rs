//! Built-in request tracing middleware.

use std::sync::Arc;
use std::time::Instant;

use tracing::info;

use crate::handler::{BoxedHandler, Handler, HandlerFuture};
use crate::middleware::Middleware;
use crate::request::Request;
use crate::response::ResponseWriter;

/// Logs one line per request: method, path, response status, latency.
///
/// Emits at `info` level through [`tracing`] after the inner layers finish,
/// so the logged status is the one the client will see.
///
/// ```rust,no_run
/// use strata::{chain_fn, middleware};
/// # use strata::{HandlerFuture, Request, ResponseWriter};
/// # fn index<'a>(_r: &'a Request, _w: &'a mut ResponseWriter) -> HandlerFuture<'a> {
/// #     Box::pin(async { Ok(()) })
/// # }
///
/// let app = chain_fn(index, &[Some(middleware::trace())]);
/// ```
pub fn trace() -> Middleware {
    Arc::new(|next| Arc::new(Trace { next }) as BoxedHandler)
}

struct Trace {
    next: BoxedHandler,
}

impl Handler for Trace {
    fn serve<'a>(&'a self, req: &'a Request, res: &'a mut ResponseWriter) -> HandlerFuture<'a> {
        Box::pin(async move {
            let start = Instant::now();
            let outcome = self.next.serve(req, &mut *res).await;
            info!(
                method = %req.method(),
                path = req.path(),
                status = res.status().as_u16(),
                elapsed = ?start.elapsed(),
                "request"
            );
            outcome
        })
    }
}
