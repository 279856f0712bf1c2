//! Handler trait and type erasure.
//!
//! # The capability
//!
//! A handler is anything that can take a request plus a mutable response
//! sink and either finish normally or return an [`Error`]. The sink is
//! threaded *down* the chain rather than a response being returned *up* it,
//! so partial response state (headers set by an outer layer) survives
//! whatever an inner layer does — including panicking. The recovery boundary
//! depends on that.
//!
//! # How handlers are stored
//!
//! Middleware has to wrap handlers of *different* concrete types behind one
//! interface, so composition works on **trait objects**:
//!
//! ```text
//! fn hello(req: &Request, res: &mut ResponseWriter) -> HandlerFuture<'_>   ← user writes this
//!        ↓ handler_fn(hello)
//! HandlerFunc(hello)                             ← adapter, still a concrete type
//!        ↓ stored as BoxedHandler = Arc<dyn Handler>
//! handler.serve(req, res)  at request time       ← one vtable dispatch
//!        ↓
//! Box::pin(async move { … })                     ← HandlerFuture
//! ```
//!
//! The per-request cost is one `Arc` clone per wrapping layer at composition
//! time (not per request) and one virtual call per layer at request time —
//! negligible next to network I/O.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use crate::error::Error;
use crate::request::Request;
use crate::response::ResponseWriter;

/// A heap-allocated, type-erased future for one in-flight `serve` call.
///
/// `Pin<Box<…>>` because the runtime must poll the future in place; `Send`
/// so the host may move it across worker threads. The lifetime ties the
/// future to the request and response borrows it captures.
pub type HandlerFuture<'a> = Pin<Box<dyn Future<Output = Result<(), Error>> + Send + 'a>>;

/// Responds to one HTTP request.
///
/// Implementations read from `req`, mutate `res`, and report failure through
/// the returned `Result` — never by panicking on purpose. Holding internal
/// state is fine; the chain itself never stores anything per request.
pub trait Handler: Send + Sync {
    fn serve<'a>(&'a self, req: &'a Request, res: &'a mut ResponseWriter) -> HandlerFuture<'a>;
}

/// A heap-allocated, type-erased handler shared across wrapping layers.
///
/// `Arc` rather than `Box` so middleware can hold the next layer while the
/// composed chain is itself cheaply cloneable and embeddable elsewhere.
pub type BoxedHandler = Arc<dyn Handler>;

/// A composed chain is itself a handler — chains nest.
impl<H: Handler + ?Sized> Handler for Arc<H> {
    fn serve<'a>(&'a self, req: &'a Request, res: &'a mut ResponseWriter) -> HandlerFuture<'a> {
        (**self).serve(req, res)
    }
}

/// Adapter that lets an ordinary function be used as a [`Handler`].
///
/// The function receives exactly the `serve` arguments and its result is
/// forwarded unchanged — the adapter adds no behavior of its own. Construct
/// via [`handler_fn`], or directly: `HandlerFunc(my_handler)`.
pub struct HandlerFunc<F>(pub F);

impl<F> Handler for HandlerFunc<F>
where
    F: for<'a> Fn(&'a Request, &'a mut ResponseWriter) -> HandlerFuture<'a> + Send + Sync,
{
    fn serve<'a>(&'a self, req: &'a Request, res: &'a mut ResponseWriter) -> HandlerFuture<'a> {
        (self.0)(req, res)
    }
}

/// Wraps a bare function as a [`Handler`].
///
/// ```rust
/// use strata::{handler_fn, HandlerFuture, Request, ResponseWriter};
///
/// fn teapot<'a>(_req: &'a Request, res: &'a mut ResponseWriter) -> HandlerFuture<'a> {
///     Box::pin(async move {
///         res.set_status(strata::StatusCode::IM_A_TEAPOT);
///         Ok(())
///     })
/// }
///
/// let handler = handler_fn(teapot);
/// ```
pub fn handler_fn<F>(f: F) -> HandlerFunc<F>
where
    F: for<'a> Fn(&'a Request, &'a mut ResponseWriter) -> HandlerFuture<'a> + Send + Sync,
{
    HandlerFunc(f)
}
