//! Middleware layer and chain composition.
//!
//! A middleware is a transformation from handler to handler: it receives the
//! next layer and returns a new [`Handler`] that wraps it. The chain builder
//! folds an ordered list of middlewares around a terminal handler:
//!
//! ```text
//! chain(t, [m0, m1, m2])  ≡  m0(m1(m2(t)))
//! ```
//!
//! At request time `m0` runs first on the way in and last on the way out —
//! standard onion order, list order equals outside-in execution order.
//!
//! List entries are `Option<Middleware>` so a layer can be switched off at
//! startup without re-shaping the list; `None` entries are skipped. A
//! recovery boundary usually sits in slot zero so it sees panics from every
//! layer beneath it (see [`crate::recovery::middleware`]).

use std::sync::Arc;

use crate::handler::{BoxedHandler, Handler, HandlerFunc, HandlerFuture};
use crate::request::Request;
use crate::response::ResponseWriter;

mod trace;

pub use trace::trace;

/// A transformation applied to a [`Handler`], producing the wrapping handler.
///
/// Middleware has no identity beyond this function: order matters, equality
/// does not. `Arc` so one middleware value can appear in several chains.
pub type Middleware = Arc<dyn Fn(BoxedHandler) -> BoxedHandler + Send + Sync>;

/// Composes `middlewares` around a terminal handler.
///
/// Purely structural: nothing is invoked until the returned handler serves a
/// request, and construction cannot fail. `None` entries are skipped; the
/// order of the remaining entries is preserved.
///
/// The result is itself a [`Handler`], so a chain can be the terminal of a
/// larger chain.
pub fn chain(terminal: impl Handler + 'static, middlewares: &[Option<Middleware>]) -> BoxedHandler {
    let mut next: BoxedHandler = Arc::new(terminal);
    for layer in middlewares.iter().rev() {
        if let Some(mw) = layer {
            next = mw(next);
        }
    }
    next
}

/// [`chain`] with the terminal given as a bare function, as accepted by
/// [`handler_fn`](crate::handler_fn).
pub fn chain_fn<F>(terminal: F, middlewares: &[Option<Middleware>]) -> BoxedHandler
where
    F: for<'a> Fn(&'a Request, &'a mut ResponseWriter) -> HandlerFuture<'a>
        + Send
        + Sync
        + 'static,
{
    chain(HandlerFunc(terminal), middlewares)
}
