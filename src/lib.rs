//! # strata
//!
//! Composable HTTP handlers, middleware chaining, and panic recovery.
//! Nothing more. Nothing less.
//!
//! ## The contract
//!
//! Your host server accepts connections, parses requests, and flushes
//! responses. strata does not — by design. The transport does transport
//! things. This crate does the one part that changes between applications:
//! how a request flows through layered behavior to a handler, and what
//! happens when that handler blows up.
//!
//! What the host server already owns — strata intentionally ignores:
//!
//! - **Routing** — your router, your rules
//! - **Body parsing and content negotiation** — bytes in, bytes out
//! - **TLS and connection lifecycle** — listener, keep-alive, shutdown
//! - **Concurrency** — one `serve` call per in-flight request, nothing shared
//!
//! What's left for strata:
//!
//! - A [`Handler`] capability — `serve(&Request, &mut ResponseWriter)`
//!   returning an explicit `Result`, implementable by functions via
//!   [`handler_fn`] and embeddable recursively (a composed chain is itself
//!   a handler)
//! - Onion composition — [`chain`] wraps a terminal handler in an ordered
//!   middleware list, first entry outermost, absent entries skipped
//! - A recovery boundary — [`Recovery`] turns a panic anywhere inside the
//!   chain into one logged diagnostic and a clean `500 Internal Server
//!   Error`, while returned errors pass through untouched
//!
//! ## Quick start
//!
//! ```rust
//! use strata::{chain, handler_fn, Handler, HandlerFuture, Method, Recovery,
//!              Request, ResponseWriter, TracingLogger};
//! use strata::middleware;
//!
//! fn hello<'a>(_req: &'a Request, res: &'a mut ResponseWriter) -> HandlerFuture<'a> {
//!     Box::pin(async move {
//!         res.write(b"hello");
//!         Ok(())
//!     })
//! }
//!
//! // trace() logs method, path, status, latency. The None slot is a
//! // conditionally-disabled middleware — skipped, not an error.
//! let app = Recovery::new(
//!     chain(handler_fn(hello), &[Some(middleware::trace()), None]),
//!     TracingLogger,
//! );
//!
//! let req = Request::new(Method::GET, "/", Vec::new(), Vec::new());
//! let mut res = ResponseWriter::new();
//! futures::executor::block_on(app.serve(&req, &mut res)).unwrap();
//! assert_eq!(res.body(), b"hello");
//! ```

mod error;
mod handler;
mod request;
mod response;

pub mod middleware;
pub mod recovery;

pub use error::Error;
pub use handler::{handler_fn, BoxedHandler, Handler, HandlerFunc, HandlerFuture};
pub use http::{Method, StatusCode};
pub use middleware::{chain, chain_fn, Middleware};
pub use recovery::{Logger, Recovery, TracingLogger};
pub use request::Request;
pub use response::ResponseWriter;
