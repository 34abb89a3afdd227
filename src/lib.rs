//! Typed HTTP API errors and a guard wrapper for [`axum`] handler chains.
//!
//! `apierr` translates application-level errors into JSON responses at the
//! edge of the middleware chain. Handlers and guards return plain
//! `Result<(), BoxError>`; [`wrap`] inspects the error, writes
//! `{"statusCode": .., "message": ..}` (or a custom body) with the right
//! status line, and decides whether the rest of the chain still runs.
//!
//! ```rust,no_run
//! use apierr::{wrap, APIError};
//! use axum::{body::Body, http::Request, middleware, routing, BoxError, Router};
//! use futures_util::future::{BoxFuture, FutureExt};
//!
//! fn require_request_id(req: &mut Request<Body>) -> BoxFuture<'_, Result<(), BoxError>> {
//!     let present = req.headers().contains_key("x-request-id");
//!     async move {
//!         if present {
//!             Ok(())
//!         } else {
//!             Err(APIError::bad_request("x-request-id header is required").into())
//!         }
//!     }
//!     .boxed()
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     let app = Router::new()
//!         .route("/", routing::get(|| async { "ok" }))
//!         .layer(middleware::from_fn(wrap(require_request_id)));
//!
//!     axum::Server::bind(&([127, 0, 0, 1], 8080).into())
//!         .serve(app.into_make_service())
//!         .await
//!         .unwrap();
//! }
//! ```
//!
//! Errors not built through this crate's constructors are treated as opaque
//! internal failures: the client gets a 500 with `{"message": ..}` and
//! nothing else.

mod erring;
mod wrap;

pub use erring::{APIError, APIErrorOption, BodyParser};
pub use wrap::wrap;
