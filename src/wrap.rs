use axum::{
    http::Request,
    middleware::Next,
    response::{IntoResponse, Response},
    BoxError,
};
use futures_util::future::{BoxFuture, FutureExt};

use crate::erring::APIError;

/// Turns a fallible guard into a middleware function for
/// [`axum::middleware::from_fn`].
///
/// The guard runs before the rest of the chain and may reject the request
/// by returning an error:
///
/// - `Ok(())` lets the chain run and passes its response through untouched.
/// - An [`APIError`] aborts the chain and responds with its status code and
///   JSON body, unless the error was built with
///   [`prevent_abort`](APIError::prevent_abort), in which case the chain
///   still runs but the error response is what the client receives.
/// - Any other error aborts the chain and responds with a plain
///   `500 {"message": ..}`, keeping nothing of the error but its text.
///
/// ```rust,no_run
/// use apierr::{wrap, APIError};
/// use axum::{body::Body, http::Request, middleware, routing, BoxError, Router};
/// use futures_util::future::{BoxFuture, FutureExt};
///
/// fn check_auth(req: &mut Request<Body>) -> BoxFuture<'_, Result<(), BoxError>> {
///     let authorized = req.headers().contains_key("authorization");
///     async move {
///         if authorized {
///             Ok(())
///         } else {
///             Err(APIError::unauthorized("missing credentials").into())
///         }
///     }
///     .boxed()
/// }
///
/// let app: Router = Router::new()
///     .route("/", routing::get(|| async { "ok" }))
///     .layer(middleware::from_fn(wrap(check_auth)));
/// ```
pub fn wrap<B, F>(
    f: F,
) -> impl Fn(Request<B>, Next<B>) -> BoxFuture<'static, Response> + Clone + Send + 'static
where
    B: Send + 'static,
    F: for<'a> Fn(&'a mut Request<B>) -> BoxFuture<'a, Result<(), BoxError>>
        + Clone
        + Send
        + 'static,
{
    move |mut req: Request<B>, next: Next<B>| {
        let f = f.clone();
        async move {
            let result = f(&mut req).await;
            match result {
                Ok(()) => next.run(req).await,
                Err(err) => match err.downcast::<APIError>() {
                    Ok(err) => {
                        let err = *err;
                        if err.prevent_abort {
                            // The chain still runs for its side effects, but
                            // the error response wins.
                            let _ = next.run(req).await;
                        }
                        err.into_response()
                    }
                    // An error that did not come from this crate carries no
                    // status; it degrades to 500 with a bare message.
                    Err(err) => APIError::new(0, err.to_string()).into_response(),
                },
            }
        }
        .boxed()
    }
}
