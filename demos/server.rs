use axum::{body::Body, http::Request, middleware, routing, BoxError, Json, Router};
use futures_util::future::{BoxFuture, FutureExt};
use serde_json::json;
use std::net::SocketAddr;
use structured_logger::{async_json::new_writer, Builder};

use apierr::{wrap, APIError};

const APP_NAME: &str = env!("CARGO_PKG_NAME");
const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

#[tokio::main(flavor = "multi_thread", worker_threads = 2)]
async fn main() -> anyhow::Result<()> {
    Builder::with_level("info")
        .with_target_writer("*", new_writer(tokio::io::stdout()))
        .init();

    let app = Router::new()
        .route("/", routing::get(index))
        .route(
            "/quota",
            routing::get(index).route_layer(middleware::from_fn(wrap(check_quota))),
        )
        .layer(middleware::from_fn(wrap(require_request_id)));

    let addr = SocketAddr::from(([127, 0, 0, 1], 8080));
    log::info!("{}@{} start at {}", APP_NAME, APP_VERSION, &addr);
    axum::Server::bind(&addr)
        .serve(app.into_make_service())
        .await?;

    Ok(())
}

async fn index() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

fn require_request_id(req: &mut Request<Body>) -> BoxFuture<'_, Result<(), BoxError>> {
    let present = req.headers().contains_key("x-request-id");
    async move {
        if present {
            Ok(())
        } else {
            Err(APIError::bad_request("x-request-id header is required").into())
        }
    }
    .boxed()
}

// Stands in for a real quota lookup; always rejects, with a custom body.
fn check_quota(_req: &mut Request<Body>) -> BoxFuture<'_, Result<(), BoxError>> {
    async {
        Err(APIError::too_many_requests("quota exhausted")
            .with_body_parser(|err| json!({ "message": err.message.clone(), "retryAfter": 60 }))
            .into())
    }
    .boxed()
}
