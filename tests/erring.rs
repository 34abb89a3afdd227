use apierr::{APIError, APIErrorOption};
use axum::BoxError;
use serde_json::json;

#[test]
fn constructor_preserves_fields() {
    let err = APIError::new(418, "teapot");
    assert_eq!(err.status_code, 418);
    assert_eq!(err.message, "teapot");

    let err = APIError::new(0, "zero is passed through");
    assert_eq!(err.status_code, 0);
}

#[test]
fn status_constructors() {
    assert_eq!(APIError::bad_request("m").status_code, 400);
    assert_eq!(APIError::unauthorized("m").status_code, 401);
    assert_eq!(APIError::forbidden("m").status_code, 403);
    assert_eq!(APIError::not_found("m").status_code, 404);
    assert_eq!(APIError::conflict("m").status_code, 409);
    assert_eq!(APIError::unprocessable_entity("m").status_code, 422);
    assert_eq!(APIError::too_many_requests("m").status_code, 429);
    assert_eq!(APIError::internal_server_error("m").status_code, 500);
    assert_eq!(APIError::not_found("missing").message, "missing");
}

#[test]
fn display_yields_message() {
    let err = APIError::conflict("already exists");
    assert_eq!(err.to_string(), "already exists");
}

#[test]
fn propagates_as_box_error() {
    fn fails() -> Result<(), BoxError> {
        Err(APIError::not_found("no such thing").into())
    }

    let err = fails().unwrap_err();
    let err = err.downcast::<APIError>().expect("should stay typed");
    assert_eq!(err.status_code, 404);
}

#[test]
fn prevent_abort_leaves_original_untouched() {
    let original = APIError::conflict("dup");
    let kept = original.clone();
    let changed = original.prevent_abort();
    assert!(changed.prevents_abort());
    assert!(!kept.prevents_abort());
}

#[test]
fn body_parser_leaves_original_untouched() {
    let original = APIError::unprocessable_entity("bad field");
    let kept = original.clone();
    let changed = original.with_body_parser(|err| json!({ "errors": [err.message.clone()] }));
    assert_eq!(changed.response_body(), json!({ "errors": ["bad field"] }));
    assert_eq!(
        kept.response_body(),
        json!({ "statusCode": 422, "message": "bad field" })
    );
}

#[test]
fn options_apply_last_write_wins() {
    let err = APIError::with_options(
        429,
        "slow down",
        [
            APIErrorOption::PreventAbort(true),
            APIErrorOption::PreventAbort(false),
        ],
    );
    assert!(!err.prevents_abort());

    let err = APIError::with_options(
        422,
        "bad field",
        [
            APIErrorOption::body_parser(|_| json!({ "which": "first" })),
            APIErrorOption::body_parser(|_| json!({ "which": "second" })),
        ],
    );
    assert_eq!(err.response_body(), json!({ "which": "second" }));
}

#[test]
fn serializes_status_and_message_only() {
    let err = APIError::conflict("conflict").prevent_abort();
    let value = serde_json::to_value(&err).unwrap();
    assert_eq!(value, json!({ "statusCode": 409, "message": "conflict" }));
}

#[test]
fn zero_status_is_left_out_of_the_body() {
    let err = APIError::new(0, "boom");
    assert_eq!(err.response_body(), json!({ "message": "boom" }));
}
