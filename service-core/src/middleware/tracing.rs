use axum::http::HeaderValue;
use axum::{extract::Request, middleware::Next, response::Response};
use uuid::Uuid;

pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Attach a request id to the request and echo it on the response.
///
/// Reuses an incoming `x-request-id` so upstream callers can correlate logs.
pub async fn request_id_middleware(mut req: Request, next: Next) -> Response {
    let request_id = req
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|h| h.to_str().ok())
        .map(str::to_owned)
        .unwrap_or_else(|| Uuid::new_v4().to_string());

    if let Ok(header_value) = HeaderValue::from_str(&request_id) {
        req.headers_mut()
            .insert(REQUEST_ID_HEADER, header_value.clone());
        let mut response = next.run(req).await;
        response
            .headers_mut()
            .insert(REQUEST_ID_HEADER, header_value);
        response
    } else {
        next.run(req).await
    }
}
