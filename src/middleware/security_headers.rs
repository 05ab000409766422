use axum::{
    body::Body,
    http::{Request, Response, header},
    middleware::Next,
};

/// Add standard security headers to all responses
pub async fn add_security_headers(request: Request<Body>, next: Next) -> Response<Body> {
    let mut response = next.run(request).await;

    let headers = response.headers_mut();

    // Prevent MIME type sniffing
    if let Ok(value) = "nosniff".parse() {
        headers.insert(header::X_CONTENT_TYPE_OPTIONS, value);
    }

    // Prevent clickjacking
    if let Ok(value) = "DENY".parse() {
        headers.insert(header::X_FRAME_OPTIONS, value);
    }

    if let Ok(value) = "1; mode=block".parse() {
        headers.insert(header::HeaderName::from_static("x-xss-protection"), value);
    }

    if let Ok(value) = "strict-origin-when-cross-origin".parse() {
        headers.insert(header::REFERRER_POLICY, value);
    }

    response
}
