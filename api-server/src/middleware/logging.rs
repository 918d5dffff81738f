//! HTTP 请求日志中间件

use axum::middleware::Next;

pub async fn log_request(
    request: http::Request<axum::body::Body>,
    next: Next,
) -> http::Response<axum::body::Body> {
    let method = request.method().clone();
    let uri = request.uri().clone();

    let response = next.run(request).await;

    let status = response.status();

    tracing::info!(target: "http_access", "{} {} {}", method, uri, status);

    response
}
