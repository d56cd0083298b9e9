use axum::{body::Body, http::Request, middleware::Next, response::Response};
use hyper::Method;
use tracing::info;

pub async fn logger_middleware(method: Method, request: Request<Body>, next: Next<Body>) -> Response {
    let uri = request.uri().clone();
    let response = next.run(request).await;

    info!("{} {} {}", method, uri, response.status().as_u16());

    response
}
