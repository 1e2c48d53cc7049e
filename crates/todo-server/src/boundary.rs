use std::any::Any;

use axum::Router;
use axum::body::Body;
use axum::extract::Request;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use http::header::{CONTENT_LENGTH, CONTENT_TYPE};
use http::{Method, Uri};
use tower_http::catch_panic::CatchPanicLayer;

use crate::fault::{Fault, Translated};

/// Largest framework error body that is forwarded as a message
const MAX_FORWARDED_BODY: usize = 4 * 1024;

/// Wrap a router so that every failure leaving it is an error envelope
///
/// - unmatched routes become a classified 404
/// - handler panics become an unclassified 500
/// - any other error response not produced by [`Fault`] (extractor
///   rejections, 405, ...) is rewritten with its status preserved
pub fn fault_boundary(router: Router) -> Router {
    router
        .fallback(route_not_found)
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(axum::middleware::from_fn(envelope_middleware))
}

async fn route_not_found(method: Method, uri: Uri) -> Fault {
    Fault::not_found(format!("Route {method}:{} not found", uri.path()))
}

#[allow(clippy::needless_pass_by_value)]
fn panic_response(payload: Box<dyn Any + Send + 'static>) -> Response {
    let detail = payload
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| payload.downcast_ref::<&str>().copied())
        .unwrap_or("non-string panic payload");

    Fault::Unclassified(anyhow::anyhow!("handler panicked: {detail}")).into_response()
}

/// Rewrite error responses that bypassed [`Fault`]
async fn envelope_middleware(request: Request, next: Next) -> Response {
    let response = next.run(request).await;
    let status = response.status();

    if !(status.is_client_error() || status.is_server_error()) || response.extensions().get::<Translated>().is_some() {
        return response;
    }

    let (parts, body) = response.into_parts();

    // Server-side text is never forwarded, so there is no point reading it
    let message = if status.is_client_error() && is_plain_text(&parts.headers) {
        read_message(body).await
    } else {
        None
    };

    let message = message
        .or_else(|| status.canonical_reason().map(str::to_owned))
        .unwrap_or_else(|| format!("HTTP {}", status.as_u16()));

    let mut translated = Fault::classified(status, message).into_response();

    for (name, value) in &parts.headers {
        if name != CONTENT_TYPE && name != CONTENT_LENGTH {
            translated.headers_mut().append(name.clone(), value.clone());
        }
    }

    translated
}

fn is_plain_text(headers: &http::HeaderMap) -> bool {
    headers
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.starts_with("text/plain"))
}

async fn read_message(body: Body) -> Option<String> {
    let bytes = axum::body::to_bytes(body, MAX_FORWARDED_BODY).await.ok()?;
    let text = String::from_utf8(bytes.to_vec()).ok()?;
    let text = text.trim();

    (!text.is_empty()).then(|| text.to_owned())
}
