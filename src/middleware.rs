//! Method override for HTML forms, which can only submit GET and POST.
//!
//! A `POST` whose query string carries `_method=PUT|PATCH|DELETE` is rewritten to
//! that method. This must run before routing, so it wraps the whole router.

use axum::{
    extract::{Query, Request},
    http::{Method, Uri},
    middleware::Next,
    response::Response,
};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct OverrideQuery {
    #[serde(rename = "_method")]
    method: Option<String>,
}

pub async fn method_override(mut req: Request, next: Next) -> Response {
    if req.method() == Method::POST {
        if let Some(method) = override_from_query(req.uri()) {
            tracing::trace!(%method, uri = %req.uri(), "method override");
            *req.method_mut() = method;
        }
    }
    next.run(req).await
}

fn override_from_query(uri: &Uri) -> Option<Method> {
    let Query(query) = Query::<OverrideQuery>::try_from_uri(uri).ok()?;
    match query.method?.trim().to_ascii_uppercase().as_str() {
        "PUT" => Some(Method::PUT),
        "PATCH" => Some(Method::PATCH),
        "DELETE" => Some(Method::DELETE),
        _ => None,
    }
}
