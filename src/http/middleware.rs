//! Locale middleware.
//! Applies the dispatcher's decision to each request and attaches the
//! locale cookie to whatever response goes back.

use std::sync::Arc;

use axum::{
    body::Body,
    extract::State,
    http::{header, uri::PathAndQuery, HeaderName, HeaderValue, Request, StatusCode, Uri},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};

use crate::http::request::request_id;
use crate::locale::{Decision, LocaleDispatcher, ResponseAction};
use crate::observability::metrics;

/// Header carrying the path the client asked for before a rewrite.
pub const X_ORIGINAL_PATH: HeaderName = HeaderName::from_static("x-original-path");

/// Path the client requested, attached to rewritten requests.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OriginalPath(pub String);

pub async fn locale_middleware(
    State(dispatcher): State<Arc<LocaleDispatcher>>,
    mut req: Request<Body>,
    next: Next,
) -> Response {
    let Decision { action, set_cookie } = dispatcher.decide(&req);
    metrics::record_locale_action(action.kind());

    let mut response = match action {
        ResponseAction::PassThrough => next.run(req).await,
        ResponseAction::Rewrite(path) => {
            let original = req.uri().path().to_string();
            let uri = match replace_path(req.uri(), &path) {
                Ok(uri) => uri,
                Err(e) => {
                    tracing::warn!(request_id = %request_id(&req), rewrite_to = %path, error = %e, "Invalid rewrite target");
                    return (StatusCode::BAD_REQUEST, "Invalid rewrite target").into_response();
                }
            };

            tracing::debug!(request_id = %request_id(&req), from = %original, to = %path, "Locale rewrite");

            *req.uri_mut() = uri;
            if let Ok(value) = HeaderValue::from_str(&original) {
                req.headers_mut().insert(X_ORIGINAL_PATH, value);
            }
            req.extensions_mut().insert(OriginalPath(original));
            next.run(req).await
        }
        ResponseAction::Redirect(location) => {
            let target = match req.uri().query() {
                Some(query) => format!("{}?{}", location, query),
                None => location,
            };
            tracing::debug!(request_id = %request_id(&req), to = %target, "Locale redirect");
            Redirect::temporary(&target).into_response()
        }
    };

    if let Some(value) = set_cookie.and_then(|c| HeaderValue::from_str(&c).ok()) {
        response.headers_mut().append(header::SET_COOKIE, value);
    }
    response
}

/// Swap the path of `uri`, keeping its scheme, authority and query.
pub fn replace_path(uri: &Uri, path: &str) -> Result<Uri, axum::http::Error> {
    let path_and_query = match uri.query() {
        Some(query) => format!("{}?{}", path, query),
        None => path.to_string(),
    };

    let mut parts = uri.clone().into_parts();
    parts.path_and_query = Some(PathAndQuery::try_from(path_and_query)?);
    Ok(Uri::from_parts(parts)?)
}
