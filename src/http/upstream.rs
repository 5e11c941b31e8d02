//! Upstream forwarding.
//!
//! # Responsibilities
//! - Re-target the (possibly rewritten) request at the application server
//! - Stream request and response bodies without buffering
//! - Map upstream failures to 502 Bad Gateway
//!
//! # Design Decisions
//! - One upstream, plain HTTP/1.1; the gateway runs next to the app server
//! - The client's Host header is forwarded untouched

use std::str::FromStr;
use std::time::Instant;

use axum::{
    body::Body,
    extract::State,
    http::{
        uri::{Authority, InvalidUri, Scheme},
        HeaderValue, Request, StatusCode, Uri,
    },
    response::{IntoResponse, Response},
};
use hyper_util::{
    client::legacy::{connect::HttpConnector, Client},
    rt::TokioExecutor,
};

use crate::http::request::{request_id, X_REQUEST_ID};
use crate::observability::metrics;

/// HTTP client bound to the upstream application server.
#[derive(Clone, Debug)]
pub struct Upstream {
    client: Client<HttpConnector, Body>,
    authority: Authority,
}

impl Upstream {
    pub fn new(address: &str) -> Result<Self, InvalidUri> {
        let authority = Authority::from_str(address)?;
        let client = Client::builder(TokioExecutor::new()).build(HttpConnector::new());
        Ok(Self { client, authority })
    }

    fn target_uri(&self, uri: &Uri) -> Result<Uri, axum::http::Error> {
        let mut parts = uri.clone().into_parts();
        parts.scheme = Some(Scheme::HTTP);
        parts.authority = Some(self.authority.clone());
        if parts.path_and_query.is_none() {
            parts.path_and_query = Some("/".parse()?);
        }
        Ok(Uri::from_parts(parts)?)
    }
}

/// Fallback handler: forward every request to the upstream.
pub async fn forward_handler(State(upstream): State<Upstream>, request: Request<Body>) -> Response {
    let start_time = Instant::now();
    let request_id = request_id(&request).to_string();
    let method = request.method().to_string();

    tracing::debug!(
        request_id = %request_id,
        method = %method,
        path = %request.uri().path(),
        "Forwarding request"
    );

    let (mut parts, body) = request.into_parts();
    parts.uri = match upstream.target_uri(&parts.uri) {
        Ok(uri) => uri,
        Err(e) => {
            tracing::warn!(request_id = %request_id, error = %e, "Cannot build upstream URI");
            metrics::record_request(&method, 400, start_time);
            return (StatusCode::BAD_REQUEST, "Invalid request URI").into_response();
        }
    };
    if let Ok(value) = HeaderValue::from_str(&request_id) {
        parts.headers.insert(X_REQUEST_ID, value);
    }

    match upstream.client.request(Request::from_parts(parts, body)).await {
        Ok(response) => {
            metrics::record_request(&method, response.status().as_u16(), start_time);
            let (parts, body) = response.into_parts();
            Response::from_parts(parts, Body::new(body))
        }
        Err(e) => {
            tracing::error!(request_id = %request_id, upstream = %upstream.authority, error = %e, "Upstream error");
            metrics::record_request(&method, 502, start_time);
            (StatusCode::BAD_GATEWAY, "Upstream request failed").into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_target_uri_keeps_path_and_query() {
        let upstream = Upstream::new("127.0.0.1:3000").unwrap();
        let uri: Uri = "/en/settings?tab=1".parse().unwrap();

        assert_eq!(
            upstream.target_uri(&uri).unwrap().to_string(),
            "http://127.0.0.1:3000/en/settings?tab=1"
        );
    }

    #[test]
    fn test_invalid_authority() {
        assert!(Upstream::new("not an address").is_err());
    }
}
