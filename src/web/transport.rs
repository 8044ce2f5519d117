//! `Transport` over `fetch`, via `gloo-net`.

use futures::FutureExt;
use futures::future::LocalBoxFuture;
use gloo_net::http::Request;

use crate::consts::FORM_CONTENT_TYPE;
use crate::transport::{Response, Transport, TransportError};

/// Same-origin `fetch` with the browser's default credentials policy.
#[derive(Clone, Copy, Debug, Default)]
pub struct FetchTransport;

impl Transport for FetchTransport {
    fn post_form(&self, url: &str, body: String) -> LocalBoxFuture<'static, Result<Response, TransportError>> {
        let request = Request::post(url)
            .header("Content-Type", FORM_CONTENT_TYPE)
            .body(body)
            .map_err(|err| TransportError::Build(err.to_string()));
        async move {
            let resp = request?
                .send()
                .await
                .map_err(|err| TransportError::Network(err.to_string()))?;
            Ok(Response::new(resp.status()))
        }
        .boxed_local()
    }
}
