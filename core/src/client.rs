//! The client: a dispatcher plus a transport.
//!
//! # Design
//! `GrafanaClient` holds an immutable `Dispatcher` (base URL, credentials)
//! and a `Transport`. Every resource method in `crate::api` is a call to
//! `request` or `request_discard` with a fixed verb, path and payload type,
//! so the build → execute → parse sequence lives only here.

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::config::ClientConfig;
use crate::dispatch::Dispatcher;
use crate::error::Result;
use crate::http::{HttpMethod, HttpRequest, HttpResponse, Transport};
use crate::transport::UreqTransport;

/// Placeholder for calls without a request body.
pub const NO_BODY: Option<&()> = None;

/// Typed client for the access-control, team and user endpoints.
///
/// Holds no per-call state; a shared reference can be used from several
/// threads when the transport allows it.
#[derive(Debug, Clone)]
pub struct GrafanaClient<T = UreqTransport> {
    dispatcher: Dispatcher,
    transport: T,
}

impl GrafanaClient<UreqTransport> {
    /// Client over a fresh `ureq` agent honouring the configured timeout.
    pub fn new(config: ClientConfig) -> Self {
        let transport = UreqTransport::new(config.timeout());
        Self::with_transport(config, transport)
    }
}

impl<T: Transport> GrafanaClient<T> {
    pub fn with_transport(config: ClientConfig, transport: T) -> Self {
        Self {
            dispatcher: Dispatcher::new(config),
            transport,
        }
    }

    pub fn config(&self) -> &ClientConfig {
        self.dispatcher.config()
    }

    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Execute one call and decode the 2xx body into `R`.
    pub fn request<B, R>(
        &self,
        method: HttpMethod,
        path: &str,
        query: &[(&str, &str)],
        body: Option<&B>,
    ) -> Result<R>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let request = self.dispatcher.build(method, path, query, body)?;
        let response = self.send(&request)?;
        self.dispatcher.parse(response)
    }

    /// Execute one call, require a 2xx status and drop the body.
    pub fn request_discard<B>(
        &self,
        method: HttpMethod,
        path: &str,
        query: &[(&str, &str)],
        body: Option<&B>,
    ) -> Result<()>
    where
        B: Serialize + ?Sized,
    {
        let request = self.dispatcher.build(method, path, query, body)?;
        let response = self.send(&request)?;
        self.dispatcher.parse_empty(response)
    }

    fn send(&self, request: &HttpRequest) -> Result<HttpResponse> {
        tracing::debug!(method = %request.method, url = %request.url, "dispatching request");
        let response = self.transport.execute(request)?;
        tracing::debug!(
            method = %request.method,
            url = %request.url,
            status = response.status,
            "received response"
        );
        Ok(response)
    }
}
