//! Endpoint lifecycle shared by every marketplace endpoint.
//!
//! An endpoint describes *what* to ask for ([`Endpoint`]); an [`OpenSeaClient`]
//! owns *how* it is sent (transport, base URL, key, timeout). Endpoints hold a
//! client rather than extending one.

use std::fmt::{Display, Formatter};
use std::sync::Arc;

use tracing::{info, warn};

use crate::{
    ClientConfig, ConfigError, EventsError, HttpClient, HttpRequest, HttpResponse,
    ReqwestHttpClient,
};

/// Registry of API paths, joined to the configured base URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ApiEndpoint {
    Events,
}

impl ApiEndpoint {
    pub const fn path(self) -> &'static str {
        match self {
            Self::Events => "events",
        }
    }

    pub fn url(self, base_url: &str) -> String {
        format!("{}/{}", base_url.trim_end_matches('/'), self.path())
    }
}

impl Display for ApiEndpoint {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.path())
    }
}

/// Request/response contract implemented by each endpoint.
pub trait Endpoint {
    type Response;

    fn api_endpoint(&self) -> ApiEndpoint;

    /// Query pairs in wire order. Absent optional filters are left out.
    fn query_params(&self) -> Vec<(&'static str, String)>;

    fn parse(&self, response: &HttpResponse) -> Result<Self::Response, EventsError>;
}

/// Transport plus configuration, shared by endpoint instances.
#[derive(Clone)]
pub struct OpenSeaClient {
    http_client: Arc<dyn HttpClient>,
    config: ClientConfig,
}

impl OpenSeaClient {
    pub fn new(http_client: Arc<dyn HttpClient>, config: ClientConfig) -> Self {
        Self {
            http_client,
            config,
        }
    }

    /// Reqwest transport configured from `FERROSEA_*` variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self::new(
            Arc::new(ReqwestHttpClient::new()),
            ClientConfig::from_env()?,
        ))
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn build_request<E>(&self, endpoint: &E) -> HttpRequest
    where
        E: Endpoint + ?Sized,
    {
        endpoint
            .query_params()
            .into_iter()
            .fold(
                HttpRequest::get(endpoint.api_endpoint().url(self.config.base_url())),
                |request, (name, value)| request.with_query_param(name, value),
            )
            .with_auth(self.config.auth())
            .with_timeout_ms(self.config.timeout_ms())
    }

    /// Issue one GET for `endpoint`. Non-2xx statuses become [`EventsError::Status`].
    pub async fn get<E>(&self, endpoint: &E) -> Result<HttpResponse, EventsError>
    where
        E: Endpoint + ?Sized,
    {
        let request = self.build_request(endpoint);
        info!(
            endpoint = %endpoint.api_endpoint(),
            url = %request.url,
            params = request.query.len(),
            "issuing marketplace request"
        );

        let response = self.http_client.execute(request).await?;
        if !response.is_success() {
            warn!(
                endpoint = %endpoint.api_endpoint(),
                status = response.status,
                "marketplace request failed"
            );
            return Err(EventsError::Status {
                status: response.status,
                body: response.body,
            });
        }

        Ok(response)
    }
}

impl std::fmt::Debug for OpenSeaClient {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenSeaClient")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
