use std::time::Duration;

use futures_util::StreamExt;
use pomcheck_logging::{pom_debug, pom_info, pom_warn};
use reqwest::header::CONTENT_TYPE;
use reqwest::StatusCode;
use url::Url;

use crate::{ApiCall, ApiResponse, ClientError, FailureKind};

/// Public purplecat deployment.
pub const DEFAULT_ENDPOINT: &str = "https://afternoon-wave-39227.herokuapp.com/purplecat/api/";

const POM_CONTENT_TYPE: &str = "application/xml";

#[derive(Debug, Clone)]
pub struct ClientSettings {
    /// Root of the API; `licenses` and `caches` are resolved against it.
    pub base_endpoint: String,
    pub connect_timeout: Duration,
    /// `None` waits for the service as long as it takes.
    pub request_timeout: Option<Duration>,
    pub max_bytes: u64,
    /// Dependency depth the service should resolve; service default when `None`.
    pub depth: Option<u32>,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            base_endpoint: DEFAULT_ENDPOINT.to_string(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: None,
            max_bytes: 8 * 1024 * 1024,
            depth: None,
        }
    }
}

/// Resolve the full URL for `call`. A missing trailing slash on the base is
/// tolerated so that `.../api` and `.../api/` behave the same.
pub fn endpoint_url(settings: &ClientSettings, call: &ApiCall) -> Result<Url, ClientError> {
    let mut base = settings.base_endpoint.trim().to_string();
    if !base.ends_with('/') {
        base.push('/');
    }
    let base = Url::parse(&base)
        .map_err(|err| ClientError::new(FailureKind::InvalidEndpoint, format!("{base}: {err}")))?;

    let resource = match call {
        ApiCall::LookupByUrl { .. } | ApiCall::SubmitPom { .. } => "licenses",
        ApiCall::DumpCaches | ApiCall::ClearCaches => "caches",
    };
    let mut url = base
        .join(resource)
        .map_err(|err| ClientError::new(FailureKind::InvalidEndpoint, err.to_string()))?;

    match call {
        ApiCall::LookupByUrl { target } => {
            let mut query = url.query_pairs_mut();
            query.append_pair("target", target);
            if let Some(depth) = settings.depth {
                query.append_pair("depth", &depth.to_string());
            }
        }
        ApiCall::SubmitPom { .. } => {
            if let Some(depth) = settings.depth {
                url.query_pairs_mut()
                    .append_pair("depth", &depth.to_string());
            }
        }
        ApiCall::DumpCaches | ApiCall::ClearCaches => {}
    }
    Ok(url)
}

#[async_trait::async_trait]
pub trait LicenseClient: Send + Sync {
    async fn call(&self, call: &ApiCall) -> Result<ApiResponse, ClientError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestLicenseClient {
    settings: ClientSettings,
}

impl ReqwestLicenseClient {
    pub fn new(settings: ClientSettings) -> Self {
        Self { settings }
    }

    fn build_client(&self) -> Result<reqwest::Client, ClientError> {
        let mut builder =
            reqwest::Client::builder().connect_timeout(self.settings.connect_timeout);
        if let Some(timeout) = self.settings.request_timeout {
            builder = builder.timeout(timeout);
        }
        builder
            .build()
            .map_err(|err| ClientError::new(FailureKind::Network, err.to_string()))
    }

    async fn read_body(&self, response: reqwest::Response) -> Result<Vec<u8>, ClientError> {
        let max_bytes = self.settings.max_bytes;
        if let Some(content_len) = response.content_length() {
            if content_len > max_bytes {
                return Err(ClientError::new(
                    FailureKind::TooLarge {
                        max_bytes,
                        actual: Some(content_len),
                    },
                    "response too large",
                ));
            }
        }

        let mut bytes = Vec::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(map_reqwest_error)?;
            let next_len = bytes.len() as u64 + chunk.len() as u64;
            if next_len > max_bytes {
                return Err(ClientError::new(
                    FailureKind::TooLarge {
                        max_bytes,
                        actual: Some(next_len),
                    },
                    "response too large",
                ));
            }
            bytes.extend_from_slice(&chunk);
        }
        Ok(bytes)
    }
}

#[async_trait::async_trait]
impl LicenseClient for ReqwestLicenseClient {
    async fn call(&self, call: &ApiCall) -> Result<ApiResponse, ClientError> {
        let url = endpoint_url(&self.settings, call)?;
        let method = call.method();
        pom_info!("{} {}", method, url);

        let client = self.build_client()?;
        let mut request = client.request(method, url);
        if let ApiCall::SubmitPom { content } = call {
            request = request
                .header(CONTENT_TYPE, POM_CONTENT_TYPE)
                .body(content.clone());
        }

        let response = request.send().await.map_err(map_reqwest_error)?;
        let status = response.status();
        let body = self.read_body(response).await?;
        pom_debug!("http status {} ({} bytes)", status.as_u16(), body.len());

        if status != StatusCode::OK {
            let raw = String::from_utf8_lossy(&body).into_owned();
            pom_warn!(
                "license service answered {}: {}",
                status.as_u16(),
                pomcheck_logging::preview(&raw, 200)
            );
            return Err(ClientError::new(FailureKind::HttpStatus(status.as_u16()), raw));
        }

        let json = serde_json::from_slice(&body)
            .map_err(|err| ClientError::new(FailureKind::MalformedJson, err.to_string()))?;
        Ok(ApiResponse {
            status: status.as_u16(),
            json,
        })
    }
}

fn map_reqwest_error(err: reqwest::Error) -> ClientError {
    if err.is_timeout() {
        return ClientError::new(FailureKind::Timeout, err.to_string());
    }
    ClientError::new(FailureKind::Network, err.to_string())
}
