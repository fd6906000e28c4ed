//! Client layer: orchestrates transport calls and maps transport ↔ domain.

use std::error::Error as StdError;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;

use crate::domain::{ApiKey, SendSms, SendSmsResponse, Username};

const DEFAULT_ENDPOINT: &str = "https://api.africastalking.com/version1/messaging";
const SANDBOX_ENDPOINT: &str = "https://api.sandbox.africastalking.com/version1/messaging";

/// Boxed future returned by the gateway and secret store seams.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

#[derive(Debug, Clone)]
struct HttpResponse {
    status: u16,
    body: String,
}

trait HttpTransport: Send + Sync {
    fn post_form<'a>(
        &'a self,
        url: &'a str,
        headers: Vec<(&'static str, String)>,
        params: Vec<(String, String)>,
    ) -> BoxFuture<'a, Result<HttpResponse, Box<dyn StdError + Send + Sync>>>;
}

#[derive(Debug, Clone)]
struct ReqwestTransport {
    client: reqwest::Client,
}

impl HttpTransport for ReqwestTransport {
    fn post_form<'a>(
        &'a self,
        url: &'a str,
        headers: Vec<(&'static str, String)>,
        params: Vec<(String, String)>,
    ) -> BoxFuture<'a, Result<HttpResponse, Box<dyn StdError + Send + Sync>>> {
        Box::pin(async move {
            let mut request = self.client.post(url).form(&params);
            for (name, value) in headers {
                request = request.header(name, value);
            }
            let response = request.send().await?;
            let status = response.status().as_u16();
            let body = response.text().await?;
            Ok(HttpResponse { status, body })
        })
    }
}

#[derive(Debug, thiserror::Error)]
/// Errors returned by [`AfricasTalkingClient`].
///
/// Africa's Talking answers some rejected sends with a non-2xx status whose body still
/// carries a regular `SMSMessageData` payload; [`GatewayError::response`] exposes it.
pub enum GatewayError {
    /// HTTP client / transport failure (DNS, TLS, timeouts, etc).
    #[error("transport error: {0}")]
    Transport(#[source] Box<dyn StdError + Send + Sync>),

    /// Non-successful HTTP status code returned by the server.
    #[error("unexpected HTTP status: {status}")]
    HttpStatus {
        status: u16,
        body: Option<String>,
        response: Option<SendSmsResponse>,
    },

    /// Response body could not be parsed as the expected format.
    #[error("parse error: {0}")]
    Parse(#[source] Box<dyn StdError + Send + Sync>),

    /// The configured endpoint is not a valid URL.
    #[error("invalid endpoint {endpoint:?}: {source}")]
    InvalidEndpoint {
        endpoint: String,
        #[source]
        source: url::ParseError,
    },
}

impl GatewayError {
    /// Send response carried by a failed request, if the body had the regular shape.
    pub fn response(&self) -> Option<&SendSmsResponse> {
        match self {
            Self::HttpStatus { response, .. } => response.as_ref(),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
/// Builder for [`AfricasTalkingClient`].
///
/// Use this when you need to customize the endpoint, timeout, or user-agent.
pub struct AfricasTalkingClientBuilder {
    username: Username,
    api_key: ApiKey,
    endpoint: Option<String>,
    timeout: Option<Duration>,
    user_agent: Option<String>,
}

impl AfricasTalkingClientBuilder {
    /// Create a builder with the default endpoint and no timeout/user-agent override.
    pub fn new(username: Username, api_key: ApiKey) -> Self {
        Self {
            username,
            api_key,
            endpoint: None,
            timeout: None,
            user_agent: None,
        }
    }

    /// Override the messaging endpoint URL.
    ///
    /// Without an override the live endpoint is used, or the sandbox endpoint when the
    /// username is `sandbox`.
    pub fn endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    /// Set an HTTP client timeout applied to the entire request.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Override the HTTP `User-Agent` header.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Build an [`AfricasTalkingClient`].
    pub fn build(self) -> Result<AfricasTalkingClient, GatewayError> {
        let endpoint = self
            .endpoint
            .unwrap_or_else(|| default_endpoint(&self.username).to_owned());
        url::Url::parse(&endpoint).map_err(|source| GatewayError::InvalidEndpoint {
            endpoint: endpoint.clone(),
            source,
        })?;

        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }
        if let Some(user_agent) = self.user_agent {
            builder = builder.user_agent(user_agent);
        }

        let client = builder
            .build()
            .map_err(|err| GatewayError::Transport(Box::new(err)))?;

        Ok(AfricasTalkingClient {
            username: self.username,
            api_key: self.api_key,
            endpoint,
            http: Arc::new(ReqwestTransport { client }),
        })
    }
}

fn default_endpoint(username: &Username) -> &'static str {
    if username.is_sandbox() {
        SANDBOX_ENDPOINT
    } else {
        DEFAULT_ENDPOINT
    }
}

#[derive(Clone)]
/// High-level Africa's Talking SMS client bound to one username/API key pair.
///
/// Requests are form-encoded and ask for JSON responses (`Accept: application/json`).
pub struct AfricasTalkingClient {
    username: Username,
    api_key: ApiKey,
    endpoint: String,
    http: Arc<dyn HttpTransport>,
}

impl std::fmt::Debug for AfricasTalkingClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AfricasTalkingClient")
            .field("username", &self.username)
            .field("api_key", &self.api_key)
            .field("endpoint", &self.endpoint)
            .finish_non_exhaustive()
    }
}

impl AfricasTalkingClient {
    /// Create a client using the default endpoint.
    ///
    /// For more customization, use [`AfricasTalkingClient::builder`].
    pub fn new(username: Username, api_key: ApiKey) -> Self {
        let endpoint = default_endpoint(&username).to_owned();
        Self {
            username,
            api_key,
            endpoint,
            http: Arc::new(ReqwestTransport {
                client: reqwest::Client::new(),
            }),
        }
    }

    /// Start building a client with custom settings.
    pub fn builder(username: Username, api_key: ApiKey) -> AfricasTalkingClientBuilder {
        AfricasTalkingClientBuilder::new(username, api_key)
    }

    pub fn username(&self) -> &Username {
        &self.username
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Send an SMS through Africa's Talking.
    ///
    /// Per-recipient failures (invalid number, blacklisted user, ...) are reported inside
    /// a successful [`SendSmsResponse`].
    ///
    /// Errors:
    /// - [`GatewayError::Transport`] when the request could not be performed,
    /// - [`GatewayError::HttpStatus`] for non-2xx HTTP responses,
    /// - [`GatewayError::Parse`] when a 2xx body is not a send response.
    pub async fn send_sms(&self, request: &SendSms) -> Result<SendSmsResponse, GatewayError> {
        let headers = vec![
            (ApiKey::FIELD, self.api_key.expose().to_owned()),
            ("Accept", "application/json".to_owned()),
        ];
        let params = crate::transport::encode_send_sms_form(&self.username, request);

        let response = self
            .http
            .post_form(&self.endpoint, headers, params)
            .await
            .map_err(GatewayError::Transport)?;

        if !(200..=299).contains(&response.status) {
            let parsed = crate::transport::decode_send_sms_json_response(&response.body).ok();
            let body = if response.body.trim().is_empty() {
                None
            } else {
                Some(response.body)
            };
            return Err(GatewayError::HttpStatus {
                status: response.status,
                body,
                response: parsed,
            });
        }

        crate::transport::decode_send_sms_json_response(&response.body)
            .map_err(|err| GatewayError::Parse(Box::new(err)))
    }
}
