//! Client layer: builds authenticated requests and turns XML replies into typed results.

use std::error::Error as StdError;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;

use url::Url;

use crate::domain::{
    Api, BalanceResponse, Endpoint, EndpointTable, LineCount, LinesResponse, Login, NewPassword,
    Password, ProfileResponse, Routing, RoutingResponse, StatusOnlyResponse, StatusResponse,
    ValidationError,
};
use crate::transport::{self, DecodeError, XmlResponse};

/// Round-trip timeout used unless [`MultifonClientBuilder::timeout`] overrides it.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(32);

type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

#[derive(Debug, Clone)]
struct HttpResponse {
    status: u16,
    body: Vec<u8>,
}

trait HttpTransport: Send + Sync {
    fn post<'a>(
        &'a self,
        url: Url,
    ) -> BoxFuture<'a, Result<HttpResponse, Box<dyn StdError + Send + Sync>>>;
}

#[derive(Debug, Clone)]
struct ReqwestTransport {
    client: reqwest::Client,
}

impl HttpTransport for ReqwestTransport {
    fn post<'a>(
        &'a self,
        url: Url,
    ) -> BoxFuture<'a, Result<HttpResponse, Box<dyn StdError + Send + Sync>>> {
        Box::pin(async move {
            let response = self.client.post(url).send().await?;
            let status = response.status().as_u16();
            let body = response.bytes().await?.to_vec();
            Ok(HttpResponse { status, body })
        })
    }
}

#[derive(Debug, Clone)]
/// Login/password pair sent with every request.
pub struct Credentials {
    login: Login,
    password: Password,
}

impl Credentials {
    /// Validate both parts (login non-empty after trimming, password non-empty).
    pub fn new(
        login: impl Into<String>,
        password: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            login: Login::new(login)?,
            password: Password::new(password)?,
        })
    }

    pub fn login(&self) -> &Login {
        &self.login
    }

    pub fn password(&self) -> &Password {
        &self.password
    }

    fn append_query_params(&self, url: &mut Url) {
        url.query_pairs_mut()
            .append_pair(Login::FIELD, self.login.as_str())
            .append_pair(Password::FIELD, self.password.as_str());
    }
}

#[derive(Debug, thiserror::Error)]
/// Errors returned by [`MultifonClient`].
///
/// A `200 OK` HTTP response is not enough for success: the XML body carries its
/// own result code, reported as [`MultifonError::Api`] when it is not 200.
pub enum MultifonError {
    /// Network-level failure before any HTTP response was received.
    #[error("transport error: {0}")]
    Transport(#[source] Box<dyn StdError + Send + Sync>),

    /// The round trip did not finish within the configured timeout.
    #[error("request timed out after {0:?}")]
    Timeout(Duration),

    /// HTTP status in `400..=599`. The body is not inspected.
    #[error("HTTP status error: {status} {reason}")]
    HttpStatus { status: u16, reason: String },

    /// Response body is not the expected XML document.
    #[error("decode error: {0}")]
    Decode(#[from] DecodeError),

    /// The embedded result code signals a failure (bad credentials, invalid value, ...).
    #[error("API error: {code} {description}")]
    Api { code: i32, description: String },

    /// A set operation reported success but the server kept a different value.
    #[error("failed to set {key}: requested {requested}, current {current}")]
    SetFailed {
        key: &'static str,
        requested: i32,
        current: i32,
    },

    /// One of the domain constructors rejected an invalid value.
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),
}

#[derive(Debug, Clone)]
/// Builder for [`MultifonClient`].
///
/// The deployment is picked by name from an [`EndpointTable`]; an unknown name
/// fails in [`MultifonClientBuilder::build`], never later at request time.
pub struct MultifonClientBuilder {
    credentials: Credentials,
    endpoints: EndpointTable,
    api: String,
    timeout: Duration,
    user_agent: Option<String>,
}

impl MultifonClientBuilder {
    /// Create a builder for the default (`multifon`) deployment and timeout.
    pub fn new(credentials: Credentials) -> Self {
        Self {
            credentials,
            endpoints: EndpointTable::default(),
            api: Api::default().name().to_owned(),
            timeout: DEFAULT_TIMEOUT,
            user_agent: None,
        }
    }

    /// Select one of the stock deployments.
    pub fn api(self, api: Api) -> Self {
        self.api_name(api.name())
    }

    /// Select a deployment by its name in the endpoint table.
    pub fn api_name(mut self, name: impl Into<String>) -> Self {
        self.api = name.into();
        self
    }

    /// Replace the endpoint table (for example to add a staging deployment).
    pub fn endpoints(mut self, endpoints: EndpointTable) -> Self {
        self.endpoints = endpoints;
        self
    }

    /// Timeout applied to the whole request/response round trip.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Override the HTTP `User-Agent` header.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Build a [`MultifonClient`].
    pub fn build(self) -> Result<MultifonClient, MultifonError> {
        let endpoint = self.endpoints.get(&self.api)?.clone();

        let mut builder = reqwest::Client::builder().https_only(true);
        if let Some(user_agent) = self.user_agent {
            builder = builder.user_agent(user_agent);
        }
        let client = builder
            .build()
            .map_err(|err| MultifonError::Transport(Box::new(err)))?;

        Ok(MultifonClient {
            credentials: self.credentials,
            endpoint,
            timeout: self.timeout,
            http: Arc::new(ReqwestTransport { client }),
        })
    }
}

#[derive(Clone)]
/// High-level MultiFon client.
///
/// Read operations take `&self` and may run concurrently on clones of one
/// client. [`MultifonClient::set_password`] takes `&mut self` because it
/// rebinds the credentials used by every later request.
pub struct MultifonClient {
    credentials: Credentials,
    endpoint: Endpoint,
    timeout: Duration,
    http: Arc<dyn HttpTransport>,
}

impl MultifonClient {
    /// Create a client for the default deployment and timeout.
    ///
    /// For more customization, use [`MultifonClient::builder`].
    pub fn new(credentials: Credentials) -> Result<Self, MultifonError> {
        Self::builder(credentials).build()
    }

    /// Start building a client with custom settings.
    pub fn builder(credentials: Credentials) -> MultifonClientBuilder {
        MultifonClientBuilder::new(credentials)
    }

    pub fn login(&self) -> &Login {
        self.credentials.login()
    }

    /// Password currently used to authenticate (reflects a successful
    /// [`MultifonClient::set_password`]).
    pub fn password(&self) -> &Password {
        self.credentials.password()
    }

    pub fn endpoint(&self) -> &Endpoint {
        &self.endpoint
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Account balance.
    pub async fn get_balance(&self) -> Result<BalanceResponse, MultifonError> {
        self.execute::<transport::BalanceXmlResponse>(
            transport::BALANCE_OPERATION,
            transport::encode_get_params(),
        )
        .await?
        .into_response()
        .map_err(MultifonError::Decode)
    }

    /// Current call routing mode. Unknown codes come back as [`Routing::Unrecognized`].
    pub async fn get_routing(&self) -> Result<RoutingResponse, MultifonError> {
        self.execute::<transport::RoutingXmlResponse>(
            transport::ROUTING_OPERATION,
            transport::encode_get_params(),
        )
        .await?
        .into_response()
        .map_err(MultifonError::Decode)
    }

    /// Change the call routing mode.
    ///
    /// Errors:
    /// - [`MultifonError::Validation`] for [`Routing::Unrecognized`] (nothing is sent),
    /// - [`MultifonError::SetFailed`] when the server echoes a different mode.
    pub async fn set_routing(&self, routing: Routing) -> Result<Routing, MultifonError> {
        if let Routing::Unrecognized(code) = routing {
            return Err(ValidationError::UnknownRouting {
                input: code.to_string(),
            }
            .into());
        }

        let parsed = self
            .execute::<transport::RoutingXmlResponse>(
                transport::ROUTING_OPERATION,
                transport::encode_set_routing_params(routing),
            )
            .await?;
        confirm_set(Routing::FIELD, routing.code(), parsed.echoed())?;
        Ok(routing)
    }

    /// Subscription status and optional expiration marker.
    pub async fn get_status(&self) -> Result<StatusResponse, MultifonError> {
        self.execute::<transport::StatusXmlResponse>(
            transport::STATUS_OPERATION,
            transport::encode_get_params(),
        )
        .await?
        .into_response()
        .map_err(MultifonError::Decode)
    }

    /// Subscriber number bound to the account.
    pub async fn get_profile(&self) -> Result<ProfileResponse, MultifonError> {
        self.execute::<transport::ProfileXmlResponse>(
            transport::PROFILE_OPERATION,
            transport::encode_get_params(),
        )
        .await?
        .into_response()
        .map_err(MultifonError::Decode)
    }

    /// Number of parallel outbound SIP lines.
    pub async fn get_lines(&self) -> Result<LinesResponse, MultifonError> {
        self.execute::<transport::LinesXmlResponse>(
            transport::LINES_OPERATION,
            transport::encode_get_params(),
        )
        .await?
        .into_response()
        .map_err(MultifonError::Decode)
    }

    /// Change the number of parallel outbound SIP lines.
    ///
    /// Returns [`MultifonError::SetFailed`] when the server echoes a different count.
    pub async fn set_lines(&self, lines: LineCount) -> Result<LineCount, MultifonError> {
        let parsed = self
            .execute::<transport::LinesXmlResponse>(
                transport::LINES_OPERATION,
                transport::encode_set_lines_params(lines),
            )
            .await?;
        confirm_set(LineCount::FIELD, i32::from(lines.value()), parsed.echoed())?;
        Ok(lines)
    }

    /// Change the account password.
    ///
    /// On success every later request authenticates with `password`; on any
    /// error the previous password stays in use.
    pub async fn set_password(
        &mut self,
        password: NewPassword,
    ) -> Result<StatusOnlyResponse, MultifonError> {
        let response = self
            .execute::<transport::PasswordXmlResponse>(
                transport::PASSWORD_OPERATION,
                transport::encode_set_password_params(&password),
            )
            .await?
            .into_response();
        self.credentials.password = password.into();
        tracing::debug!("password changed");
        Ok(response)
    }

    async fn execute<R: XmlResponse>(
        &self,
        operation: &'static str,
        params: Vec<(String, String)>,
    ) -> Result<R, MultifonError> {
        let body = self.send(operation, params).await?;

        let parsed: R = transport::decode_xml(&body).map_err(MultifonError::Decode)?;

        let envelope = parsed.envelope();
        if !envelope.is_ok() {
            tracing::debug!(
                operation,
                code = envelope.code,
                description = %envelope.description,
                "request rejected by API"
            );
            return Err(MultifonError::Api {
                code: envelope.code,
                description: envelope.description,
            });
        }

        Ok(parsed)
    }

    async fn send(
        &self,
        operation: &'static str,
        params: Vec<(String, String)>,
    ) -> Result<Vec<u8>, MultifonError> {
        let mut url = self.endpoint.resolve(operation)?;
        self.credentials.append_query_params(&mut url);
        if !params.is_empty() {
            url.query_pairs_mut().extend_pairs(params.iter());
        }

        tracing::debug!(operation, api = self.endpoint.name(), "sending request");

        let response = tokio::time::timeout(self.timeout, self.http.post(url))
            .await
            .map_err(|_| MultifonError::Timeout(self.timeout))?
            .map_err(MultifonError::Transport)?;

        tracing::debug!(operation, status = response.status, "received response");

        if (400..=599).contains(&response.status) {
            return Err(MultifonError::HttpStatus {
                status: response.status,
                reason: canonical_reason(response.status),
            });
        }

        Ok(response.body)
    }
}

/// Check the value echoed by a set operation.
///
/// The server omits the element when it applied the change; when it does echo
/// one, it must be the requested value.
fn confirm_set(key: &'static str, requested: i32, echoed: Option<i32>) -> Result<(), MultifonError> {
    match echoed {
        None => Ok(()),
        Some(current) if current == requested => Ok(()),
        Some(current) => {
            tracing::warn!(key, requested, current, "server did not apply the new value");
            Err(MultifonError::SetFailed {
                key,
                requested,
                current,
            })
        }
    }
}

fn canonical_reason(status: u16) -> String {
    reqwest::StatusCode::from_u16(status)
        .ok()
        .and_then(|status| status.canonical_reason())
        .unwrap_or_default()
        .to_owned()
}
