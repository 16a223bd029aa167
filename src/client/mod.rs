//! Client layer: validates inputs, builds the variant-specific request and performs the call.

use std::error::Error as StdError;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use reqwest::header::{
    ACCEPT, AUTHORIZATION, CACHE_CONTROL, CONNECTION, CONTENT_TYPE, HeaderMap, HeaderName,
    HeaderValue, ORIGIN,
};
use tracing::{debug, warn};

use crate::domain::{
    ApiId, ApiKey, ApiVariant, MessageId, MessageText, Msisdn, Password, Username,
    ValidationError,
};
pub use crate::transport::HttpMethod;
use crate::transport::{KeyValue, Operation, PendingRequest, TO_FIELD, encode_json, encode_query};

const DEFAULT_BASE_URL: &str = "https://api.clickatell.com/";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);
const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

const X_VERSION: &str = "x-version";

type BoxError = Box<dyn StdError + Send + Sync>;

#[derive(Debug, Clone)]
struct HttpRequest {
    method: HttpMethod,
    url: String,
    headers: HeaderMap,
    body: Option<String>,
}

#[derive(Debug, Clone)]
struct HttpResponse {
    status: u16,
    body: String,
}

trait HttpTransport: Send + Sync {
    fn perform(&self, request: HttpRequest) -> Result<HttpResponse, BoxError>;
}

#[derive(Debug, Clone)]
struct ReqwestTransport {
    client: reqwest::blocking::Client,
}

impl HttpTransport for ReqwestTransport {
    fn perform(&self, request: HttpRequest) -> Result<HttpResponse, BoxError> {
        let method = match request.method {
            HttpMethod::Get => reqwest::Method::GET,
            HttpMethod::Post => reqwest::Method::POST,
            HttpMethod::Delete => reqwest::Method::DELETE,
        };

        let mut builder = self
            .client
            .request(method, request.url.as_str())
            .headers(request.headers);
        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let response = builder.send()?;
        let status = response.status().as_u16();
        let body = body_text(&response.bytes()?);
        Ok(HttpResponse { status, body })
    }
}

/// Body bytes as text, ignoring any declared charset.
///
/// UTF-8 bodies are returned byte for byte; invalid sequences become U+FFFD.
fn body_text(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}

/// `url` with the value of the `password` query parameter masked.
fn redacted_url(url: &str) -> String {
    let Some((target, query)) = url.split_once('?') else {
        return url.to_owned();
    };
    let pairs = query
        .split('&')
        .map(|pair| match pair.split_once('=') {
            Some((key, _)) if key == Password::FIELD => format!("{key}=***"),
            _ => pair.to_owned(),
        })
        .collect::<Vec<_>>();
    format!("{target}?{}", pairs.join("&"))
}

#[derive(Debug, Clone)]
/// Authentication credentials; the shape selects the [`ApiVariant`].
///
/// Use [`Credentials::legacy`] for the HTTP API (username + password) or
/// [`Credentials::rest`] for the REST API (API key used as a bearer token).
pub enum Credentials {
    /// HTTP API: `user`, `password` and `api_id` travel as query parameters.
    UsernamePassword {
        user: Username,
        password: Password,
        api_id: ApiId,
    },
    /// REST API: the key travels in the `Authorization` header.
    ApiKey { api_key: ApiKey, api_id: ApiId },
}

impl Credentials {
    /// Create [`Credentials::UsernamePassword`], validating user, password and api id in that order.
    pub fn legacy(
        user: impl Into<String>,
        password: impl Into<String>,
        api_id: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        Ok(Self::UsernamePassword {
            user: Username::new(user)?,
            password: Password::new(password)?,
            api_id: ApiId::new(api_id)?,
        })
    }

    /// Create [`Credentials::ApiKey`], validating the key and then the api id.
    pub fn rest(
        api_key: impl Into<String>,
        api_id: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        Ok(Self::ApiKey {
            api_key: ApiKey::new(api_key)?,
            api_id: ApiId::new(api_id)?,
        })
    }

    pub fn api_variant(&self) -> ApiVariant {
        match self {
            Self::UsernamePassword { .. } => ApiVariant::LegacyQuery,
            Self::ApiKey { .. } => ApiVariant::JsonRest,
        }
    }

    pub fn api_id(&self) -> &ApiId {
        match self {
            Self::UsernamePassword { api_id, .. } | Self::ApiKey { api_id, .. } => api_id,
        }
    }

    fn push_query_params(&self, params: &mut Vec<KeyValue>) {
        if let Self::UsernamePassword {
            user,
            password,
            api_id,
        } = self
        {
            params.push((Username::FIELD.to_owned(), user.as_str().to_owned()));
            params.push((Password::FIELD.to_owned(), password.as_str().to_owned()));
            params.push((ApiId::FIELD.to_owned(), api_id.as_str().to_owned()));
        }
    }

    fn default_headers(&self) -> Result<HeaderMap, ValidationError> {
        let mut headers = HeaderMap::new();
        match self {
            Self::ApiKey { api_key, .. } => {
                let mut bearer = HeaderValue::from_str(&format!("Bearer {}", api_key.as_str()))
                    .map_err(|_| ValidationError::InvalidHeaderValue {
                        field: ApiKey::FIELD,
                    })?;
                bearer.set_sensitive(true);
                headers.insert(
                    HeaderName::from_static(X_VERSION),
                    HeaderValue::from_static("1"),
                );
                headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
                headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
                headers.insert(AUTHORIZATION, bearer);
            }
            Self::UsernamePassword { .. } => {
                headers.insert(CONNECTION, HeaderValue::from_static("keep-alive"));
                headers.insert(CACHE_CONTROL, HeaderValue::from_static("max-age=0"));
                headers.insert(ORIGIN, HeaderValue::from_static("null"));
            }
        }
        Ok(headers)
    }
}

#[derive(Debug, thiserror::Error)]
/// Errors returned by [`GatewayClient`].
///
/// A non-2xx HTTP status is not an error: the gateway reports logical failures
/// inside the body, so the body is returned and the status is kept in
/// [`GatewayClient::last_response`].
pub enum GatewayError {
    /// Credentials, API type or base URL were rejected while building the client.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(#[from] ValidationError),

    /// An operation was called with a missing argument; no request was sent.
    #[error("invalid parameter for {operation}: {source}")]
    InvalidParameter {
        operation: &'static str,
        #[source]
        source: ValidationError,
    },

    /// The HTTP client could not be created.
    #[error("transport initialisation failed: {0}")]
    TransportInit(#[source] BoxError),

    /// No response was obtained (DNS, TLS, connect failure, timeout, ...).
    #[error("transport error: {0}")]
    Transport(#[source] BoxError),

    /// The REST request body could not be serialised.
    #[error("request encoding error: {0}")]
    Encode(#[source] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Diagnostic record of the most recent request made by a [`GatewayClient`].
pub struct ResponseSnapshot {
    pub method: HttpMethod,
    pub url: String,
    /// `None` when the transport failed before a response arrived.
    pub status: Option<u16>,
    pub body: String,
}

impl fmt::Display for ResponseSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} request URL:", self.method)?;
        writeln!(f, "{}", self.url)?;
        writeln!(f, "HTTP response code:")?;
        match self.status {
            Some(status) => writeln!(f, "{status}")?,
            None => writeln!(f, "none")?,
        }
        writeln!(f, "Response:")?;
        writeln!(f, "{}", self.body)
    }
}

#[derive(Debug, Clone)]
/// Builder for [`GatewayClient`].
///
/// Use this when you need to customize the base URL, timeouts, or user-agent.
pub struct GatewayClientBuilder {
    credentials: Credentials,
    base_url: String,
    timeout: Duration,
    connect_timeout: Duration,
    user_agent: Option<String>,
}

impl GatewayClientBuilder {
    /// Create a builder with the default base URL and 5s timeouts.
    pub fn new(credentials: Credentials) -> Self {
        Self {
            credentials,
            base_url: DEFAULT_BASE_URL.to_owned(),
            timeout: DEFAULT_TIMEOUT,
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
            user_agent: None,
        }
    }

    /// Override the gateway base URL. A trailing `/` is added when missing.
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Set the timeout for the whole request. Zero selects the 5s default.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the connect timeout. Zero selects the 5s default.
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Override the HTTP `User-Agent` header.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Build a [`GatewayClient`].
    pub fn build(self) -> Result<GatewayClient, GatewayError> {
        let base_url = normalize_base_url(&self.base_url)?;
        let headers = self.credentials.default_headers()?;

        let mut builder = reqwest::blocking::Client::builder()
            .timeout(or_default(self.timeout, DEFAULT_TIMEOUT))
            .connect_timeout(or_default(self.connect_timeout, DEFAULT_CONNECT_TIMEOUT))
            .http1_only();
        if let Some(user_agent) = self.user_agent {
            builder = builder.user_agent(user_agent);
        }

        let client = builder
            .build()
            .map_err(|err| GatewayError::TransportInit(Box::new(err)))?;

        Ok(GatewayClient {
            credentials: self.credentials,
            base_url,
            headers,
            http: Arc::new(ReqwestTransport { client }),
            last: None,
        })
    }
}

fn or_default(value: Duration, default: Duration) -> Duration {
    if value.is_zero() { default } else { value }
}

fn normalize_base_url(input: &str) -> Result<String, ValidationError> {
    let invalid = |reason: String| ValidationError::InvalidBaseUrl {
        input: input.to_owned(),
        reason,
    };

    let parsed = url::Url::parse(input.trim()).map_err(|err| invalid(err.to_string()))?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(invalid(format!("unsupported scheme {}", parsed.scheme())));
    }
    if parsed.query().is_some() || parsed.fragment().is_some() {
        return Err(invalid("query and fragment are not allowed".to_owned()));
    }

    let mut base = parsed.to_string();
    if !base.ends_with('/') {
        base.push('/');
    }
    Ok(base)
}

#[derive(Clone)]
/// Blocking Clickatell client for one API variant.
///
/// Every operation performs exactly one HTTP exchange and returns the raw
/// response body; interpreting it is left to the caller. Operations take
/// `&mut self` because each call replaces the [`ResponseSnapshot`].
pub struct GatewayClient {
    credentials: Credentials,
    base_url: String,
    headers: HeaderMap,
    http: Arc<dyn HttpTransport>,
    last: Option<ResponseSnapshot>,
}

impl GatewayClient {
    /// Start building a client with custom settings.
    pub fn builder(credentials: Credentials) -> GatewayClientBuilder {
        GatewayClientBuilder::new(credentials)
    }

    /// Create an HTTP API client with default settings.
    pub fn legacy(
        user: impl Into<String>,
        password: impl Into<String>,
        api_id: impl Into<String>,
    ) -> Result<Self, GatewayError> {
        Self::builder(Credentials::legacy(user, password, api_id)?).build()
    }

    /// Create a REST API client with default settings.
    pub fn rest(
        api_key: impl Into<String>,
        api_id: impl Into<String>,
    ) -> Result<Self, GatewayError> {
        Self::builder(Credentials::rest(api_key, api_id)?).build()
    }

    pub fn api_variant(&self) -> ApiVariant {
        self.credentials.api_variant()
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Headers sent with every request.
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Replace the headers sent with every subsequent request.
    pub fn set_headers(&mut self, headers: HeaderMap) {
        self.headers = headers;
    }

    /// Method, URL, status and body of the most recent request, if one was sent.
    pub fn last_response(&self) -> Option<&ResponseSnapshot> {
        self.last.as_ref()
    }

    /// Send `text` to one or more destination numbers.
    ///
    /// HTTP API: `GET http/sendmsg.php`; REST API: `POST rest/message`.
    pub fn send_message<S: AsRef<str>>(
        &mut self,
        text: &str,
        to: &[S],
    ) -> Result<String, GatewayError> {
        let operation = send_operation(text, to);
        self.execute("send_message", operation)
    }

    /// Query the delivery status of a sent message.
    pub fn get_status(&mut self, message_id: &str) -> Result<String, GatewayError> {
        let operation = MessageId::new(message_id).map(Operation::Status);
        self.execute("get_status", operation)
    }

    /// Query the account balance.
    pub fn get_balance(&mut self) -> Result<String, GatewayError> {
        self.execute("get_balance", Ok(Operation::Balance))
    }

    /// Query what a sent message was charged.
    pub fn get_charge(&mut self, message_id: &str) -> Result<String, GatewayError> {
        let operation = MessageId::new(message_id).map(Operation::Charge);
        self.execute("get_charge", operation)
    }

    /// Query network coverage for a destination number.
    pub fn get_coverage(&mut self, msisdn: &str) -> Result<String, GatewayError> {
        let operation = Msisdn::new(msisdn).map(Operation::Coverage);
        self.execute("get_coverage", operation)
    }

    /// Stop delivery of a queued message.
    ///
    /// HTTP API: `GET http/delmsg.php`; REST API: `DELETE rest/message/{id}`.
    pub fn stop_message(&mut self, message_id: &str) -> Result<String, GatewayError> {
        let operation = MessageId::new(message_id).map(Operation::Stop);
        self.execute("stop_message", operation)
    }

    fn execute(
        &mut self,
        name: &'static str,
        operation: Result<Operation, ValidationError>,
    ) -> Result<String, GatewayError> {
        self.last = None;
        let operation = operation.map_err(|source| invalid_parameter(name, source))?;
        let pending = operation.pending_request(self.api_variant());
        self.dispatch(name, pending)
    }

    fn dispatch(
        &mut self,
        name: &'static str,
        pending: PendingRequest,
    ) -> Result<String, GatewayError> {
        if pending.path.is_empty() {
            return Err(invalid_parameter(name, ValidationError::Empty { field: "path" }));
        }

        let mut params = Vec::<KeyValue>::new();
        self.credentials.push_query_params(&mut params);
        params.extend(pending.params);

        let blob = if params.is_empty() {
            None
        } else {
            Some(match self.api_variant() {
                ApiVariant::LegacyQuery => encode_query(&params, &pending.to),
                ApiVariant::JsonRest => {
                    encode_json(&params, &pending.to).map_err(GatewayError::Encode)?
                }
            })
        };

        let mut url = format!("{}{}", self.base_url, pending.path);
        let body = match (pending.method, blob) {
            (HttpMethod::Post, blob) => blob,
            (HttpMethod::Get | HttpMethod::Delete, Some(query)) => {
                url.push_str(&query);
                None
            }
            (HttpMethod::Get | HttpMethod::Delete, None) => None,
        };

        debug!(
            operation = name,
            method = %pending.method,
            url = %redacted_url(&url),
            "sending gateway request"
        );
        if let Some(body) = body.as_deref() {
            debug!(operation = name, body, "request body");
        }

        let request = HttpRequest {
            method: pending.method,
            url: url.clone(),
            headers: self.headers.clone(),
            body,
        };

        match self.http.perform(request) {
            Ok(response) => {
                debug!(operation = name, status = response.status, "gateway responded");
                self.last = Some(ResponseSnapshot {
                    method: pending.method,
                    url,
                    status: Some(response.status),
                    body: response.body.clone(),
                });
                Ok(response.body)
            }
            Err(err) => {
                warn!(operation = name, error = %err, "gateway request failed");
                self.last = Some(ResponseSnapshot {
                    method: pending.method,
                    url,
                    status: None,
                    body: String::new(),
                });
                Err(GatewayError::Transport(err))
            }
        }
    }
}

impl fmt::Display for GatewayClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.last {
            Some(snapshot) => fmt::Display::fmt(snapshot, f),
            None => writeln!(f, "no request has been made"),
        }
    }
}

impl fmt::Debug for GatewayClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GatewayClient")
            .field("api_variant", &self.api_variant())
            .field("base_url", &self.base_url)
            .field("last", &self.last)
            .finish_non_exhaustive()
    }
}

fn send_operation<S: AsRef<str>>(text: &str, to: &[S]) -> Result<Operation, ValidationError> {
    let text = MessageText::new(text)?;
    if to.is_empty() {
        return Err(ValidationError::Empty { field: TO_FIELD });
    }
    let to = to
        .iter()
        .map(|number| Msisdn::new(number.as_ref()))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Operation::SendMessage { text, to })
}

fn invalid_parameter(operation: &'static str, source: ValidationError) -> GatewayError {
    warn!(operation, error = %source, "rejected gateway call");
    GatewayError::InvalidParameter { operation, source }
}
