use std::fmt;
use std::str::FromStr;

use crate::domain::validation::ValidationError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// Which of the two Clickatell APIs a client talks to.
///
/// The variant is fixed for the lifetime of a client and decides both the
/// request encoding and the authentication shape.
pub enum ApiVariant {
    /// Legacy HTTP API: query-string parameters, `user`/`password`/`api_id`.
    LegacyQuery,
    /// REST API: JSON bodies and an `Authorization: Bearer` header.
    JsonRest,
}

impl ApiVariant {
    /// Short lowercase name (`http` or `rest`).
    pub fn as_str(self) -> &'static str {
        match self {
            Self::LegacyQuery => "http",
            Self::JsonRest => "rest",
        }
    }
}

impl fmt::Display for ApiVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ApiVariant {
    type Err = ValidationError;

    /// Accepts `http`/`legacy` and `rest`/`json`, ignoring case and surrounding whitespace.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "http" | "legacy" => Ok(Self::LegacyQuery),
            "rest" | "json" => Ok(Self::JsonRest),
            _ => Err(ValidationError::UnknownApiVariant {
                input: s.to_owned(),
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// Legacy HTTP API account username.
///
/// Invariant: non-empty after trimming.
pub struct Username(String);

impl Username {
    /// Query field name used by the HTTP API (`user`).
    pub const FIELD: &'static str = "user";

    /// Create a validated [`Username`].
    ///
    /// Leading and trailing whitespace is removed; the trimmed value is what gets sent.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the validated username.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Clone, PartialEq, Eq, Hash)]
/// Legacy HTTP API account password.
///
/// Invariant: must not be empty (whitespace is preserved and allowed).
pub struct Password(String);

impl Password {
    /// Query field name used by the HTTP API (`password`).
    pub const FIELD: &'static str = "password";

    /// Create a validated [`Password`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        if value.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(value))
    }

    /// Borrow the password as provided.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Password(***)")
    }
}

#[derive(Clone, PartialEq, Eq, Hash)]
/// REST API key, sent as the bearer token.
///
/// Invariant: non-empty after trimming.
pub struct ApiKey(String);

impl ApiKey {
    /// Name used in validation errors. The key itself never travels as a parameter.
    pub const FIELD: &'static str = "api_key";

    /// Create a validated [`ApiKey`].
    ///
    /// Leading and trailing whitespace is removed; the trimmed value is what gets sent.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the validated key.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey(***)")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// Clickatell application id (`api_id`), issued per API connection.
///
/// Invariant: non-empty after trimming.
pub struct ApiId(String);

impl ApiId {
    /// Query field name used by the HTTP API (`api_id`).
    pub const FIELD: &'static str = "api_id";

    /// Create a validated [`ApiId`].
    ///
    /// Leading and trailing whitespace is removed; the trimmed value is what gets sent.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the validated id.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// SMS message text (`text`).
///
/// Invariant: non-empty after trimming. The original value (including whitespace) is preserved.
pub struct MessageText(String);

impl MessageText {
    /// Field name used by both APIs (`text`).
    pub const FIELD: &'static str = "text";

    /// Create validated message text.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(value))
    }

    /// Borrow the message text as provided.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
/// Vendor-assigned message id (`apimsgid`) returned when a message is sent.
///
/// Invariant: non-empty after trimming and not a `.`/`..` path segment.
pub struct MessageId(String);

impl MessageId {
    /// Query field name used by the HTTP API (`apimsgid`).
    pub const FIELD: &'static str = "apimsgid";

    /// Create a validated [`MessageId`].
    ///
    /// Leading and trailing whitespace is removed; the trimmed value is what gets sent.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        if matches!(trimmed, "." | "..") {
            return Err(ValidationError::DotSegment { field: Self::FIELD });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the validated id.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
/// Mobile subscriber number in international format, digits only as the gateway expects.
///
/// Invariant: non-empty after trimming and not a `.`/`..` path segment. No further
/// normalisation is applied.
pub struct Msisdn(String);

impl Msisdn {
    /// Query field name used by the HTTP coverage call (`msisdn`).
    pub const FIELD: &'static str = "msisdn";

    /// Create a validated [`Msisdn`].
    ///
    /// Leading and trailing whitespace is removed; the trimmed value is what gets sent.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        if matches!(trimmed, "." | "..") {
            return Err(ValidationError::DotSegment { field: Self::FIELD });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the number as given.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}
