use std::fmt;

use percent_encoding::{AsciiSet, CONTROLS, utf8_percent_encode};

use super::params::KeyValue;
use crate::domain::{ApiVariant, MessageId, MessageText, Msisdn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// HTTP verb used for a gateway call.
pub enum HttpMethod {
    Get,
    Post,
    Delete,
}

impl HttpMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Delete => "DELETE",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Bytes escaped inside one REST path segment, so an id can never add a
/// segment, a query or a fragment.
const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'\\')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// One validated gateway call, independent of the API variant.
#[derive(Debug, Clone)]
pub enum Operation {
    SendMessage { text: MessageText, to: Vec<Msisdn> },
    Status(MessageId),
    Balance,
    Charge(MessageId),
    Coverage(Msisdn),
    Stop(MessageId),
}

/// Variant-specific shape of a call, before credentials are added.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingRequest {
    pub method: HttpMethod,
    pub path: String,
    pub params: Vec<KeyValue>,
    pub to: Vec<String>,
}

impl Operation {
    pub fn pending_request(&self, variant: ApiVariant) -> PendingRequest {
        match variant {
            ApiVariant::LegacyQuery => self.legacy_request(),
            ApiVariant::JsonRest => self.rest_request(),
        }
    }

    fn legacy_request(&self) -> PendingRequest {
        let (path, field, to) = match self {
            Self::SendMessage { text, to } => (
                "http/sendmsg.php",
                Some((MessageText::FIELD, text.as_str())),
                raw_numbers(to),
            ),
            Self::Status(id) => (
                "http/querymsg.php",
                Some((MessageId::FIELD, id.as_str())),
                Vec::new(),
            ),
            Self::Balance => ("http/getbalance.php", None, Vec::new()),
            Self::Charge(id) => (
                "http/getmsgcharge.php",
                Some((MessageId::FIELD, id.as_str())),
                Vec::new(),
            ),
            Self::Coverage(msisdn) => (
                "utils/routecoverage.php",
                Some((Msisdn::FIELD, msisdn.as_str())),
                Vec::new(),
            ),
            Self::Stop(id) => (
                "http/delmsg.php",
                Some((MessageId::FIELD, id.as_str())),
                Vec::new(),
            ),
        };

        PendingRequest {
            method: HttpMethod::Get,
            path: path.to_owned(),
            params: field
                .map(|(key, value)| vec![(key.to_owned(), value.to_owned())])
                .unwrap_or_default(),
            to,
        }
    }

    fn rest_request(&self) -> PendingRequest {
        let get = |path: String| PendingRequest {
            method: HttpMethod::Get,
            path,
            params: Vec::new(),
            to: Vec::new(),
        };

        match self {
            Self::SendMessage { text, to } => PendingRequest {
                method: HttpMethod::Post,
                path: "rest/message".to_owned(),
                params: vec![(MessageText::FIELD.to_owned(), text.as_str().to_owned())],
                to: raw_numbers(to),
            },
            Self::Status(id) | Self::Charge(id) => get(resource("rest/message", id.as_str())),
            Self::Balance => get("rest/account/balance".to_owned()),
            Self::Coverage(msisdn) => get(resource("rest/coverage", msisdn.as_str())),
            Self::Stop(id) => PendingRequest {
                method: HttpMethod::Delete,
                ..get(resource("rest/message", id.as_str()))
            },
        }
    }
}

fn resource(collection: &str, segment: &str) -> String {
    format!("{collection}/{}", utf8_percent_encode(segment, PATH_SEGMENT))
}

fn raw_numbers(to: &[Msisdn]) -> Vec<String> {
    to.iter().map(|it| it.as_str().to_owned()).collect()
}
