//! Transport layer: wire-format details for the two Clickatell APIs.

mod encoding;
mod operation;
mod params;

pub use encoding::url_encode;
pub use operation::{HttpMethod, Operation, PendingRequest};
pub use params::{KeyValue, TO_FIELD, encode_json, encode_query};
