use serde::Serialize;
use serde::ser::SerializeMap;

use super::encoding::url_encode;

/// Field name under which destination addresses are appended.
pub const TO_FIELD: &str = "to";

/// Ordered key/value pair; insertion order is the serialized field order.
pub type KeyValue = (String, String);

/// Build `?k1=v1&k2=v2[&to=a1,a2]` for the legacy HTTP API.
///
/// Values are percent-encoded, addresses are joined verbatim.
pub fn encode_query(params: &[KeyValue], to: &[String]) -> String {
    let mut query = String::from("?");
    for (idx, (key, value)) in params.iter().enumerate() {
        if idx > 0 {
            query.push('&');
        }
        query.push_str(key);
        query.push('=');
        query.push_str(&url_encode(value));
    }
    if !to.is_empty() {
        query.push('&');
        query.push_str(TO_FIELD);
        query.push('=');
        query.push_str(&to.join(","));
    }
    query
}

/// Build `{"k1":"v1",...[,"to":["a1","a2"]]}` for the REST API.
pub fn encode_json(params: &[KeyValue], to: &[String]) -> Result<String, serde_json::Error> {
    serde_json::to_string(&JsonBody { params, to })
}

struct JsonBody<'a> {
    params: &'a [KeyValue],
    to: &'a [String],
}

impl Serialize for JsonBody<'_> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let len = self.params.len() + usize::from(!self.to.is_empty());
        let mut map = serializer.serialize_map(Some(len))?;
        for (key, value) in self.params {
            map.serialize_entry(key, value)?;
        }
        if !self.to.is_empty() {
            map.serialize_entry(TO_FIELD, self.to)?;
        }
        map.end()
    }
}
