// Pinecone query body
// Only the four fields the index query needs are forwarded; the rest is dropped

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{json, Value};

/// Pinecone `/query` request, with the relay's defaults applied.
///
/// Only absent fields are defaulted; anything the caller sent, `null` included,
/// is forwarded as given and left for the index to judge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PineconeQuery {
    /// Query embedding. Omitted from the forwarded body when the caller left it out.
    #[serde(
        default,
        deserialize_with = "present",
        skip_serializing_if = "Option::is_none"
    )]
    pub vector: Option<Value>,
    #[serde(default = "default_top_k")]
    pub top_k: Value,
    #[serde(default = "default_true")]
    pub include_metadata: Value,
    #[serde(default = "default_true")]
    pub include_values: Value,
}

// A present field is `Some`, even when it is `null`
fn present<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

fn default_top_k() -> Value {
    json!(10)
}

fn default_true() -> Value {
    json!(true)
}
