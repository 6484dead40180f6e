//! Request DTOs for the proxy HTTP API

use serde::Deserialize;

/// Query string of the lookup endpoint (`GET /?key=<KEY>`)
///
/// A missing `key` parameter resolves the empty key.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct KeyQuery {
    #[serde(default)]
    pub key: String,
}
