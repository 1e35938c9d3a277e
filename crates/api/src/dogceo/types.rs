//! Wire types for dog.ceo responses.

use std::collections::BTreeMap;

use serde::Deserialize;

/// Envelope status value for a successful call.
pub const SUCCESS_STATUS: &str = "success";

/// Envelope shared by every dog.ceo response.
///
/// `message` is left untyped until `status` has been checked, because error
/// responses carry a plain string there instead of the payload.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiEnvelope {
    pub status: String,
    #[serde(default)]
    pub message: serde_json::Value,
}

impl ApiEnvelope {
    /// Whether the API reported success.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.status == SUCCESS_STATUS
    }
}

/// Payload of `/breeds/list/all`: breed name to sub-breed names.
pub type BreedListing = BTreeMap<String, Vec<String>>;

/// Payload of `/breed/{name}/images/random/{n}`.
pub type ImageUrls = Vec<String>;
