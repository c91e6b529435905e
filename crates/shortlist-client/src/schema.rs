//! Wire shapes of the shortening service.
//!
//! A create response is only trusted once it has been parsed into
//! [`CreateResponse`]: a JSON object with exactly one `id` key holding a
//! non-empty string. Anything else is a [`ClientError::Validation`].

use serde::{Deserialize, Serialize};
use shortlist_core::{ClientError, LinkId};

#[derive(Debug, Serialize)]
pub struct CreateRequest<'a> {
    pub url: &'a str,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CreateResponse {
    pub id: LinkId,
}

/// Parses and validates the body of a create response.
pub fn parse_create_response(body: &[u8]) -> Result<LinkId, ClientError> {
    let value: serde_json::Value = serde_json::from_slice(body)
        .map_err(|e| ClientError::Validation(format!("create response is not json: {e}")))?;

    // serde would also accept a one-element array for a struct.
    if !value.is_object() {
        return Err(ClientError::Validation(format!(
            "create response must be an object, got {value}"
        )));
    }

    serde_json::from_value::<CreateResponse>(value)
        .map(|response| response.id)
        .map_err(|e| ClientError::Validation(format!("create response: {e}")))
}
