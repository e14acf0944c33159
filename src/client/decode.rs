//! Bounded decoding of single-object JSON API responses.

use serde::de::DeserializeOwned;

use crate::error::ApiError;

/// Decode exactly one JSON object from `data` into the target structure.
///
/// Unknown fields are ignored for forward compatibility with API fields
/// this project does not model. A second JSON value trailing the first is
/// an error: the API returns exactly one object per response body. The
/// input is expected to already be bounded by the configured read limit.
pub fn decode_single<T: DeserializeOwned>(data: &[u8], source: &str) -> Result<T, ApiError> {
    let mut deserializer = serde_json::Deserializer::from_slice(data);

    let decoded = T::deserialize(&mut deserializer).map_err(|cause| ApiError::Decode {
        url: source.to_string(),
        cause,
    })?;

    deserializer.end().map_err(|_| ApiError::MultipleObjects {
        url: source.to_string(),
    })?;

    Ok(decoded)
}
