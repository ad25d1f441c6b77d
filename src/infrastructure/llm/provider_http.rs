use reqwest::{Response, StatusCode};

use crate::application::ports::ProviderError;

/// Maps a transport failure, timeouts included, onto the provider taxonomy.
pub fn transport_error(provider: &str, err: reqwest::Error) -> ProviderError {
    if err.is_timeout() {
        ProviderError::Unavailable(format!("{provider} request timed out: {err}"))
    } else {
        ProviderError::Unavailable(format!("{provider} request: {err}"))
    }
}

/// Passes 2xx responses through and converts everything else into an error
/// carrying the upstream body.
pub async fn check_status(provider: &str, response: Response) -> Result<Response, ProviderError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response
        .text()
        .await
        .unwrap_or_else(|_| "unknown error".to_string());

    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Err(ProviderError::Unauthenticated(
            format!("{provider} rejected credentials ({status}): {body}"),
        )),
        _ => Err(ProviderError::Unavailable(format!(
            "{provider} API error: {status} - {body}"
        ))),
    }
}

pub async fn read_envelope<T: serde::de::DeserializeOwned>(
    provider: &str,
    response: Response,
) -> Result<T, ProviderError> {
    let raw = response
        .bytes()
        .await
        .map_err(|e| transport_error(provider, e))?;

    serde_json::from_slice(&raw).map_err(|e| {
        tracing::error!(
            provider,
            raw_response = %String::from_utf8_lossy(&raw),
            "Failed to parse provider envelope"
        );
        ProviderError::MalformedReply(format!("{provider} envelope: {e}"))
    })
}
