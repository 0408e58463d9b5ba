use axum::{
    http::{
        header::{ACCEPT, CONTENT_DISPOSITION, CONTENT_TYPE},
        HeaderMap, HeaderName, HeaderValue,
    },
    response::{IntoResponse, Response},
};
use lc_types::{consensus::fork::ForkName, ForkVersionedResponse};
use serde::Serialize;
use ssz::Encode;

use crate::errors::LightClientApiError;

pub const JSON_CONTENT_TYPE: &str = "application/json";
pub const SSZ_CONTENT_TYPE: &str = "application/octet-stream";
pub const ETH_CONSENSUS_VERSION: &str = "eth-consensus-version";

/// Response encoding picked from the request's `Accept` header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentType {
    Json,
    Ssz,
}

impl ContentType {
    pub fn from_headers(headers: &HeaderMap) -> Self {
        Self::from_accept(headers.get(ACCEPT).and_then(|value| value.to_str().ok()))
    }

    /// SSZ only when `application/octet-stream` carries the highest weight; the earliest
    /// entry wins a tie. Anything else, including no header at all, is JSON.
    pub fn from_accept(accept: Option<&str>) -> Self {
        let mut preferred: Option<(&str, f32)> = None;
        for (media_type, weight) in accept
            .unwrap_or_default()
            .split(',')
            .filter_map(parse_media_range)
        {
            if preferred.map_or(true, |(_, best)| weight > best) {
                preferred = Some((media_type, weight));
            }
        }
        match preferred {
            Some((media_type, _)) if media_type.eq_ignore_ascii_case(SSZ_CONTENT_TYPE) => {
                Self::Ssz
            }
            _ => Self::Json,
        }
    }
}

/// Splits `type/subtype;q=0.8` into the media type and its weight. Unparseable weights and
/// weights of zero drop the entry.
fn parse_media_range(media_range: &str) -> Option<(&str, f32)> {
    let mut parts = media_range.split(';');
    let media_type = parts.next()?.trim();
    if media_type.is_empty() {
        return None;
    }

    let mut weight = 1.0;
    for param in parts {
        let Some((name, value)) = param.split_once('=') else {
            continue;
        };
        if name.trim().eq_ignore_ascii_case("q") {
            weight = value.trim().parse::<f32>().ok()?;
        }
    }
    (weight > 0.0 && weight <= 1.0).then_some((media_type, weight))
}

/// A single fork-versioned payload, as SSZ bytes offered for download or as the JSON
/// `{version, data}` envelope. Both carry the fork in the `Eth-Consensus-Version` header.
pub fn versioned_response<T>(
    content_type: ContentType,
    response: ForkVersionedResponse<T>,
    ssz_filename: &str,
) -> Result<Response, LightClientApiError>
where
    T: Encode + Serialize,
{
    match content_type {
        ContentType::Ssz => {
            let disposition =
                HeaderValue::try_from(format!("attachment; filename=\"{ssz_filename}\""))
                    .map_err(|err| {
                        LightClientApiError::internal("could not build response headers", err)
                    })?;
            Ok((
                [
                    (CONTENT_TYPE, HeaderValue::from_static(SSZ_CONTENT_TYPE)),
                    (CONTENT_DISPOSITION, disposition),
                    (
                        HeaderName::from_static(ETH_CONSENSUS_VERSION),
                        version_header(response.version),
                    ),
                ],
                response.data.as_ssz_bytes(),
            )
                .into_response())
        }
        ContentType::Json => json_response(&response, Some(response.version)),
    }
}

pub fn json_response<T: Serialize>(
    body: &T,
    version: Option<ForkName>,
) -> Result<Response, LightClientApiError> {
    let body = serde_json::to_vec(body)
        .map_err(|err| LightClientApiError::internal("could not encode response", err))?;
    let content_type = [(CONTENT_TYPE, HeaderValue::from_static(JSON_CONTENT_TYPE))];
    Ok(match version {
        Some(version) => (
            content_type,
            [(
                HeaderName::from_static(ETH_CONSENSUS_VERSION),
                version_header(version),
            )],
            body,
        )
            .into_response(),
        None => (content_type, body).into_response(),
    })
}

fn version_header(version: ForkName) -> HeaderValue {
    HeaderValue::from_static(version.as_str())
}
