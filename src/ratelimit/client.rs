//! Client identification for rate limiting.

use axum::http::HeaderMap;

/// Bucket shared by every request that carries no usable forwarded address.
pub const UNKNOWN_CLIENT: &str = "unknown";

const FORWARDED_FOR: &str = "x-forwarded-for";

/// Derives the rate-limit client id from `X-Forwarded-For`.
///
/// Only the left-most address counts, so a proxy chain does not turn one
/// client into several. A missing, non-UTF-8 or blank header maps to
/// [`UNKNOWN_CLIENT`].
pub fn client_id_from_headers(headers: &HeaderMap) -> String {
    headers
        .get(FORWARDED_FOR)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(',').next())
        .map(str::trim)
        .filter(|first| !first.is_empty())
        .unwrap_or(UNKNOWN_CLIENT)
        .to_string()
}
