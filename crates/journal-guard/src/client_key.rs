//! Caller identity for rate limiting.

/// Key used when the caller's origin cannot be determined.
pub const UNKNOWN_CLIENT: &str = "unknown";

/// Derive a rate-limit key from proxy headers.
///
/// Takes the first non-empty entry of `X-Forwarded-For`, then `X-Real-IP`,
/// and falls back to [`UNKNOWN_CLIENT`].
pub fn client_key(forwarded_for: Option<&str>, real_ip: Option<&str>) -> String {
    forwarded_for
        .and_then(|v| v.split(',').next())
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .or_else(|| real_ip.map(str::trim).filter(|v| !v.is_empty()))
        .unwrap_or(UNKNOWN_CLIENT)
        .to_string()
}
