//! HTTP Basic credential parsing

use axum::http::{header::AUTHORIZATION, HeaderMap};
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BasicCredentials {
    pub name: String,
    pub password: String,
}

/// Credentials from a `Basic` Authorization header
///
/// Returns `None` when the header is absent, uses another scheme or does not
/// decode to `name:password`.
pub fn basic_credentials(headers: &HeaderMap) -> Option<BasicCredentials> {
    let value = headers.get(AUTHORIZATION)?.to_str().ok()?;
    let (scheme, encoded) = value.trim().split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("basic") {
        return None;
    }

    let decoded = STANDARD.decode(encoded.trim()).ok()?;
    let decoded = String::from_utf8(decoded).ok()?;
    let (name, password) = decoded.split_once(':')?;

    Some(BasicCredentials {
        name: name.to_string(),
        password: password.to_string(),
    })
}
