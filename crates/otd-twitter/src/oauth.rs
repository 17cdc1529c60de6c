//! OAuth 1.0a request signing (HMAC-SHA1) for user-context API calls.
//!
//! Only parameters that take part in the signature are the OAuth protocol
//! parameters, the URL query and any form-encoded body fields passed in by
//! the caller. Multipart and JSON bodies are never signed.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use hmac::{Hmac, Mac};
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use reqwest::Url;
use sha1::Sha1;
use uuid::Uuid;

use crate::error::TwitterError;

type HmacSha1 = Hmac<Sha1>;

/// RFC 3986 unreserved characters stay as-is; everything else is percent-encoded.
const OAUTH_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// App and user credentials for user-context requests.
#[derive(Clone)]
pub struct OAuthCredentials {
    pub consumer_key: String,
    pub consumer_secret: String,
    pub access_token: String,
    pub access_token_secret: String,
}

impl std::fmt::Debug for OAuthCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OAuthCredentials")
            .field("consumer_key", &"[redacted]")
            .field("consumer_secret", &"[redacted]")
            .field("access_token", &"[redacted]")
            .field("access_token_secret", &"[redacted]")
            .finish()
    }
}

/// Builds an `Authorization` header value for a request, using a fresh nonce
/// and the current time.
///
/// # Errors
///
/// Returns [`TwitterError::Signing`] if the HMAC cannot be initialised.
pub fn authorization_header(
    credentials: &OAuthCredentials,
    method: &str,
    url: &Url,
    form_params: &[(&str, &str)],
) -> Result<String, TwitterError> {
    let nonce = Uuid::new_v4().simple().to_string();
    let timestamp = chrono::Utc::now().timestamp().to_string();
    sign(credentials, method, url, form_params, &nonce, &timestamp)
}

/// Deterministic core of [`authorization_header`].
pub(crate) fn sign(
    credentials: &OAuthCredentials,
    method: &str,
    url: &Url,
    form_params: &[(&str, &str)],
    nonce: &str,
    timestamp: &str,
) -> Result<String, TwitterError> {
    let oauth_params = [
        ("oauth_consumer_key", credentials.consumer_key.as_str()),
        ("oauth_nonce", nonce),
        ("oauth_signature_method", "HMAC-SHA1"),
        ("oauth_timestamp", timestamp),
        ("oauth_token", credentials.access_token.as_str()),
        ("oauth_version", "1.0"),
    ];

    let base = signature_base_string(method, url, &oauth_params, form_params);
    let key = format!(
        "{}&{}",
        encode(&credentials.consumer_secret),
        encode(&credentials.access_token_secret)
    );

    let mut mac =
        HmacSha1::new_from_slice(key.as_bytes()).map_err(|e| TwitterError::Signing(e.to_string()))?;
    mac.update(base.as_bytes());
    let signature = STANDARD.encode(mac.finalize().into_bytes());

    let header = oauth_params
        .iter()
        .copied()
        .chain(std::iter::once(("oauth_signature", signature.as_str())))
        .map(|(k, v)| format!("{}=\"{}\"", encode(k), encode(v)))
        .collect::<Vec<_>>()
        .join(", ");

    Ok(format!("OAuth {header}"))
}

/// `METHOD&encoded-url&encoded-params`, with parameters encoded then sorted.
fn signature_base_string(
    method: &str,
    url: &Url,
    oauth_params: &[(&str, &str)],
    form_params: &[(&str, &str)],
) -> String {
    let mut params: Vec<(String, String)> = url
        .query_pairs()
        .map(|(k, v)| (encode(&k), encode(&v)))
        .chain(
            oauth_params
                .iter()
                .chain(form_params.iter())
                .map(|(k, v)| (encode(k), encode(v))),
        )
        .collect();
    params.sort();

    let param_string = params
        .iter()
        .map(|(k, v)| format!("{k}={v}"))
        .collect::<Vec<_>>()
        .join("&");

    let mut base_url = url.clone();
    base_url.set_query(None);
    base_url.set_fragment(None);

    format!(
        "{}&{}&{}",
        method.to_ascii_uppercase(),
        encode(base_url.as_str()),
        encode(&param_string)
    )
}

fn encode(s: &str) -> String {
    utf8_percent_encode(s, OAUTH_ENCODE_SET).to_string()
}
