//! Percent-encoding helpers around the canonicalizer.
//!
//! Some AWS APIs (`GetRolePolicy`, `GetAccountAuthorizationDetails`, ...)
//! return policy documents URL-encoded. Decoding happens here, before
//! canonicalization; the canonicalizer itself never decodes.

use percent_encoding::{NON_ALPHANUMERIC, percent_decode_str, utf8_percent_encode};

use crate::error::PolicyError;

/// Decode `%XX` sequences. `+` is kept as a literal plus sign.
pub fn unescape_policy(text: &str) -> Result<String, PolicyError> {
    percent_decode_str(text)
        .decode_utf8()
        .map(|decoded| decoded.into_owned())
        .map_err(|e| PolicyError::DecodeError(e.to_string()))
}

/// Encode every non-alphanumeric byte so arbitrary input is safe to log.
pub fn escape_for_log(text: &str) -> String {
    utf8_percent_encode(text, NON_ALPHANUMERIC).to_string()
}
