use serde_json::Value;
use tracing::{debug, trace};

use crate::error::PolicyError;
use crate::escape::{escape_for_log, unescape_policy};
use crate::types::{CanonicalInlinePolicy, InlinePolicy, Policy};

/// Canonicalize policy text into a [`Policy`].
///
/// The text must already be percent-decoded. Malformed JSON maps to
/// `PolicyError::ParseError`, a grammar mismatch to `PolicyError::SchemaError`.
/// Nothing is returned on failure.
///
/// Example:
/// ```rust
/// use iam_policy_canon::canonicalize_policy;
/// let policy = canonicalize_policy(
///     r#"{"Version":"2012-10-17","Statement":{"Effect":"Allow","Action":"S3:GetObject"}}"#,
/// ).unwrap();
/// assert_eq!(policy.statements[0].action.as_ref().unwrap().as_slice(), &["s3:getobject"]);
/// ```
pub fn canonicalize_policy(text: &str) -> Result<Policy, PolicyError> {
    trace!(event = "Canonicalize", phase = "Start", bytes = text.len());

    let document: Value = serde_json::from_str(text).map_err(|e| {
        debug!(event = "Canonicalize", phase = "Parse", error = %e);
        PolicyError::ParseError {
            message: e.to_string(),
            escaped: escape_for_log(text),
        }
    })?;

    canonicalize_document(&document)
}

/// Canonicalize a document that has already been decoded into JSON.
pub fn canonicalize_document(document: &Value) -> Result<Policy, PolicyError> {
    match Policy::from_json(document) {
        Ok(policy) => {
            trace!(
                event = "Canonicalize",
                phase = "Result",
                version = policy.version.as_str(),
                statements = policy.statements.len()
            );
            Ok(policy)
        }
        Err(e) => {
            debug!(event = "Canonicalize", phase = "Schema", error = %e);
            Err(e)
        }
    }
}

/// Percent-decode `text` and canonicalize the result.
pub fn canonicalize_escaped_policy(text: &str) -> Result<Policy, PolicyError> {
    let decoded = unescape_policy(text)?;
    canonicalize_policy(&decoded)
}

/// Canonicalize each inline policy document and re-attach its name.
///
/// Input order is kept. A string document is taken as policy text; any other
/// value is re-serialized and canonicalized the same way. The first failure
/// fails the whole call.
pub fn canonicalize_inline_policies(
    policies: &[InlinePolicy],
) -> Result<Vec<CanonicalInlinePolicy>, PolicyError> {
    policies
        .iter()
        .map(|inline| {
            debug!(
                event = "Canonicalize",
                phase = "Inline",
                policy_name = inline.policy_name.as_str()
            );
            let text = match &inline.policy_document {
                Value::String(text) => text.clone(),
                other => other.to_string(),
            };
            Ok(CanonicalInlinePolicy {
                policy_name: inline.policy_name.clone(),
                policy_document: canonicalize_policy(&text)?,
            })
        })
        .collect()
}
