//! Recovery parsing for loosely structured model output.

use serde::de::DeserializeOwned;

use crate::errors::PipelineError;

/// Strip leading and trailing markdown code-fence markers from a model reply.
///
/// Handles both ` ```json ` and bare ` ``` ` fences; text without fences comes
/// back trimmed and otherwise untouched.
pub fn strip_code_fences(text: &str) -> &str {
    let mut out = text.trim();
    if let Some(rest) = out.strip_prefix("```") {
        out = rest.strip_prefix("json").unwrap_or(rest).trim_start();
    }
    if let Some(rest) = out.trim_end().strip_suffix("```") {
        out = rest;
    }
    out.trim()
}

/// Parse a JSON array out of free-form model text.
///
/// Tries the whole fence-stripped text first; when that fails, retries on the
/// substring between the first `[` and the last `]`, which recovers arrays
/// embedded in surrounding prose.
pub fn parse_json_array<T: DeserializeOwned>(text: &str) -> Result<Vec<T>, PipelineError> {
    let cleaned = strip_code_fences(text);
    match serde_json::from_str(cleaned) {
        Ok(items) => Ok(items),
        Err(direct_err) => {
            let bounds = cleaned.find('[').zip(cleaned.rfind(']'));
            match bounds {
                Some((start, end)) if start < end => serde_json::from_str(&cleaned[start..=end])
                    .map_err(|err| PipelineError::MalformedOutput {
                        reason: err.to_string(),
                    }),
                _ => Err(PipelineError::MalformedOutput {
                    reason: direct_err.to_string(),
                }),
            }
        }
    }
}
