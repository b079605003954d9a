use serde::{Deserialize, Serialize};

/// One structured web research result, the raw material for idea generation.
///
/// `id` is only unique within a single research response. `url` may be the
/// literal `#` sentinel when a finding has no backing page, and `source` is
/// either a hostname or one of the fallback labels.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Finding {
    pub id: u32,
    pub title: String,
    pub snippet: String,
    pub url: String,
    pub source: String,
}
