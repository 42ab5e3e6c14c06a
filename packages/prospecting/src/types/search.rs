//! Search provider wire types.

/// One result returned by the search provider for a query.
///
/// Ephemeral: hits have no identity beyond their position in a result
/// list, and everything downstream is derived from these three fields.
#[derive(Debug, Clone, Default)]
pub struct SearchHit {
    /// Result URL as returned by the provider.
    pub url: String,

    /// Result title (often truncated by the provider).
    pub title: String,

    /// Result snippet/description.
    pub snippet: String,
}

impl SearchHit {
    /// Create a hit from its three parts.
    pub fn new(
        url: impl Into<String>,
        title: impl Into<String>,
        snippet: impl Into<String>,
    ) -> Self {
        Self {
            url: url.into(),
            title: title.into(),
            snippet: snippet.into(),
        }
    }

    /// Title and snippet joined, the text scanned for embedded emails.
    pub fn combined_text(&self) -> String {
        format!("{} {}", self.title, self.snippet)
    }
}
