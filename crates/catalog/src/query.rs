//! Search query construction

use crate::error::CatalogError;
use reqwest::Url;

/// Search text as typed, ready to be sent
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    text: String,
}

impl SearchQuery {
    /// Surrounding whitespace is dropped
    pub fn new(text: impl AsRef<str>) -> Self {
        Self {
            text: text.as_ref().trim().to_string(),
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Percent-encoded text for the `q` parameter
    pub fn encoded(&self) -> String {
        urlencoding::encode(&self.text).into_owned()
    }

    /// Full request URL: `base_url?client_id=...&q=...`
    pub fn build_url(&self, base_url: &str, client_id: Option<&str>) -> crate::Result<Url> {
        let mut url = Url::parse(base_url).map_err(|e| CatalogError::InvalidUrl {
            url: base_url.to_string(),
            reason: e.to_string(),
        })?;

        if url.cannot_be_a_base() {
            return Err(CatalogError::InvalidUrl {
                url: base_url.to_string(),
                reason: "not a hierarchical URL".to_string(),
            });
        }

        let mut query = url.query().map(str::to_string).unwrap_or_default();
        let mut push = |key: &str, value: &str| {
            if !query.is_empty() {
                query.push('&');
            }
            query.push_str(key);
            query.push('=');
            query.push_str(value);
        };

        if let Some(client_id) = client_id {
            push("client_id", &urlencoding::encode(client_id));
        }
        push("q", &self.encoded());

        url.set_query(Some(&query));
        Ok(url)
    }
}
