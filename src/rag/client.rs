//! RAG service client
//!
//! Thin HTTP client for the document-search collaborator: collection
//! metadata lookup and semantic search over a collection's documents.

use serde::Deserialize;
use serde_json::json;

use crate::core::{AgentError, AgentResult};

/// Metadata describing a document collection
#[derive(Debug, Clone, Deserialize)]
pub struct CollectionInfo {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub metadata: Option<CollectionMetadata>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CollectionMetadata {
    #[serde(default)]
    pub description: Option<String>,
}

impl CollectionInfo {
    /// Free-text description of the collection, if the service has one
    pub fn description(&self) -> Option<&str> {
        self.metadata
            .as_ref()
            .and_then(|m| m.description.as_deref())
    }
}

/// A document returned by a search
#[derive(Debug, Clone, Deserialize)]
pub struct RagDocument {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
}

/// Client for the RAG API server
pub struct RagClient {
    http: reqwest::Client,
    base_url: String,
}

impl RagClient {
    /// Create a client for the service at `base_url` (trailing slash is
    /// tolerated)
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            http: reqwest::Client::new(),
            base_url,
        }
    }

    /// Fetch metadata for a collection
    pub async fn collection(&self, collection: &str) -> AgentResult<CollectionInfo> {
        let endpoint = format!("{}/collections/{}", self.base_url, collection);

        let response = self
            .http
            .get(&endpoint)
            .send()
            .await
            .map_err(|e| AgentError::tool_setup(format!("fetching collection metadata: {e}")))?;

        if !response.status().is_success() {
            return Err(AgentError::tool_setup(format!(
                "collection endpoint returned {}",
                response.status()
            )));
        }

        response
            .json::<CollectionInfo>()
            .await
            .map_err(|e| AgentError::tool_setup(format!("parsing collection metadata: {e}")))
    }

    /// Search a collection for documents similar to `query`
    pub async fn search(
        &self,
        collection: &str,
        query: &str,
        limit: usize,
    ) -> Result<Vec<RagDocument>, String> {
        let endpoint = format!(
            "{}/collections/{}/documents/search",
            self.base_url, collection
        );

        let response = self
            .http
            .post(&endpoint)
            .json(&json!({"query": query, "limit": limit}))
            .send()
            .await
            .map_err(|e| e.to_string())?;

        if !response.status().is_success() {
            return Err(format!("search endpoint returned {}", response.status()));
        }

        response
            .json::<Vec<RagDocument>>()
            .await
            .map_err(|e| e.to_string())
    }
}

/// Render documents as the tagged-text block handed to the LLM
pub fn format_documents(documents: &[RagDocument]) -> String {
    let mut formatted = String::from("<all-documents>\n");

    for doc in documents {
        let id = doc.id.as_deref().unwrap_or("unknown");
        let content = doc.content.as_deref().unwrap_or("");
        formatted.push_str(&format!(
            "  <document id=\"{}\">\n    {}\n  </document>\n",
            id, content
        ));
    }

    formatted.push_str("</all-documents>");
    formatted
}

/// Render a search failure inside the same block, so the LLM sees a
/// well-formed result rather than a raw error
pub fn format_search_error(error: &str) -> String {
    format!(
        "<all-documents>\n  <error>{}</error>\n</all-documents>",
        error
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let client = RagClient::new("http://rag.example.com/");
        assert_eq!(client.base_url, "http://rag.example.com");
    }

    #[test]
    fn test_format_documents() {
        let docs = vec![
            RagDocument {
                id: Some("doc-1".into()),
                content: Some("first".into()),
            },
            RagDocument {
                id: None,
                content: Some("second".into()),
            },
        ];

        let formatted = format_documents(&docs);
        assert_eq!(
            formatted,
            "<all-documents>\n  <document id=\"doc-1\">\n    first\n  </document>\n  <document id=\"unknown\">\n    second\n  </document>\n</all-documents>"
        );
    }

    #[test]
    fn test_format_empty_documents() {
        assert_eq!(format_documents(&[]), "<all-documents>\n</all-documents>");
    }

    #[test]
    fn test_format_search_error() {
        let formatted = format_search_error("connection refused");
        assert_eq!(
            formatted,
            "<all-documents>\n  <error>connection refused</error>\n</all-documents>"
        );
    }

    #[test]
    fn test_collection_info_description() {
        let info: CollectionInfo = serde_json::from_value(serde_json::json!({
            "name": "python",
            "metadata": {"description": "Python docs"}
        }))
        .unwrap();
        assert_eq!(info.description(), Some("Python docs"));

        let bare: CollectionInfo = serde_json::from_value(serde_json::json!({})).unwrap();
        assert!(bare.description().is_none());
    }
}
