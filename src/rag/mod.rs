//! RAG (retrieval-augmented generation) support
//!
//! - `RagClient`: HTTP client for the document-search service
//! - `RagSearchTool` / `create_rag_tool`: a Tool querying one collection

mod client;
mod tool;

pub use client::{
    format_documents, format_search_error, CollectionInfo, CollectionMetadata, RagClient,
    RagDocument,
};
pub use tool::{create_rag_tool, RagSearchTool};

use serde::{Deserialize, Serialize};

/// Configuration for the RAG capability provider
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RagConfig {
    /// Base URL of the RAG server. `None` disables the RAG provider.
    #[serde(default)]
    pub rag_url: Option<String>,

    /// Collection to expose as a search tool
    #[serde(default)]
    pub collection: Option<String>,
}

impl RagConfig {
    pub fn new(rag_url: impl Into<String>, collection: impl Into<String>) -> Self {
        Self {
            rag_url: Some(rag_url.into()),
            collection: Some(collection.into()),
        }
    }
}
