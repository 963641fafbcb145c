//! Open documents of a server session.

use crate::error::{AnalysisError, Result};
use dashmap::DashMap;
use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct Document {
    pub text: Arc<str>,
    pub version: i32,
}

/// Current text of every open document, keyed by URI.
///
/// Readers take an `Arc<str>` snapshot, so a query never observes a change
/// that lands while it runs.
#[derive(Debug, Default)]
pub struct DocumentStore {
    documents: DashMap<String, Document>,
}

impl DocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn open(&self, uri: impl Into<String>, text: impl Into<Arc<str>>, version: i32) {
        let uri = uri.into();
        tracing::debug!(%uri, version, "document opened");
        self.documents.insert(
            uri,
            Document {
                text: text.into(),
                version,
            },
        );
    }

    /// Replace the text of an open document. Changes older than the stored
    /// version are ignored.
    pub fn change(&self, uri: &str, text: impl Into<Arc<str>>, version: i32) -> Result<()> {
        let mut entry = self
            .documents
            .get_mut(uri)
            .ok_or_else(|| AnalysisError::UnknownDocument(uri.to_string()))?;
        if version < entry.version {
            tracing::debug!(%uri, version, current = entry.version, "stale change ignored");
            return Ok(());
        }
        *entry = Document {
            text: text.into(),
            version,
        };
        Ok(())
    }

    pub fn close(&self, uri: &str) -> Option<Document> {
        self.documents.remove(uri).map(|(_, doc)| doc)
    }

    pub fn snapshot(&self, uri: &str) -> Option<Arc<str>> {
        self.documents.get(uri).map(|doc| doc.text.clone())
    }

    pub fn get(&self, uri: &str) -> Option<Document> {
        self.documents.get(uri).map(|doc| doc.clone())
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}
