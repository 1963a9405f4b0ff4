//! Persistence seam for finished page graphs. The generation pipeline only
//! sees the trait, so storage backends can be swapped without touching it.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use schema::models::graph::PageGraph;
use thiserror::Error;
use tokio::sync::RwLock;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store rejected the page: {0}")]
    Rejected(String),
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

#[async_trait]
pub trait PageStore: Send + Sync {
    async fn put_page(&self, page_id: Uuid, graph: &PageGraph) -> Result<(), StoreError>;
    async fn get_page(&self, page_id: Uuid) -> Result<Option<PageGraph>, StoreError>;
}

/// Process-local store keyed by page id. Cloning shares the same map.
#[derive(Clone, Default)]
pub struct InMemoryPageStore {
    pages: Arc<RwLock<HashMap<Uuid, PageGraph>>>,
}

impl InMemoryPageStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PageStore for InMemoryPageStore {
    async fn put_page(&self, page_id: Uuid, graph: &PageGraph) -> Result<(), StoreError> {
        self.pages.write().await.insert(page_id, graph.clone());
        Ok(())
    }

    async fn get_page(&self, page_id: Uuid) -> Result<Option<PageGraph>, StoreError> {
        Ok(self.pages.read().await.get(&page_id).cloned())
    }
}

#[cfg(test)]
mod tests {
    use schema::models::graph::{GraphNode, ROOT_ID};

    use super::*;

    #[tokio::test]
    async fn test_put_then_get_round_trips() {
        let store = InMemoryPageStore::new();
        let page_id = Uuid::new_v4();
        let mut graph = PageGraph::new();
        graph.insert(ROOT_ID.to_string(), GraphNode::root());

        store.put_page(page_id, &graph).await.unwrap();
        let loaded = store.get_page(page_id).await.unwrap();
        assert_eq!(loaded, Some(graph));
    }

    #[tokio::test]
    async fn test_get_missing_page_is_none() {
        let store = InMemoryPageStore::new();
        assert_eq!(store.get_page(Uuid::new_v4()).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_clones_share_state() {
        let store = InMemoryPageStore::new();
        let copy = store.clone();
        let page_id = Uuid::new_v4();
        let mut graph = PageGraph::new();
        graph.insert(ROOT_ID.to_string(), GraphNode::root());

        store.put_page(page_id, &graph).await.unwrap();
        assert!(copy.get_page(page_id).await.unwrap().is_some());
    }
}
