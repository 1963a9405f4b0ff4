//! Background page-generation pipeline: prompt composition, model call,
//! parsing, transformation, graph build, persistence, image resolution. Each
//! build runs in its own task and reports progress through a shared status
//! registry.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;
use schema::models::brief::GenerationRequest;
use schema::models::document::ComponentNode;
use schema::models::graph::PageGraph;
use schema::models::page::{BuildStatus, PageBuild};
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;
use tracing::{error, info, warn};
use uuid::Uuid;

use super::gemini::{GeminiClient, GeminiError, parse_json};
use super::graph::{build_graph, validate_graph};
use super::images::{ImageGenerator, ImageStyle, resolve_images};
use super::prompt;
use super::store::{PageStore, StoreError};
use super::transform::{TransformContext, transform_section};

#[derive(Debug, Error)]
pub enum GenerationError {
    #[error(transparent)]
    Model(#[from] GeminiError),
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Anything that can run a text completion.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate_text(&self, system: &str, prompt: &str) -> Result<String, GeminiError>;
}

#[async_trait]
impl TextGenerator for GeminiClient {
    async fn generate_text(&self, system: &str, prompt: &str) -> Result<String, GeminiError> {
        GeminiClient::generate_text(self, system, prompt).await
    }
}

/// Shapes the model is known to answer with: the documented envelope, a bare
/// component array, or something else entirely.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum GeneratedPage {
    Wrapped { components: Vec<Value> },
    Bare(Vec<Value>),
    Other(Value),
}

impl GeneratedPage {
    fn into_components(self) -> Vec<Value> {
        match self {
            Self::Wrapped { components } => components,
            Self::Bare(components) => components,
            Self::Other(other) => {
                warn!(
                    payload = %other.to_string().chars().take(100).collect::<String>(),
                    "model JSON carries no components, treating as empty"
                );
                Vec::new()
            }
        }
    }
}

/// Runs page builds in the background and answers status and content
/// queries. Cloning is cheap; clones share the store and status registry.
pub struct PageGenerator<S, G> {
    store: Arc<S>,
    model: G,
    builds: Arc<DashMap<Uuid, PageBuild>>,
}

impl<S, G: Clone> Clone for PageGenerator<S, G> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            model: self.model.clone(),
            builds: Arc::clone(&self.builds),
        }
    }
}

impl<S, G> PageGenerator<S, G>
where
    S: PageStore + Send + Sync + 'static,
    G: TextGenerator + ImageGenerator + Clone + Send + Sync + 'static,
{
    pub fn new(store: Arc<S>, model: G) -> Self {
        Self {
            store,
            model,
            builds: Arc::new(DashMap::new()),
        }
    }

    /// Accept a build request: allocate a page id, record the initial status
    /// and kick off the pipeline in a background task. Returns immediately
    /// with the status record callers can poll.
    pub fn start(&self, request: GenerationRequest) -> PageBuild {
        let page_id = Uuid::new_v4();
        let build = PageBuild::new(page_id);
        self.builds.insert(page_id, build.clone());
        info!(
            %page_id,
            industry = %request.industry,
            layout = %request.layout,
            campaign = %request.campaign,
            language = %request.language,
            "page build accepted"
        );

        let worker = self.clone();
        tokio::spawn(async move {
            worker.run_build(page_id, request).await;
        });
        build
    }

    async fn run_build(&self, page_id: Uuid, request: GenerationRequest) {
        let composed = prompt::compose(&request);
        self.update_status(page_id, BuildStatus::PromptComposed, None);

        let raw = match self.model.generate_text(&composed.system, &composed.user).await {
            Ok(text) => text,
            Err(err) => {
                error!(%page_id, error = %err, "text generation failed");
                self.update_status(page_id, BuildStatus::Failed, Some(err.to_string()));
                return;
            }
        };
        self.update_status(page_id, BuildStatus::RawResponseReceived, None);

        let components = match parse_json::<GeneratedPage>(&raw) {
            Ok(page) => page.into_components(),
            Err(err) => {
                error!(%page_id, error = %err, "model response is not usable JSON");
                self.update_status(page_id, BuildStatus::Failed, Some(err.to_string()));
                return;
            }
        };
        self.update_status(page_id, BuildStatus::Parsed, None);
        info!(%page_id, components = components.len(), "model returned components");

        let ctx = TransformContext::from_request(&request);
        let transformed: Vec<ComponentNode> = components
            .iter()
            .filter(|section| !section.is_null())
            .map(|section| transform_section(section, &ctx))
            .collect();
        self.update_status(page_id, BuildStatus::Transformed, None);

        let mut graph = build_graph(&transformed);
        validate_graph(&mut graph);
        self.update_status(page_id, BuildStatus::GraphBuilt, None);
        info!(%page_id, nodes = graph.len(), "graph built");

        if let Err(err) = self.store.put_page(page_id, &graph).await {
            error!(%page_id, error = %err, "failed to persist page");
            self.update_status(page_id, BuildStatus::Failed, Some(err.to_string()));
            return;
        }

        self.update_status(page_id, BuildStatus::ImagesResolving, None);
        let style = ImageStyle::from_request(&request);
        let resolved = resolve_images(&mut graph, &self.model, &style).await;
        if resolved > 0 {
            // The imageless graph is already persisted, so a failure here
            // only loses the refreshed images.
            if let Err(err) = self.store.put_page(page_id, &graph).await {
                warn!(%page_id, error = %err, "failed to persist resolved images");
            }
        }

        self.update_status(page_id, BuildStatus::Ready, None);
        info!(%page_id, "page build ready");
    }

    fn update_status(&self, page_id: Uuid, status: BuildStatus, error_message: Option<String>) {
        if let Some(mut build) = self.builds.get_mut(&page_id) {
            build.status = status;
            build.error_message = error_message;
            build.updated_at = Utc::now();
        }
    }

    pub fn get_status(&self, page_id: Uuid) -> Option<PageBuild> {
        self.builds.get(&page_id).map(|entry| entry.clone())
    }

    /// Fetch a stored page, repairing any node types the renderer no longer
    /// resolves before handing it out.
    pub async fn load_page(&self, page_id: Uuid) -> Result<Option<PageGraph>, GenerationError> {
        let Some(mut graph) = self.store.get_page(page_id).await? else {
            return Ok(None);
        };
        let repaired = validate_graph(&mut graph);
        if repaired > 0 {
            info!(%page_id, repaired, "repaired unknown component types on load");
        }
        Ok(Some(graph))
    }
}
