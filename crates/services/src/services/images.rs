//! Replaces `IMAGE_PROMPT:` placeholders in a built graph with generated
//! image URLs. Generation runs with bounded concurrency and a per-image
//! deadline; a failed image degrades to a labelled placeholder URL instead of
//! failing the page.

use std::time::Duration;

use async_trait::async_trait;
use futures::{StreamExt, stream};
use schema::models::brief::{Art, Campaign, GenerationRequest, Tone};
use schema::models::graph::{GraphNode, PageGraph};
use serde_json::Value;
use tokio::time::timeout;
use tracing::{info, warn};

use super::gemini::{GeminiClient, GeminiError};
use super::rules::{art_descriptor, campaign_image_suffix, tone_descriptor};

/// Marker the model is instructed to emit for every image slot.
pub const IMAGE_PROMPT_PREFIX: &str = "IMAGE_PROMPT:";

const MAX_CONCURRENT_GENERATIONS: usize = 4;
const GENERATION_TIMEOUT: Duration = Duration::from_secs(45);

/// Anything that can turn a text prompt into an image URL.
#[async_trait]
pub trait ImageGenerator: Send + Sync {
    async fn generate_image(&self, prompt: &str) -> Result<String, GeminiError>;
}

#[async_trait]
impl ImageGenerator for GeminiClient {
    async fn generate_image(&self, prompt: &str) -> Result<String, GeminiError> {
        GeminiClient::generate_image(self, prompt).await
    }
}

/// Style dimensions folded into every image prompt.
#[derive(Debug, Clone)]
pub struct ImageStyle {
    pub tone: Tone,
    pub art: Art,
    pub campaign: Campaign,
}

impl ImageStyle {
    pub fn from_request(request: &GenerationRequest) -> Self {
        Self {
            tone: request.tone.clone(),
            art: request.art.clone(),
            campaign: request.campaign.clone(),
        }
    }
}

/// One step on the path from a node's `props` map to a placeholder string.
#[derive(Debug, Clone, PartialEq)]
pub enum PathStep {
    Key(String),
    Index(usize),
}

/// A placeholder found in the graph, with everything needed to generate its
/// image and write the result back.
#[derive(Debug, Clone)]
pub struct PlaceholderSite {
    pub node_id: String,
    pub path: Vec<PathStep>,
    pub prompt: String,
    pub base: String,
}

/// Walk every node's props, including nested arrays and objects, and collect
/// each `IMAGE_PROMPT:` string together with its fully composed prompt.
pub fn collect_placeholders(graph: &PageGraph, style: &ImageStyle) -> Vec<PlaceholderSite> {
    let mut sites = Vec::new();
    for (node_id, node) in graph {
        let hint = framing_hint(node);
        for (key, value) in &node.props {
            let mut path = vec![PathStep::Key(key.clone())];
            scan_value(value, node_id, hint, style, &mut path, &mut sites);
        }
    }
    sites
}

fn scan_value(
    value: &Value,
    node_id: &str,
    hint: &str,
    style: &ImageStyle,
    path: &mut Vec<PathStep>,
    sites: &mut Vec<PlaceholderSite>,
) {
    match value {
        Value::String(s) => {
            if let Some(rest) = s.strip_prefix(IMAGE_PROMPT_PREFIX) {
                let base = rest.trim().to_string();
                sites.push(PlaceholderSite {
                    node_id: node_id.to_string(),
                    path: path.clone(),
                    prompt: compose_image_prompt(&base, style, hint),
                    base,
                });
            }
        }
        Value::Object(map) => {
            for (key, nested) in map {
                path.push(PathStep::Key(key.clone()));
                scan_value(nested, node_id, hint, style, path, sites);
                path.pop();
            }
        }
        Value::Array(items) => {
            for (index, nested) in items.iter().enumerate() {
                path.push(PathStep::Index(index));
                scan_value(nested, node_id, hint, style, path, sites);
                path.pop();
            }
        }
        _ => {}
    }
}

/// Aspect-ratio guidance derived from the component the placeholder sits in.
fn framing_hint(node: &GraphNode) -> &'static str {
    match node.node_type.resolved_name.name() {
        "Section" | "HERO" | "HeroCarousel" => {
            "wide angle, panoramic, 16:9 aspect ratio, background texture"
        }
        "ProductCard" | "Grid" => {
            "product photography, isolated subject, 1:1 square aspect ratio, centered"
        }
        "ImageBlock" => {
            let full_width = node.props.get("width").and_then(Value::as_str) == Some("100%");
            let auto_height = match node.props.get("height") {
                None | Some(Value::Null) => true,
                Some(Value::String(s)) => s.is_empty() || s == "auto",
                _ => false,
            };
            if full_width && auto_height {
                "wide shot, 16:9 aspect ratio"
            } else {
                "standard photography, 4:3 aspect ratio"
            }
        }
        _ => "aspect ratio 4:3",
    }
}

fn compose_image_prompt(base: &str, style: &ImageStyle, hint: &str) -> String {
    format!(
        "{base}, {art}, {tone}{campaign}, {hint}",
        art = art_descriptor(&style.art),
        tone = tone_descriptor(&style.tone),
        campaign = campaign_image_suffix(&style.campaign),
    )
}

/// Labelled placeholder used when generation fails or times out.
fn fallback_url(base: &str) -> String {
    let label = base.split(' ').take(3).collect::<Vec<_>>().join("+");
    format!(
        "https://placehold.co/800x600?text={}",
        urlencoding::encode(&label)
    )
}

/// Generate an image for every placeholder in the graph and write the URLs
/// back in place. Returns the number of placeholders resolved. Individual
/// failures and timeouts degrade to [`fallback_url`]; this function itself
/// never fails.
pub async fn resolve_images<G>(graph: &mut PageGraph, model: &G, style: &ImageStyle) -> usize
where
    G: ImageGenerator,
{
    let sites = collect_placeholders(graph, style);
    if sites.is_empty() {
        return 0;
    }
    info!(
        count = sites.len(),
        art = %style.art,
        tone = %style.tone,
        "generating images"
    );

    let resolved: Vec<(PlaceholderSite, String)> = stream::iter(sites.into_iter().map(|site| {
        async move {
            let url = match timeout(GENERATION_TIMEOUT, model.generate_image(&site.prompt)).await {
                Ok(Ok(url)) => {
                    info!(
                        prompt = %site.base.chars().take(30).collect::<String>(),
                        "image generated"
                    );
                    url
                }
                Ok(Err(error)) => {
                    warn!(
                        prompt = %site.base.chars().take(30).collect::<String>(),
                        %error,
                        "image generation failed, using fallback"
                    );
                    fallback_url(&site.base)
                }
                Err(_) => {
                    warn!(
                        prompt = %site.base.chars().take(30).collect::<String>(),
                        "image generation timed out, using fallback"
                    );
                    fallback_url(&site.base)
                }
            };
            (site, url)
        }
    }))
    .buffer_unordered(MAX_CONCURRENT_GENERATIONS)
    .collect()
    .await;

    let count = resolved.len();
    for (site, url) in resolved {
        write_back(graph, &site, url);
    }
    info!(count, "all images resolved");
    count
}

fn write_back(graph: &mut PageGraph, site: &PlaceholderSite, url: String) {
    let Some(node) = graph.get_mut(&site.node_id) else {
        return;
    };
    let Some((first, rest)) = site.path.split_first() else {
        return;
    };
    // The first step is always a key into the node's props map.
    let PathStep::Key(first_key) = first else {
        return;
    };
    let Some(mut slot) = node.props.get_mut(first_key) else {
        return;
    };
    for step in rest {
        let next = match step {
            PathStep::Key(key) => slot.get_mut(key.as_str()),
            PathStep::Index(index) => slot.get_mut(*index),
        };
        match next {
            Some(value) => slot = value,
            None => return,
        }
    }
    *slot = Value::String(url);
}

#[cfg(test)]
mod tests {
    use schema::models::document::ComponentNode;
    use serde_json::json;

    use super::super::graph::build_graph;
    use super::*;

    fn style() -> ImageStyle {
        ImageStyle {
            tone: Tone::default(),
            art: Art::default(),
            campaign: Campaign::default(),
        }
    }

    #[derive(Clone)]
    struct FakeImages;

    #[async_trait]
    impl ImageGenerator for FakeImages {
        async fn generate_image(&self, prompt: &str) -> Result<String, GeminiError> {
            if prompt.contains("unpaintable") {
                Err(GeminiError::NoImage)
            } else {
                Ok("data:image/png;base64,iVBORw0KGgo=".to_string())
            }
        }
    }

    #[test]
    fn test_collect_finds_nested_placeholders() {
        let tree = ComponentNode::new("Section")
            .prop("bgImage", "IMAGE_PROMPT: mountain skyline")
            .child(ComponentNode::new("HeroCarousel").prop(
                "slides",
                json!([
                    { "image": "IMAGE_PROMPT: slide one" },
                    { "image": "https://already.resolved/x.png" },
                    { "image": "IMAGE_PROMPT: slide two" },
                ]),
            ));
        let graph = build_graph(&[tree]);
        let sites = collect_placeholders(&graph, &style());
        assert_eq!(sites.len(), 3);

        let bg = &sites[0];
        assert_eq!(bg.base, "mountain skyline");
        assert_eq!(bg.path, vec![PathStep::Key("bgImage".to_string())]);
        assert!(bg.prompt.starts_with("mountain skyline, minimalist composition"));
        assert!(bg.prompt.ends_with("wide angle, panoramic, 16:9 aspect ratio, background texture"));

        let slide = &sites[1];
        assert_eq!(
            slide.path,
            vec![
                PathStep::Key("slides".to_string()),
                PathStep::Index(0),
                PathStep::Key("image".to_string()),
            ]
        );
    }

    #[test]
    fn test_framing_hint_by_component() {
        let graph = build_graph(&[
            ComponentNode::new("ProductCard").prop("image", "IMAGE_PROMPT: a watch"),
            ComponentNode::new("ImageBlock")
                .prop("src", "IMAGE_PROMPT: banner")
                .prop("width", "100%"),
            ComponentNode::new("ImageBlock")
                .prop("src", "IMAGE_PROMPT: thumb")
                .prop("width", "100%")
                .prop("height", "300px"),
            ComponentNode::new("Typography").prop("img", "IMAGE_PROMPT: misc"),
        ]);
        let sites = collect_placeholders(&graph, &style());
        let by_base = |base: &str| {
            sites
                .iter()
                .find(|s| s.base == base)
                .map(|s| s.prompt.clone())
                .unwrap()
        };
        assert!(by_base("a watch").ends_with("1:1 square aspect ratio, centered"));
        assert!(by_base("banner").ends_with("wide shot, 16:9 aspect ratio"));
        assert!(by_base("thumb").ends_with("standard photography, 4:3 aspect ratio"));
        assert!(by_base("misc").ends_with("aspect ratio 4:3"));
    }

    #[test]
    fn test_campaign_suffix_in_prompt() {
        let tree = ComponentNode::new("Section").prop("bgImage", "IMAGE_PROMPT: shop window");
        let graph = build_graph(&[tree]);

        let standard = collect_placeholders(&graph, &style());
        assert!(!standard[0].prompt.contains("christmas"));

        let christmas = ImageStyle {
            campaign: Campaign::Christmas,
            ..style()
        };
        let sites = collect_placeholders(&graph, &christmas);
        assert!(sites[0]
            .prompt
            .contains(", christmas theme, festive, holiday decoration, snow,"));
    }

    #[tokio::test]
    async fn test_resolve_replaces_all_placeholders() {
        let tree = ComponentNode::new("Section")
            .prop("bgImage", "IMAGE_PROMPT: skyline")
            .child(
                ComponentNode::new("Grid")
                    .child(ComponentNode::new("ProductCard").prop("image", "IMAGE_PROMPT: a mug"))
                    .child(
                        ComponentNode::new("ProductCard")
                            .prop("image", "IMAGE_PROMPT: unpaintable thing one"),
                    )
                    .child(
                        ComponentNode::new("ProductCard")
                            .prop("image", "IMAGE_PROMPT: unpaintable thing two"),
                    ),
            )
            .child(ComponentNode::new("ImageBlock").prop("src", "IMAGE_PROMPT: a poster"));
        let mut graph = build_graph(&[tree]);

        let count = resolve_images(&mut graph, &FakeImages, &style()).await;
        assert_eq!(count, 5);

        let serialized = serde_json::to_string(&graph).unwrap();
        assert!(!serialized.contains(IMAGE_PROMPT_PREFIX));
        assert_eq!(serialized.matches("data:image/png;base64").count(), 3);
        assert_eq!(serialized.matches("https://placehold.co/800x600").count(), 2);
        // Fallback text keeps the first three words of the base prompt.
        assert!(serialized.contains("text=unpaintable%2Bthing%2Bone"));
    }

    #[tokio::test]
    async fn test_resolve_writes_back_nested_paths() {
        let tree = ComponentNode::new("HeroCarousel").prop(
            "slides",
            json!([
                { "title": "One", "image": "IMAGE_PROMPT: first" },
                { "title": "Two", "image": "IMAGE_PROMPT: second" },
            ]),
        );
        let mut graph = build_graph(&[tree]);
        resolve_images(&mut graph, &FakeImages, &style()).await;

        let slides = &graph["n1"].props["slides"];
        assert_eq!(slides[0]["image"], json!("data:image/png;base64,iVBORw0KGgo="));
        assert_eq!(slides[1]["image"], json!("data:image/png;base64,iVBORw0KGgo="));
        // Sibling fields untouched.
        assert_eq!(slides[0]["title"], json!("One"));
    }

    #[tokio::test]
    async fn test_resolve_with_no_placeholders_is_a_noop() {
        let tree = ComponentNode::new("Section").prop("bgColor", "#ffffff");
        let mut graph = build_graph(&[tree]);
        let before = serde_json::to_value(&graph).unwrap();
        let count = resolve_images(&mut graph, &FakeImages, &style()).await;
        assert_eq!(count, 0);
        assert_eq!(serde_json::to_value(&graph).unwrap(), before);
    }

    #[test]
    fn test_fallback_url_encodes_label() {
        assert_eq!(
            fallback_url("sunset over mountains at dusk"),
            "https://placehold.co/800x600?text=sunset%2Bover%2Bmountains"
        );
        assert_eq!(fallback_url(""), "https://placehold.co/800x600?text=");
    }
}
