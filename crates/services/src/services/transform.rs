//! Semantic section transformer: coarse section descriptors emitted by the
//! model (`HERO`, `FEATURES`, ...) become concrete component subtrees. Total
//! over arbitrary input; one bad section never aborts its siblings.

use schema::models::brief::GenerationRequest;
use schema::models::document::ComponentNode;
use serde_json::{Map, Value, json};
use tracing::warn;

use super::extract::{
    coerced_key, first_coerced, item_fields, item_list, section_bg_color, section_content,
    text_of, text_of_first,
};

/// Component types forwarded untouched when the model already emitted a
/// concrete node instead of a semantic section.
pub const PASSTHROUGH_TYPES: [&str; 8] = [
    "Section",
    "Grid",
    "FlexStack",
    "Typography",
    "DecorationLayer",
    "BannerStrip",
    "NavBar",
    "Footer",
];

/// Page-level wizard context threaded into individual section transforms.
#[derive(Debug, Clone, Default)]
pub struct TransformContext {
    pub primary_color: String,
    pub scroll_effect: Option<String>,
    pub parallax_speed: Option<String>,
    pub animation_style: Option<String>,
    pub product_image_url: Option<String>,
}

impl TransformContext {
    pub fn from_request(request: &GenerationRequest) -> Self {
        Self {
            primary_color: request.primary_color.clone(),
            scroll_effect: request.scroll_effect.clone(),
            parallax_speed: request.parallax_speed.clone(),
            animation_style: request.animation_style.clone(),
            product_image_url: request.product_image_url.clone(),
        }
    }
}

/// Convert one raw section descriptor into a component subtree.
///
/// Concrete nodes pass through, known semantic types expand to fixed
/// layouts, unknown types become `UnknownComponent` nodes carrying the
/// original payload, and a descriptor that is not an object at all becomes a
/// visible error placeholder.
pub fn transform_section(section: &Value, ctx: &TransformContext) -> ComponentNode {
    let Some(map) = section.as_object() else {
        warn!("section descriptor is not an object, inserting error placeholder");
        return error_placeholder();
    };

    let raw_type = map.get("type").and_then(Value::as_str).unwrap_or("");
    if PASSTHROUGH_TYPES.contains(&raw_type) {
        if let Some(node) = ComponentNode::from_value(section) {
            return node;
        }
    }

    let section_type = raw_type.to_uppercase();
    let content = section_content(map);
    let bg_color = section_bg_color(map);

    match section_type.as_str() {
        "HERO" => hero(map, &content, bg_color, ctx),
        "FEATURES" => features(&content, bg_color),
        "PRODUCTS" | "CATALOG" => products(&content, bg_color),
        "TESTIMONIALS" => testimonials(&content, bg_color),
        "FAQ" => faq(&content, bg_color),
        "FOOTER" => footer(map, &content),
        "NAVBAR" => navbar(map, &content),
        "BANNER" | "BANNERSTRIP" => banner(&content, bg_color),
        _ => {
            warn!(section_type = %section_type, "unknown section type, inserting UnknownComponent");
            unknown_component(&section_type, content)
        }
    }
}

fn hero(
    section: &Map<String, Value>,
    content: &Value,
    bg_color: Option<String>,
    ctx: &TransformContext,
) -> ComponentNode {
    // A wizard-uploaded product image wins over whatever the model suggested.
    let hero_image = match &ctx.product_image_url {
        Some(url) if !url.is_empty() => Some(Value::String(url.clone())),
        _ => content.get("image").cloned(),
    };
    let has_image = hero_image.as_ref().map(is_truthy).unwrap_or(false);

    let parallax_strength = match ctx.parallax_speed.as_deref() {
        Some("slow") => 0.2,
        Some("fast") => 0.6,
        _ => 0.4,
    };

    let mut node = ComponentNode::new("Section")
        .prop("paddingY", "xl")
        .prop("fullWidth", true)
        .prop(
            "bgColor",
            bg_color.unwrap_or_else(|| {
                if ctx.primary_color.is_empty() {
                    "#1e40af".to_string()
                } else {
                    ctx.primary_color.clone()
                }
            }),
        )
        .prop("overlayOpacity", if has_image { 0.5 } else { 0.0 })
        .prop(
            "scrollEffect",
            ctx.scroll_effect.clone().unwrap_or_else(|| "none".to_string()),
        )
        .prop("parallaxStrength", parallax_strength)
        .prop(
            "animationStyle",
            ctx.animation_style.clone().unwrap_or_else(|| "none".to_string()),
        );
    if let Some(image) = hero_image {
        node = node.prop("bgImage", image);
    }
    if let Some(pattern) = section.get("props").and_then(|props| props.get("backgroundPattern")) {
        node = node.prop("backgroundPattern", pattern.clone());
    }

    node.child(
        ComponentNode::new("FlexStack")
            .prop("direction", "column")
            .prop("gap", "md")
            .prop("align", "center")
            .prop("justify", "center")
            .child(
                ComponentNode::new("Typography")
                    .prop("variant", "h1")
                    .prop("text", text_of(content.get("headline"), "Welcome"))
                    .prop("className", "text-center text-white drop-shadow-md"),
            )
            .child(
                ComponentNode::new("Typography")
                    .prop("variant", "h3")
                    .prop("text", text_of_first(content, &["subheadline", "body"], ""))
                    .prop("className", "text-center text-slate-100 max-w-2xl drop-shadow"),
            )
            .child(
                ComponentNode::new("CtaButton")
                    .prop("text", text_of(content.get("cta"), "Shop Now"))
                    .prop("variant", "primary"),
            ),
    )
}

fn features(content: &Value, bg_color: Option<String>) -> ComponentNode {
    let cards = item_list(content)
        .iter()
        .filter(|item| is_truthy(item))
        .map(|item| {
            let data = item_fields(item);
            ComponentNode::new("CraftCard")
                .prop("padding", "lg")
                .prop("className", "h-full")
                .child(
                    ComponentNode::new("FlexStack")
                        .prop("direction", "column")
                        .prop("gap", "sm")
                        .prop("align", "start")
                        .child(
                            ComponentNode::new("Icon")
                                .prop("name", or_default(data.icon, "Star"))
                                .prop("className", "w-8 h-8 text-blue-600 mb-2"),
                        )
                        .child(
                            ComponentNode::new("Typography")
                                .prop("variant", "h4")
                                .prop("text", or_default(data.title, "Feature"))
                                .prop("className", "font-bold"),
                        )
                        .child(
                            ComponentNode::new("Typography")
                                .prop("variant", "body")
                                .prop("text", data.description)
                                .prop("className", "text-gray-600 text-sm"),
                        ),
                )
        })
        .collect();

    ComponentNode::new("Section")
        .prop("paddingY", "lg")
        .prop("bgColor", bg_color.unwrap_or_else(|| "#ffffff".to_string()))
        .child(
            ComponentNode::new("Typography")
                .prop("variant", "h2")
                .prop("text", text_of(content.get("headline"), "Features"))
                .prop("className", "text-center mb-8"),
        )
        .child(
            ComponentNode::new("Grid")
                .prop("cols", 3)
                .prop("gap", "md")
                .children(cards),
        )
}

fn products(content: &Value, bg_color: Option<String>) -> ComponentNode {
    let cards = item_list(content)
        .iter()
        .filter(|item| is_truthy(item))
        .map(|prod| {
            let data = item_fields(prod);
            let raw_price = first_coerced(prod, &["price"]).unwrap_or_default();
            let raw_original = first_coerced(prod, &["originalPrice"]).unwrap_or_default();
            let (price, original_price) = split_price(&raw_price, &raw_original);
            ComponentNode::new("ProductCard")
                .prop("title", or_default(data.title, "Product"))
                .prop("price", price)
                .prop("originalPrice", original_price)
                .prop("image", data.image)
                .prop("category", coerced_key(prod, "category"))
        })
        .collect();

    ComponentNode::new("Section")
        .prop("paddingY", "lg")
        .prop("bgColor", bg_color.unwrap_or_else(|| "#f8fafc".to_string()))
        .child(
            ComponentNode::new("Typography")
                .prop("variant", "h2")
                .prop("text", text_of(content.get("headline"), "Our Products"))
                .prop("className", "text-center mb-8"),
        )
        .child(
            ComponentNode::new("Grid")
                .prop("cols", 3)
                .prop("gap", "md")
                .children(cards),
        )
}

/// Split a price string carrying `<del>original</del>` markup into the
/// display price and the struck-through original. Unmarked prices come back
/// untouched with the separately-declared original.
fn split_price(raw_price: &str, raw_original: &str) -> (String, String) {
    if let Some(open) = raw_price.find("<del>") {
        if let Some(close_offset) = raw_price[open..].find("</del>") {
            let close = open + close_offset;
            let original = raw_price[open + 5..close].to_string();
            let mut display = String::new();
            display.push_str(&raw_price[..open]);
            display.push_str(&raw_price[close + 6..]);
            return (display.trim().to_string(), original);
        }
    }
    (raw_price.to_string(), raw_original.to_string())
}

fn testimonials(content: &Value, bg_color: Option<String>) -> ComponentNode {
    let cards = item_list(content)
        .iter()
        .filter(|item| is_truthy(item))
        .map(|t| {
            let quote = first_coerced(t, &["quote", "body"]).unwrap_or_default();
            let author = first_coerced(t, &["author"]).unwrap_or_else(|| "Customer".to_string());
            ComponentNode::new("FlexStack")
                .prop("direction", "column")
                .prop("className", "p-6 bg-slate-50 rounded-xl")
                .child(
                    ComponentNode::new("Typography")
                        .prop("variant", "body")
                        .prop("text", format!("\"{quote}\""))
                        .prop("className", "italic text-slate-600"),
                )
                .child(
                    ComponentNode::new("Typography")
                        .prop("variant", "caption")
                        .prop("text", format!("- {author}"))
                        .prop("className", "font-bold mt-2"),
                )
        })
        .collect();

    ComponentNode::new("Section")
        .prop("paddingY", "lg")
        .prop("bgColor", bg_color.unwrap_or_else(|| "#ffffff".to_string()))
        .child(
            ComponentNode::new("Typography")
                .prop("variant", "h2")
                .prop("text", text_of(content.get("headline"), "Testimonials"))
                .prop("className", "text-center mb-8"),
        )
        .child(
            ComponentNode::new("Grid")
                .prop("cols", 2)
                .prop("gap", "lg")
                .children(cards),
        )
}

fn faq(content: &Value, bg_color: Option<String>) -> ComponentNode {
    let entries = item_list(content)
        .iter()
        .filter(|item| is_truthy(item))
        .map(|q| {
            ComponentNode::new("Accordion").prop(
                "items",
                json!([{
                    "question": coerced_key(q, "question"),
                    "answer": coerced_key(q, "answer"),
                }]),
            )
        })
        .collect();

    ComponentNode::new("Section")
        .prop("paddingY", "lg")
        .prop("bgColor", bg_color.unwrap_or_else(|| "#ffffff".to_string()))
        .child(
            ComponentNode::new("Typography")
                .prop("variant", "h2")
                .prop("text", text_of(content.get("headline"), "FAQ"))
                .prop("className", "text-center mb-8"),
        )
        .child(
            ComponentNode::new("FlexStack")
                .prop("direction", "column")
                .prop("gap", "sm")
                .children(entries),
        )
}

fn footer(section: &Map<String, Value>, content: &Value) -> ComponentNode {
    let company_name = section
        .get("shopName")
        .and_then(coerce_non_empty)
        .or_else(|| content.get("companyName").and_then(coerce_non_empty))
        .unwrap_or_else(|| "Store".to_string());
    let description = first_coerced(content, &["description", "text"])
        .unwrap_or_else(|| "Building the future.".to_string());
    let links = content
        .get("links")
        .filter(|v| !v.is_null())
        .cloned()
        .unwrap_or_else(default_footer_links);

    ComponentNode::new("Footer")
        .prop("companyName", company_name)
        .prop("description", description)
        .prop("links", links)
        .prop("showNewsletter", true)
        .prop("darkMode", true)
}

fn default_footer_links() -> Value {
    json!([
        { "title": "Shop", "items": ["New Arrivals", "Best Sellers", "Sale"] },
        { "title": "About", "items": ["Our Story", "Careers", "Press"] },
        { "title": "Support", "items": ["FAQ", "Returns", "Contact"] }
    ])
}

fn navbar(section: &Map<String, Value>, content: &Value) -> ComponentNode {
    let brand_name = section
        .get("shopName")
        .and_then(coerce_non_empty)
        .or_else(|| content.get("brandName").and_then(coerce_non_empty))
        .unwrap_or_else(|| "Store".to_string());
    let links = content
        .get("links")
        .filter(|v| !v.is_null())
        .cloned()
        .unwrap_or_else(|| json!(["Home", "Shop"]));

    ComponentNode::new("NavBar")
        .prop("brandName", brand_name)
        .prop("links", links)
        .prop("transparent", false)
}

fn banner(content: &Value, bg_color: Option<String>) -> ComponentNode {
    let text = first_coerced(content, &["text", "headline"])
        .unwrap_or_else(|| "Welcome".to_string());
    ComponentNode::new("BannerStrip")
        .prop("text", text)
        .prop("bgColor", bg_color.unwrap_or_else(|| "#1e40af".to_string()))
        .prop("icon", true)
}

fn unknown_component(section_type: &str, content: Value) -> ComponentNode {
    let label = if section_type.is_empty() {
        "Unknown"
    } else {
        section_type
    };
    ComponentNode::new("UnknownComponent")
        .prop("originalType", label)
        .prop("content", content)
}

/// Visible placeholder for a descriptor the transformer cannot process at
/// all. Siblings continue unaffected.
fn error_placeholder() -> ComponentNode {
    ComponentNode::new("Section").child(
        ComponentNode::new("Typography")
            .prop("text", "Section Error")
            .prop("color", "red"),
    )
}

fn coerce_non_empty(value: &Value) -> Option<String> {
    let s = super::extract::coerce_string(value);
    (!s.is_empty()).then_some(s)
}

fn or_default(value: String, default: &str) -> String {
    if value.is_empty() {
        default.to_string()
    } else {
        value
    }
}

/// JavaScript-style truthiness, used where the source format treats empty
/// strings and zero as absent.
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0).unwrap_or(true),
        Value::String(s) => !s.is_empty(),
        _ => true,
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn transform(section: Value) -> ComponentNode {
        transform_section(&section, &TransformContext::default())
    }

    #[test]
    fn test_hero_expands_to_section_flexstack() {
        let node = transform(json!({
            "type": "HERO",
            "content": { "headline": "Buy Now", "cta": "Buy Now" },
        }));
        assert_eq!(node.component_type, "Section");
        assert_eq!(node.props["paddingY"], json!("xl"));
        assert_eq!(node.props["fullWidth"], json!(true));
        assert_eq!(node.props["bgColor"], json!("#1e40af"));
        assert_eq!(node.props["overlayOpacity"], json!(0.0));

        let stack = &node.children[0];
        assert_eq!(stack.component_type, "FlexStack");
        assert_eq!(stack.children[0].component_type, "Typography");
        assert_eq!(stack.children[0].props["text"], json!("Buy Now"));
        assert_eq!(stack.children[2].component_type, "CtaButton");
        assert_eq!(stack.children[2].props["text"], json!("Buy Now"));
    }

    #[test]
    fn test_hero_defaults_and_primary_color() {
        let ctx = TransformContext {
            primary_color: "#3B82F6".to_string(),
            ..Default::default()
        };
        let node = transform_section(&json!({ "type": "HERO" }), &ctx);
        assert_eq!(node.props["bgColor"], json!("#3B82F6"));
        let stack = &node.children[0];
        assert_eq!(stack.children[0].props["text"], json!("Welcome"));
        assert_eq!(stack.children[2].props["text"], json!("Shop Now"));
        assert!(!node.props.contains_key("bgImage"));
    }

    #[test]
    fn test_hero_image_sets_overlay() {
        let node = transform(json!({
            "type": "HERO",
            "content": { "image": "IMAGE_PROMPT: skyline at dusk" },
        }));
        assert_eq!(node.props["bgImage"], json!("IMAGE_PROMPT: skyline at dusk"));
        assert_eq!(node.props["overlayOpacity"], json!(0.5));
    }

    #[test]
    fn test_hero_wizard_image_overrides_model_image() {
        let ctx = TransformContext {
            product_image_url: Some("https://cdn/pic.png".to_string()),
            ..Default::default()
        };
        let node = transform_section(
            &json!({ "type": "HERO", "content": { "image": "IMAGE_PROMPT: x" } }),
            &ctx,
        );
        assert_eq!(node.props["bgImage"], json!("https://cdn/pic.png"));
    }

    #[test]
    fn test_passthrough_returns_section_unchanged() {
        let node = transform(json!({
            "type": "Section",
            "props": { "paddingY": "md" },
            "children": [
                { "type": "Typography", "props": { "text": "hand-made" } },
            ],
        }));
        assert_eq!(node.component_type, "Section");
        assert_eq!(node.props["paddingY"], json!("md"));
        assert_eq!(node.children[0].props["text"], json!("hand-made"));
    }

    #[test]
    fn test_features_builds_cards_from_items() {
        let node = transform(json!({
            "type": "FEATURES",
            "content": {
                "items": [
                    { "title": "Fast", "description": "Quick", "icon": "Zap" },
                    null,
                    { "title": "Safe" },
                ],
            },
        }));
        assert_eq!(node.children[0].props["text"], json!("Features"));
        let grid = &node.children[1];
        assert_eq!(grid.component_type, "Grid");
        assert_eq!(grid.props["cols"], json!(3));
        // Null items are dropped.
        assert_eq!(grid.children.len(), 2);
        let card = &grid.children[0];
        assert_eq!(card.component_type, "CraftCard");
        let stack = &card.children[0];
        assert_eq!(stack.children[0].props["name"], json!("Zap"));
        assert_eq!(stack.children[1].props["text"], json!("Fast"));
        assert_eq!(stack.children[2].props["text"], json!("Quick"));
    }

    #[test]
    fn test_products_splits_strikethrough_price() {
        let node = transform(json!({
            "type": "PRODUCTS",
            "content": {
                "products": [
                    { "name": "Gadget", "price": "<del>$199</del> $99" },
                ],
            },
        }));
        let card = &node.children[1].children[0];
        assert_eq!(card.component_type, "ProductCard");
        assert_eq!(card.props["price"], json!("$99"));
        assert_eq!(card.props["originalPrice"], json!("$199"));
        assert_eq!(card.props["title"], json!("Gadget"));
    }

    #[test]
    fn test_catalog_is_an_alias_for_products() {
        let node = transform(json!({
            "type": "CATALOG",
            "content": { "items": [{ "title": "Thing", "price": "$5" }] },
        }));
        assert_eq!(node.children[1].children[0].component_type, "ProductCard");
        assert_eq!(node.children[1].children[0].props["price"], json!("$5"));
    }

    #[test]
    fn test_testimonials_quote_and_author() {
        let node = transform(json!({
            "type": "TESTIMONIALS",
            "content": {
                "testimonials": [
                    { "quote": "Love it", "author": "Ana" },
                    { "body": "Solid" },
                ],
            },
        }));
        let grid = &node.children[1];
        assert_eq!(grid.props["cols"], json!(2));
        assert_eq!(grid.children[0].children[0].props["text"], json!("\"Love it\""));
        assert_eq!(grid.children[0].children[1].props["text"], json!("- Ana"));
        assert_eq!(grid.children[1].children[1].props["text"], json!("- Customer"));
    }

    #[test]
    fn test_faq_wraps_each_question_in_an_accordion() {
        let node = transform(json!({
            "type": "FAQ",
            "content": {
                "questions": [
                    { "question": "Ships fast?", "answer": "Yes" },
                ],
            },
        }));
        let stack = &node.children[1];
        assert_eq!(stack.component_type, "FlexStack");
        let accordion = &stack.children[0];
        assert_eq!(accordion.component_type, "Accordion");
        assert_eq!(
            accordion.props["items"],
            json!([{ "question": "Ships fast?", "answer": "Yes" }])
        );
    }

    #[test]
    fn test_footer_defaults() {
        let node = transform(json!({ "type": "FOOTER" }));
        assert_eq!(node.component_type, "Footer");
        assert_eq!(node.props["companyName"], json!("Store"));
        assert_eq!(node.props["description"], json!("Building the future."));
        assert_eq!(node.props["showNewsletter"], json!(true));
        assert_eq!(node.props["darkMode"], json!(true));
        let links = node.props["links"].as_array().unwrap();
        assert_eq!(links.len(), 3);
        assert_eq!(links[0]["title"], json!("Shop"));
    }

    #[test]
    fn test_navbar_brand_from_section_shop_name() {
        let node = transform(json!({
            "type": "NAVBAR",
            "shopName": "Aurora",
            "content": { "links": ["Home", "Sale"] },
        }));
        assert_eq!(node.component_type, "NavBar");
        assert_eq!(node.props["brandName"], json!("Aurora"));
        assert_eq!(node.props["links"], json!(["Home", "Sale"]));
        assert_eq!(node.props["transparent"], json!(false));
    }

    #[test]
    fn test_banner_aliases_and_defaults() {
        for alias in ["BANNER", "BANNERSTRIP"] {
            let node = transform(json!({ "type": alias }));
            assert_eq!(node.component_type, "BannerStrip");
            assert_eq!(node.props["text"], json!("Welcome"));
            assert_eq!(node.props["bgColor"], json!("#1e40af"));
        }
    }

    #[test]
    fn test_unknown_type_keeps_original_name_and_content() {
        let node = transform(json!({
            "type": "WEIRD_UNKNOWN_TYPE",
            "content": { "anything": 1 },
        }));
        assert_eq!(node.component_type, "UnknownComponent");
        assert_eq!(node.props["originalType"], json!("WEIRD_UNKNOWN_TYPE"));
        assert_eq!(node.props["content"], json!({ "anything": 1 }));
    }

    #[test]
    fn test_unknown_type_is_case_normalized() {
        let node = transform(json!({ "type": "weird_thing" }));
        assert_eq!(node.props["originalType"], json!("WEIRD_THING"));
    }

    #[test]
    fn test_missing_type_labelled_unknown() {
        let node = transform(json!({ "content": {} }));
        assert_eq!(node.component_type, "UnknownComponent");
        assert_eq!(node.props["originalType"], json!("Unknown"));
    }

    #[test]
    fn test_non_object_descriptor_becomes_error_placeholder() {
        for bad in [json!(null), json!(42), json!([1, 2])] {
            let node = transform(bad);
            assert_eq!(node.component_type, "Section");
            assert_eq!(node.children[0].props["text"], json!("Section Error"));
            assert_eq!(node.children[0].props["color"], json!("red"));
        }
    }

    #[test]
    fn test_content_under_props_is_found() {
        let node = transform(json!({
            "type": "HERO",
            "props": { "content": { "headline": "Nested" } },
        }));
        assert_eq!(node.children[0].children[0].props["text"], json!("Nested"));
    }

    #[test]
    fn test_background_color_is_normalized() {
        let node = transform(json!({
            "type": "FEATURES",
            "background": "bg-slate-900",
            "content": { "items": [] },
        }));
        assert_eq!(node.props["bgColor"], json!("#0f172a"));
    }

    #[test]
    fn test_split_price_without_markup() {
        assert_eq!(split_price("$42", "$50"), ("$42".to_string(), "$50".to_string()));
        assert_eq!(
            split_price("<del>$199</del> $99", ""),
            ("$99".to_string(), "$199".to_string())
        );
        // Unterminated tag is left alone.
        assert_eq!(split_price("<del>$5", ""), ("<del>$5".to_string(), String::new()));
    }
}
