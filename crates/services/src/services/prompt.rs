//! Prompt composition for page generation. Pure functions of the resolved
//! request; no side effects, no randomness.

use schema::models::brief::{Campaign, GenerationRequest};
use schema::models::vocabulary::PROMPT_COMPONENTS;

use super::rules;

/// System + user prompt pair sent to the model for one build.
#[derive(Debug, Clone, PartialEq)]
pub struct ComposedPrompt {
    pub system: String,
    pub user: String,
}

/// Assemble the full instruction set for one generation request.
pub fn compose(request: &GenerationRequest) -> ComposedPrompt {
    ComposedPrompt {
        system: system_prompt(request),
        user: user_prompt(request),
    }
}

fn system_prompt(req: &GenerationRequest) -> String {
    let language = req.language.display_name();
    let symbol = req.currency.symbol();
    let aesthetics = format!(
        "Visual Style: {} art style with {} lighting.",
        req.art, req.tone
    );

    let mut prompt = format!(
        r#"
You are an expert marketing strategist and web designer.
Create a landing page that PERFECTLY aligns with ALL the rules below.

=== BRAND IDENTITY ===
Shop Name: {shop_name}
Product: {product_name}
Description: {product_description}
Industry: {industry}
Target: {target_audience}

=== LOCALIZATION (CRITICAL) ===
LANGUAGE: Generate ALL text content in {language}.
- Headline, body, buttons, everything in {language}.
- If {language} is not English, do NOT use English anywhere.
CURRENCY: Use "{symbol}" for all prices.
- Example: {symbol}99, {symbol}199, {symbol}1,299

=== COMPETITIVE STRATEGY: {strategy} ===
{strategy_rule}

=== TONE & VOICE ===
{industry_tone}
{voice_rule}
{length_rule}

=== CAMPAIGN MODE ===
{campaign_rule}

=== LAYOUT STRUCTURE: {layout} ===
{layout_rule}

=== COLOR PALETTE: {palette} ===
{palette_rule}

=== AESTHETIC DIRECTION ===
{aesthetics}

=== PAGE TYPE: {page_type} ===
{page_type_rule}

=== BRAND COLOR ===
Primary Color: {primary_color}
Use this color for CTAs, accents, and key highlights.
"#,
        shop_name = req.shop_name,
        product_name = req.product_name,
        product_description = req.product_description,
        industry = req.industry,
        target_audience = req.target_audience,
        language = language,
        symbol = symbol,
        strategy = req.strategy.to_string().to_uppercase(),
        strategy_rule = rules::strategy_copy_rules(&req.strategy),
        industry_tone = rules::industry_tone_rules(&req.industry),
        voice_rule = rules::voice_rules(&req.voice),
        length_rule = rules::text_length_rules(&req.text_length),
        campaign_rule = rules::campaign_rules(&req.campaign),
        layout = req.layout.to_string().to_uppercase(),
        layout_rule = rules::layout_rules(&req.layout),
        palette = req.palette.to_string().to_uppercase(),
        palette_rule = rules::palette_rules(&req.palette),
        aesthetics = aesthetics,
        page_type = req.page_type.to_string().to_uppercase(),
        page_type_rule = rules::page_type_rules(&req.page_type),
        primary_color = req.primary_color,
    );

    prompt.push_str(&component_api_reference());
    prompt.push_str(rules::visual_polish_rules());
    prompt.push_str(rules::output_format_rules());
    prompt.push_str(&rules::critical_rules(&req.product_name));
    prompt
}

/// The component API reference, rendered from the vocabulary so the model is
/// constrained to the same set the validator checks against.
fn component_api_reference() -> String {
    let mut out = String::from("\n=== AVAILABLE COMPONENTS & API (Strict Props) ===\n");
    for (index, entry) in PROMPT_COMPONENTS.iter().enumerate() {
        out.push('\n');
        out.push_str(&(index + 1).to_string());
        out.push_str(". ");
        out.push_str(entry.type_name.as_ref());
        if let Some(qualifier) = entry.qualifier {
            out.push(' ');
            out.push_str(qualifier);
        }
        out.push_str("\n   - props: ");
        out.push_str(entry.props);
        out.push('\n');
        if let Some(extra) = entry.extra {
            out.push_str("   - ");
            out.push_str(extra);
            out.push('\n');
        }
    }
    out
}

fn user_prompt(req: &GenerationRequest) -> String {
    let campaign_clause = match &req.campaign {
        Campaign::Standard => String::new(),
        campaign => format!("{} campaign ", campaign.to_string().to_uppercase()),
    };
    format!(
        "\n{}\nGenerate a {}{} page for \"{}\".\nAll content in {}. Prices in {}.\nOUTPUT ONLY RAW JSON. NO MARKDOWN. NO EXPLANATIONS.\n",
        req.prompt,
        campaign_clause,
        req.layout,
        req.product_name,
        req.language.display_name(),
        req.currency.symbol(),
    )
}

#[cfg(test)]
mod tests {
    use schema::models::brief::GeneratePageRequest;

    use super::*;

    fn resolved(req: GeneratePageRequest) -> GenerationRequest {
        GenerationRequest::from(req)
    }

    fn base_request() -> GeneratePageRequest {
        GeneratePageRequest {
            prompt: "a store for artisan coffee".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_system_prompt_sections_present() {
        let prompt = compose(&resolved(base_request())).system;
        for header in [
            "=== BRAND IDENTITY ===",
            "=== LOCALIZATION (CRITICAL) ===",
            "=== COMPETITIVE STRATEGY: INNOVATION ===",
            "=== TONE & VOICE ===",
            "=== CAMPAIGN MODE ===",
            "=== LAYOUT STRUCTURE: MINIMALIST ===",
            "=== COLOR PALETTE: MONOCHROMATIC ===",
            "=== AESTHETIC DIRECTION ===",
            "=== PAGE TYPE: LANDING ===",
            "=== BRAND COLOR ===",
            "=== AVAILABLE COMPONENTS & API (Strict Props) ===",
            "=== VISUAL POLISH RULES (MANDATORY) ===",
            "=== OUTPUT FORMAT (JSON Tree) ===",
            "=== CRITICAL RULES ===",
        ] {
            assert!(prompt.contains(header), "missing header: {header}");
        }
    }

    #[test]
    fn test_campaign_header_appears_once() {
        let mut req = base_request();
        req.campaign_mode = Some("blackfriday".to_string());
        let prompt = compose(&resolved(req)).system;
        assert_eq!(prompt.matches("=== CAMPAIGN MODE ===").count(), 1);
        assert!(prompt.contains("CAMPAIGN: BLACK FRIDAY"));
    }

    #[test]
    fn test_api_reference_covers_every_prompt_component() {
        let prompt = compose(&resolved(base_request())).system;
        for entry in PROMPT_COMPONENTS {
            let name: &str = entry.type_name.as_ref();
            assert!(prompt.contains(name), "missing component: {name}");
        }
        assert!(prompt.contains("16. Accordion"));
    }

    #[test]
    fn test_unknown_currency_composes_like_usd() {
        let mut unknown = base_request();
        unknown.currency = Some("XYZ".to_string());
        let mut usd = base_request();
        usd.currency = Some("USD".to_string());
        assert_eq!(compose(&resolved(unknown)), compose(&resolved(usd)));
    }

    #[test]
    fn test_unknown_dimension_composes_like_default() {
        let mut unknown = base_request();
        unknown.industry = Some("interdimensional".to_string());
        unknown.design_layout = Some("brutalist".to_string());
        assert_eq!(compose(&resolved(unknown)), compose(&resolved(base_request())));
    }

    #[test]
    fn test_user_prompt_campaign_clause() {
        let standard = compose(&resolved(base_request())).user;
        assert!(standard.contains("Generate a minimalist page for \"Premium Product\"."));
        assert!(!standard.contains("campaign"));

        let mut req = base_request();
        req.campaign_mode = Some("summer".to_string());
        let campaign = compose(&resolved(req)).user;
        assert!(campaign.contains("Generate a SUMMER campaign minimalist page"));
    }

    #[test]
    fn test_localization_lines() {
        let mut req = base_request();
        req.language = Some("ja".to_string());
        req.currency = Some("JPY".to_string());
        let composed = compose(&resolved(req));
        assert!(composed.system.contains("Generate ALL text content in Japanese."));
        assert!(composed.system.contains("CURRENCY: Use \"¥\" for all prices."));
        assert!(composed.user.contains("All content in Japanese. Prices in ¥."));
    }
}
