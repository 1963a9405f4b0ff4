use std::str::FromStr;

use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};
use ts_rs::TS;

/// Business vertical the copy tone is tuned for.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, TS, EnumString, Display, Default)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Industry {
    #[default]
    Saas,
    Fashion,
    Food,
    Beauty,
    Home,
    Services,
}

/// Competitive positioning that drives copy patterns.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, TS, EnumString, Display, Default)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Strategy {
    Cost,
    Premium,
    #[default]
    Innovation,
    Trust,
    Efficiency,
}

/// Promotional campaign mode. Anything but `Standard` layers mandatory
/// campaign elements onto the prompt and an image-mood suffix onto every
/// generated image.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, TS, EnumString, Display, Default)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Campaign {
    #[default]
    Standard,
    Blackfriday,
    Christmas,
    Newyear,
    Summer,
}

/// Page archetype requested by the wizard.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, TS, EnumString, Display, Default)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum PageType {
    #[default]
    Landing,
    Product,
    Story,
    Contact,
    Blog,
}

/// Overall layout structure.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, TS, EnumString, Display, Default)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Layout {
    #[default]
    Minimalist,
    Grid,
    Magazine,
    Immersive,
    Split,
}

/// Color palette family.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, TS, EnumString, Display, Default)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Palette {
    #[default]
    Monochromatic,
    Morandi,
    Contrast,
    Earthy,
    Pastel,
}

/// Lighting mood applied to generated imagery.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, TS, EnumString, Display, Default)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum Tone {
    HighKey,
    LowKey,
    Warm,
    Cool,
    #[default]
    Neutral,
}

/// Art direction applied to generated imagery.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, TS, EnumString, Display, Default)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Art {
    #[default]
    Minimalist,
    Classic,
    Abstract,
    Pop,
    Organic,
    Cyberpunk,
}

/// Copywriting voice.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, TS, EnumString, Display, Default)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Voice {
    #[default]
    Professional,
    Friendly,
    Humorous,
    Luxury,
    Confident,
}

/// Target copy length.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, TS, EnumString, Display, Default)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum TextLength {
    Short,
    #[default]
    Medium,
    Long,
}

/// Content language. All generated copy must be in this language.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, TS, EnumString, Display, Default)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    Zh,
    Ja,
    Ko,
    Es,
    Fr,
    De,
}

impl Language {
    /// Human-readable name rendered into the prompt.
    pub fn display_name(&self) -> &'static str {
        match self {
            Language::En => "English",
            Language::Zh => "Chinese (Simplified)",
            Language::Ja => "Japanese",
            Language::Ko => "Korean",
            Language::Es => "Spanish",
            Language::Fr => "French",
            Language::De => "German",
        }
    }
}

/// Display currency for prices in generated copy.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, TS, EnumString, Display, Default)]
#[serde(rename_all = "UPPERCASE")]
#[strum(serialize_all = "UPPERCASE")]
pub enum Currency {
    #[default]
    Usd,
    Cny,
    Jpy,
    Eur,
    Gbp,
    Krw,
}

impl Currency {
    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::Usd => "$",
            Currency::Cny => "¥",
            Currency::Jpy => "¥",
            Currency::Eur => "€",
            Currency::Gbp => "£",
            Currency::Krw => "₩",
        }
    }
}

/// Wire request for `POST /api/pages/generate`. Every dimension is optional
/// free text; unrecognized or missing values resolve to defaults rather than
/// rejecting the request.
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
pub struct GeneratePageRequest {
    pub prompt: String,
    /// Legacy wizard field, accepted but unused.
    pub style: Option<String>,
    pub sections: Option<Vec<String>>,
    pub industry: Option<String>,
    pub shop_name: Option<String>,
    pub product_name: Option<String>,
    pub product_description: Option<String>,
    pub target_audience: Option<String>,
    pub competitive_strategy: Option<String>,
    pub campaign_mode: Option<String>,
    pub page_type: Option<String>,
    pub design_layout: Option<String>,
    pub design_palette: Option<String>,
    pub design_tone: Option<String>,
    pub design_art: Option<String>,
    pub voice_tone: Option<String>,
    pub text_length: Option<String>,
    pub language: Option<String>,
    pub currency: Option<String>,
    pub primary_color: Option<String>,
    pub scroll_effect: Option<String>,
    pub parallax_speed: Option<String>,
    pub animation_style: Option<String>,
    pub product_image_url: Option<String>,
}

/// Fully resolved generation brief: every dimension is a concrete enum value
/// and every free-text field has its default applied.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
pub struct GenerationRequest {
    pub prompt: String,
    pub sections: Vec<String>,
    pub shop_name: String,
    pub product_name: String,
    pub product_description: String,
    pub target_audience: String,
    pub primary_color: String,
    pub industry: Industry,
    pub strategy: Strategy,
    pub campaign: Campaign,
    pub page_type: PageType,
    pub layout: Layout,
    pub palette: Palette,
    pub tone: Tone,
    pub art: Art,
    pub voice: Voice,
    pub text_length: TextLength,
    pub language: Language,
    pub currency: Currency,
    pub scroll_effect: Option<String>,
    pub parallax_speed: Option<String>,
    pub animation_style: Option<String>,
    pub product_image_url: Option<String>,
}

/// Exact-match parse of a wire value; anything else falls back to the
/// dimension's default.
fn parse_or_default<T: FromStr + Default>(value: Option<&str>) -> T {
    value
        .and_then(|raw| T::from_str(raw.trim()).ok())
        .unwrap_or_default()
}

impl From<GeneratePageRequest> for GenerationRequest {
    fn from(req: GeneratePageRequest) -> Self {
        Self {
            prompt: req.prompt,
            sections: req.sections.unwrap_or_else(|| {
                vec!["hero".to_string(), "features".to_string(), "footer".to_string()]
            }),
            shop_name: req.shop_name.unwrap_or_else(|| "My Store".to_string()),
            product_name: req
                .product_name
                .unwrap_or_else(|| "Premium Product".to_string()),
            product_description: req
                .product_description
                .unwrap_or_else(|| "Excellence in every detail".to_string()),
            target_audience: req
                .target_audience
                .unwrap_or_else(|| "professionals".to_string()),
            primary_color: req.primary_color.unwrap_or_else(|| "#3B82F6".to_string()),
            industry: parse_or_default(req.industry.as_deref()),
            strategy: parse_or_default(req.competitive_strategy.as_deref()),
            campaign: parse_or_default(req.campaign_mode.as_deref()),
            page_type: parse_or_default(req.page_type.as_deref()),
            layout: parse_or_default(req.design_layout.as_deref()),
            palette: parse_or_default(req.design_palette.as_deref()),
            tone: parse_or_default(req.design_tone.as_deref()),
            art: parse_or_default(req.design_art.as_deref()),
            voice: parse_or_default(req.voice_tone.as_deref()),
            text_length: parse_or_default(req.text_length.as_deref()),
            language: parse_or_default(req.language.as_deref()),
            currency: parse_or_default(req.currency.as_deref()),
            scroll_effect: req.scroll_effect,
            parallax_speed: req.parallax_speed,
            animation_style: req.animation_style,
            product_image_url: req.product_image_url,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_values_fall_back_to_defaults() {
        let req = GeneratePageRequest {
            prompt: "coffee shop".to_string(),
            industry: Some("underwater-basket-weaving".to_string()),
            campaign_mode: Some("BLACKFRIDAY".to_string()),
            currency: Some("XYZ".to_string()),
            ..Default::default()
        };
        let resolved = GenerationRequest::from(req);
        assert_eq!(resolved.industry, Industry::Saas);
        // Matching is exact, so a wrong-case campaign is treated as unknown.
        assert_eq!(resolved.campaign, Campaign::Standard);
        assert_eq!(resolved.currency, Currency::Usd);
    }

    #[test]
    fn test_known_values_parse() {
        let req = GeneratePageRequest {
            prompt: "x".to_string(),
            campaign_mode: Some("blackfriday".to_string()),
            design_tone: Some("high-key".to_string()),
            currency: Some("EUR".to_string()),
            language: Some("ja".to_string()),
            ..Default::default()
        };
        let resolved = GenerationRequest::from(req);
        assert_eq!(resolved.campaign, Campaign::Blackfriday);
        assert_eq!(resolved.tone, Tone::HighKey);
        assert_eq!(resolved.currency, Currency::Eur);
        assert_eq!(resolved.language, Language::Ja);
    }

    #[test]
    fn test_free_text_defaults() {
        let resolved = GenerationRequest::from(GeneratePageRequest {
            prompt: "x".to_string(),
            ..Default::default()
        });
        assert_eq!(resolved.shop_name, "My Store");
        assert_eq!(resolved.product_name, "Premium Product");
        assert_eq!(resolved.product_description, "Excellence in every detail");
        assert_eq!(resolved.target_audience, "professionals");
        assert_eq!(resolved.primary_color, "#3B82F6");
        assert_eq!(resolved.sections, vec!["hero", "features", "footer"]);
    }

    #[test]
    fn test_currency_symbols() {
        assert_eq!(Currency::Usd.symbol(), "$");
        assert_eq!(Currency::Jpy.symbol(), "¥");
        assert_eq!(Currency::Krw.symbol(), "₩");
    }

    #[test]
    fn test_wire_field_names_are_camel_case() {
        let req: GeneratePageRequest = serde_json::from_str(
            r#"{"prompt":"p","campaignMode":"christmas","designLayout":"magazine","productImageUrl":"https://x/y.png"}"#,
        )
        .unwrap();
        assert_eq!(req.campaign_mode.as_deref(), Some("christmas"));
        assert_eq!(req.design_layout.as_deref(), Some("magazine"));
        assert_eq!(req.product_image_url.as_deref(), Some("https://x/y.png"));
    }
}
