use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};
use ts_rs::TS;

/// Closed set of component type names the editor's resolver understands.
/// Matching is exact: the wire uses these spellings verbatim, and anything
/// else is repaired to `UnknownComponent` during graph validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS, EnumString, Display, AsRefStr)]
pub enum ComponentType {
    Container,
    Text,
    Button,
    #[serde(rename = "RawHTML")]
    #[strum(serialize = "RawHTML")]
    RawHtml,
    Section,
    Grid,
    FlexStack,
    Typography,
    ImageBlock,
    Icon,
    CtaButton,
    LogoTicker,
    ProductCard,
    CraftCard,
    Accordion,
    HeroCarousel,
    Pricing,
    Stats,
    Feature,
    Testimonial,
    ProductDetail,
    CountdownTimer,
    BannerStrip,
    NavBar,
    Footer,
    DecorationLayer,
    UnknownComponent,
}

/// One vocabulary entry as shown to the model: the type name plus the prop
/// contract it is allowed to use. The set is fixed at compile time.
#[derive(Debug, Clone)]
pub struct VocabularyEntry {
    pub type_name: ComponentType,
    /// Qualifier appended to the heading, e.g. placement constraints.
    pub qualifier: Option<&'static str>,
    /// Documented property shape, rendered verbatim into the prompt.
    pub props: &'static str,
    /// Optional trailing line (children contract, usage note).
    pub extra: Option<&'static str>,
}

/// The subset of the vocabulary the model is invited to emit, in the order it
/// is rendered into the prompt's API reference.
pub static PROMPT_COMPONENTS: &[VocabularyEntry] = &[
    VocabularyEntry {
        type_name: ComponentType::Section,
        qualifier: None,
        props: r#"{
       bgColor: string (hex),
       paddingY: 'none'|'sm'|'md'|'lg'|'xl',
       fullWidth: boolean,
       backgroundPattern: 'none'|'dots'|'grid'|'noise'|'mesh'
     }"#,
        extra: Some("children: atomic components (Grid, FlexStack, etc.)"),
    },
    VocabularyEntry {
        type_name: ComponentType::Grid,
        qualifier: None,
        props: r#"{
       columns: number (1, 2, 3, 4, 6, 12),
       gap: 'none'|'sm'|'md'|'lg',
       mobileCollapse: boolean (default true)
     }"#,
        extra: None,
    },
    VocabularyEntry {
        type_name: ComponentType::FlexStack,
        qualifier: None,
        props: r#"{
       direction: 'row'|'col',
       gap: 'none'|'sm'|'md'|'lg',
       align: 'start'|'center'|'end'|'stretch',
       justify: 'start'|'center'|'end'|'between',
       padding: 'none'|'sm'|'md'|'lg',
       radius: 'none'|'sm'|'md'|'lg'|'full',
       shadow: 'none'|'sm'|'md'|'lg',
       bgColor: string (hex or 'transparent')
     }"#,
        extra: None,
    },
    VocabularyEntry {
        type_name: ComponentType::Typography,
        qualifier: None,
        props: r#"{
       as: 'h1'|'h2'|'h3'|'p'|'span',
       variant: 'h1'|'h2'|'h3'|'body'|'caption',
       size: 'xs'|'sm'|'base'|'lg'|'xl'|'2xl'|'3xl'|'4xl'|'5xl',
       weight: 'normal'|'medium'|'semibold'|'bold',
       align: 'left'|'center'|'right',
       color: string (hex),
       text: string (The actual content)
     }"#,
        extra: None,
    },
    VocabularyEntry {
        type_name: ComponentType::Button,
        qualifier: None,
        props: "{ text: string, color: 'blue'|'green'|'red'|'purple'|'black'|'white' }",
        extra: None,
    },
    VocabularyEntry {
        type_name: ComponentType::ImageBlock,
        qualifier: None,
        props: r#"{
       src: string (Must start with "IMAGE_PROMPT: "),
       alt: string,
       width: string (e.g., "100%", "300px"),
       height: string (e.g., "auto", "400px"),
       radius: 'none'|'sm'|'md'|'lg'|'full'
     }"#,
        extra: None,
    },
    VocabularyEntry {
        type_name: ComponentType::CtaButton,
        qualifier: None,
        props: r#"{
       text: string,
       variant: 'primary'|'secondary'|'outline'|'ghost',
       size: 'sm'|'md'|'lg',
       fullWidth: boolean
     }"#,
        extra: None,
    },
    VocabularyEntry {
        type_name: ComponentType::NavBar,
        qualifier: Some("(MANDATORY at top)"),
        props: r#"{
       brandName: string,
       links: string[] (e.g. ['Home', 'Shop', 'About']),
       transparent: boolean,
       darkMode: boolean
     }"#,
        extra: None,
    },
    VocabularyEntry {
        type_name: ComponentType::CraftCard,
        qualifier: None,
        props: "{ padding: 'sm'|'md'|'lg' }",
        extra: Some("description: A simple container with shadow and bg, good for features/testimonials."),
    },
    VocabularyEntry {
        type_name: ComponentType::Footer,
        qualifier: None,
        props: r#"{
       companyName: string,
       description: string,
       links: { title: string, items: string[] }[],
       showNewsletter: boolean,
       darkMode: boolean
     }"#,
        extra: None,
    },
    VocabularyEntry {
        type_name: ComponentType::Feature,
        qualifier: None,
        props: "{ icon: string (Lucide icon name), title: string, description: string }",
        extra: Some("description: Small block with icon, good for Grid."),
    },
    VocabularyEntry {
        type_name: ComponentType::Testimonial,
        qualifier: None,
        props: "{ content: string, author: string, role: string, avatar: string, rating: number }",
        extra: Some(r#"note: avatar should be "IMAGE_PROMPT: portrait of...""#),
    },
    VocabularyEntry {
        type_name: ComponentType::Pricing,
        qualifier: None,
        props: r#"{
       plans: { name: string, price: string, features: string[], isPopular: boolean, cta: string }[],
       currency: string
     }"#,
        extra: None,
    },
    VocabularyEntry {
        type_name: ComponentType::Stats,
        qualifier: None,
        props: "{ items: { label: string, value: string }[] }",
        extra: Some("description: Large numbers for social proof."),
    },
    VocabularyEntry {
        type_name: ComponentType::HeroCarousel,
        qualifier: None,
        props: "{ slides: { image: string, title: string, subtitle: string, ctaText: string }[] }",
        extra: None,
    },
    VocabularyEntry {
        type_name: ComponentType::Accordion,
        qualifier: None,
        props: "{ items: { question: string, answer: string }[] }",
        extra: Some("description: FAQ section."),
    },
];
