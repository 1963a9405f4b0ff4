//! Fixed rule text for every generation dimension. Each function is a total
//! match over its enum, so adding a variant without rule text will not
//! compile.

use schema::models::brief::{
    Art, Campaign, Industry, Layout, PageType, Palette, Strategy, TextLength, Tone, Voice,
};

/// Campaign-mode block for the system prompt.
pub fn campaign_rules(campaign: &Campaign) -> &'static str {
    match campaign {
        Campaign::Standard => {
            r#"
CAMPAIGN: STANDARD MODE
- Normal branding, no special promotional elements
- Focus on product value proposition
"#
        }
        Campaign::Blackfriday => {
            r#"
CAMPAIGN: BLACK FRIDAY 🖤
MANDATORY REQUIREMENTS:
- Add CountdownTimer component in Hero section
- ALL buttons must be RED (#ef4444) or BLACK (#000000)
- BannerStrip at top: "BLACK FRIDAY - LIMITED TIME ONLY"
- Copy must include: "Limited Time", "Once a Year", "Hurry", "Biggest Sale"
- Show aggressive discounts: "50% OFF", "70% OFF"
- Prices with strikethrough showing "original" prices
- Add urgency messaging everywhere
"#
        }
        Campaign::Christmas => {
            r#"
CAMPAIGN: CHRISTMAS 🎄
MANDATORY REQUIREMENTS:
- Enable DecorationLayer with SNOW effect
- Color palette: Red (#dc2626), Green (#16a34a), Gold (#eab308), White
- BannerStrip: "Holiday Gift Guide 🎁 Free Gift Wrapping"
- Copy tone: Warm, Joyful, Gifting-focused
- Keywords: "Gift", "Joy", "Warmth", "Love", "Holiday", "Celebration"
- Hero headline pattern: "Give the Gift of [Product]" or "Make This Holiday Special"
- Add CountdownTimer: "Christmas Sale Ends In"
"#
        }
        Campaign::Newyear => {
            r#"
CAMPAIGN: NEW YEAR 🎆
MANDATORY REQUIREMENTS:
- Color palette: Gold, Black, Silver
- BannerStrip: "New Year, New You 🎆 Start Fresh"
- Copy tone: Aspirational, Fresh Start, Goal-focused
- Keywords: "New Beginning", "Fresh Start", "Transform", "2024", "Resolution"
- Add CountdownTimer if applicable
"#
        }
        Campaign::Summer => {
            r#"
CAMPAIGN: SUMMER SALE ☀️
MANDATORY REQUIREMENTS:
- Bright, vibrant colors: Yellow, Orange, Cyan, Coral
- BannerStrip: "SUMMER SALE ☀️ Up to 50% OFF"
- Copy tone: Fun, Energetic, Vacation-inspired
- Keywords: "Summer", "Hot Deal", "Sizzling", "Beach", "Adventure"
"#
        }
    }
}

/// Layout-structure block for the system prompt.
pub fn layout_rules(layout: &Layout) -> &'static str {
    match layout {
        Layout::Minimalist => {
            r#"
LAYOUT: MINIMALIST
- Use plenty of whitespace (paddingY='xl').
- Single column layout for maximum focus.
- Avoid clutter; use fewer elements with more impact.
- Hero: Clean, centered text, subtle background.
"#
        }
        Layout::Grid => {
            r#"
LAYOUT: GRID-BASED
- Use Grid components extensively (cols=3 or cols=4).
- High information density.
- Compact padding (paddingY='md').
- Structured, orderly presentation of products/features.
"#
        }
        Layout::Magazine => {
            r#"
LAYOUT: MAGAZINE / EDITORIAL
- Asymmetrical layouts (FlexStack direction='row' with different widths).
- Varied typography sizes (huge headings vs small captions).
- Mix text and images side-by-side in interesting ways.
- Narrative flow with visual interruptions.
"#
        }
        Layout::Immersive => {
            r#"
LAYOUT: IMMERSIVE / FULL-SCREEN
- Use full-screen sections (Hero height='90vh').
- Large background images (ImageBlock width='100%').
- Minimal text overlaying impressive visuals.
- Cinematic feel.
"#
        }
        Layout::Split => {
            r#"
LAYOUT: SPLIT-SCREEN
- Use alternating split layouts (Text Left/Image Right -> Image Left/Text Right).
- Clean 50/50 division using FlexStack/Grid.
- Clear distinction between content and visuals.
"#
        }
    }
}

/// Color-palette block for the system prompt.
pub fn palette_rules(palette: &Palette) -> &'static str {
    match palette {
        Palette::Monochromatic => {
            r#"
PALETTE: MONOCHROMATIC
- Use shades of slate, gray, black, and white ONLY.
- Brand color used VERY sparingly for key actions only.
- Clean, sophisticated, high-end look.
"#
        }
        Palette::Morandi => {
            r#"
PALETTE: MORANDI (LOW SATURATION)
- Use muted, dusty colors: stone-100, stone-200, zinc-100.
- Soft contrast; avoid pure black or pure white.
- Elegant, calming, timeless.
"#
        }
        Palette::Contrast => {
            r#"
PALETTE: HIGH CONTRAST
- Stark difference between background and text.
- Black background with bright accents, or White with bold Black.
- Sharp edges, no gradients, high visibility.
"#
        }
        Palette::Earthy => {
            r#"
PALETTE: EARTHY / NATURAL
- Use organic colors: amber, stone, emerald, neutral.
- Warm gray backgrounds.
- Grounded, authentic feel.
"#
        }
        Palette::Pastel => {
            r#"
PALETTE: PASTEL / SOFT
- Use light, airy colors: rose-50, blue-50, purple-50.
- Gentle approach, friendly and welcoming.
- Soft UI elements (rounded corners).
"#
        }
    }
}

/// Page-type block for the system prompt.
pub fn page_type_rules(page_type: &PageType) -> &'static str {
    match page_type {
        PageType::Landing => {
            r#"
PAGE TYPE: HOMEPAGE (Landing Page)
- Balanced mix of content: Hero -> Features -> Products -> Testimonials -> FAQ.
- Goal: Conversion and Brand Introduction.
- Narrative: "Here is who we are, what we sell, and why you should trust us."
"#
        }
        PageType::Product => {
            r#"
PAGE TYPE: PRODUCT SHOWCASE
- Focus HEAVILY on the product grid and details.
- Hero should feature the main product clearly.
- Use "Add to Cart" or "Buy Now" CTAs frequently.
- Include detailed specs, pricing, and product-focused imagery.
- Layout: Hero -> Product Grid (Large) -> Features (Specs) -> Reviews.
"#
        }
        PageType::Story => {
            r#"
PAGE TYPE: BRAND STORY
- Focus on narrative, history, and values.
- Use large, emotional imagery (less product-focused, more lifestyle/mood).
- Text-heavy sections with "Our Mission", "Our Journey", "The Founders".
- Layout: Hero (Atmospheric) -> Text Block -> Image Split -> Team/Values -> Footer.
- Tone: Inspiring, personal, authentic.
"#
        }
        PageType::Contact => {
            r#"
PAGE TYPE: CONTACT US
- Focus on accessibility and clear communication channels.
- Layout: Simple Hero -> Contact Grid (Email, Phone, Address cards) -> Map Placeholder -> FAQ -> Footer.
- Tone: Professional, welcoming, helpful.
- Visuals: Minimalist, use icons for contact methods, map-style imagery.
"#
        }
        PageType::Blog => {
            r#"
PAGE TYPE: BLOG / NEWS
- Focus on content discovery and readability.
- Layout: Featured Article Hero -> Grid of Recent Articles -> Newsletter Signup -> Footer.
- Content: Generate realistic article titles and short excerpts.
- Visuals: Editorial style, diverse imagery for different articles.
"#
        }
    }
}

/// Copy tone for the industry.
pub fn industry_tone_rules(industry: &Industry) -> &'static str {
    match industry {
        Industry::Saas => "Professional yet approachable. Focus on productivity, ROI, time-savings.",
        Industry::Fashion => "Trendy, aspirational. Focus on style, confidence, self-expression.",
        Industry::Food => "Warm, sensory. Focus on taste, freshness, craftsmanship.",
        Industry::Beauty => "Empowering, self-care. Focus on glow, radiance, self-love.",
        Industry::Home => "Cozy, inspiring. Focus on comfort, design, transformation.",
        Industry::Services => "Trust-building, expert. Focus on experience, reliability, results.",
    }
}

/// Copy patterns for the competitive strategy.
pub fn strategy_copy_rules(strategy: &Strategy) -> &'static str {
    match strategy {
        Strategy::Cost => r#"Use: "Sale", "Deal", "% OFF". Show strikethrough prices. Add urgency."#,
        Strategy::Premium => {
            r#"Use: "Exclusive", "Crafted", "Artisan". NO sale words. Minimal price display."#
        }
        Strategy::Innovation => {
            r#"Use: "Smart", "AI-Powered", "Revolutionary". Show specs and metrics."#
        }
        Strategy::Trust => r#"Use: "Guaranteed", "Expert", "Certified". Show social proof early."#,
        Strategy::Efficiency => r#"Use: "Instant", "Fast", "Easy". Time-focused metrics."#,
    }
}

/// Writing voice.
pub fn voice_rules(voice: &Voice) -> &'static str {
    match voice {
        Voice::Professional => "Tone: Authoritative, reliable, expert. Avoid slang.",
        Voice::Friendly => r#"Tone: Warm, welcoming, helpful. Use "we" and "you"."#,
        Voice::Humorous => "Tone: Witty, playful, fun. Make the user smile.",
        Voice::Luxury => "Tone: Sophisticated, exclusive, refined. Use elegant vocabulary.",
        Voice::Confident => "Tone: Bold, assertive, powerful. Inspire action.",
    }
}

/// Copy length target.
pub fn text_length_rules(length: &TextLength) -> &'static str {
    match length {
        TextLength::Short => {
            "Length: STRICTLY CONCISE. Use bullet points and very short sentences. Headlines < 5 words. Body < 20 words."
        }
        TextLength::Medium => "Length: BALANCED. Standard paragraphs (2-3 sentences).",
        TextLength::Long => {
            "Length: DETAILED. Use descriptive paragraphs. Storytelling approach. Rich adjectives."
        }
    }
}

/// Lighting descriptor appended to every image prompt.
pub fn tone_descriptor(tone: &Tone) -> &'static str {
    match tone {
        Tone::HighKey => "bright lighting, high exposure, light shadows, airy, white background",
        Tone::LowKey => "dim lighting, dramatic deep shadows, moody, black background, mystery",
        Tone::Warm => "golden hour lighting, warm color temperature, orange/yellow glow, cozy",
        Tone::Cool => "blue hour lighting, cold color temperature, clinical or futuristic, cyan/blue",
        Tone::Neutral => "balanced studio lighting, natural daylight, true-to-life colors, clean",
    }
}

/// Art-direction descriptor appended to every image prompt.
pub fn art_descriptor(art: &Art) -> &'static str {
    match art {
        Art::Minimalist => "minimalist composition, clean lines, negative space, reductionist",
        Art::Classic => "classic art style, timeless, renaissance composition, rich textures",
        Art::Abstract => "abstract forms, geometric shapes, avant-garde, interpretive",
        Art::Pop => "pop art style, bold outlines, vibrant colors, comic aesthetic, dots",
        Art::Organic => "natural textures, biomimetic shapes, flowing lines, soft edges, botanical",
        Art::Cyberpunk => "cyberpunk aesthetic, neon lights, glitch effects, high-tech, futuristic",
    }
}

/// Extra mood clause for image prompts when a campaign is running. Includes
/// its own leading separator; standard mode contributes nothing.
pub fn campaign_image_suffix(campaign: &Campaign) -> &'static str {
    match campaign {
        Campaign::Standard => "",
        Campaign::Blackfriday => ", black friday sales, bold red and black",
        Campaign::Christmas => ", christmas theme, festive, holiday decoration, snow",
        Campaign::Newyear => ", new year celebration, fireworks, gold and silver",
        Campaign::Summer => ", summer vibes, bright sunlight, beach atmosphere",
    }
}

/// Page-assembly constraints every generation must honor, independent of the
/// chosen dimensions.
pub fn visual_polish_rules() -> &'static str {
    r#"
=== VISUAL POLISH RULES (MANDATORY) ===
1. NAVIGATION & LAYOUT (CRITICAL):
   - ORDER IS STRICT: [BannerStrip (Optional)] -> [NavBar] -> [HERO] -> [Content...] -> [Footer].
   - If you use 'BannerStrip', it MUST be the very first component.
   - If 'BannerStrip' is present, 'NavBar' props MUST have "transparent: false" to avoid overlapping.
   - Every page MUST end with a 'Footer' component.

2. IMAGERY & LAYOUT (CRITICAL):
   - DO NOT make every image full-width.
   - HERO SECTION: Use a full-width ImageBlock (width="100%", height="600px" or "auto").
   - PRODUCT/FEATURE SECTIONS:
     - Use 'Grid' with 2, 3, or 4 columns.
     - Inside Grid, use ImageBlock with width="100%" (relative to column).
     - Use aspectRatio="square" or "portrait" for uniform product cards.
     - NEVER stack huge full-width images vertically for products; it looks like a blog, not a shop.

3. TYPOGRAPHY:
   - For 'luxury': Serif headings (font-serif), Sans body.
   - For 'tech': Mono headings (font-mono), Sans body.
   - For 'street': Display headings (uppercase, tracking-tight).

4. RESPONSIVE DESIGN (AUTOMATED):
   - The 'Grid' component handles responsive layouts automatically (Phone: 1 col, Tablet: 2 cols, Desktop: N cols).
   - The 'Typography' component scales font sizes automatically for smaller screens.
   - DO NOT try to manually create separate mobile layouts. Just use standard components and they will adapt.
   - ALWAYS use 'Grid' for multi-column content.

4. COMPONENT HIERARCHY:
   - Banner -> NavBar -> Hero Section -> Features Grid -> Product Showcase (Grid) -> Footer.

5. LAYOUT:
   - Use 'Section' for every distinct block.
   - Use 'Grid' for structured content (features, products).
   - Use 'FlexStack' for vertical/horizontal alignment.
   - Use 'HeroCarousel' for the top section if the site needs to showcase multiple luxury images or promotions.
   - Use 'Typography' for ALL text.

7. SPACING (CRITICAL):
   - When using the Standard Layout, there is a distinct NavBar.
   - Therefore, the FIRST section (HERO) must NOT have explicit top padding that creates a huge gap.
   - HERO spacing: Use paddingY="none" or "sm" if it's the first section under the NavBar.
   - General spacing: Use paddingY="xl" for standard sections to maintain breathability.

8. IMAGERY (MANDATORY):
   - You MUST include at least 3 'ImageBlock' components in the page.
   - The Hero Section (first section) MUST contain a high-quality ImageBlock or background image.
   - IMPORTANT: ALL image 'src' props MUST start with "IMAGE_PROMPT: " followed by a descriptive prompt. Do NOT use fake URLs.
   - Use images to break up text and add visual interest.
"#
}

/// Output contract: the JSON tree shape the parser expects back.
pub fn output_format_rules() -> &'static str {
    r##"
=== OUTPUT FORMAT (JSON Tree) ===
Return a JSON object with a "components" array.
Each component is: { "type": "ComponentName", "props": { ... }, "children": [ ... ] }

Example:
{
  "components": [
    {
      "type": "Section",
      "props": { "paddingY": "xl", "bgColor": "#ffffff" },
      "children": [
        {
          "type": "FlexStack",
          "props": { "direction": "col", "gap": "lg", "align": "center" },
          "children": [
            { "type": "Typography", "props": { "variant": "h1", "text": "Welcome" } },
            { "type": "Button", "props": { "text": "Get Started", "color": "blue" } }
          ]
        }
      ]
    }
  ]
}
"##
}

/// Non-negotiable constraints, rendered last so they stay fresh in context.
pub fn critical_rules(product_name: &str) -> String {
    format!(
        r#"
=== CRITICAL RULES ===
1. Return ONLY valid JSON.
2. NO Markdown formatting needed in response (just raw JSON).
3. IMAGES:
   - For every 'ImageBlock' src prop, you MUST use the format: "IMAGE_PROMPT: <detailed visual description>".
   - Example: "IMAGE_PROMPT: A cinematic shot of a modern coffee machine, moody lighting, 4k"
   - DO NOT provide a URL. DO NOT leave empty.
   - This applies to 'bgImage' props on Sections as well if you use them.
4. Product name is "{product_name}".
"#
    )
}
