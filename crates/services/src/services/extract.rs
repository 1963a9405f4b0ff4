//! Typed extractors over loosely-shaped AI response values.
//!
//! The model nests the same logical value in several places. Each helper
//! tries a fixed list of locations in order; the first hit wins and every
//! helper bottoms out in a concrete default, never an error.

use serde_json::{Map, Value};

/// Fields checked, in order, when looking for a section's list items.
const ITEM_KEYS: [&str; 8] = [
    "items",
    "list",
    "features",
    "products",
    "cards",
    "testimonials",
    "questions",
    "faqs",
];

/// Reduce an arbitrary value to a string. Strings pass through, numbers are
/// formatted, objects yield their first string field among `text`, `content`,
/// `value`, and anything else becomes compact JSON. Null is the empty string.
pub fn coerce_string(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Object(map) => ["text", "content", "value"]
            .iter()
            .find_map(|key| map.get(*key).and_then(Value::as_str))
            .map(str::to_string)
            .unwrap_or_else(|| value.to_string()),
        other => other.to_string(),
    }
}

/// [`coerce_string`] for one key of an object; empty string when missing.
pub fn coerced_key(value: &Value, key: &str) -> String {
    value.get(key).map(coerce_string).unwrap_or_default()
}

/// First key whose value is present (non-null, not the empty string), coerced
/// to a string.
pub fn first_coerced(value: &Value, keys: &[&str]) -> Option<String> {
    keys.iter().find_map(|key| {
        let v = value.get(*key)?;
        if v.is_null() {
            return None;
        }
        let s = coerce_string(v);
        (!s.is_empty()).then_some(s)
    })
}

/// Extract display text from a plain string, a `{props:{text}}` component
/// shape, or a `{text}`/`{content}` wrapper; otherwise the fallback.
pub fn text_of(value: Option<&Value>, fallback: &str) -> String {
    let Some(value) = value else {
        return fallback.to_string();
    };
    if let Some(s) = value.as_str() {
        if s.is_empty() {
            return fallback.to_string();
        }
        return s.to_string();
    }
    if let Some(s) = value.pointer("/props/text").and_then(Value::as_str) {
        return s.to_string();
    }
    if let Some(s) = value.get("text").and_then(Value::as_str) {
        return s.to_string();
    }
    if let Some(s) = value.get("content").and_then(Value::as_str) {
        return s.to_string();
    }
    fallback.to_string()
}

/// [`text_of`] over the first present key: the key lookup settles before text
/// extraction, so a present-but-unreadable value does not fall through to the
/// next key.
pub fn text_of_first(value: &Value, keys: &[&str], fallback: &str) -> String {
    let chosen = keys.iter().find_map(|key| {
        let v = value.get(*key)?;
        match v {
            Value::Null => None,
            Value::String(s) if s.is_empty() => None,
            _ => Some(v),
        }
    });
    text_of(chosen, fallback)
}

/// [`text_of`] chained across keys: each key is extracted in turn and the
/// first non-empty extraction wins.
fn first_text(props: &Value, keys: &[&str]) -> String {
    keys.iter()
        .map(|key| text_of(props.get(*key), ""))
        .find(|s| !s.is_empty())
        .unwrap_or_default()
}

/// List items for a section: the first populated array field wins, then the
/// content itself if it is an array.
pub fn item_list(content: &Value) -> Vec<Value> {
    if let Some(map) = content.as_object() {
        for key in ITEM_KEYS {
            if let Some(Value::Array(items)) = map.get(key) {
                if !items.is_empty() {
                    return items.clone();
                }
            }
        }
    }
    content.as_array().cloned().unwrap_or_default()
}

/// Normalized fields pulled out of one list item.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemFields {
    pub title: String,
    pub description: String,
    pub icon: String,
    pub image: String,
}

impl Default for ItemFields {
    fn default() -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            icon: "Star".to_string(),
            image: String::new(),
        }
    }
}

/// Extract item fields from either a plain data object (`{title, description,
/// icon}`) or a component-shaped item (`{type, props, children}`), scanning
/// descendants for Typography/Icon/ImageBlock content in the latter case.
pub fn item_fields(item: &Value) -> ItemFields {
    let Some(map) = item.as_object() else {
        return ItemFields::default();
    };

    // Plain data object: named fields directly on the item.
    let is_plain = ["title", "name", "headline"]
        .iter()
        .any(|key| map.get(*key).map(Value::is_string).unwrap_or(false));
    if is_plain {
        return ItemFields {
            title: first_coerced(item, &["title", "name", "headline"]).unwrap_or_default(),
            description: first_coerced(item, &["description", "body", "desc", "text"])
                .unwrap_or_default(),
            icon: map
                .get("icon")
                .and_then(Value::as_str)
                .filter(|s| !s.is_empty())
                .unwrap_or("Star")
                .to_string(),
            image: first_coerced(item, &["image", "src", "imageUrl"]).unwrap_or_default(),
        };
    }

    // Component-shaped item: props first, then descendants.
    if map.contains_key("type") && map.contains_key("props") {
        let mut fields = ItemFields::default();
        if let Some(props) = map.get("props") {
            fields.title = first_text(props, &["title", "name", "headline"]);
            fields.description = first_text(props, &["description", "body", "text"]);
            if let Some(icon) = props.get("icon").and_then(Value::as_str) {
                if !icon.is_empty() {
                    fields.icon = icon.to_string();
                }
            }
            fields.image = first_text(props, &["image", "src"]);
        }
        for arm in ["components", "children"] {
            if let Some(kids) = map.get(arm).and_then(Value::as_array) {
                scan_children(kids, &mut fields);
            }
        }
        return fields;
    }

    ItemFields::default()
}

/// Walk a component subtree filling empty title/description slots from
/// Typography nodes (first fills title, second fills description) and taking
/// the last Icon name and ImageBlock src seen.
fn scan_children(children: &[Value], fields: &mut ItemFields) {
    for child in children {
        let Some(map) = child.as_object() else {
            continue;
        };
        let child_type = map.get("type").and_then(Value::as_str).unwrap_or("");
        let props = map.get("props");
        match child_type {
            "Typography" => {
                if let Some(text_value) = props.and_then(|p| p.get("text")) {
                    let text = text_of(Some(text_value), "");
                    if !text.is_empty() {
                        if fields.title.is_empty() {
                            fields.title = text;
                        } else if fields.description.is_empty() {
                            fields.description = text;
                        }
                    }
                }
            }
            "Icon" => {
                if let Some(name) = props.and_then(|p| p.get("name")).and_then(Value::as_str) {
                    fields.icon = name.to_string();
                }
            }
            "ImageBlock" => {
                if let Some(src) = props.and_then(|p| p.get("src")).and_then(Value::as_str) {
                    fields.image = src.to_string();
                }
            }
            _ => {}
        }
        for arm in ["components", "children"] {
            if let Some(kids) = map.get(arm).and_then(Value::as_array) {
                scan_children(kids, fields);
            }
        }
    }
}

/// Content payload for a section: `content` on the section itself, else
/// nested under `props.content`, else an empty object.
pub fn section_content(section: &Map<String, Value>) -> Value {
    section
        .get("content")
        .filter(|v| !v.is_null())
        .or_else(|| {
            section
                .get("props")
                .and_then(|props| props.get("content"))
                .filter(|v| !v.is_null())
        })
        .cloned()
        .unwrap_or_else(|| Value::Object(Map::new()))
}

/// Background for a section: `background`, else `props.backgroundColor`,
/// normalized to hex. `None` when neither is a usable string.
pub fn section_bg_color(section: &Map<String, Value>) -> Option<String> {
    let raw = section
        .get("background")
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .or_else(|| {
            section
                .get("props")
                .and_then(|props| props.get("backgroundColor"))
                .and_then(Value::as_str)
                .filter(|s| !s.is_empty())
        })?;
    Some(resolve_color(raw))
}

/// Map a Tailwind color name to hex. `#...`/`rgb...` values pass through,
/// `bg-`/`text-` prefixes are stripped, and unknown names come back
/// unchanged.
pub fn resolve_color(input: &str) -> String {
    let color = input.trim();
    if color.starts_with('#') || color.starts_with("rgb") {
        return color.to_string();
    }
    let name = color
        .strip_prefix("bg-")
        .or_else(|| color.strip_prefix("text-"))
        .unwrap_or(color);
    tailwind_hex(name)
        .map(str::to_string)
        .unwrap_or_else(|| input.to_string())
}

fn tailwind_hex(name: &str) -> Option<&'static str> {
    Some(match name {
        "white" => "#ffffff",
        "black" => "#000000",
        "transparent" => "transparent",
        "slate-50" => "#f8fafc",
        "slate-100" => "#f1f5f9",
        "slate-200" => "#e2e8f0",
        "slate-300" => "#cbd5e1",
        "slate-400" => "#94a3b8",
        "slate-500" => "#64748b",
        "slate-600" => "#475569",
        "slate-700" => "#334155",
        "slate-800" => "#1e293b",
        "slate-900" => "#0f172a",
        "slate-950" => "#020617",
        "gray-50" => "#f9fafb",
        "gray-100" => "#f3f4f6",
        "gray-200" => "#e5e7eb",
        "gray-300" => "#d1d5db",
        "gray-400" => "#9ca3af",
        "gray-500" => "#6b7280",
        "gray-600" => "#4b5563",
        "gray-700" => "#374151",
        "gray-800" => "#1f2937",
        "gray-900" => "#111827",
        "gray-950" => "#030712",
        "zinc-900" => "#18181b",
        "zinc-950" => "#09090b",
        "neutral-900" => "#171717",
        "neutral-950" => "#0a0a0a",
        "stone-900" => "#1c1917",
        "stone-950" => "#0c0a09",
        "red-500" => "#ef4444",
        "red-600" => "#dc2626",
        "red-700" => "#b91c1c",
        "orange-500" => "#f97316",
        "orange-600" => "#ea580c",
        "amber-500" => "#f59e0b",
        "amber-600" => "#d97706",
        "yellow-400" => "#facc15",
        "yellow-500" => "#eab308",
        "lime-500" => "#84cc16",
        "green-500" => "#22c55e",
        "green-600" => "#16a34a",
        "green-700" => "#15803d",
        "emerald-500" => "#10b981",
        "emerald-600" => "#059669",
        "emerald-700" => "#047857",
        "teal-500" => "#14b8a6",
        "teal-600" => "#0d9488",
        "teal-700" => "#0f766e",
        "cyan-500" => "#06b6d4",
        "cyan-600" => "#0891b2",
        "sky-500" => "#0ea5e9",
        "sky-600" => "#0284c7",
        "blue-500" => "#3b82f6",
        "blue-600" => "#2563eb",
        "blue-700" => "#1d4ed8",
        "blue-800" => "#1e40af",
        "blue-900" => "#1e3a8a",
        "blue-950" => "#172554",
        "indigo-500" => "#6366f1",
        "indigo-600" => "#4f46e5",
        "indigo-700" => "#4338ca",
        "indigo-800" => "#3730a3",
        "indigo-900" => "#312e81",
        "indigo-950" => "#1e1b4b",
        "violet-500" => "#8b5cf6",
        "violet-600" => "#7c3aed",
        "violet-700" => "#6d28d9",
        "purple-500" => "#a855f7",
        "purple-600" => "#9333ea",
        "purple-700" => "#7e22ce",
        "fuchsia-500" => "#d946ef",
        "fuchsia-600" => "#c026d3",
        "pink-500" => "#ec4899",
        "pink-600" => "#db2777",
        "rose-500" => "#f43f5e",
        "rose-600" => "#e11d48",
        _ => return None,
    })
}
