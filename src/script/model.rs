// SCRIPTFORGE Script Model - Value Objects for Short-Video Scripts
// Copyright (c) 2026 ScriptForge | SCRIPTFORGE
//
// A Script is the central value object: title, style, duration, ordered
// sections, visual style, hashtags and metadata. Everything deserializes
// leniently because the source of most Scripts is an LLM that only
// approximates the schema; the normalizer repairs whatever survives parsing.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Section kind markers. `kind` stays a plain string on the wire so that
/// unknown types coming back from the model survive a round trip.
pub const KIND_HOOK: &str = "hook";
pub const KIND_POINT: &str = "point";
pub const KIND_PROOF: &str = "proof";
pub const KIND_CTA: &str = "cta";

/// The narration kinds that make it into the voiceover transcript.
pub const NARRATED_KINDS: &[&str] = &[KIND_HOOK, KIND_POINT, KIND_PROOF, KIND_CTA];

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Script {
    #[serde(default)]
    pub title: String,

    #[serde(default = "default_style")]
    pub style: String,

    #[serde(default = "default_duration", deserialize_with = "lenient_i64")]
    pub duration_sec: i64,

    #[serde(default, deserialize_with = "lenient_sections")]
    pub sections: Vec<Section>,

    /// A malformed (non-record) visual_style parses as `None` instead of
    /// failing the whole body; the normalizer then fills the style default.
    #[serde(default, deserialize_with = "lenient_visual_style")]
    pub visual_style: Option<VisualStyle>,

    #[serde(default)]
    pub hashtags: Vec<String>,

    #[serde(default)]
    pub disclaimer: String,

    #[serde(default)]
    pub risk_flags: Vec<String>,

    #[serde(default)]
    pub metrics_hypothesis: Vec<String>,

    #[serde(default)]
    pub reuse_assets: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Section {
    /// One of hook/point/proof/cta; anything else is carried but not narrated.
    #[serde(rename = "type", default)]
    pub kind: String,

    /// "start-end" range in seconds, e.g. "5-15". Validated only at export.
    #[serde(default)]
    pub time: String,

    #[serde(default)]
    pub text: String,

    #[serde(default)]
    pub caption: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub broll: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern_interrupt: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub example: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub micro_action: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct VisualStyle {
    #[serde(default)]
    pub luminosity: String,
    #[serde(default)]
    pub contrast: String,
    #[serde(default)]
    pub color_palette: String,
    #[serde(default)]
    pub transitions: Vec<String>,
    #[serde(default)]
    pub effects: Vec<String>,
    #[serde(default)]
    pub overall_style: String,
}

fn default_style() -> String {
    "viral".to_string()
}

fn default_duration() -> i64 {
    45
}

impl Default for Script {
    fn default() -> Self {
        Self {
            title: String::new(),
            style: default_style(),
            duration_sec: default_duration(),
            sections: Vec::new(),
            visual_style: None,
            hashtags: Vec::new(),
            disclaimer: String::new(),
            risk_flags: Vec::new(),
            metrics_hypothesis: Vec::new(),
            reuse_assets: false,
        }
    }
}

impl Section {
    pub fn new(kind: &str, time: &str, text: &str, caption: &str) -> Self {
        Self {
            kind: kind.to_string(),
            time: time.to_string(),
            text: text.to_string(),
            caption: caption.to_string(),
            broll: None,
            pattern_interrupt: None,
            example: None,
            micro_action: None,
            source: None,
        }
    }
}

impl Script {
    /// Hard-coded fallback skeleton used when the model response is not
    /// recoverable JSON. Never surfaced as an error to the caller.
    pub fn skeleton(topic: &str, style: &str, duration_sec: i64) -> Self {
        Self {
            title: format!("Ton cerveau te joue un tour avec {topic}"),
            style: style.to_string(),
            duration_sec,
            sections: Vec::new(),
            ..Self::default()
        }
    }

    /// Lenient conversion from raw model JSON. A non-object value or a value
    /// whose fields cannot be coerced yields `None`; the caller decides how
    /// to degrade (fallback skeleton or keep the previous script).
    pub fn from_model_value(value: Value) -> Option<Self> {
        serde_json::from_value(value).ok()
    }
}

fn lenient_i64<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(value
        .as_i64()
        .or_else(|| value.as_f64().map(|f| f as i64))
        .unwrap_or_else(default_duration))
}

fn lenient_sections<'de, D>(deserializer: D) -> Result<Vec<Section>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    match value {
        Value::Array(items) => Ok(items
            .into_iter()
            .filter_map(|item| serde_json::from_value(item).ok())
            .collect()),
        _ => Ok(Vec::new()),
    }
}

fn lenient_visual_style<'de, D>(deserializer: D) -> Result<Option<VisualStyle>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}
