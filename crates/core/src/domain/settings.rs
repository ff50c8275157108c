//! Settings record
//!
//! One process-wide record holding the slot configuration and the display
//! preferences read by the public screen. Updates are per-field: a patch
//! overwrites the fields it carries and leaves the rest alone.

use super::slot::{SlotConfig, DEFAULT_INTERVAL_MINUTES};
use super::time::MINUTES_PER_DAY;
use serde::{Deserialize, Deserializer, Serialize};

/// Slot length in minutes, as configured.
///
/// Deserialization is lenient: numbers and numeric strings are taken as-is,
/// anything else is stored as 0. Non-positive values fall back to
/// [`DEFAULT_INTERVAL_MINUTES`] when slots are generated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct SlotInterval(i64);

impl SlotInterval {
    pub fn new(minutes: i64) -> Self {
        Self(minutes)
    }

    pub fn configured(&self) -> i64 {
        self.0
    }

    /// Step actually used by the slot generator
    pub fn effective_minutes(&self) -> u32 {
        if self.0 > 0 {
            self.0.min(MINUTES_PER_DAY as i64) as u32
        } else {
            DEFAULT_INTERVAL_MINUTES
        }
    }
}

impl<'de> Deserialize<'de> for SlotInterval {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = serde_json::Value::deserialize(deserializer)?;
        let minutes = match &value {
            serde_json::Value::Number(n) => n
                .as_i64()
                .or_else(|| n.as_f64().filter(|f| f.is_finite()).map(|f| f.trunc() as i64))
                .unwrap_or(0),
            serde_json::Value::String(s) => {
                let s = s.trim();
                s.parse::<i64>()
                    .ok()
                    .or_else(|| s.parse::<f64>().ok().filter(|f| f.is_finite()).map(|f| f.trunc() as i64))
                    .unwrap_or(0)
            }
            _ => 0,
        };
        Ok(Self(minutes))
    }
}

/// Full settings record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    // Slot system
    pub slot_minutes: SlotInterval,
    pub day_start: String,
    pub day_end: String,

    // Display
    pub view_font_family: String,
    pub view_font_color: String,
    pub view_bg_image_url: String,
    pub view_bg_overlay: f64,
    pub view_align: String,
    pub view_justify: String,
    pub view_size: String,
    pub view_spacing: String,
    pub view_show_count: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            slot_minutes: SlotInterval::new(15),
            day_start: "09:00".to_string(),
            day_end: "17:00".to_string(),

            view_font_family: "System".to_string(),
            view_font_color: "#ffffff".to_string(),
            view_bg_image_url: String::new(),
            view_bg_overlay: 0.35,
            view_align: "center".to_string(),
            view_justify: "center".to_string(),
            view_size: "6xl".to_string(),
            view_spacing: "4".to_string(),
            view_show_count: 3,
        }
    }
}

impl Settings {
    /// Slot configuration view of the record
    pub fn slot_config(&self) -> SlotConfig {
        SlotConfig {
            day_start: self.day_start.clone(),
            day_end: self.day_end.clone(),
            slot_minutes: self.slot_minutes,
        }
    }

    /// Shallow merge: present fields overwrite, absent fields stay
    pub fn apply(&mut self, patch: SettingsPatch) {
        macro_rules! merge {
            ($($field:ident),* $(,)?) => {
                $(if let Some(value) = patch.$field {
                    self.$field = value;
                })*
            };
        }

        merge!(
            slot_minutes,
            day_start,
            day_end,
            view_font_family,
            view_font_color,
            view_bg_image_url,
            view_bg_overlay,
            view_align,
            view_justify,
            view_size,
            view_spacing,
            view_show_count,
        );
    }
}

/// Partial settings update. Unknown keys are ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SettingsPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slot_minutes: Option<SlotInterval>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub day_start: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub day_end: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub view_font_family: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub view_font_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub view_bg_image_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub view_bg_overlay: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub view_align: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub view_justify: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub view_size: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub view_spacing: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub view_show_count: Option<u32>,
}

impl SettingsPatch {
    /// Patch that only points the display at a new background image
    pub fn background(url: impl Into<String>) -> Self {
        Self {
            view_bg_image_url: Some(url.into()),
            ..Default::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}
