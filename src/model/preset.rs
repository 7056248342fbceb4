//! Smooth tool preset records.
//!
//! A preset is the tool management service's view of a tool: it adds the
//! machine identity, per-axis units and an orientation block, and keeps the
//! native tool table fields in a passthrough bag so nothing is lost on the
//! way back.

use super::field::Field;
use super::tool::{FieldValue, ToolEntry};
use crate::config::Unit;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Tool offsets, each with an optional unit.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PresetOffsets {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x_unit: Option<Unit>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y_unit: Option<Unit>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub z: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub z_unit: Option<Unit>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub u: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub u_unit: Option<Unit>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub v: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub v_unit: Option<Unit>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub w: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub w_unit: Option<Unit>,
}

impl PresetOffsets {
    /// Offset fields of a tool entry paired with their preset axis.
    pub const AXES: [Field; 6] = [
        Field::XOffset,
        Field::YOffset,
        Field::ZOffset,
        Field::UOffset,
        Field::VOffset,
        Field::WOffset,
    ];

    fn slots(&self, field: Field) -> Option<(Option<f64>, Option<Unit>)> {
        match field {
            Field::XOffset => Some((self.x, self.x_unit)),
            Field::YOffset => Some((self.y, self.y_unit)),
            Field::ZOffset => Some((self.z, self.z_unit)),
            Field::UOffset => Some((self.u, self.u_unit)),
            Field::VOffset => Some((self.v, self.v_unit)),
            Field::WOffset => Some((self.w, self.w_unit)),
            _ => None,
        }
    }

    fn slots_mut(&mut self, field: Field) -> Option<(&mut Option<f64>, &mut Option<Unit>)> {
        match field {
            Field::XOffset => Some((&mut self.x, &mut self.x_unit)),
            Field::YOffset => Some((&mut self.y, &mut self.y_unit)),
            Field::ZOffset => Some((&mut self.z, &mut self.z_unit)),
            Field::UOffset => Some((&mut self.u, &mut self.u_unit)),
            Field::VOffset => Some((&mut self.v, &mut self.v_unit)),
            Field::WOffset => Some((&mut self.w, &mut self.w_unit)),
            _ => None,
        }
    }

    /// Offset for a tool entry field converted to millimeters.
    pub fn get_mm(&self, field: Field) -> Option<f64> {
        let (value, unit) = self.slots(field)?;
        value.map(|v| unit.unwrap_or_default().to_mm(v))
    }

    /// Set an offset together with its unit.
    pub fn set(&mut self, field: Field, value: f64, unit: Unit) {
        if let Some((v, u)) = self.slots_mut(field) {
            *v = Some(value);
            *u = Some(unit);
        }
    }

    pub fn is_empty(&self) -> bool {
        Self::AXES.iter().all(|&f| self.get_mm(f).is_none())
    }
}

/// Lathe orientation block.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PresetOrientation {
    /// Orientation code (Q).
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub front_angle: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub back_angle: Option<f64>,
}

impl PresetOrientation {
    pub fn is_empty(&self) -> bool {
        self.kind.is_none() && self.front_angle.is_none() && self.back_angle.is_none()
    }
}

/// Native tool table fields kept verbatim inside a preset.
///
/// Keys are field names (`z_offset`, `a_angle`, ...) in canonical field
/// order. The comment is never stored here. A `null` value counts as absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Passthrough(IndexMap<String, Option<FieldValue>>);

impl Passthrough {
    /// Capture every set field of an entry.
    pub fn from_entry(entry: &ToolEntry) -> Self {
        Self(
            entry
                .set_fields()
                .map(|(field, value)| (field.name().to_string(), Some(value)))
                .collect(),
        )
    }

    /// Fill fields of `entry` that are still unset. Null values, unknown keys
    /// and values that do not fit their field are skipped.
    pub fn fill_unset(&self, entry: &mut ToolEntry) {
        for (name, value) in &self.0 {
            let Some(value) = value else {
                continue;
            };
            let Some(field) = Field::from_name(name) else {
                tracing::debug!("Ignoring unknown passthrough key '{}'", name);
                continue;
            };
            if field == Field::ToolNumber || entry.is_set(field) {
                continue;
            }
            if !entry.set(field, *value) {
                tracing::warn!(
                    "T{}: passthrough value {:?} does not fit field {}",
                    entry.tool_number,
                    value,
                    field
                );
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<FieldValue> {
        self.0.get(name).copied().flatten()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }
}

/// Preset metadata.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PresetMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub diameter: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub diameter_unit: Option<Unit>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub linuxcnc_data: Option<Passthrough>,
    /// Keys this crate does not interpret, preserved as-is.
    #[serde(flatten)]
    pub extra: IndexMap<String, serde_json::Value>,
}

impl PresetMetadata {
    /// Diameter converted to millimeters.
    pub fn diameter_mm(&self) -> Option<f64> {
        self.diameter
            .map(|d| self.diameter_unit.unwrap_or_default().to_mm(d))
    }
}

/// A tool preset as exchanged with the Smooth service.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ToolPreset {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub machine_id: Option<String>,
    pub tool_number: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pocket: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offsets: Option<PresetOffsets>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub orientation: Option<PresetOrientation>,
    #[serde(default)]
    pub metadata: PresetMetadata,
}

/// The JSON shapes accepted for a batch of presets.
///
/// An object with an `items` key is always read as a bulk document, so a
/// malformed item is an error rather than a different shape.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum PresetDocument {
    /// `[{...}, {...}]`
    List(Vec<ToolPreset>),
    /// `{"items": [...]}`
    Bulk { items: Vec<ToolPreset> },
    /// A single preset object.
    Single(Box<ToolPreset>),
}

impl PresetDocument {
    /// Wrap presets in the bulk request shape.
    pub fn bulk(items: Vec<ToolPreset>) -> Self {
        PresetDocument::Bulk { items }
    }

    pub fn into_presets(self) -> Vec<ToolPreset> {
        match self {
            PresetDocument::List(items) | PresetDocument::Bulk { items } => items,
            PresetDocument::Single(preset) => vec![*preset],
        }
    }
}

impl<'de> Deserialize<'de> for PresetDocument {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        use serde::de::Error;
        use serde_json::Value;

        let value = Value::deserialize(deserializer)?;
        match value {
            Value::Array(items) => serde_json::from_value(Value::Array(items))
                .map(PresetDocument::List)
                .map_err(D::Error::custom),
            Value::Object(mut object) => match object.remove("items") {
                Some(items) => serde_json::from_value(items)
                    .map(|items| PresetDocument::Bulk { items })
                    .map_err(|e| D::Error::custom(format!("items: {}", e))),
                None => serde_json::from_value(Value::Object(object))
                    .map(|preset| PresetDocument::Single(Box::new(preset)))
                    .map_err(D::Error::custom),
            },
            other => Err(D::Error::custom(format!(
                "expected a preset, a list of presets or {{\"items\": [...]}}, got {}",
                other
            ))),
        }
    }
}
