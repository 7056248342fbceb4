//! Tool entry representing a single line of a LinuxCNC tool table.

use super::field::{Field, FieldKind};
use serde::{Deserialize, Serialize};

/// One tool table record.
///
/// Every optional field distinguishes "not specified" (`None`) from an
/// explicit zero. Only `tool_number` is required.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ToolEntry {
    /// Tool number (T), unique within a table.
    pub tool_number: u32,
    /// Tool changer pocket (P).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pocket: Option<u32>,
    /// Tool diameter (D), never negative.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub diameter: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x_offset: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y_offset: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub z_offset: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub a_angle: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub b_angle: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub c_angle: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub u_offset: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub v_offset: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub w_offset: Option<f64>,
    /// Lathe tool orientation code (Q).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub orientation: Option<u32>,
    /// Front angle (I).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub front_angle: Option<f64>,
    /// Back angle (J).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub back_angle: Option<f64>,
    /// Free text after `;`. Must not contain a line break.
    #[serde(default)]
    pub comment: String,
}

/// Raw value of a coded field.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Integer(u32),
    Real(f64),
}

impl FieldValue {
    /// Value as a real. Integers widen losslessly.
    pub fn as_f64(&self) -> f64 {
        match *self {
            FieldValue::Integer(v) => f64::from(v),
            FieldValue::Real(v) => v,
        }
    }

    /// Value as an unsigned integer, if it is one or is an integral real in range.
    pub fn as_u32(&self) -> Option<u32> {
        match *self {
            FieldValue::Integer(v) => Some(v),
            FieldValue::Real(v) if v.fract() == 0.0 && v >= 0.0 && v <= f64::from(u32::MAX) => {
                Some(v as u32)
            }
            FieldValue::Real(_) => None,
        }
    }
}

impl ToolEntry {
    /// Create an entry with only a tool number.
    pub fn new(tool_number: u32) -> Self {
        Self {
            tool_number,
            ..Default::default()
        }
    }

    pub fn with_pocket(mut self, pocket: u32) -> Self {
        self.pocket = Some(pocket);
        self
    }

    pub fn with_diameter(mut self, diameter: f64) -> Self {
        self.diameter = Some(diameter);
        self
    }

    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = comment.into();
        self
    }

    /// Set any coded field, builder style. See [`ToolEntry::set`].
    pub fn with(mut self, field: Field, value: FieldValue) -> Self {
        self.set(field, value);
        self
    }

    fn real_slot(&mut self, field: Field) -> Option<&mut Option<f64>> {
        match field {
            Field::Diameter => Some(&mut self.diameter),
            Field::XOffset => Some(&mut self.x_offset),
            Field::YOffset => Some(&mut self.y_offset),
            Field::ZOffset => Some(&mut self.z_offset),
            Field::AAngle => Some(&mut self.a_angle),
            Field::BAngle => Some(&mut self.b_angle),
            Field::CAngle => Some(&mut self.c_angle),
            Field::UOffset => Some(&mut self.u_offset),
            Field::VOffset => Some(&mut self.v_offset),
            Field::WOffset => Some(&mut self.w_offset),
            Field::FrontAngle => Some(&mut self.front_angle),
            Field::BackAngle => Some(&mut self.back_angle),
            Field::ToolNumber | Field::Pocket | Field::Orientation => None,
        }
    }

    /// Get a coded field. `tool_number` is always present.
    pub fn get(&self, field: Field) -> Option<FieldValue> {
        let real = |v: Option<f64>| v.map(FieldValue::Real);
        match field {
            Field::ToolNumber => Some(FieldValue::Integer(self.tool_number)),
            Field::Pocket => self.pocket.map(FieldValue::Integer),
            Field::Orientation => self.orientation.map(FieldValue::Integer),
            Field::Diameter => real(self.diameter),
            Field::XOffset => real(self.x_offset),
            Field::YOffset => real(self.y_offset),
            Field::ZOffset => real(self.z_offset),
            Field::AAngle => real(self.a_angle),
            Field::BAngle => real(self.b_angle),
            Field::CAngle => real(self.c_angle),
            Field::UOffset => real(self.u_offset),
            Field::VOffset => real(self.v_offset),
            Field::WOffset => real(self.w_offset),
            Field::FrontAngle => real(self.front_angle),
            Field::BackAngle => real(self.back_angle),
        }
    }

    /// Whether a coded field is set.
    pub fn is_set(&self, field: Field) -> bool {
        self.get(field).is_some()
    }

    /// Set a coded field.
    ///
    /// Integers are accepted for real fields. Reals are accepted for integer
    /// fields only when integral and in range. Returns `false` and leaves the
    /// entry unchanged when the value does not fit the field.
    pub fn set(&mut self, field: Field, value: FieldValue) -> bool {
        match field.kind() {
            FieldKind::Integer => {
                let Some(v) = value.as_u32() else {
                    return false;
                };
                match field {
                    Field::ToolNumber => self.tool_number = v,
                    Field::Pocket => self.pocket = Some(v),
                    Field::Orientation => self.orientation = Some(v),
                    _ => return false,
                }
                true
            }
            FieldKind::Real => match self.real_slot(field) {
                Some(slot) => {
                    *slot = Some(value.as_f64());
                    true
                }
                None => false,
            },
        }
    }

    /// Fields that are set, in canonical order.
    pub fn set_fields(&self) -> impl Iterator<Item = (Field, FieldValue)> + '_ {
        Field::ALL
            .iter()
            .filter_map(move |&f| self.get(f).map(|v| (f, v)))
    }

    pub fn has_comment(&self) -> bool {
        !self.comment.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_entry_has_nothing_set() {
        let entry = ToolEntry::new(7);
        assert_eq!(entry.tool_number, 7);
        let set: Vec<_> = entry.set_fields().map(|(f, _)| f).collect();
        assert_eq!(set, vec![Field::ToolNumber]);
        assert!(!entry.has_comment());
    }

    #[test]
    fn test_get_set_roundtrip_per_field() {
        let mut entry = ToolEntry::new(1);
        assert!(entry.set(Field::ZOffset, FieldValue::Real(-41.031)));
        assert!(entry.set(Field::Orientation, FieldValue::Integer(5)));
        assert_eq!(entry.z_offset, Some(-41.031));
        assert_eq!(entry.orientation, Some(5));
        assert_eq!(entry.get(Field::ZOffset), Some(FieldValue::Real(-41.031)));
        assert!(entry.is_set(Field::Orientation));
        assert!(!entry.is_set(Field::XOffset));
    }

    #[test]
    fn test_set_coerces_kinds() {
        let mut entry = ToolEntry::new(1);
        assert!(entry.set(Field::AAngle, FieldValue::Integer(10)));
        assert_eq!(entry.a_angle, Some(10.0));
        assert!(entry.set(Field::Pocket, FieldValue::Real(3.0)));
        assert_eq!(entry.pocket, Some(3));
        assert!(!entry.set(Field::Pocket, FieldValue::Real(3.5)));
        assert!(!entry.set(Field::Pocket, FieldValue::Real(-1.0)));
        assert_eq!(entry.pocket, Some(3));
    }

    #[test]
    fn test_field_value_serde() {
        let v: FieldValue = serde_json::from_str("5").unwrap();
        assert_eq!(v, FieldValue::Integer(5));
        let v: FieldValue = serde_json::from_str("10.5").unwrap();
        assert_eq!(v, FieldValue::Real(10.5));
        let v: FieldValue = serde_json::from_str("-3").unwrap();
        assert_eq!(v, FieldValue::Real(-3.0));
    }

    #[test]
    fn test_entry_json_skips_unset_fields() {
        let entry = ToolEntry::new(20).with_pocket(0).with_diameter(1.0);
        let json = serde_json::to_string(&entry).unwrap();
        assert_eq!(
            json,
            r#"{"tool_number":20,"pocket":0,"diameter":1.0,"comment":""}"#
        );
    }
}
