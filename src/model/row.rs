//! Display rows produced by the row builder

use super::hierarchy::SettingsMap;
use serde::ser::{Serialize, SerializeStruct, Serializer};

/// Whether a row describes an object or one of its parts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowKind {
    /// Top-level object row
    Object,
    /// Indented part row below its object
    Part,
}

/// A resolved display value and whether it overrides its parent level
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Field {
    /// Value as displayed
    pub value: String,
    /// True when the value is a custom override
    pub custom: bool,
}

impl Field {
    /// Create a field
    pub fn new(value: impl Into<String>, custom: bool) -> Self {
        Self {
            value: value.into(),
            custom,
        }
    }

    /// A blank, non-custom field
    pub fn blank() -> Self {
        Self::default()
    }
}

/// One display-ready record for an object or a part
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    /// Plate label; empty for part rows
    pub plate: String,
    /// Object or part
    pub kind: RowKind,
    /// Display name; part names carry an indentation prefix
    pub name: String,
    /// Filament / extruder number
    pub filament: String,
    /// Layer height (blank for parts)
    pub layer_height: Field,
    /// Wall loop count
    pub wall_loops: Field,
    /// Infill density without the percent sign
    pub infill: Field,
    /// `On` / `Off`
    pub support: Field,
    /// Brim type label (blank for parts)
    pub brim: Field,
    /// Outer wall speed
    pub outer_wall_speed: Field,
    /// Raw overrides of the object or part, for detail lines
    pub custom_settings: SettingsMap,
}

impl Row {
    /// True for object rows
    pub fn is_parent(&self) -> bool {
        self.kind == RowKind::Object
    }

    /// True for part rows
    pub fn is_part(&self) -> bool {
        self.kind == RowKind::Part
    }

    /// True when any tracked field is flagged custom
    pub fn has_custom_fields(&self) -> bool {
        [
            &self.layer_height,
            &self.wall_loops,
            &self.infill,
            &self.support,
            &self.brim,
            &self.outer_wall_speed,
        ]
        .iter()
        .any(|f| f.custom)
    }
}

impl Serialize for Row {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut s = serializer.serialize_struct("Row", 18)?;
        s.serialize_field("plate", &self.plate)?;
        s.serialize_field("name", &self.name)?;
        s.serialize_field("is_parent", &self.is_parent())?;
        s.serialize_field("is_part", &self.is_part())?;
        s.serialize_field("filament", &self.filament)?;
        s.serialize_field("layer_height", &self.layer_height.value)?;
        s.serialize_field("layer_custom", &self.layer_height.custom)?;
        s.serialize_field("wall_loops", &self.wall_loops.value)?;
        s.serialize_field("walls_custom", &self.wall_loops.custom)?;
        s.serialize_field("infill", &self.infill.value)?;
        s.serialize_field("infill_custom", &self.infill.custom)?;
        s.serialize_field("support", &self.support.value)?;
        s.serialize_field("support_custom", &self.support.custom)?;
        s.serialize_field("brim", &self.brim.value)?;
        s.serialize_field("brim_custom", &self.brim.custom)?;
        s.serialize_field("outer_wall_speed", &self.outer_wall_speed.value)?;
        s.serialize_field("speed_custom", &self.outer_wall_speed.custom)?;
        s.serialize_field("custom_settings", &self.custom_settings)?;
        s.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_serializes_flat_keys() {
        let row = Row {
            plate: "1".to_string(),
            kind: RowKind::Object,
            name: "Cube".to_string(),
            filament: "2".to_string(),
            layer_height: Field::new("0.2", false),
            wall_loops: Field::new("4", true),
            infill: Field::new("15", false),
            support: Field::new("Off", false),
            brim: Field::new("No", false),
            outer_wall_speed: Field::new("200", false),
            custom_settings: SettingsMap::new(),
        };

        let json = serde_json::to_value(&row).unwrap();
        assert_eq!(json["is_parent"], true);
        assert_eq!(json["is_part"], false);
        assert_eq!(json["wall_loops"], "4");
        assert_eq!(json["walls_custom"], true);
        assert_eq!(json["speed_custom"], false);
        assert!(json["custom_settings"].as_object().unwrap().is_empty());
        assert!(row.has_custom_fields());
    }
}
