//! Object, part and plate hierarchy parsed from the model settings

use serde::Serialize;
use serde_json::Value;
use std::collections::HashMap;

/// Ordered setting-key to value mapping, in the order the slicer wrote it
pub type SettingsMap = serde_json::Map<String, Value>;

/// Extruder assigned when an object does not name one
pub const DEFAULT_EXTRUDER: &str = "1";

/// Name assumed for a part that carries no `name` metadata
///
/// This is compared against object names when deciding whether a single
/// part is redundant, so it must stay exactly `"Part"`.
pub const DEFAULT_PART_NAME: &str = "Part";

/// A printable body with its per-object overrides
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Object {
    /// Object identifier, unique within the archive
    pub id: String,
    /// Display name from the `name` metadata
    pub name: Option<String>,
    /// Assigned extruder / filament number
    pub extruder: String,
    /// Layer height override
    pub layer_height: Option<String>,
    /// Wall loop count override
    pub wall_loops: Option<String>,
    /// Infill density override (first of the two alias keys seen)
    pub sparse_infill_density: Option<String>,
    /// Support enable flag override
    pub enable_support: Option<String>,
    /// Brim type override
    pub brim_type: Option<String>,
    /// Outer wall speed override
    pub outer_wall_speed: Option<String>,
    /// Inner wall speed override
    pub inner_wall_speed: Option<String>,
    /// Every non-system setting the object overrides
    pub own_settings: SettingsMap,
    /// Parts in document order
    pub parts: Vec<Part>,
}

impl Object {
    /// Create an object with no overrides
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: None,
            extruder: DEFAULT_EXTRUDER.to_string(),
            layer_height: None,
            wall_loops: None,
            sparse_infill_density: None,
            enable_support: None,
            brim_type: None,
            outer_wall_speed: None,
            inner_wall_speed: None,
            own_settings: SettingsMap::new(),
            parts: Vec::new(),
        }
    }

    /// Name shown for the object, `Object {id}` when it has none
    pub fn display_name(&self) -> String {
        match &self.name {
            Some(name) => name.clone(),
            None => format!("Object {}", self.id),
        }
    }
}

/// A sub-region of an object
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Part {
    /// Part name
    pub name: Option<String>,
    /// Extruder override; inherits the object's when absent
    pub extruder: Option<String>,
    /// Every non-system setting the part overrides
    pub own_settings: SettingsMap,
}

impl Part {
    /// Create an empty part
    pub fn new() -> Self {
        Self::default()
    }

    /// Part name, or [`DEFAULT_PART_NAME`] when unnamed
    pub fn name_or_default(&self) -> &str {
        self.name.as_deref().unwrap_or(DEFAULT_PART_NAME)
    }
}

/// One object placed on a plate
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlateInstance {
    /// Referenced object id
    pub object_id: String,
    /// Slicer display order on the plate
    pub identify_id: i64,
}

/// A build plate and the objects on it, in display order
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Plate {
    /// Plate identifier (`plater_id`)
    pub id: String,
    /// Plate name (`plater_name`)
    pub name: Option<String>,
    /// Instances sorted by `identify_id`
    pub instances: Vec<PlateInstance>,
}

impl Plate {
    /// Object ids in display order
    pub fn object_ids(&self) -> impl Iterator<Item = &str> {
        self.instances.iter().map(|i| i.object_id.as_str())
    }
}

/// Object/part/plate hierarchy from `model_settings.config`
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ModelSettings {
    /// Objects keyed by id
    pub objects: HashMap<String, Object>,
    /// Plates in document order
    pub plates: Vec<Plate>,
}

impl ModelSettings {
    /// Create an empty hierarchy
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up an object by id
    pub fn object(&self, id: &str) -> Option<&Object> {
        self.objects.get(id)
    }
}
