//! Project settings resolution
//!
//! `project_settings.config` is a flat JSON object. Most values are strings;
//! per-extruder and per-filament settings are lists whose first element is the
//! value shown for the whole job.

use crate::error::{Error, Result};
use crate::model::{Profile, SettingsMap};
use crate::opc::PROJECT_SETTINGS_PATH;
use serde_json::Value;
use tracing::{debug, warn};

/// Key listing the settings the user changed relative to the system preset
pub const DIFF_SETTINGS_KEY: &str = "different_settings_to_system";

/// Which element to take from a list-valued setting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListIndex {
    /// The element at this index
    At(usize),
    /// The whole list, unmodified
    Whole,
}

/// The raw project settings dictionary with typed lookups
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Settings {
    raw: SettingsMap,
}

impl Settings {
    /// Wrap an already-parsed settings dictionary
    pub fn new(raw: SettingsMap) -> Self {
        Self { raw }
    }

    /// Parse the project settings document
    ///
    /// A document containing only whitespace yields empty settings. Anything
    /// else must be a JSON object.
    pub fn from_json(text: &str) -> Result<Self> {
        if text.trim().is_empty() {
            warn!("Project settings file is empty: {}", PROJECT_SETTINGS_PATH);
            return Ok(Self::default());
        }

        let value: Value = serde_json::from_str(text)
            .map_err(|e| Error::settings(PROJECT_SETTINGS_PATH, e.to_string()))?;

        match value {
            Value::Object(raw) => {
                debug!(keys = raw.len(), "parsed project settings");
                Ok(Self { raw })
            }
            other => Err(Error::settings(
                PROJECT_SETTINGS_PATH,
                format!("expected a JSON object, found {}", json_kind(&other)),
            )),
        }
    }

    /// The complete raw dictionary
    pub fn raw(&self) -> &SettingsMap {
        &self.raw
    }

    /// Consume the settings, returning the raw dictionary
    pub fn into_raw(self) -> SettingsMap {
        self.raw
    }

    /// Raw stored value for `key`
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.raw.get(key)
    }

    /// Resolve `key`, taking the first element of list values
    ///
    /// Returns `default` when the key is missing or its list is empty.
    pub fn value(&self, key: &str, default: impl Into<Value>) -> Value {
        self.value_at(key, default, ListIndex::At(0))
    }

    /// Resolve `key`, choosing which list element to return
    ///
    /// Scalars are returned as stored whatever `index` is.
    pub fn value_at(&self, key: &str, default: impl Into<Value>, index: ListIndex) -> Value {
        match self.raw.get(key) {
            None => default.into(),
            Some(Value::Array(items)) => match index {
                ListIndex::Whole => Value::Array(items.clone()),
                ListIndex::At(i) => items.get(i).cloned().unwrap_or_else(|| default.into()),
            },
            Some(value) => value.clone(),
        }
    }

    /// Settings the user changed relative to the system preset
    ///
    /// Keys come from the `;`-separated list in [`DIFF_SETTINGS_KEY`], in
    /// that order. Keys absent from the dictionary are skipped and
    /// single-element lists are unwrapped.
    pub fn custom_global_settings(&self) -> SettingsMap {
        let mut custom = SettingsMap::new();

        let list = match self.raw.get(DIFF_SETTINGS_KEY) {
            Some(Value::Array(items)) => items.first().and_then(Value::as_str),
            Some(Value::String(s)) => Some(s.as_str()),
            _ => None,
        };
        let Some(list) = list else {
            return custom;
        };

        for key in list.split(';').map(str::trim).filter(|k| !k.is_empty()) {
            if custom.contains_key(key) {
                continue;
            }
            if let Some(value) = self.raw.get(key) {
                let value = match value {
                    Value::Array(items) if items.len() == 1 => items[0].clone(),
                    other => other.clone(),
                };
                custom.insert(key.to_string(), value);
            }
        }

        custom
    }

    /// Resolve the global profile
    ///
    /// Every field is looked up independently, so missing keys only leave
    /// that field at its default.
    pub fn profile(&self) -> Profile {
        let raw_or = |key: &str, default: Value| self.raw.get(key).cloned().unwrap_or(default);

        Profile {
            printer: raw_or("printer_settings_id", Value::from("Unknown")),
            process: raw_or("print_settings_id", Value::from("Unknown")),
            filaments: raw_or("filament_settings_id", Value::from(vec!["Unknown"])),
            layer_height: self.value("layer_height", "0.2"),
            initial_layer_print_height: self.value("initial_layer_print_height", ""),
            nozzle: self.value("nozzle_diameter", "0.4"),
            line_width: self.value("line_width", ""),
            wall_loops: self.value("wall_loops", "2"),
            sparse_infill_density: self.value("sparse_infill_density", "15%"),
            brim_type: self.value("brim_type", "no_brim"),
            enable_support: self.value("enable_support", "0"),
            print_flow_ratio: self.value("print_flow_ratio", "1"),
            filament_flow_ratio: self.value("filament_flow_ratio", ""),
            initial_layer_speed: self.value("initial_layer_speed", ""),
            outer_wall_speed: self.value("outer_wall_speed", ""),
            inner_wall_speed: self.value("inner_wall_speed", ""),
            sparse_infill_speed: self.value("sparse_infill_speed", ""),
            top_surface_speed: self.value("top_surface_speed", ""),
            travel_speed: self.value("travel_speed", ""),
            bridge_speed: self.value("bridge_speed", ""),
            top_shell_layers: self.value("top_shell_layers", ""),
            bottom_shell_layers: self.value("bottom_shell_layers", ""),
            seam_position: self.value("seam_position", ""),
            sparse_infill_pattern: self.value("sparse_infill_pattern", ""),
            top_surface_pattern: self.value("top_surface_pattern", ""),
            ironing_type: self.value("ironing_type", "no ironing"),
            fuzzy_skin: self.value("fuzzy_skin", "none"),
            spiral_mode: self.value("spiral_mode", "0"),
            retraction_length: self.value("retraction_length", ""),
            retraction_speed: self.value("retraction_speed", ""),
            z_hop: self.value("z_hop", ""),
            fan_min_speed: self.value("fan_min_speed", ""),
            fan_max_speed: self.value("fan_max_speed", ""),
            slow_down_for_layer_cooling: self.value("slow_down_for_layer_cooling", "0"),
            slow_down_layer_time: self.value("slow_down_layer_time", ""),
            pressure_advance: self.value("pressure_advance", ""),
            enable_arc_fitting: self.value("enable_arc_fitting", "0"),
            enable_overhang_speed: self.value("enable_overhang_speed", "0"),
            print_sequence: self.value("print_sequence", "by layer"),
            timelapse_type: self.value("timelapse_type", "0"),
            support_type: self.value("support_type", ""),
            nozzle_temperature: self.value("nozzle_temperature", ""),
            bed_temperature: self.value("hot_plate_temp", ""),
        }
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
