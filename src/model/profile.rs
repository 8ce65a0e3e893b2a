//! Resolved global print profile

use serde::Serialize;
use serde_json::Value;

/// Global defaults resolved from the project settings
///
/// Each field holds the scalar the slicer stored (index 0 for list-valued
/// settings), or the field's default when the key is absent. `printer`,
/// `process` and `filaments` keep the raw stored value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Profile {
    /// Printer preset (`printer_settings_id`)
    pub printer: Value,
    /// Process preset (`print_settings_id`)
    pub process: Value,
    /// Filament presets, one per loaded filament (`filament_settings_id`)
    pub filaments: Value,
    // Basic
    /// Layer height in mm
    pub layer_height: Value,
    /// First layer height in mm
    pub initial_layer_print_height: Value,
    /// Nozzle diameter in mm (`nozzle_diameter`)
    pub nozzle: Value,
    /// Default line width
    pub line_width: Value,
    /// Wall loop count
    pub wall_loops: Value,
    /// Sparse infill density, with `%`
    pub sparse_infill_density: Value,
    /// Brim type, e.g. `no_brim` or `auto_brim`
    pub brim_type: Value,
    /// Support enabled flag (`"1"` when on)
    pub enable_support: Value,
    // Flow
    /// Flow ratio of the process
    pub print_flow_ratio: Value,
    /// Flow ratio of the first filament
    pub filament_flow_ratio: Value,
    // Speeds
    /// First layer speed
    pub initial_layer_speed: Value,
    /// Outer wall speed
    pub outer_wall_speed: Value,
    /// Inner wall speed
    pub inner_wall_speed: Value,
    /// Sparse infill speed
    pub sparse_infill_speed: Value,
    /// Top surface speed
    pub top_surface_speed: Value,
    /// Travel speed
    pub travel_speed: Value,
    /// Bridge speed
    pub bridge_speed: Value,
    // Shells
    /// Top shell layer count
    pub top_shell_layers: Value,
    /// Bottom shell layer count
    pub bottom_shell_layers: Value,
    /// Seam placement
    pub seam_position: Value,
    // Patterns
    /// Sparse infill pattern
    pub sparse_infill_pattern: Value,
    /// Top surface pattern
    pub top_surface_pattern: Value,
    // Special modes
    /// Ironing mode
    pub ironing_type: Value,
    /// Fuzzy skin mode
    pub fuzzy_skin: Value,
    /// Spiral vase flag
    pub spiral_mode: Value,
    // Retraction and Z
    /// Retraction length in mm
    pub retraction_length: Value,
    /// Retraction speed
    pub retraction_speed: Value,
    /// Z hop height in mm
    pub z_hop: Value,
    // Fan and cooling
    /// Minimum part cooling fan speed
    pub fan_min_speed: Value,
    /// Maximum part cooling fan speed
    pub fan_max_speed: Value,
    /// Slow down for layer cooling flag
    pub slow_down_for_layer_cooling: Value,
    /// Layer time below which printing slows down
    pub slow_down_layer_time: Value,
    // Advanced
    /// Pressure advance of the first filament
    pub pressure_advance: Value,
    /// Arc fitting flag
    pub enable_arc_fitting: Value,
    /// Overhang slowdown flag
    pub enable_overhang_speed: Value,
    /// Print sequence, `by layer` or `by object`
    pub print_sequence: Value,
    /// Timelapse mode
    pub timelapse_type: Value,
    /// Support type
    pub support_type: Value,
    // Temperatures
    /// Nozzle temperature of the first filament
    pub nozzle_temperature: Value,
    /// Hot plate temperature (`hot_plate_temp`)
    pub bed_temperature: Value,
}

impl Profile {
    /// Filament profile names, one per loaded filament
    ///
    /// A scalar `filament_settings_id` counts as a single filament.
    pub fn filament_names(&self) -> Vec<String> {
        match &self.filaments {
            Value::Array(items) => items.iter().map(crate::rows::display_string).collect(),
            Value::Null => Vec::new(),
            other => vec![crate::rows::display_string(other)],
        }
    }
}
