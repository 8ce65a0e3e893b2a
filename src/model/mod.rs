//! Data structures for analyzed 3MF projects

mod hierarchy;
mod profile;
mod row;

pub use hierarchy::{
    DEFAULT_EXTRUDER, DEFAULT_PART_NAME, ModelSettings, Object, Part, Plate, PlateInstance,
    SettingsMap,
};
pub use profile::Profile;
pub use row::{Field, Row, RowKind};
