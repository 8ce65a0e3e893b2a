//! Row builder
//!
//! Folds the profile and the object/plate hierarchy into display rows. Each
//! placed object yields one object row followed by one row per part, unless
//! its only part merely repeats the object.
//!
//! Values are resolved part → object → profile. An object value is custom
//! when it differs from the profile; a part value is custom when the part
//! overrides the key at all.

mod fallback;
mod format;

pub use fallback::{display_string, is_present};
pub use format::{BOOL_TRUE, format_brim, format_infill, format_support};

use crate::model::{
    DEFAULT_PART_NAME, Field, ModelSettings, Object, Part, Profile, Row, RowKind, SettingsMap,
};
use crate::parser::INFILL_DENSITY_KEYS;
use fallback::{either, is_custom};
use tracing::debug;

/// Prefix that indents part names below their object
pub const PART_INDENT: &str = "  ";

/// Object values after falling back to the profile, before display formatting
struct Resolved {
    walls: String,
    infill: String,
    support: String,
    speed: String,
    extruder: String,
}

/// Build the display rows for every plate, in plate and instance order
///
/// Dangling object references produce a placeholder `Object {id}` row.
pub fn build_rows(profile: &Profile, model: &ModelSettings) -> Vec<Row> {
    let mut rows = Vec::new();

    for plate in &model.plates {
        for object_id in plate.object_ids() {
            let placeholder;
            let object = match model.object(object_id) {
                Some(object) => object,
                None => {
                    debug!(plate = %plate.id, object = object_id, "plate references unknown object");
                    placeholder = Object::new(object_id);
                    &placeholder
                }
            };
            push_object_rows(&mut rows, &plate.id, object, profile);
        }
    }

    rows
}

fn push_object_rows(rows: &mut Vec<Row>, plate: &str, object: &Object, profile: &Profile) {
    let name = object.display_name();

    let layer_height = either(
        object.layer_height.as_deref(),
        &display_string(&profile.layer_height),
    );
    let brim = either(
        object.brim_type.as_deref(),
        &display_string(&profile.brim_type),
    );
    let resolved = Resolved {
        walls: either(
            object.wall_loops.as_deref(),
            &display_string(&profile.wall_loops),
        ),
        infill: either(
            object.sparse_infill_density.as_deref(),
            &display_string(&profile.sparse_infill_density),
        ),
        support: either(
            object.enable_support.as_deref(),
            &display_string(&profile.enable_support),
        ),
        speed: either(
            object.outer_wall_speed.as_deref(),
            &display_string(&profile.outer_wall_speed),
        ),
        extruder: object.extruder.clone(),
    };

    rows.push(Row {
        plate: plate.to_string(),
        kind: RowKind::Object,
        name: name.clone(),
        filament: resolved.extruder.clone(),
        layer_height: Field::new(
            layer_height,
            is_custom(object.layer_height.as_deref(), &profile.layer_height),
        ),
        wall_loops: Field::new(
            resolved.walls.clone(),
            is_custom(object.wall_loops.as_deref(), &profile.wall_loops),
        ),
        infill: Field::new(
            format_infill(&resolved.infill),
            is_custom(
                object.sparse_infill_density.as_deref(),
                &profile.sparse_infill_density,
            ),
        ),
        support: Field::new(
            format_support(&resolved.support),
            is_custom(object.enable_support.as_deref(), &profile.enable_support),
        ),
        brim: Field::new(
            format_brim(&brim),
            is_custom(object.brim_type.as_deref(), &profile.brim_type),
        ),
        outer_wall_speed: Field::new(
            resolved.speed.clone(),
            is_custom(object.outer_wall_speed.as_deref(), &profile.outer_wall_speed),
        ),
        custom_settings: object.own_settings.clone(),
    });

    if is_redundant_single_part(object, &name) {
        return;
    }

    rows.extend(object.parts.iter().map(|part| part_row(part, &resolved)));
}

/// True when the object's only part would repeat the object row
///
/// An unnamed part is compared as [`DEFAULT_PART_NAME`], so an object
/// literally named `Part` hides its single unnamed part.
fn is_redundant_single_part(object: &Object, object_name: &str) -> bool {
    match object.parts.as_slice() {
        [only] => only.name_or_default() == object_name,
        _ => false,
    }
}

fn part_row(part: &Part, object: &Resolved) -> Row {
    let own = &part.own_settings;

    let walls = either(own_text(own, "wall_loops").as_deref(), &object.walls);
    let speed = either(own_text(own, "outer_wall_speed").as_deref(), &object.speed);
    let [sparse_key, skeleton_key] = INFILL_DENSITY_KEYS;
    let infill = either(
        own_text(own, sparse_key).as_deref(),
        &either(own_text(own, skeleton_key).as_deref(), &object.infill),
    );

    Row {
        plate: String::new(),
        kind: RowKind::Part,
        name: format!("{}{}", PART_INDENT, part.name_or_default()),
        filament: either(part.extruder.as_deref(), &object.extruder),
        layer_height: Field::blank(),
        wall_loops: Field::new(walls, own.contains_key("wall_loops")),
        infill: Field::new(
            format_infill(&infill),
            INFILL_DENSITY_KEYS.iter().any(|k| own.contains_key(*k)),
        ),
        support: Field::new(format_support(&object.support), false),
        brim: Field::blank(),
        outer_wall_speed: Field::new(speed, own.contains_key("outer_wall_speed")),
        custom_settings: own.clone(),
    }
}

fn own_text(own: &SettingsMap, key: &str) -> Option<String> {
    own.get(key).map(display_string)
}
