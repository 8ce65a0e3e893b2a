//! Streaming parser for `model_settings.config`
//!
//! The document is a `<config>` root holding `<object>` elements (with
//! `<part>` children) and `<plate>` elements (with `<model_instance>`
//! children). Every setting is a `<metadata key=".." value=".."/>` element
//! that belongs to its direct parent only.

use super::parse_attributes;
use crate::error::{Error, Result};
use crate::model::{ModelSettings, Object, Part, Plate, PlateInstance};
use crate::opc::MODEL_SETTINGS_PATH;
use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};
use serde_json::Value;
use std::collections::HashSet;
use std::sync::LazyLock;
use tracing::{debug, warn};

/// Expected name of the document root
const ROOT_ELEMENT: &str = "config";

/// Metadata keys that describe identity or geometry rather than print settings
static SYSTEM_KEYS: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    [
        "name",
        "matrix",
        "extruder",
        "face_count",
        "source_object_id",
        "source_volume_id",
        "source_offset_x",
        "source_offset_y",
        "source_offset_z",
    ]
    .into_iter()
    .collect()
});

/// Both keys slicers use for the sparse infill density of an object
pub const INFILL_DENSITY_KEYS: [&str; 2] = ["sparse_infill_density", "skeleton_infill_density"];

/// True for metadata keys that never count as user overrides
pub fn is_system_key(key: &str) -> bool {
    SYSTEM_KEYS.contains(key)
}

/// Plate under construction
#[derive(Default)]
struct PlateBuilder {
    id: Option<String>,
    name: Option<String>,
    instances: Vec<PlateInstance>,
}

impl PlateBuilder {
    fn finish(mut self) -> Option<Plate> {
        let id = self.id.filter(|id| !id.is_empty())?;
        // stable: equal identify_id keeps document order
        self.instances.sort_by_key(|i| i.identify_id);
        Some(Plate {
            id,
            name: self.name,
            instances: self.instances,
        })
    }
}

#[derive(Default)]
struct InstanceBuilder {
    object_id: Option<String>,
    identify_id: i64,
}

enum Frame {
    Object(Object),
    Part(Part),
    Plate(PlateBuilder),
    Instance(InstanceBuilder),
    Other,
}

struct Open {
    name: String,
    frame: Frame,
}

/// Parse the model settings document into the object/plate hierarchy
///
/// Objects without an `id` cannot be referenced and are skipped. Plates
/// without a `plater_id` are dropped. Instances are ordered by
/// `identify_id`, with unparsable values treated as `0`.
pub fn parse_model_settings(xml: &str) -> Result<ModelSettings> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut buf = Vec::new();
    let mut stack: Vec<Open> = Vec::new();
    let mut model = ModelSettings::new();
    let mut root_seen = false;

    loop {
        let event = reader
            .read_event_into(&mut buf)
            .map_err(|e| invalid(format!("{} at position {}", e, reader.buffer_position())))?;

        match event {
            Event::Start(ref e) | Event::Empty(ref e) => {
                let is_empty = matches!(event, Event::Empty(_));
                let name = element_name(e)?;

                if stack.is_empty() {
                    if root_seen {
                        return Err(invalid(format!(
                            "unexpected element <{}> after the root element",
                            name
                        )));
                    }
                    root_seen = true;
                    if name != ROOT_ELEMENT {
                        warn!(
                            "Unexpected root element <{}> in {}, expected <{}>",
                            name, MODEL_SETTINGS_PATH, ROOT_ELEMENT
                        );
                    }
                }

                let frame = open_frame(&name, e, stack.last_mut())?;
                stack.push(Open { name, frame });
                if is_empty {
                    close_frame(&mut stack, &mut model);
                }
            }
            Event::End(_) => {
                close_frame(&mut stack, &mut model);
            }
            Event::DocType(_) => {
                return Err(invalid(
                    "DTD declarations are not allowed in model settings".to_string(),
                ));
            }
            Event::Eof => {
                if let Some(open) = stack.last() {
                    return Err(invalid(format!(
                        "unexpected end of document, <{}> is not closed",
                        open.name
                    )));
                }
                if !root_seen {
                    return Err(invalid("document has no root element".to_string()));
                }
                break;
            }
            _ => {}
        }

        buf.clear();
    }

    debug!(
        objects = model.objects.len(),
        plates = model.plates.len(),
        "parsed model settings"
    );
    Ok(model)
}

fn invalid(message: String) -> Error {
    Error::model_settings(MODEL_SETTINGS_PATH, message)
}

fn element_name(e: &BytesStart) -> Result<String> {
    std::str::from_utf8(e.name().as_ref())
        .map(str::to_string)
        .map_err(|err| invalid(err.to_string()))
}

/// Build the frame for a new element, applying `<metadata>` to its parent
fn open_frame(name: &str, e: &BytesStart, parent: Option<&mut Open>) -> Result<Frame> {
    let parent = parent.map(|open| &mut open.frame);

    let frame = match (name, parent) {
        ("object", _) => {
            let attrs = parse_attributes(e).map_err(invalid)?;
            let id = attrs.get("id").cloned().unwrap_or_default();
            Frame::Object(Object::new(id))
        }
        ("part", Some(Frame::Object(_))) => Frame::Part(Part::new()),
        ("plate", _) => Frame::Plate(PlateBuilder::default()),
        ("model_instance", Some(Frame::Plate(_))) => Frame::Instance(InstanceBuilder::default()),
        ("metadata", Some(parent)) => {
            let mut attrs = parse_attributes(e).map_err(invalid)?;
            if let Some(key) = attrs.remove("key") {
                apply_metadata(parent, &key, attrs.remove("value"));
            }
            Frame::Other
        }
        _ => Frame::Other,
    };

    Ok(frame)
}

fn apply_metadata(frame: &mut Frame, key: &str, value: Option<String>) {
    match frame {
        Frame::Object(object) => apply_object_metadata(object, key, value),
        Frame::Part(part) => apply_part_metadata(part, key, value),
        Frame::Plate(plate) => match key {
            "plater_id" => plate.id = value,
            "plater_name" => plate.name = value,
            _ => {}
        },
        Frame::Instance(instance) => match key {
            "object_id" => instance.object_id = value,
            "identify_id" => {
                instance.identify_id = value
                    .as_deref()
                    .and_then(|v| v.trim().parse().ok())
                    .unwrap_or(0);
            }
            _ => {}
        },
        Frame::Other => {}
    }
}

fn apply_object_metadata(object: &mut Object, key: &str, value: Option<String>) {
    let slot = match key {
        "name" => {
            object.name = value;
            return;
        }
        "extruder" => {
            if let Some(extruder) = value {
                object.extruder = extruder;
            }
            return;
        }
        "layer_height" => &mut object.layer_height,
        "wall_loops" => &mut object.wall_loops,
        "enable_support" => &mut object.enable_support,
        "brim_type" => &mut object.brim_type,
        "outer_wall_speed" => &mut object.outer_wall_speed,
        "inner_wall_speed" => &mut object.inner_wall_speed,
        k if INFILL_DENSITY_KEYS.contains(&k) => {
            if object.sparse_infill_density.is_none() {
                object.sparse_infill_density = value.clone();
            }
            mirror_own(&mut object.own_settings, key, value);
            return;
        }
        _ => {
            insert_own(&mut object.own_settings, key, value);
            return;
        }
    };

    *slot = value.clone();
    mirror_own(&mut object.own_settings, key, value);
}

fn apply_part_metadata(part: &mut Part, key: &str, value: Option<String>) {
    match key {
        "name" => part.name = value,
        "extruder" => part.extruder = value,
        _ => insert_own(&mut part.own_settings, key, value),
    }
}

/// Record a dedicated object key in own-settings, `null` when it has no value
fn mirror_own(own: &mut crate::model::SettingsMap, key: &str, value: Option<String>) {
    own.insert(key.to_string(), value.map_or(Value::Null, Value::String));
}

fn insert_own(own: &mut crate::model::SettingsMap, key: &str, value: Option<String>) {
    if is_system_key(key) {
        return;
    }
    if let Some(value) = value {
        own.insert(key.to_string(), Value::String(value));
    }
}

/// Pop the innermost element and attach what it built to its parent
fn close_frame(stack: &mut Vec<Open>, model: &mut ModelSettings) {
    let Some(open) = stack.pop() else {
        return;
    };

    match open.frame {
        Frame::Object(object) => {
            if object.id.is_empty() {
                debug!("skipping object without id");
            } else {
                model.objects.insert(object.id.clone(), object);
            }
        }
        Frame::Part(part) => {
            if let Some(Open {
                frame: Frame::Object(object),
                ..
            }) = stack.last_mut()
            {
                object.parts.push(part);
            }
        }
        Frame::Plate(builder) => match builder.finish() {
            Some(plate) => model.plates.push(plate),
            None => debug!("dropping plate without plater_id"),
        },
        Frame::Instance(instance) => {
            let object_id = instance.object_id.filter(|id| !id.is_empty());
            if let (
                Some(Open {
                    frame: Frame::Plate(plate),
                    ..
                }),
                Some(object_id),
            ) = (stack.last_mut(), object_id)
            {
                plate.instances.push(PlateInstance {
                    object_id,
                    identify_id: instance.identify_id,
                });
            }
        }
        Frame::Other => {}
    }
}
