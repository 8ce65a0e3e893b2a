//! Shared fixtures for the integration tests
//!
//! Project archives are built in memory with `ZipWriter` and written to a
//! temporary directory owned by the caller.

#![allow(dead_code)]

use serde_json::{Value, json};
use std::fs;
use std::io::{Cursor, Write};
use std::path::{Path, PathBuf};
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

pub const PROJECT_SETTINGS: &str = "Metadata/project_settings.config";
pub const MODEL_SETTINGS: &str = "Metadata/model_settings.config";

/// Project settings resembling a Bambu Studio A1 mini project
pub fn sample_project_settings() -> Value {
    json!({
        "printer_settings_id": "Bambu Lab A1 mini 0.4 nozzle",
        "print_settings_id": "0.20mm Standard @BBL A1M",
        "filament_settings_id": ["Bambu PLA Basic @BBL A1M"],
        "layer_height": "0.2",
        "initial_layer_print_height": "0.2",
        "line_width": "0.42",
        "wall_loops": "3",
        "sparse_infill_density": "15%",
        "brim_type": "no_brim",
        "enable_support": "0",
        "outer_wall_speed": "200",
        "inner_wall_speed": "300",
        "sparse_infill_speed": "270",
        "top_surface_speed": "200",
        "travel_speed": "700",
        "bridge_speed": "50",
        "top_shell_layers": "5",
        "bottom_shell_layers": "3",
        "seam_position": "back",
        "sparse_infill_pattern": "gyroid",
        "top_surface_pattern": "monotonicline",
        "print_sequence": "by layer",
        "retraction_length": "0.8",
        "retraction_speed": "30",
        "z_hop": "0.4",
        "fan_min_speed": "60",
        "fan_max_speed": "80",
        "nozzle_temperature": "220",
        "hot_plate_temp": "60",
        "different_settings_to_system": ["wall_loops;seam_position"],
    })
}

pub const SAMPLE_MODEL_SETTINGS: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<config>
    <plate>
        <metadata key="plater_id" value="1"/>
        <metadata key="plater_name" value="Plate 1"/>
        <model_instance>
            <metadata key="object_id" value="1"/>
            <metadata key="identify_id" value="0"/>
        </model_instance>
    </plate>
    <object id="1">
        <metadata key="name" value="TestObject"/>
        <metadata key="extruder" value="1"/>
        <metadata key="wall_loops" value="4"/>
        <part id="0" subtype="normal_part">
            <metadata key="name" value="TestPart"/>
            <metadata key="extruder" value="1"/>
        </part>
    </object>
</config>
"#;

pub const MULTI_PLATE_MODEL_SETTINGS: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<config>
    <plate>
        <metadata key="plater_id" value="1"/>
        <metadata key="plater_name" value="Plate 1"/>
        <model_instance>
            <metadata key="object_id" value="1"/>
            <metadata key="identify_id" value="0"/>
        </model_instance>
    </plate>
    <plate>
        <metadata key="plater_id" value="2"/>
        <metadata key="plater_name" value="Plate 2"/>
        <model_instance>
            <metadata key="object_id" value="3"/>
            <metadata key="identify_id" value="1"/>
        </model_instance>
        <model_instance>
            <metadata key="object_id" value="2"/>
            <metadata key="identify_id" value="0"/>
        </model_instance>
    </plate>
    <object id="1">
        <metadata key="name" value="Object_Plate1"/>
        <metadata key="extruder" value="1"/>
    </object>
    <object id="2">
        <metadata key="name" value="Object_Plate2_First"/>
        <metadata key="extruder" value="1"/>
    </object>
    <object id="3">
        <metadata key="name" value="Object_Plate2_Second"/>
        <metadata key="extruder" value="1"/>
    </object>
</config>
"#;

pub const MULTI_PART_MODEL_SETTINGS: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<config>
    <plate>
        <metadata key="plater_id" value="1"/>
        <model_instance>
            <metadata key="object_id" value="1"/>
            <metadata key="identify_id" value="0"/>
        </model_instance>
    </plate>
    <object id="1">
        <metadata key="name" value="MultiPartObject"/>
        <metadata key="extruder" value="1"/>
        <metadata key="wall_loops" value="3"/>
        <part id="0" subtype="normal_part">
            <metadata key="name" value="PartA"/>
            <metadata key="extruder" value="1"/>
            <metadata key="sparse_infill_density" value="30%"/>
        </part>
        <part id="1" subtype="normal_part">
            <metadata key="name" value="PartB"/>
            <metadata key="extruder" value="2"/>
            <metadata key="sparse_infill_density" value="50%"/>
        </part>
        <part id="2" subtype="normal_part">
            <metadata key="name" value="PartC"/>
            <metadata key="extruder" value="1"/>
        </part>
    </object>
</config>
"#;

pub const UNICODE_MODEL_SETTINGS: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<config>
    <plate>
        <metadata key="plater_id" value="1"/>
        <metadata key="plater_name" value="Пластина 1"/>
        <model_instance>
            <metadata key="object_id" value="1"/>
            <metadata key="identify_id" value="0"/>
        </model_instance>
    </plate>
    <object id="1">
        <metadata key="name" value="Тестовый_Объект_测试"/>
        <metadata key="extruder" value="1"/>
        <part id="0" subtype="normal_part">
            <metadata key="name" value="Часть_日本語"/>
            <metadata key="extruder" value="1"/>
        </part>
    </object>
</config>
"#;

/// Build a ZIP archive in memory from `(name, content)` members
pub fn build_zip(members: &[(&str, &[u8])]) -> Vec<u8> {
    let mut buffer = Vec::new();
    let mut zip = ZipWriter::new(Cursor::new(&mut buffer));
    let options = SimpleFileOptions::default();

    for (name, content) in members {
        zip.start_file(*name, options).unwrap();
        zip.write_all(content).unwrap();
    }

    zip.finish().unwrap();
    buffer
}

/// Write an archive to `dir/name` and return its path
pub fn write_3mf(dir: &Path, name: &str, members: &[(&str, &[u8])]) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, build_zip(members)).unwrap();
    path
}

/// A project with both settings documents and a model part
pub fn project_3mf(dir: &Path, name: &str, settings: &Value, model_settings: &str) -> PathBuf {
    let settings = serde_json::to_string(settings).unwrap();
    write_3mf(
        dir,
        name,
        &[
            (PROJECT_SETTINGS, settings.as_bytes()),
            (MODEL_SETTINGS, model_settings.as_bytes()),
            ("3D/3dmodel.model", "<model></model>".as_bytes()),
        ],
    )
}

pub fn sample_3mf(dir: &Path) -> PathBuf {
    project_3mf(
        dir,
        "test.3mf",
        &sample_project_settings(),
        SAMPLE_MODEL_SETTINGS,
    )
}

pub fn multi_plate_3mf(dir: &Path) -> PathBuf {
    project_3mf(
        dir,
        "multi_plate.3mf",
        &sample_project_settings(),
        MULTI_PLATE_MODEL_SETTINGS,
    )
}

pub fn multi_part_3mf(dir: &Path) -> PathBuf {
    project_3mf(
        dir,
        "multi_part.3mf",
        &sample_project_settings(),
        MULTI_PART_MODEL_SETTINGS,
    )
}

pub fn unicode_names_3mf(dir: &Path) -> PathBuf {
    project_3mf(
        dir,
        "unicode_names.3mf",
        &sample_project_settings(),
        UNICODE_MODEL_SETTINGS,
    )
}

/// An archive without any slicer documents
pub fn empty_3mf(dir: &Path) -> PathBuf {
    write_3mf(dir, "empty.3mf", &[("3D/3dmodel.model", "<model></model>".as_bytes())])
}

pub fn invalid_json_3mf(dir: &Path) -> PathBuf {
    write_3mf(
        dir,
        "invalid_json.3mf",
        &[
            (PROJECT_SETTINGS, "{invalid json content".as_bytes()),
            (MODEL_SETTINGS, SAMPLE_MODEL_SETTINGS.as_bytes()),
        ],
    )
}

pub fn invalid_xml_3mf(dir: &Path) -> PathBuf {
    let settings = sample_project_settings().to_string();
    write_3mf(
        dir,
        "invalid_xml.3mf",
        &[
            (PROJECT_SETTINGS, settings.as_bytes()),
            (MODEL_SETTINGS, "<config><unclosed>".as_bytes()),
        ],
    )
}

pub fn malicious_absolute_3mf(dir: &Path) -> PathBuf {
    write_3mf(
        dir,
        "malicious_absolute.3mf",
        &[("/etc/passwd", "malicious content".as_bytes())],
    )
}

pub fn malicious_traversal_3mf(dir: &Path) -> PathBuf {
    write_3mf(
        dir,
        "malicious_traversal.3mf",
        &[("../../../etc/passwd", "malicious content".as_bytes())],
    )
}

/// True when `dir` has no entries
pub fn is_empty_dir(dir: &Path) -> bool {
    fs::read_dir(dir).unwrap().next().is_none()
}
