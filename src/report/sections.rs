//! The individual sections of the text report

use super::ReportOptions;
use super::table::{Align, KeyValues, Line, Painter, Separator, Span, Table, border_style};
use crate::analyzer::Analysis;
use crate::model::{Field, Profile, Row, SettingsMap};
use crate::rows::{BOOL_TRUE, display_string, is_present};
use owo_colors::Style;
use serde_json::Value;
use std::io::{self, Write};

/// Filament color for filament number `n`, cycling through six colors
fn filament_style(n: usize) -> Style {
    let style = Style::new();
    match n.saturating_sub(1) % 6 {
        0 => style.cyan(),
        1 => style.magenta(),
        2 => style.green(),
        3 => style.yellow(),
        4 => style.blue(),
        _ => style.red(),
    }
}

/// Plate label colors, distinct from the filament colors
const PLATE_COLORS: [(u8, u8, u8); 10] = [
    (255, 255, 255), // bright white
    (255, 135, 0),   // dark orange
    (255, 255, 175), // wheat
    (215, 95, 215),  // orchid
    (0, 215, 255),   // turquoise
    (255, 135, 95),  // salmon
    (95, 175, 0),    // chartreuse
    (0, 175, 255),   // deep sky blue
    (175, 135, 255), // medium purple
    (255, 215, 0),   // gold
];

fn title(text: &str) -> Line {
    Line::styled(text, Style::new().bold().bright_yellow())
}

fn dim() -> Style {
    Style::new().dimmed()
}

fn custom() -> Style {
    Style::new().bold().yellow()
}

fn text(value: &Value) -> String {
    display_string(value)
}

pub(super) fn header<W: Write>(p: &mut Painter<'_, W>, analysis: &Analysis) -> io::Result<()> {
    let line = Line::styled("3MF SETTINGS ANALYZER", Style::new().bold().cyan())
        .push(Span::plain(format!("  │  {}", analysis.file)));
    p.panel(None, &[line])
}

pub(super) fn profile<W: Write>(p: &mut Painter<'_, W>, profile: &Profile) -> io::Result<()> {
    let mut kv = KeyValues::new();
    kv.add(
        Line::styled("Printer", dim()),
        Line::styled(text(&profile.printer), Style::new().white()),
    );
    kv.add(
        Line::styled("Process", dim()),
        Line::styled(text(&profile.process), Style::new().green()),
    );
    for (i, filament) in profile.filament_names().into_iter().enumerate() {
        kv.add(
            Line::styled(format!("Filament {}", i + 1), dim()),
            Line::styled(filament, Style::new().magenta()),
        );
    }
    p.panel(Some(&title("PROFILE")), &kv.lines())
}

/// Adds a key/value row to the global settings listing
struct Globals(KeyValues);

impl Globals {
    fn row(&mut self, key: &str, value: impl Into<String>) {
        self.styled(key, value, Style::new().white());
    }

    fn styled(&mut self, key: &str, value: impl Into<String>, style: Style) {
        self.0
            .add(Line::styled(key, dim()), Line::styled(value.into(), style));
    }
}

pub(super) fn global_settings<W: Write>(
    p: &mut Painter<'_, W>,
    profile: &Profile,
) -> io::Result<()> {
    let mut gs = Globals(KeyValues::new());
    let speed = Style::new().cyan();
    let special = Style::new().bright_green();
    let temperature = Style::new().red();

    // Basic
    gs.row("Layer Height", format!("{} mm", text(&profile.layer_height)));
    if is_present(&profile.initial_layer_print_height) {
        gs.row(
            "Initial Layer Print Height",
            format!("{} mm", text(&profile.initial_layer_print_height)),
        );
    }
    if is_present(&profile.line_width) {
        gs.row("Line Width", format!("{} mm", text(&profile.line_width)));
    }
    let flow = text(&profile.print_flow_ratio);
    if is_present(&profile.print_flow_ratio) && flow != "1" {
        gs.row("Print Flow Ratio", format_ratio(&flow));
    } else if is_present(&profile.filament_flow_ratio) {
        gs.row("Filament Flow Ratio", text(&profile.filament_flow_ratio));
    }
    gs.row("Wall Loops", text(&profile.wall_loops));
    gs.row("Sparse Infill Density", text(&profile.sparse_infill_density));
    gs.row(
        "Top/Bottom Shell Layers",
        format!(
            "{}/{}",
            text(&profile.top_shell_layers),
            text(&profile.bottom_shell_layers)
        ),
    );
    gs.row("Brim Type", text(&profile.brim_type));
    gs.row("Enable Support", on_off(&profile.enable_support));
    gs.row("Seam Position", text(&profile.seam_position));

    // Speeds
    gs.0.gap();
    if is_present(&profile.initial_layer_speed) {
        gs.styled(
            "Initial Layer Speed",
            format!("{} mm/s", text(&profile.initial_layer_speed)),
            speed,
        );
    }
    gs.styled(
        "Outer Wall Speed",
        format!("{} mm/s", text(&profile.outer_wall_speed)),
        speed,
    );
    gs.styled(
        "Inner Wall Speed",
        format!("{} mm/s", text(&profile.inner_wall_speed)),
        speed,
    );
    if is_present(&profile.sparse_infill_speed) {
        gs.styled(
            "Sparse Infill Speed",
            format!("{} mm/s", text(&profile.sparse_infill_speed)),
            speed,
        );
    }
    if is_present(&profile.top_surface_speed) {
        gs.styled(
            "Top Surface Speed",
            format!("{} mm/s", text(&profile.top_surface_speed)),
            speed,
        );
    }
    gs.styled(
        "Travel Speed",
        format!("{} mm/s", text(&profile.travel_speed)),
        speed,
    );
    gs.styled(
        "Bridge Speed",
        format!("{} mm/s", text(&profile.bridge_speed)),
        speed,
    );

    // Patterns and special modes
    gs.0.gap();
    gs.row("Sparse Infill Pattern", text(&profile.sparse_infill_pattern));
    gs.row("Top Surface Pattern", text(&profile.top_surface_pattern));
    gs.row("Print Sequence", text(&profile.print_sequence));
    if text(&profile.spiral_mode) == BOOL_TRUE {
        gs.styled("Spiral Mode (Vase)", "ON", special);
    }
    let ironing = text(&profile.ironing_type);
    if ironing != "no ironing" {
        gs.styled("Ironing Type", ironing, special);
    }
    let fuzzy = text(&profile.fuzzy_skin);
    if fuzzy != "none" {
        gs.styled("Fuzzy Skin", fuzzy, special);
    }

    // Retraction, pressure advance and cooling
    gs.0.gap();
    gs.row(
        "Retraction Length",
        format!("{} mm", text(&profile.retraction_length)),
    );
    if is_present(&profile.retraction_speed) {
        gs.row(
            "Retraction Speed",
            format!("{} mm/s", text(&profile.retraction_speed)),
        );
    }
    gs.row("Z-Hop", format!("{} mm", text(&profile.z_hop)));
    if is_present(&profile.pressure_advance) {
        gs.row("Pressure Advance", text(&profile.pressure_advance));
    }
    if is_present(&profile.fan_min_speed) || is_present(&profile.fan_max_speed) {
        gs.row(
            "Fan Min/Max Speed",
            format!(
                "{}% / {}%",
                text(&profile.fan_min_speed),
                text(&profile.fan_max_speed)
            ),
        );
    }
    let cooling_key = Line::styled("Slow Down for Layer Cooling", dim());
    if text(&profile.slow_down_for_layer_cooling) == BOOL_TRUE {
        gs.0.add(
            cooling_key,
            Line::styled("On", Style::new().green()).push(Span::plain(format!(
                " ({}s)",
                text(&profile.slow_down_layer_time)
            ))),
        );
    } else {
        gs.0.add(cooling_key, Line::styled("Off", dim()));
    }

    // Temperatures
    gs.0.gap();
    gs.styled(
        "Nozzle Temperature",
        format!("{}°C", text(&profile.nozzle_temperature)),
        temperature,
    );
    if is_present(&profile.bed_temperature) {
        gs.styled(
            "Bed Temperature",
            format!("{}°C", text(&profile.bed_temperature)),
            temperature,
        );
    }

    let flags = feature_flags(profile);
    if !flags.is_empty() {
        gs.0.gap();
        gs.styled("Features", flags.join(", "), Style::new().bright_cyan());
    }

    p.panel(Some(&title("GLOBAL SETTINGS")), &gs.0.lines())
}

/// `print_flow_ratio` as a whole percentage; unparsable values pass through
fn format_ratio(ratio: &str) -> String {
    match ratio.trim().parse::<f64>() {
        Ok(r) => format!("{:.0}%", r * 100.0),
        Err(_) => ratio.to_string(),
    }
}

fn on_off(value: &Value) -> &'static str {
    if text(value) == BOOL_TRUE { "On" } else { "Off" }
}

fn feature_flags(profile: &Profile) -> Vec<String> {
    let mut flags = Vec::new();
    if text(&profile.enable_arc_fitting) == BOOL_TRUE {
        flags.push("Enable Arc Fitting".to_string());
    }
    if text(&profile.enable_overhang_speed) == BOOL_TRUE {
        flags.push("Enable Overhang Speed".to_string());
    }
    let timelapse = text(&profile.timelapse_type);
    if timelapse != "0" {
        flags.push(format!("Timelapse Type: {}", timelapse));
    }
    flags
}

pub(super) fn custom_global<W: Write>(
    p: &mut Painter<'_, W>,
    custom: &SettingsMap,
) -> io::Result<()> {
    if custom.is_empty() {
        return Ok(());
    }

    let mut kv = KeyValues::new();
    for (key, value) in custom {
        kv.add(
            Line::styled(format!("✎ {}", key), Style::new().yellow()),
            Line::styled(text(value), Style::new().white()),
        );
    }
    let heading = Line::styled("CUSTOM GLOBAL SETTINGS", Style::new().bold().bright_red())
        .push(Span::styled(" (changed from profile)", border_style()));
    p.panel(Some(&heading), &kv.lines())
}

pub(super) fn objects<W: Write>(
    p: &mut Painter<'_, W>,
    analysis: &Analysis,
    options: &ReportOptions,
) -> io::Result<()> {
    if analysis.rows.is_empty() {
        p.newline()?;
        p.text("No objects found", Style::new().red())?;
        return p.newline();
    }

    let mut table = Table::new(
        &[
            ("Plate", Align::Center),
            ("Name", Align::Left),
            ("Filament", Align::Center),
            ("Layer Height", Align::Center),
            ("Wall Loops", Align::Center),
            ("Infill Density", Align::Center),
            ("Support", Align::Center),
            ("Brim Type", Align::Center),
            ("Outer Wall Speed", Align::Center),
        ],
        Style::new().bold().blue(),
    );

    let cells = CellFormatter {
        profile: &analysis.profile,
        profile_full: &analysis.profile_full,
        show_diff: options.show_diff,
    };

    let mut current_plate: Option<&str> = None;
    for row in &analysis.rows {
        match current_plate {
            Some(current) if row.is_parent() => {
                if !row.plate.is_empty() && row.plate != current {
                    table.add_separator(Separator::Double);
                } else {
                    table.add_separator(Separator::Single);
                }
            }
            _ => {}
        }
        if !row.plate.is_empty() {
            current_plate = Some(row.plate.as_str());
        }

        table.add_row(cells.row(row));
        cells.detail_lines(&mut table, &row.custom_settings);
    }

    p.rule(&title("OBJECTS"), table.width())?;
    table.render(p)?;

    p.text("*", custom())?;
    p.line(&Line::plain(" = custom value (overrides profile default)"))?;
    p.newline()?;
    p.newline()
}

struct CellFormatter<'a> {
    profile: &'a Profile,
    profile_full: &'a SettingsMap,
    show_diff: bool,
}

impl CellFormatter<'_> {
    fn row(&self, row: &Row) -> Vec<Line> {
        let name_style = if row.is_parent() {
            Style::new().bold().white()
        } else {
            dim()
        };

        vec![
            plate_cell(&row.plate),
            Line::styled(row.name.clone(), name_style),
            filament_cell(&row.filament),
            self.value(&row.layer_height, &self.profile.layer_height),
            self.value(&row.wall_loops, &self.profile.wall_loops),
            self.value(&row.infill, &self.profile.sparse_infill_density),
            support_cell(&row.support),
            self.value(&row.brim, &self.profile.brim_type),
            self.value(&row.outer_wall_speed, &self.profile.outer_wall_speed),
        ]
    }

    /// A tracked value, marked `*` when custom and annotated with the
    /// profile default in diff mode
    fn value(&self, field: &Field, default: &Value) -> Line {
        if field.value.is_empty() {
            return Line::new();
        }
        if !field.custom {
            return Line::plain(field.value.clone());
        }

        let line = Line::styled(format!("*{}", field.value), custom());
        let default = text(default);
        if self.show_diff && !default.is_empty() {
            line.push(Span::styled(format!(" ←{}", default), dim()))
        } else {
            line
        }
    }

    /// One `├─ key: value` line per own setting, in the name column
    fn detail_lines(&self, table: &mut Table, settings: &SettingsMap) {
        let last = settings.len().saturating_sub(1);
        for (i, (key, value)) in settings.iter().enumerate() {
            let branch = if i == last { "└─" } else { "├─" };
            let value = text(value);
            let mut line = Line::plain("    ")
                .push(Span::styled(branch, dim()))
                .push(Span::plain(" "))
                .push(Span::styled(
                    format!("{}: {}", key, value),
                    Style::new().yellow(),
                ));

            let default = self.profile_full.get(key).map(text).unwrap_or_default();
            if self.show_diff && !default.is_empty() && default != value {
                line = line.push(Span::styled(format!(" ←{}", default), dim()));
            }

            table.add_row(vec![Line::new(), line]);
        }
    }
}

fn plate_cell(plate: &str) -> Line {
    if plate.is_empty() {
        return Line::new();
    }
    let index = if plate.chars().all(|c| c.is_ascii_digit()) {
        plate.parse::<i64>().map(|n| n - 1).unwrap_or(0)
    } else {
        0
    };
    let (r, g, b) = PLATE_COLORS[index.rem_euclid(PLATE_COLORS.len() as i64) as usize];
    Line::styled(plate, Style::new().bold().truecolor(r, g, b))
}

fn filament_cell(filament: &str) -> Line {
    if filament.is_empty() {
        return Line::new();
    }
    let number = if filament.chars().all(|c| c.is_ascii_digit()) {
        filament.parse::<usize>().unwrap_or(0)
    } else {
        0
    };
    let style = match number {
        0 => Style::new().white(),
        n => filament_style(n),
    };
    Line::styled(filament, style)
}

fn support_cell(support: &Field) -> Line {
    match (support.value.as_str(), support.custom) {
        ("", _) => Line::new(),
        (value, true) => Line::styled(format!("*{}", value), custom()),
        ("On", false) => Line::styled("On", Style::new().green()),
        (value, false) => Line::styled(value, dim()),
    }
}
