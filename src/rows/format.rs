//! Display labels for resolved setting values

/// Value of an enabled boolean setting
pub const BOOL_TRUE: &str = "1";

/// Short label for a `brim_type` value
///
/// Unknown values pass through unchanged and an empty value stays empty.
pub fn format_brim(brim_type: &str) -> String {
    let label = match brim_type {
        "brim_ears" => "Mouse ear",
        "no_brim" => "No",
        "outer_only" => "Outer",
        "inner_only" => "Inner",
        "outer_and_inner" => "Both",
        other => other,
    };
    label.to_string()
}

/// Infill density without the percent sign
pub fn format_infill(density: &str) -> String {
    density.replace('%', "")
}

/// `On` when support is enabled, `Off` otherwise
pub fn format_support(enable_support: &str) -> &'static str {
    if enable_support == BOOL_TRUE {
        "On"
    } else {
        "Off"
    }
}
