//! Parsers for the slicer documents stored in a 3MF package

mod model_settings;
mod settings;

pub use model_settings::{INFILL_DENSITY_KEYS, is_system_key, parse_model_settings};
pub use settings::{DIFF_SETTINGS_KEY, ListIndex, Settings};

use quick_xml::events::BytesStart;
use std::collections::HashMap;

/// Collect the attributes of an element with entity references resolved
pub(crate) fn parse_attributes(
    e: &BytesStart,
) -> std::result::Result<HashMap<String, String>, String> {
    let mut attrs = HashMap::with_capacity(4);

    for attr in e.attributes() {
        let attr = attr.map_err(|e| e.to_string())?;
        let key = std::str::from_utf8(attr.key.as_ref()).map_err(|e| e.to_string())?;
        let raw = std::str::from_utf8(&attr.value).map_err(|e| e.to_string())?;
        let value = quick_xml::escape::unescape(raw).map_err(|e| e.to_string())?;

        attrs.insert(key.to_string(), value.into_owned());
    }

    Ok(attrs)
}
