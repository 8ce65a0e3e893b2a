#![no_main]

use libfuzzer_sys::fuzz_target;
use threemf_settings::{Settings, build_rows, parse_model_settings};

fuzz_target!(|data: &[u8]| {
    // Parse arbitrary model settings and fold whatever survives into rows
    if let Ok(xml) = std::str::from_utf8(data)
        && let Ok(model) = parse_model_settings(xml)
    {
        let _ = build_rows(&Settings::default().profile(), &model);
    }
});
