#![no_main]

use libfuzzer_sys::fuzz_target;
use threemf_settings::Settings;

fuzz_target!(|data: &[u8]| {
    if let Ok(text) = std::str::from_utf8(data)
        && let Ok(settings) = Settings::from_json(text)
    {
        let _ = settings.profile();
        let _ = settings.custom_global_settings();
    }
});
