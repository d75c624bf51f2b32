#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        // Parse → validate → render must not panic at any step.
        if let Ok(request) = rechnungsdruck::json::request_from_json(s) {
            if rechnungsdruck::core::validate(&request).is_ok() {
                let _ = rechnungsdruck::pdf::render(&request);
            }
        }
    }
});
