#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        // Lines of `key=value`, as a decoded form body would arrive.
        let fields = s.lines().filter_map(|line| line.split_once('='));
        if let Ok(request) = rechnungsdruck::form::request_from_form(fields, "Fuzz GmbH", "Teststr. 1") {
            if rechnungsdruck::core::validate(&request).is_ok() {
                let _ = rechnungsdruck::layout::layout_invoice(
                    &request,
                    &rechnungsdruck::layout::LayoutOptions::default(),
                );
            }
        }
    }
});
