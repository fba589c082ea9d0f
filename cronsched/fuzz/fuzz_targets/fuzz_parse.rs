#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        // Parse should never panic, and every error carries an in-bounds span
        if let Err(e) = cronsched::Schedule::parse(s) {
            if let Some(span) = e.span() {
                assert!(span.start <= span.end && span.end <= s.len());
            }
            let _ = e.display_rich();
        }
    }
});
