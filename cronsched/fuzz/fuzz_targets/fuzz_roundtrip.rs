#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        if let Ok(schedule) = cronsched::Schedule::parse(s) {
            let displayed = schedule.to_string();
            let reparsed = cronsched::Schedule::parse(&displayed)
                .expect("display output must be parseable");
            assert_eq!(schedule, reparsed, "roundtrip changed the schedule");
        }
    }
});
