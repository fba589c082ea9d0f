#![no_main]
use libfuzzer_sys::fuzz_target;

// First 8 bytes pick the reference second, the rest is the expression.
fuzz_target!(|data: &[u8]| {
    if data.len() < 8 {
        return;
    }
    let (head, tail) = data.split_at(8);
    let Ok(expr) = std::str::from_utf8(tail) else {
        return;
    };
    let Ok(schedule) = cronsched::Schedule::parse(expr) else {
        return;
    };
    let secs = i64::from_le_bytes(head.try_into().unwrap()).rem_euclid(4_000_000_000);
    let Ok(ts) = jiff::Timestamp::from_second(secs) else {
        return;
    };
    let now = ts.to_zoned(jiff::tz::TimeZone::UTC);
    if let Ok(next) = schedule.next_occurrence_from(&now) {
        assert!(next > now);
        assert!(schedule.matches(&next));
    }
});
