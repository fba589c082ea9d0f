//! Basic cronsched API walkthrough: parse, evaluate, match, display.

use cronsched::{Field, Schedule};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse a schedule expression
    let schedule: Schedule = "0 9,17 * * 1-5".parse()?;
    println!("Parsed: {schedule}");

    // Inspect a field
    let hours = schedule.matcher(Field::Hour);
    println!("First hour: {}, next after 10: {}", hours.first(), hours.next(10));

    // Compute the next occurrence
    let now: jiff::Zoned = "2025-06-13T08:00:00+00:00[UTC]".parse()?;
    let next = schedule.next_occurrence_from(&now)?;
    println!("Next occurrence after {now}: {next}");

    // Compute the next 5 occurrences
    let next_5 = schedule.next_n_from(&now, 5)?;
    println!("\nNext 5 occurrences:");
    for dt in &next_5 {
        println!("  {dt}");
    }

    // Check if a datetime matches the schedule
    let monday_9am: jiff::Zoned = "2025-06-16T09:00:00+00:00[UTC]".parse()?;
    println!("\n{monday_9am} matches: {}", schedule.matches(&monday_9am));

    let sunday_9am: jiff::Zoned = "2025-06-15T09:00:00+00:00[UTC]".parse()?;
    println!("{sunday_9am} matches: {}", schedule.matches(&sunday_9am));

    // Impossible dates are reported, not looped on forever
    let never: Schedule = "0 0 30 2 *".parse()?;
    if let Err(e) = never.next_occurrence_from(&now) {
        println!("\n{}", e.display_rich());
    }

    // Parse errors point at the offending text
    if let Err(e) = Schedule::parse("0 9 * 13 *") {
        println!("\n{}", e.display_rich());
    }

    // Display roundtrips through parsing
    let roundtripped: Schedule = schedule.to_string().parse()?;
    assert_eq!(schedule, roundtripped);
    println!("\nRoundtrip: {roundtripped}");

    Ok(())
}
