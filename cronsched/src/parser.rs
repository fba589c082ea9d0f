// Hand-rolled parser for five-field cron expressions.
//
//   expression := field{5}            fields separated by whitespace
//   field      := term ("," term)*
//   term       := "*" ["/" number] | number ["-" number]
//
// Each step takes a `Cursor` by value and hands back the cursor positioned
// after what it consumed, so no parse state is shared between fields.

use crate::error::{ScheduleError, Span};
use crate::field::Field;
use crate::matcher::Matcher;
use crate::schedule::Schedule;

/// Immutable read position within the input.
#[derive(Debug, Clone, Copy)]
struct Cursor<'a> {
    input: &'a str,
    offset: usize,
}

impl<'a> Cursor<'a> {
    fn new(input: &'a str) -> Self {
        Self { input, offset: 0 }
    }

    fn peek(self) -> Option<u8> {
        self.input.as_bytes().get(self.offset).copied()
    }

    fn is_at_end(self) -> bool {
        self.offset >= self.input.len()
    }

    fn advance(self, n: usize) -> Self {
        Self {
            offset: self.offset + n,
            ..self
        }
    }

    fn skip_whitespace(self) -> Self {
        let skipped = self.input.as_bytes()[self.offset..]
            .iter()
            .take_while(|b| b.is_ascii_whitespace())
            .count();
        self.advance(skipped)
    }

    fn span_to(self, end: Cursor<'_>) -> Span {
        Span::new(self.offset, end.offset)
    }

    /// One-character span at the cursor, or zero-width at end of input.
    fn char_span(self) -> Span {
        match self.input[self.offset..].chars().next() {
            Some(ch) => Span::new(self.offset, self.offset + ch.len_utf8()),
            None => Span::at(self.offset),
        }
    }

    fn unexpected(self, expected: &str) -> ScheduleError {
        let message = match self.input[self.offset..].chars().next() {
            Some(ch) => format!(
                "unexpected character '{ch}' at offset {}, expected {expected}",
                self.offset
            ),
            None => format!("unexpected end of input, expected {expected}"),
        };
        ScheduleError::syntax(message, self.char_span(), self.input)
    }
}

/// Parse a five-field cron expression into a [`Schedule`].
pub fn parse(input: &str) -> Result<Schedule, ScheduleError> {
    if input.trim().is_empty() {
        return Err(ScheduleError::Empty);
    }

    let cursor = Cursor::new(input);
    let (minute, cursor) = parse_field(cursor, Field::Minute)?;
    let (hour, cursor) = parse_field(cursor, Field::Hour)?;
    let (day_of_month, cursor) = parse_field(cursor, Field::DayOfMonth)?;
    let (month, cursor) = parse_field(cursor, Field::Month)?;
    let (day_of_week, cursor) = parse_field(cursor, Field::DayOfWeek)?;

    let rest = cursor.skip_whitespace();
    if !rest.is_at_end() {
        return Err(ScheduleError::field_count(
            format!("unexpected trailing data at offset {}", rest.offset),
            Span::new(rest.offset, input.len()),
            input,
        ));
    }

    Ok(Schedule::new(minute, hour, day_of_month, month, day_of_week))
}

fn parse_field(cursor: Cursor<'_>, field: Field) -> Result<(Matcher, Cursor<'_>), ScheduleError> {
    let start = cursor.skip_whitespace();
    if start.is_at_end() {
        return Err(ScheduleError::field_count(
            format!("missing {field}"),
            Span::at(start.offset),
            cursor.input,
        ));
    }

    let mut terms = Vec::new();
    let mut cursor = start;
    loop {
        let (term, next) = parse_term(cursor, field)?;
        terms.push(term);
        match next.peek() {
            Some(b',') => cursor = next.advance(1),
            Some(b) if b.is_ascii_whitespace() => {
                cursor = next;
                break;
            }
            None => {
                cursor = next;
                break;
            }
            Some(_) => return Err(next.unexpected("',' or whitespace")),
        }
    }

    let matcher = Matcher::union(field, terms)
        .ok_or_else(|| start.unexpected(&format!("a value for {field}")))?;
    Ok((matcher, cursor))
}

fn parse_term(cursor: Cursor<'_>, field: Field) -> Result<(Matcher, Cursor<'_>), ScheduleError> {
    match cursor.peek() {
        Some(b'*') => {
            let after_star = cursor.advance(1);
            if after_star.peek() != Some(b'/') {
                return Ok((Matcher::wildcard(field), after_star));
            }
            let (stride, end) = parse_number(after_star.advance(1))?;
            let span = cursor.span_to(end);
            let bounds = field.bounds();
            if stride == 0 {
                return Err(ScheduleError::range(
                    format!("{field} step must not be zero"),
                    span,
                    cursor.input,
                ));
            }
            let matcher = u8::try_from(stride)
                .ok()
                .and_then(|s| Matcher::step(field, s))
                .ok_or_else(|| {
                    ScheduleError::range(
                        format!(
                            "{field} step {stride} out of range [1, {}]",
                            bounds.max
                        ),
                        span,
                        cursor.input,
                    )
                })?;
            Ok((matcher, end))
        }
        Some(b) if b.is_ascii_digit() => {
            let (lo, after_lo) = parse_number(cursor)?;
            check_value(field, lo, cursor.span_to(after_lo), cursor.input)?;
            if after_lo.peek() != Some(b'-') {
                let matcher = to_u8(lo)
                    .and_then(|v| Matcher::static_value(field, v))
                    .ok_or_else(|| out_of_range(field, lo, cursor.span_to(after_lo), cursor.input))?;
                return Ok((matcher, after_lo));
            }

            let hi_start = after_lo.advance(1);
            let (hi, end) = parse_number(hi_start)?;
            check_value(field, hi, hi_start.span_to(end), cursor.input)?;
            let span = cursor.span_to(end);
            if lo > hi {
                return Err(ScheduleError::range(
                    format!("{field} range {lo}-{hi} is inverted"),
                    span,
                    cursor.input,
                ));
            }
            let matcher = match (to_u8(lo), to_u8(hi)) {
                (Some(lo), Some(hi)) => Matcher::range(field, lo, hi),
                _ => None,
            }
            .ok_or_else(|| out_of_range(field, hi, span, cursor.input))?;
            Ok((matcher, end))
        }
        _ => Err(cursor.unexpected(&format!("'*' or a number for {field}"))),
    }
}

/// Read a run of ASCII digits.
fn parse_number(cursor: Cursor<'_>) -> Result<(u32, Cursor<'_>), ScheduleError> {
    let digits = cursor.input.as_bytes()[cursor.offset..]
        .iter()
        .take_while(|b| b.is_ascii_digit())
        .count();
    if digits == 0 {
        return Err(cursor.unexpected("a number"));
    }
    let end = cursor.advance(digits);
    let text = &cursor.input[cursor.offset..end.offset];
    let value = text.parse::<u32>().map_err(|_| {
        ScheduleError::syntax(
            format!("number {text} at offset {} is too large", cursor.offset),
            cursor.span_to(end),
            cursor.input,
        )
    })?;
    Ok((value, end))
}

fn check_value(field: Field, value: u32, span: Span, input: &str) -> Result<(), ScheduleError> {
    if field.bounds().contains(value) {
        Ok(())
    } else {
        Err(out_of_range(field, value, span, input))
    }
}

fn out_of_range(field: Field, value: u32, span: Span, input: &str) -> ScheduleError {
    let bounds = field.bounds();
    ScheduleError::range(
        format!(
            "{field} value {value} out of range [{}, {}]",
            bounds.min, bounds.max
        ),
        span,
        input,
    )
}

fn to_u8(value: u32) -> Option<u8> {
    u8::try_from(value).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn err(input: &str) -> ScheduleError {
        parse(input).unwrap_err()
    }

    #[test]
    fn test_all_wildcards() {
        let s = parse("* * * * *").unwrap();
        assert_eq!(s.minute(), &Matcher::wildcard(Field::Minute));
        assert_eq!(s.day_of_week(), &Matcher::wildcard(Field::DayOfWeek));
    }

    #[test]
    fn test_static_and_range() {
        let s = parse("0 3 1-15 6 1-5").unwrap();
        assert_eq!(s.minute(), &Matcher::static_value(Field::Minute, 0).unwrap());
        assert_eq!(s.hour(), &Matcher::static_value(Field::Hour, 3).unwrap());
        assert_eq!(s.day_of_month(), &Matcher::range(Field::DayOfMonth, 1, 15).unwrap());
        assert_eq!(s.day_of_week(), &Matcher::range(Field::DayOfWeek, 1, 5).unwrap());
    }

    #[test]
    fn test_step() {
        let s = parse("*/15 */6 * * *").unwrap();
        assert_eq!(s.minute(), &Matcher::step(Field::Minute, 15).unwrap());
        assert_eq!(s.hour(), &Matcher::step(Field::Hour, 6).unwrap());
    }

    #[test]
    fn test_comma_list_builds_composite() {
        let s = parse("0,30 * * * *").unwrap();
        match s.minute() {
            Matcher::Composite { members, .. } => assert_eq!(members.len(), 2),
            other => panic!("expected composite, got {other:?}"),
        }
        assert!(s.minute().matches(0));
        assert!(s.minute().matches(30));
        assert!(!s.minute().matches(15));
        assert_eq!(s.minute().next(10), 30);
    }

    #[test]
    fn test_mixed_list() {
        let s = parse("1-5,*/20,59 * * * *").unwrap();
        assert!(s.minute().matches(3));
        assert!(s.minute().matches(40));
        assert!(s.minute().matches(59));
        assert!(!s.minute().matches(10));
    }

    #[test]
    fn test_surrounding_whitespace() {
        assert!(parse("  0 3 * * *  ").is_ok());
        assert!(parse("0\t3\n*   *  *").is_ok());
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(err(""), ScheduleError::Empty);
        assert_eq!(err("   "), ScheduleError::Empty);
    }

    #[test]
    fn test_zero_step_rejected() {
        let e = err("*/0 * * * *");
        assert!(matches!(e, ScheduleError::Range { .. }), "{e:?}");
        assert!(e.to_string().contains("step must not be zero"));
    }

    #[test]
    fn test_oversized_step_rejected() {
        assert!(matches!(err("*/60 * * * *"), ScheduleError::Range { .. }));
        assert!(matches!(err("* */24 * * *"), ScheduleError::Range { .. }));
        assert!(parse("*/59 * * * *").is_ok());
    }

    #[test]
    fn test_out_of_range_values() {
        for input in [
            "60 * * * *",
            "* 24 * * *",
            "* * 0 * *",
            "* * 32 * *",
            "* * * 0 *",
            "* * * 13 *",
            "* * * * 7",
            "* * * * 1-7",
        ] {
            assert!(matches!(err(input), ScheduleError::Range { .. }), "{input}");
        }
    }

    #[test]
    fn test_inverted_range() {
        let e = err("5-1 * * * *");
        assert!(matches!(e, ScheduleError::Range { .. }));
        assert_eq!(e.to_string(), "minutes range 5-1 is inverted");
    }

    #[test]
    fn test_missing_fields_name_first_absent() {
        assert_eq!(err("*").to_string(), "missing hours");
        assert_eq!(err("* *").to_string(), "missing day of month");
        assert_eq!(err("* * *").to_string(), "missing month");
        assert_eq!(err("* * * * ").to_string(), "missing day of week");
        assert!(matches!(err("* * * *"), ScheduleError::FieldCount { .. }));
    }

    #[test]
    fn test_trailing_data() {
        let e = err("* * * * * *");
        assert!(matches!(e, ScheduleError::FieldCount { .. }));
        assert_eq!(e.to_string(), "unexpected trailing data at offset 10");
        assert_eq!(e.span(), Some(Span::new(10, 11)));
    }

    #[test]
    fn test_non_numeric_tokens() {
        for input in ["a * * * *", "* * * JAN *", "*/x * * * *", "1- * * * *", "? * * * *"] {
            assert!(matches!(err(input), ScheduleError::Syntax { .. }), "{input}");
        }
    }

    #[test]
    fn test_unterminated_field() {
        let e = err("1-2-3 * * * *");
        assert!(matches!(e, ScheduleError::Syntax { .. }));
        assert_eq!(e.span(), Some(Span::new(3, 4)));
    }

    #[test]
    fn test_dangling_comma() {
        assert!(matches!(err("1, * * * *"), ScheduleError::Syntax { .. }));
        assert!(matches!(err("* * * * 1,"), ScheduleError::Syntax { .. }));
    }

    #[test]
    fn test_numeric_overflow() {
        let e = err("99999999999 * * * *");
        assert!(matches!(e, ScheduleError::Syntax { .. }));
        assert!(e.to_string().contains("too large"));
    }

    #[test]
    fn test_error_span_points_at_value() {
        let e = err("0 3 * 13 *");
        assert_eq!(e.span(), Some(Span::new(6, 8)));
    }

    #[test]
    fn test_non_ascii_input() {
        assert!(matches!(err("é * * * *"), ScheduleError::Syntax { .. }));
    }
}
