use crate::errors::ParseError;

fn unit_seconds(unit: char) -> Option<u32> {
    match unit.to_ascii_lowercase() {
        's' => Some(1),
        'm' => Some(60),
        'h' => Some(3_600),
        'd' => Some(86_400),
        'w' => Some(604_800),
        _ => None,
    }
}

/// Parses `<int>` or `(<int><unit>)+` into seconds.
///
/// Units are `s m h d w`, case-insensitive. A bare integer is only accepted on
/// its own: `1h30` is rejected, `1h30m` is 5400. Results that do not fit in 32
/// bits are rejected.
pub fn parse_time_literal(literal: &str) -> Result<u32, ParseError> {
    let invalid = || ParseError::InvalidTimeLiteral {
        line: 0,
        literal: literal.to_string(),
    };

    if literal.is_empty() {
        return Err(invalid());
    }

    if literal.bytes().all(|b| b.is_ascii_digit()) {
        return literal.parse::<u32>().map_err(|_| invalid());
    }

    let mut total: u32 = 0;
    let mut current: Option<u32> = None;

    for c in literal.chars() {
        if let Some(digit) = c.to_digit(10) {
            let value = current
                .unwrap_or(0)
                .checked_mul(10)
                .and_then(|v| v.checked_add(digit))
                .ok_or_else(invalid)?;
            current = Some(value);
            continue;
        }

        let multiplier = unit_seconds(c).ok_or_else(invalid)?;
        let amount = current.take().ok_or_else(invalid)?;
        total = amount
            .checked_mul(multiplier)
            .and_then(|v| total.checked_add(v))
            .ok_or_else(invalid)?;
    }

    if current.is_some() {
        return Err(invalid());
    }

    Ok(total)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bare_integer_is_seconds() {
        assert_eq!(parse_time_literal("300"), Ok(300));
        assert_eq!(parse_time_literal("0"), Ok(0));
    }

    #[test]
    fn test_unit_suffixes() {
        assert_eq!(parse_time_literal("1h"), Ok(3600));
        assert_eq!(parse_time_literal("90m"), Ok(5400));
        assert_eq!(parse_time_literal("45s"), Ok(45));
        assert_eq!(parse_time_literal("2w"), Ok(1_209_600));
        assert_eq!(parse_time_literal("1D"), Ok(86_400));
    }

    #[test]
    fn test_concatenated_components() {
        assert_eq!(parse_time_literal("1d12h"), Ok(129_600));
        assert_eq!(parse_time_literal("1h30m"), Ok(5400));
        assert_eq!(parse_time_literal("1W1d1H1M1S"), Ok(694_861));
    }

    #[test]
    fn test_malformed_literals() {
        for literal in ["1x", "", "h", "1h30", "-5", "1.5h", "1hh", " 1h"] {
            assert!(
                matches!(
                    parse_time_literal(literal),
                    Err(ParseError::InvalidTimeLiteral { .. })
                ),
                "{:?} should be rejected",
                literal
            );
        }
    }

    #[test]
    fn test_overflow_is_rejected() {
        assert!(parse_time_literal("4294967296").is_err());
        assert!(parse_time_literal("10000w").is_err());
        assert_eq!(parse_time_literal("4294967295"), Ok(u32::MAX));
    }
}
