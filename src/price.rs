use regex::Regex;
use std::sync::OnceLock;

/// Value of one `억` unit in won
pub const EOK: i64 = 100_000_000;

/// Value of one sub-unit (the number after `억` is quoted in `만` won)
pub const MAN: i64 = 10_000;

fn price_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^([0-9]+)억(?:\s*([0-9]+))?").expect("price pattern is valid")
    })
}

/// Map full-width digits (U+FF10..U+FF19) onto ASCII
fn fold_full_width_digit(c: char) -> char {
    match c {
        '０'..='９' => char::from(b'0' + (c as u32 - '０' as u32) as u8),
        _ => c,
    }
}

/// Convert a localized listing price into won.
///
/// `"5억 8,000"` → 580000000, `"6억"` → 600000000.
/// Anything that does not start with `<digits>억` (monthly rent notation,
/// ranges, empty strings) yields 0, as does a value too large for `i64`.
pub fn parse_price(raw: &str) -> i64 {
    if raw.is_empty() {
        return 0;
    }

    let cleaned: String = raw
        .chars()
        .filter(|c| !matches!(c, ',' | '，'))
        .map(fold_full_width_digit)
        .collect();
    let Some(caps) = price_pattern().captures(&cleaned) else {
        return 0;
    };

    let major = caps
        .get(1)
        .and_then(|m| m.as_str().parse::<i64>().ok())
        .and_then(|n| n.checked_mul(EOK));

    let minor = match caps.get(2) {
        Some(m) => m.as_str().parse::<i64>().ok().and_then(|n| n.checked_mul(MAN)),
        None => Some(0),
    };

    match (major, minor) {
        (Some(major), Some(minor)) => major.checked_add(minor).unwrap_or(0),
        _ => 0,
    }
}
