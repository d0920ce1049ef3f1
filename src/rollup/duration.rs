use crate::error::WarnCode;
use crate::rollup::warn::Warning;

pub const SHORTS_CLOCK: &str = "00:30";
/// Live streams carry no length; they are weighted as a fixed five hours.
pub const LIVE_CLOCK: &str = "05:00:00";

const STAGE: &str = "duration";

/// Map special overlay badges to a clock string; everything else passes through.
pub fn normalize_label(label: &str) -> &str {
    let trimmed = label.trim();
    if trimmed.eq_ignore_ascii_case("SHORTS") {
        SHORTS_CLOCK
    } else if trimmed.eq_ignore_ascii_case("EN DIRECTO") || trimmed.eq_ignore_ascii_case("EN VIVO")
    {
        LIVE_CLOCK
    } else {
        label
    }
}

/// Parse `hh:mm:ss` or `mm:ss` into seconds.
pub fn clock_to_seconds(clock: &str) -> Option<u64> {
    let parts = clock
        .trim()
        .split(':')
        .map(|part| {
            let part = part.trim();
            if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
                return None;
            }
            part.parse::<u64>().ok()
        })
        .collect::<Option<Vec<_>>>()?;

    let (hours, minutes, seconds) = match parts.as_slice() {
        [h, m, s] => (*h, *m, *s),
        [m, s] => (0, *m, *s),
        _ => return None,
    };
    hours
        .checked_mul(3600)?
        .checked_add(minutes.checked_mul(60)?)?
        .checked_add(seconds)
}

/// Duration in seconds for a scraped label. Malformed or missing labels count
/// as zero and push a warning.
pub fn duration_seconds(label: Option<&str>, subject: &str, warnings: &mut Vec<Warning>) -> u64 {
    let raw = label.unwrap_or("");
    match clock_to_seconds(normalize_label(raw)) {
        Some(secs) => secs,
        None => {
            let reason = if raw.trim().is_empty() {
                "missing duration label".to_string()
            } else {
                format!("malformed duration `{raw}`; expected hh:mm:ss or mm:ss")
            };
            warnings.push(Warning::new(
                WarnCode::W002DurationMalformed,
                STAGE,
                subject,
                reason,
            ));
            0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(label: &str) -> (u64, usize) {
        let mut warnings = Vec::new();
        let secs = duration_seconds(Some(label), "v", &mut warnings);
        (secs, warnings.len())
    }

    #[test]
    fn clock_strings_convert_to_seconds() {
        assert_eq!(parse("01:02:03"), (3723, 0));
        assert_eq!(parse("02:03"), (123, 0));
        assert_eq!(parse("3:20"), (200, 0));
    }

    #[test]
    fn special_badges_use_placeholders() {
        assert_eq!(parse("SHORTS"), (30, 0));
        assert_eq!(parse(" shorts "), (30, 0));
        assert_eq!(parse("EN DIRECTO"), (18_000, 0));
        assert_eq!(parse("En vivo"), (18_000, 0));
    }

    #[test]
    fn malformed_labels_yield_zero_and_warn() {
        assert_eq!(parse("garbage"), (0, 1));
        assert_eq!(parse(""), (0, 1));
        assert_eq!(parse("1:2:3:4"), (0, 1));
        assert_eq!(parse("12"), (0, 1));
        assert_eq!(parse("1:-5"), (0, 1));
        assert_eq!(parse("1::5"), (0, 1));
    }

    #[test]
    fn missing_label_warns_with_subject() {
        let mut warnings = Vec::new();
        assert_eq!(duration_seconds(None, "Some title", &mut warnings), 0);
        assert_eq!(warnings[0].code, WarnCode::W002DurationMalformed);
        assert_eq!(warnings[0].subject, "Some title");
    }

    #[test]
    fn overflowing_clock_is_rejected() {
        assert_eq!(clock_to_seconds("18446744073709551615:00:00"), None);
    }
}
