use crate::error::WarnCode;
use serde::Serialize;

/// A non-fatal condition recorded by one pipeline stage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Warning {
    pub code: WarnCode,
    pub stage: &'static str,
    pub subject: String,
    pub reason: String,
}

impl Warning {
    pub fn new(
        code: WarnCode,
        stage: &'static str,
        subject: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self {
            code,
            stage,
            subject: subject.into(),
            reason: reason.into(),
        }
    }

    pub fn line(&self) -> String {
        format!(
            "ROLLUP_WARN code={} stage={} subject={} reason={}",
            sanitize_value(self.code.as_str()),
            sanitize_value(self.stage),
            sanitize_value(&self.subject),
            sanitize_value(&self.reason),
        )
    }
}

fn sanitize_value(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut prev_sep = false;
    for ch in value.chars() {
        if ch.is_whitespace() {
            if !out.is_empty() && !prev_sep {
                out.push('_');
                prev_sep = true;
            }
        } else if !ch.is_control() {
            out.push(ch);
            prev_sep = false;
        }
    }
    let trimmed = out.trim_matches('_');
    if trimmed.is_empty() {
        "na".to_string()
    } else {
        trimmed.to_string()
    }
}

pub fn emit(warning: &Warning) {
    tracing::warn!("{}", warning.line());
}

pub fn emit_all(warnings: &[Warning]) {
    for warning in warnings {
        emit(warning);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sanitize_value_rewrites_whitespace() {
        assert_eq!(sanitize_value("a b\tc"), "a_b_c");
    }

    #[test]
    fn sanitize_value_falls_back_for_empty() {
        assert_eq!(sanitize_value("   "), "na");
    }

    #[test]
    fn sanitize_value_keeps_non_ascii_labels() {
        assert_eq!(sanitize_value("miércoles 3"), "miércoles_3");
    }

    #[test]
    fn warning_line_is_single_structured_record() {
        let w = Warning::new(
            WarnCode::W001DateUnresolved,
            "date-resolver",
            "hace 3 semanas",
            "unparseable label",
        );
        assert_eq!(
            w.line(),
            "ROLLUP_WARN code=W001_DATE_UNRESOLVED stage=date-resolver subject=hace_3_semanas reason=unparseable_label"
        );
    }
}
