//! Score report output.
//!
//! Plain-text, one `name: value` line per field, in the order
//! [`ScoreReport::lines`] yields them. Report files are named
//! `<date>_<second-of-day>_<model>_score.txt`.

use std::io::Write;

use chrono::{NaiveDateTime, Timelike};

use crate::scoring::ScoreReport;
use crate::Result;

/// Write every report line, newline-terminated.
pub fn write_report<W: Write + ?Sized>(report: &ScoreReport, out: &mut W) -> Result<()> {
    for line in report.lines() {
        writeln!(out, "{line}")?;
    }
    out.flush()?;
    Ok(())
}

/// File name for a report produced for `model_name` at `at`.
///
/// Path separators and whitespace in the model name become `-`.
pub fn report_file_name(model_name: &str, at: NaiveDateTime) -> String {
    let model: String = model_name
        .chars()
        .map(|c| if c == '/' || c == '\\' || c.is_whitespace() { '-' } else { c })
        .collect();
    format!(
        "{}_{}_{}_score.txt",
        at.format("%Y-%m-%d"),
        at.num_seconds_from_midnight(),
        model
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::{ScoreState, ScoreTable, ScoringPolicy};
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_write_report_lines() {
        let mut state = ScoreState::new(ScoreTable::prepare(ScoringPolicy::Proportional, 4, 3));
        state.update_similarity(0.5);
        state.update_similarity(0.25);

        let mut out = Vec::new();
        write_report(&state.report(), &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 9);
        assert_eq!(lines[0], "similarity sum: 0.75");
        assert_eq!(lines[2], "similarity percentage: 37.5");
        assert_eq!(lines[4], "analogy count: 0");
        assert_eq!(lines[8], "max score: 18");
    }

    #[test]
    fn test_report_file_name() {
        let at = NaiveDate::from_ymd_opt(2024, 3, 9)
            .unwrap()
            .and_hms_opt(1, 2, 3)
            .unwrap();
        assert_eq!(report_file_name("glove 300d", at), "2024-03-09_3723_glove-300d_score.txt");
        assert_eq!(report_file_name("models/w2v", at), "2024-03-09_3723_models-w2v_score.txt");
    }
}
