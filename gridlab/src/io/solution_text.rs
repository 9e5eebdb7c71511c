//! Parser for solution text: a count line, then one `op_id x y` per line.

use anyhow::{Context, Result, anyhow, bail};
use tracing::warn;

use crate::core::instance::Instance;
use crate::core::timeline::{Application, resolve};
use crate::io::instance_text::{NumberedLines, parse_values};

/// Solutions longer than `USE_LIMIT_FACTOR * T` are flagged, not rejected.
pub const USE_LIMIT_FACTOR: usize = 3;

/// Parse solution text and check every entry against `instance`.
///
/// Empty text is an empty solution.
pub fn parse_solution(text: &str, instance: &Instance) -> Result<Vec<Application>> {
    let mut lines = NumberedLines::new(text);
    let Some((line_no, line)) = lines.next_line() else {
        return Ok(Vec::new());
    };
    let count = match parse_values(line)
        .with_context(|| format!("line {line_no}: entry count"))?
        .as_slice()
    {
        [count] => *count as usize,
        _ => bail!("line {line_no}: entry count: expected a single integer"),
    };

    // `count` is untrusted; the buffer grows with the lines actually present.
    let mut entries = Vec::new();
    while let Some((line_no, line)) = lines.next_line() {
        let index = entries.len();
        if index >= count {
            bail!("line {line_no}: more entries than the declared {count}");
        }
        let values =
            parse_values(line).with_context(|| format!("line {line_no}: entry {index}"))?;
        let app = match values.as_slice() {
            [op_id, x, y] => Application {
                op_id: *op_id,
                x: *x,
                y: *y,
            },
            _ => bail!(
                "line {line_no}: entry {index}: expected 3 values \"op_id x y\", found {}",
                values.len()
            ),
        };
        resolve(&app, index, instance.catalog(), instance.n())
            .map_err(|err| anyhow!("line {line_no}: {err}"))?;
        entries.push(app);
    }
    if entries.len() != count {
        bail!("expected {count} entries, found {}", entries.len());
    }

    let limit = USE_LIMIT_FACTOR * instance.catalog().len();
    if entries.len() > limit {
        warn!(entries = entries.len(), limit, "solution exceeds the usual use limit");
    }
    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{app, two_by_two};

    #[test]
    fn parses_entries() {
        let entries = parse_solution("2\n0 0 0\n0 1 0\n", &two_by_two()).expect("parse");
        assert_eq!(entries, vec![app(0, 0, 0), app(0, 1, 0)]);
    }

    #[test]
    fn empty_text_is_empty_solution() {
        assert!(parse_solution("", &two_by_two()).expect("empty").is_empty());
        assert!(parse_solution("  \n\n", &two_by_two()).expect("blank").is_empty());
        assert!(parse_solution("0\n", &two_by_two()).expect("zero").is_empty());
    }

    #[test]
    fn rejects_count_mismatch() {
        let err = parse_solution("3\n0 0 0\n", &two_by_two()).expect_err("short");
        assert!(err.to_string().contains("expected 3 entries, found 1"));
        let err = parse_solution("1\n0 0 0\n0 1 0\n", &two_by_two()).expect_err("long");
        assert!(err.to_string().contains("more entries"));
    }

    #[test]
    fn rejects_malformed_entry() {
        let err = parse_solution("1\n0 0\n", &two_by_two()).expect_err("arity");
        assert!(err.to_string().contains("entry 0"));
        assert!(parse_solution("1\n0 0 -1\n", &two_by_two()).is_err());
    }

    #[test]
    fn rejects_unknown_op_and_out_of_bounds_placement() {
        let err = parse_solution("1\n1 0 0\n", &two_by_two()).expect_err("op id");
        assert!(err.to_string().contains("op_id 1 out of range"));
        let err = parse_solution("2\n0 0 0\n0 0 1\n", &two_by_two()).expect_err("bounds");
        let message = err.to_string();
        assert!(message.contains("line 3"), "{message}");
        assert!(message.contains("application 1"), "{message}");
    }

    #[test]
    fn huge_declared_count_is_an_error_not_an_allocation() {
        let err = parse_solution("4000000000\n0 0 0\n", &two_by_two()).expect_err("short");
        assert!(err.to_string().contains("expected 4000000000 entries, found 1"));
    }
}
