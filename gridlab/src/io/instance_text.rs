//! Parser for the instance text format written by
//! [`serialize`](crate::core::serializer::serialize).
//!
//! Leading/trailing whitespace and blank lines are ignored; values are split
//! on any whitespace. Errors name the 1-based source line.

use anyhow::{Context, Result, anyhow, bail};
use tracing::warn;

use crate::core::instance::Instance;

/// Sizes below this are accepted but flagged as likely out of constraints.
pub const MIN_EXPECTED_SIZE: usize = 15;

/// Non-blank lines with their 1-based line numbers.
pub(crate) struct NumberedLines<'a> {
    inner: Box<dyn Iterator<Item = (usize, &'a str)> + 'a>,
}

impl<'a> NumberedLines<'a> {
    pub(crate) fn new(text: &'a str) -> Self {
        let inner = text
            .lines()
            .enumerate()
            .map(|(index, line)| (index + 1, line.trim()))
            .filter(|(_, line)| !line.is_empty());
        Self {
            inner: Box::new(inner),
        }
    }

    pub(crate) fn next_line(&mut self) -> Option<(usize, &'a str)> {
        self.inner.next()
    }

    /// Next line parsed as whitespace-separated integers.
    pub(crate) fn next_values(&mut self, what: &str) -> Result<(usize, Vec<u32>)> {
        let (line_no, line) = self
            .next_line()
            .ok_or_else(|| anyhow!("unexpected end of input: missing {what}"))?;
        let values = parse_values(line).with_context(|| format!("line {line_no}: {what}"))?;
        Ok((line_no, values))
    }

    /// Next line, which must hold exactly `count` integers.
    pub(crate) fn next_exact(&mut self, what: &str, count: usize) -> Result<Vec<u32>> {
        let (line_no, values) = self.next_values(what)?;
        if values.len() != count {
            bail!(
                "line {line_no}: {what}: expected {count} values, found {}",
                values.len()
            );
        }
        Ok(values)
    }

    pub(crate) fn remaining(self) -> usize {
        self.inner.count()
    }
}

pub(crate) fn parse_values(line: &str) -> Result<Vec<u32>> {
    line.split_whitespace()
        .map(|token| {
            token
                .parse::<u32>()
                .with_context(|| format!("invalid integer '{token}'"))
        })
        .collect()
}

/// Parse instance text into a validated [`Instance`].
pub fn parse_instance(text: &str) -> Result<Instance> {
    let mut lines = NumberedLines::new(text);
    let header = lines.next_exact("header \"N T\"", 2)?;
    let n = header[0] as usize;
    let t = header[1] as usize;
    if n < MIN_EXPECTED_SIZE || t < 1 {
        warn!(n, t, "instance likely out of constraints");
    }

    // N and T are untrusted until every row has been read.
    let mut initial = Vec::new();
    for row in 0..n {
        initial.extend(lines.next_exact(&format!("initial row {row}"), n)?);
    }
    let mut target = Vec::new();
    for row in 0..n {
        target.extend(lines.next_exact(&format!("target row {row}"), n)?);
    }
    let mut ops = Vec::new();
    for op_id in 0..t {
        ops.extend(lines.next_exact(&format!("operation {op_id}"), 4)?);
    }

    let extra = lines.remaining();
    if extra > 0 {
        warn!(extra, "ignoring trailing lines after instance");
    }

    Instance::from_flat(n, initial, target, &ops).context("invalid instance")
}
