//! Canonical instance text.
//!
//! ```text
//! N T
//! <N rows of initial, space separated>
//! <N rows of target, space separated>
//! <T lines of "H W a b">
//! ```
//!
//! Every line ends with `\n`. [`crate::io::instance_text::parse_instance`]
//! reads this back, and re-serializing the parsed instance gives the same bytes.

use std::fmt::Write;

use crate::core::grid::Grid;
use crate::core::instance::Instance;

pub fn serialize(instance: &Instance) -> String {
    let mut out = String::new();
    // Writing into a String cannot fail.
    let _ = writeln!(out, "{} {}", instance.n(), instance.catalog().len());
    write_grid(&mut out, instance.initial());
    write_grid(&mut out, instance.target());
    for op in instance.catalog().iter() {
        let _ = writeln!(out, "{} {} {} {}", op.h, op.w, op.a, op.b);
    }
    out
}

/// Append one grid row per line, values separated by single spaces.
pub fn write_grid(out: &mut String, grid: &Grid) {
    for row in grid.rows() {
        write_row(out, row);
    }
}

fn write_row(out: &mut String, row: &[u32]) {
    let mut values = row.iter();
    if let Some(first) = values.next() {
        let _ = write!(out, "{first}");
    }
    for value in values {
        let _ = write!(out, " {value}");
    }
    out.push('\n');
}
