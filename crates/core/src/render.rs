//! Table rendering helpers shared by price breakdowns and invoices.

use std::{io, ops::Range};

use tabled::{
    builder::Builder,
    grid::config::HorizontalLine,
    settings::{
        Alignment, Color, Style, Theme,
        object::{Columns, Rows},
    },
};

/// A label and value pair in the summary block under a table.
pub(crate) struct SummaryLine {
    pub(crate) label: String,
    pub(crate) value: String,
}

impl SummaryLine {
    pub(crate) fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }
}

/// Build and write a table with a bold header row and right-aligned
/// numeric columns.
pub(crate) fn write_table(
    out: &mut impl io::Write,
    builder: Builder,
    numeric_columns: Range<usize>,
) -> io::Result<()> {
    let mut table = builder.build();
    let mut theme = Theme::from(Style::modern_rounded());
    let separator = HorizontalLine::new(Some('─'), Some('┼'), Some('├'), Some('┤'));

    theme.remove_horizontal_lines();
    theme.insert_horizontal_line(1, separator);

    table.with(theme);
    table.modify(Rows::first(), Color::BOLD);
    table.modify(Columns::new(numeric_columns), Alignment::right());

    writeln!(out, "\n{table}")
}

/// Write summary lines with right-aligned labels and a fixed-width value
/// column. Labels and values may carry ANSI escapes; alignment uses the
/// visible width.
pub(crate) fn write_summary(out: &mut impl io::Write, lines: &[SummaryLine]) -> io::Result<()> {
    let label_width = lines
        .iter()
        .map(|line| visible_width(&line.label))
        .max()
        .unwrap_or(0);

    let value_width = lines
        .iter()
        .map(|line| visible_width(&line.value))
        .max()
        .unwrap_or(0);

    for line in lines {
        write_summary_line(out, &line.label, &line.value, label_width, value_width)?;
    }

    writeln!(out)
}

/// Writes a summary line with a right-aligned label and a fixed-width value column.
fn write_summary_line(
    out: &mut impl io::Write,
    label: &str,
    value: &str,
    label_col_width: usize,
    value_col_width: usize,
) -> io::Result<()> {
    let label_vis = visible_width(label);
    let value_vis = visible_width(value);

    // 2 chars of spacing between label and value column.
    let label_pad = label_col_width.saturating_sub(label_vis);
    let value_pad = value_col_width.saturating_sub(value_vis);

    writeln!(
        out,
        "{:>label_pad$}{label}  {value_pad}{value}",
        "",
        value_pad = " ".repeat(value_pad)
    )
}

/// Returns the visible (non-ANSI) width of a string.
fn visible_width(s: &str) -> usize {
    let mut width = 0usize;
    let mut in_escape = false;

    for ch in s.chars() {
        if in_escape {
            if ch.is_ascii_alphabetic() {
                in_escape = false;
            }
        } else if ch == '\x1b' {
            in_escape = true;
        } else {
            width += 1;
        }
    }

    width
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn visible_width_ignores_ansi_escapes() {
        assert_eq!(visible_width("Total:"), 6);
        assert_eq!(visible_width("\x1b[1mTotal:\x1b[0m"), 6);
    }

    #[test]
    fn write_summary_aligns_value_column() -> std::io::Result<()> {
        let lines = [
            SummaryLine::new(" Subtotal:", "100.00  "),
            SummaryLine::new(" Total:", "90.00  "),
        ];

        let mut out = Vec::new();
        write_summary(&mut out, &lines)?;

        let rendered = String::from_utf8(out).map_err(|_err| std::io::ErrorKind::InvalidData)?;
        let mut rows = rendered.lines();

        let first = rows.next().unwrap_or_default();
        let second = rows.next().unwrap_or_default();

        assert_eq!(first.len(), second.len(), "rows should align");

        Ok(())
    }
}
