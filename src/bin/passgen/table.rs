use std::fmt::{self, Display};
use std::io::{self, Write};

use unicode_width::UnicodeWidthStr;

pub trait TableRow {
    const HEADERS: &'static [&'static str];

    fn cell(&self, column: usize) -> &str;
}

/// Write `rows` under a header line, with every column padded to its widest cell.
pub fn write_table<Row: TableRow>(rows: &[Row], mut output: impl Write) -> io::Result<()> {
    let mut widths = Row::HEADERS.iter().map(|h| h.width()).collect::<Vec<_>>();
    for row in rows {
        for (column, width) in widths.iter_mut().enumerate() {
            *width = std::cmp::max(*width, row.cell(column).width());
        }
    }

    write_line(&mut output, widths.len(), |column| {
        Padded(Row::HEADERS[column], widths[column])
    })?;
    write_line(&mut output, widths.len(), |column| Divider(widths[column]))?;
    for row in rows {
        write_line(&mut output, widths.len(), |column| {
            Padded(row.cell(column), widths[column])
        })?;
    }
    Ok(())
}

fn write_line<F, D>(mut output: impl Write, columns: usize, cell: F) -> io::Result<()>
where
    D: Display,
    F: Fn(usize) -> D,
{
    let line = (0..columns)
        .map(|column| cell(column).to_string())
        .collect::<Vec<_>>()
        .join("  ");
    writeln!(output, "{}", line.trim_end())
}

struct Divider(usize);

impl Display for Divider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for _ in 0..self.0 {
            f.write_str("─")?;
        }
        Ok(())
    }
}

struct Padded<'a>(&'a str, usize);

impl Display for Padded<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let padding = self.1.saturating_sub(self.0.width());
        write!(f, "{}{:padding$}", self.0, "")
    }
}
