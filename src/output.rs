/// Presentation-side output: table, JSON array, and NDJSON writers.
///
/// Formatting here never feeds back into the data model — `Record::phone` is
/// canonical in the record itself; only the timestamp rendering is
/// presentation-local.
use std::io::{self, Write};

use jiff::Timestamp;

use crate::record::Record;

/// Output formatting mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Aligned columns for a terminal.
    Table,
    /// One pretty-printed JSON array.
    Json,
    /// One compact JSON object per line.
    Ndjson,
}

impl std::str::FromStr for OutputMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "table" => Ok(OutputMode::Table),
            "json" => Ok(OutputMode::Json),
            "ndjson" => Ok(OutputMode::Ndjson),
            _ => Err(format!("unknown format: {s} (table|json|ndjson)")),
        }
    }
}

/// Render a timestamp as `YYYY-MM-DD HH:MM` (UTC). Presentation only.
pub fn format_date(ts: Timestamp) -> String {
    ts.to_zoned(jiff::tz::TimeZone::UTC)
        .strftime("%Y-%m-%d %H:%M")
        .to_string()
}

/// Write rows in the requested mode.
pub fn write_rows(out: &mut impl Write, rows: &[&Record], mode: OutputMode) -> io::Result<()> {
    match mode {
        OutputMode::Table => write_table(out, rows),
        OutputMode::Json => {
            serde_json::to_writer_pretty(&mut *out, rows).map_err(io::Error::other)?;
            out.write_all(b"\n")
        }
        OutputMode::Ndjson => {
            for rec in rows {
                serde_json::to_writer(&mut *out, rec).map_err(io::Error::other)?;
                out.write_all(b"\n")?;
            }
            Ok(())
        }
    }
}

fn write_table(out: &mut impl Write, rows: &[&Record]) -> io::Result<()> {
    let name_w = col_width(rows.iter().map(|r| r.name.len()), 13);
    let email_w = col_width(rows.iter().map(|r| r.email.len()), 5);
    let added_w = col_width(rows.iter().map(|r| r.added_by.len()), 8);

    writeln!(
        out,
        "{:>8}  {:<name_w$}  {:<15}  {:<email_w$}  {:<16}  {:<added_w$}  {:>5}",
        "ID", "CUSTOMER NAME", "PHONE", "EMAIL", "LAST MESSAGE", "ADDED BY", "SCORE",
    )?;

    let mut id_buf = itoa::Buffer::new();
    let mut score_buf = itoa::Buffer::new();
    for rec in rows {
        writeln!(
            out,
            "{:>8}  {:<name_w$}  {:<15}  {:<email_w$}  {:<16}  {:<added_w$}  {:>5}",
            id_buf.format(rec.id),
            rec.name,
            rec.phone,
            rec.email,
            format_date(rec.last_message_at),
            rec.added_by,
            score_buf.format(rec.score),
        )?;
    }
    Ok(())
}

fn col_width(lens: impl Iterator<Item = usize>, min: usize) -> usize {
    lens.fold(min, usize::max)
}
