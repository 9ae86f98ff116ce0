//! CSV serialization of report rows.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use super::ReportRow;
use crate::core::Result;

/// Write `rows` as CSV with a header line, even when there are no rows.
pub fn write_csv<W: Write, R: ReportRow>(out: W, rows: &[R]) -> Result<()> {
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(false)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(out);

    wtr.write_record(R::COLUMNS)?;
    for row in rows {
        wtr.serialize(row)?;
    }

    wtr.flush()?;
    Ok(())
}

/// Write `rows` to a CSV file at `path`, replacing any existing file.
pub fn write_csv_file<R: ReportRow>(path: &Path, rows: &[R]) -> Result<()> {
    let file = File::create(path)?;
    write_csv(std::io::BufWriter::new(file), rows)
}
