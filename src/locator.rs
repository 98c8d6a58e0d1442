//! Random access to rows and columns of a delimiter-separated stream.
//!
//! Rows are addressed from 1, counting from the top of the stream. Row 0
//! means "the line under the cursor" and is the only lookup that moves
//! the cursor. Every other lookup rescans from byte 0 and hands the cursor
//! back unchanged, so reading `n` rows one by one costs `O(n²)` line reads.

use std::io::{BufRead, BufReader, Read, Seek, SeekFrom};

use data_error::{CsvError, Result};
use serde::{Deserialize, Serialize};

use crate::cursor::with_saved_cursor;
use crate::tokenizer::{tokenize, FieldPolicy, DEFAULT_DELIMITER};

/// What a column lookup does with a row that is too short to have a
/// field at the requested position.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum MissingField {
    /// Substitute an empty string, keeping one entry per row.
    #[default]
    Empty,
    /// Leave the row out of the result.
    Skip,
    /// Abort the lookup with [`CsvError::MissingField`].
    Fail,
}

/// Everything needed to turn raw lines into fields.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Dialect {
    pub delimiter: u8,
    pub field_policy: FieldPolicy,
    pub missing_field: MissingField,
}

impl Default for Dialect {
    fn default() -> Self {
        Self {
            delimiter: DEFAULT_DELIMITER,
            field_policy: FieldPolicy::default(),
            missing_field: MissingField::default(),
        }
    }
}

impl Dialect {
    pub fn split(&self, line: &str) -> Vec<String> {
        tokenize(line, self.delimiter, self.field_policy)
    }
}

/// Read one raw line, without its terminator.
///
/// With `row == 0` the line under the cursor is returned and the cursor
/// moves just past it. With `row > 0` the `row`-th line of the stream is
/// returned and the cursor is left where it was.
pub fn read_row<S>(stream: &mut S, row: usize) -> Result<String>
where
    S: Read + Seek,
{
    if row == 0 {
        return read_line_at_cursor(stream)?.ok_or(CsvError::RowOutOfRange(0));
    }

    with_saved_cursor(stream, |s| {
        s.seek(SeekFrom::Start(0))?;
        let mut reader = BufReader::new(s);
        let mut buf = Vec::new();

        for _ in 1..row {
            buf.clear();
            if reader.read_until(b'\n', &mut buf)? == 0 {
                return Err(CsvError::RowOutOfRange(row));
            }
        }

        buf.clear();
        if reader.read_until(b'\n', &mut buf)? == 0 {
            return Err(CsvError::RowOutOfRange(row));
        }
        log::trace!("Located row {} after scanning from the start", row);
        line_from_bytes(buf)
    })
}

/// Number of lines in the stream. A last line without a trailing newline
/// is still a row.
pub fn count_rows<S>(stream: &mut S) -> Result<usize>
where
    S: Read + Seek,
{
    with_saved_cursor(stream, |s| {
        s.seek(SeekFrom::Start(0))?;
        let mut reader = BufReader::new(s);
        let mut buf = Vec::new();
        let mut rows = 0;
        loop {
            buf.clear();
            if reader.read_until(b'\n', &mut buf)? == 0 {
                break;
            }
            rows += 1;
        }
        log::debug!("Counted {} rows", rows);
        Ok(rows)
    })
}

/// Number of fields in the first row, or 0 for an empty stream.
///
/// Other rows are assumed to be as wide as the first one; use
/// [`verify_rectangular`] to check that.
pub fn count_columns<S>(stream: &mut S, dialect: &Dialect) -> Result<usize>
where
    S: Read + Seek,
{
    match read_row(stream, 1) {
        Ok(line) => Ok(dialect.split(&line).len()),
        Err(CsvError::RowOutOfRange(_)) => Ok(0),
        Err(e) => Err(e),
    }
}

/// Collect the `column`-th field (1-indexed) of every row, row 1 first.
///
/// Each row is located independently through [`read_row`], so the cost is
/// quadratic in the number of rows. [`read_column_scan`] gives the same
/// result in one pass.
pub fn read_column<S>(
    stream: &mut S,
    column: usize,
    dialect: &Dialect,
) -> Result<Vec<String>>
where
    S: Read + Seek,
{
    check_column_index(column)?;

    let rows = count_rows(stream)?;
    let mut values = Vec::with_capacity(rows);
    for row in 1..=rows {
        let line = read_row(stream, row)?;
        pick_field(&mut values, dialect, &line, row, column)?;
    }
    Ok(values)
}

/// Single-pass equivalent of [`read_column`].
pub fn read_column_scan<S>(
    stream: &mut S,
    column: usize,
    dialect: &Dialect,
) -> Result<Vec<String>>
where
    S: Read + Seek,
{
    check_column_index(column)?;

    let mut values = Vec::new();
    scan_lines(stream, |row, line| {
        pick_field(&mut values, dialect, line, row, column)
    })?;
    Ok(values)
}

/// Every row of the stream split into fields, read in one pass.
pub fn read_all<S>(
    stream: &mut S,
    dialect: &Dialect,
) -> Result<Vec<Vec<String>>>
where
    S: Read + Seek,
{
    let mut table = Vec::new();
    scan_lines(stream, |_, line| {
        table.push(dialect.split(line));
        Ok(())
    })?;
    Ok(table)
}

/// Check that every row has as many fields as the first one and return
/// that width.
pub fn verify_rectangular<S>(stream: &mut S, dialect: &Dialect) -> Result<usize>
where
    S: Read + Seek,
{
    let mut width = None;
    scan_lines(stream, |row, line| {
        let found = dialect.split(line).len();
        let expected = *width.get_or_insert(found);
        if expected != found {
            return Err(CsvError::NotRectangular {
                row,
                expected,
                found,
            });
        }
        Ok(())
    })?;
    Ok(width.unwrap_or(0))
}

fn check_column_index(column: usize) -> Result<()> {
    if column == 0 {
        return Err(CsvError::InvalidArgument(
            "invalid column index: columns start at 1".to_owned(),
        ));
    }
    Ok(())
}

fn pick_field(
    values: &mut Vec<String>,
    dialect: &Dialect,
    line: &str,
    row: usize,
    column: usize,
) -> Result<()> {
    match dialect.split(line).into_iter().nth(column - 1) {
        Some(field) => values.push(field),
        None => match dialect.missing_field {
            MissingField::Empty => values.push(String::new()),
            MissingField::Skip => {
                log::debug!("Row {} has no column {}, skipping", row, column)
            }
            MissingField::Fail => {
                return Err(CsvError::MissingField { row, column })
            }
        },
    }
    Ok(())
}

/// Feed every line of the stream, numbered from 1, to `visit`.
fn scan_lines<S, F>(stream: &mut S, mut visit: F) -> Result<()>
where
    S: Read + Seek,
    F: FnMut(usize, &str) -> Result<()>,
{
    with_saved_cursor(stream, |s| {
        s.seek(SeekFrom::Start(0))?;
        let mut reader = BufReader::new(s);
        let mut buf = Vec::new();
        let mut row = 0;
        loop {
            buf.clear();
            if reader.read_until(b'\n', &mut buf)? == 0 {
                return Ok(());
            }
            row += 1;
            let line = line_from_bytes(std::mem::take(&mut buf))?;
            visit(row, &line)?;
        }
    })
}

/// Read the line under the cursor and leave the cursor right after its
/// terminator. `None` at the end of the stream.
fn read_line_at_cursor<S>(stream: &mut S) -> Result<Option<String>>
where
    S: Read + Seek,
{
    let mut reader = BufReader::new(&mut *stream);
    let mut buf = Vec::new();
    let read = reader.read_until(b'\n', &mut buf);
    // Hand the bytes buffered past the line back to the stream, also when
    // the read failed.
    let restored = reader.seek(SeekFrom::Current(0));
    let read = read?;
    restored?;

    if read == 0 {
        return Ok(None);
    }
    line_from_bytes(buf).map(Some)
}

fn line_from_bytes(mut buf: Vec<u8>) -> Result<String> {
    if buf.last() == Some(&b'\n') {
        buf.pop();
        if buf.last() == Some(&b'\r') {
            buf.pop();
        }
    }
    Ok(String::from_utf8(buf)?)
}
