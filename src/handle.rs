use std::fmt::Display;
use std::fs::{self, File};
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

use data_error::{CsvError, Result};
use itertools::Itertools;

use crate::config::{CsvConfig, DEFAULT_EXTENSION};
use crate::cursor::at_end;
use crate::info::CsvFileInfo;
use crate::locator::{self, Dialect, MissingField};
use crate::mode::AccessMode;
use crate::tokenizer::{validate_delimiter, FieldPolicy};

/// A delimiter-separated file on disk together with the settings used to
/// read and write it.
///
/// The file is only touched between [`CsvFile::open`] and
/// [`CsvFile::close`]. Every read goes through the live file, so counts and
/// metadata always reflect what is currently on disk.
#[derive(Debug)]
pub struct CsvFile {
    path: PathBuf,
    mode: AccessMode,
    dialect: Dialect,
    extension: String,
    file: Option<File>,
}

impl CsvFile {
    /// Describe a file without opening it. A path without an extension
    /// gets `.csv` appended.
    pub fn new(path: impl AsRef<Path>, mode: AccessMode) -> Self {
        Self {
            path: with_default_extension(path.as_ref(), DEFAULT_EXTENSION),
            mode,
            dialect: Dialect::default(),
            extension: DEFAULT_EXTENSION.to_owned(),
            file: None,
        }
    }

    pub fn with_config(
        path: impl AsRef<Path>,
        config: &CsvConfig,
    ) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            path: with_default_extension(path.as_ref(), &config.extension),
            mode: config.mode,
            dialect: config.dialect()?,
            extension: config.extension.clone(),
            file: None,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn mode(&self) -> AccessMode {
        self.mode
    }

    pub fn delimiter(&self) -> char {
        char::from(self.dialect.delimiter)
    }

    pub fn dialect(&self) -> &Dialect {
        &self.dialect
    }

    pub fn set_file_name(&mut self, path: impl AsRef<Path>) -> Result<()> {
        if self.is_open() {
            return Err(CsvError::AlreadyOpen);
        }
        self.path = with_default_extension(path.as_ref(), &self.extension);
        Ok(())
    }

    pub fn set_delimiter(&mut self, delimiter: char) -> Result<()> {
        self.dialect.delimiter = validate_delimiter(delimiter)?;
        log::debug!("Delimiter of {} set to {:?}", self.label(), delimiter);
        Ok(())
    }

    pub fn set_mode(&mut self, mode: AccessMode) -> Result<()> {
        if self.is_open() {
            return Err(CsvError::AlreadyOpen);
        }
        self.mode = mode;
        Ok(())
    }

    pub fn set_field_policy(&mut self, policy: FieldPolicy) {
        self.dialect.field_policy = policy;
    }

    pub fn set_missing_field(&mut self, missing: MissingField) {
        self.dialect.missing_field = missing;
    }

    /// Open the file in the configured mode. Writable modes create the
    /// file and any missing parent directories.
    pub fn open(&mut self) -> Result<()> {
        if self.is_open() {
            return Err(CsvError::AlreadyOpen);
        }

        if self.mode.is_writable() {
            if let Some(parent) = self.path.parent() {
                if !parent.as_os_str().is_empty() {
                    fs::create_dir_all(parent)?;
                }
            }
        }

        let file = self.mode.open_options().open(&self.path)?;
        self.file = Some(file);
        log::info!("Opened {} in {} mode", self.label(), self.mode);
        Ok(())
    }

    pub fn is_open(&self) -> bool {
        self.file.is_some()
    }

    pub fn close(&mut self) -> Result<()> {
        let mut file = self.file.take().ok_or(CsvError::NotOpen)?;
        file.flush()?;
        log::info!("Closed {}", self.label());
        Ok(())
    }

    /// Write the header line. Only allowed while the file is still empty.
    pub fn write_column_headers<S: AsRef<str>>(
        &mut self,
        names: &[S],
    ) -> Result<usize> {
        let file = self.writable("write column headers")?;
        if file.metadata()?.len() != 0 {
            return Err(CsvError::InvalidArgument(
                "column headers must be the first line of the file"
                    .to_owned(),
            ));
        }
        let names: Vec<&str> = names.iter().map(AsRef::as_ref).collect();
        self.write_row(&names)
    }

    /// Append one row and return the number of fields written.
    ///
    /// Values are written with their `Display` form and are not escaped,
    /// so a value containing the delimiter reads back as several fields.
    ///
    /// A file whose last line is not terminated gets the missing `\n`
    /// first, so the new row never merges into the previous one. An empty
    /// `values` slice is rejected since it would add a row without fields.
    pub fn write_row<T: Display>(&mut self, values: &[T]) -> Result<usize> {
        if values.is_empty() {
            return Err(CsvError::InvalidArgument(
                "a row needs at least one field".to_owned(),
            ));
        }
        let line = join_line(values, self.delimiter());
        let file = self.writable("write a row")?;
        if ends_unterminated(file)? {
            log::debug!("Terminating the last line before appending");
            file.write_all(b"\n")?;
        }
        file.seek(SeekFrom::End(0))?;
        file.write_all(line.as_bytes())?;
        log::trace!("Wrote {} fields to {}", values.len(), self.label());
        Ok(values.len())
    }

    /// Write a whole table to `path`, replacing whatever was there, using
    /// this file's delimiter. Returns the number of values written.
    ///
    /// This does not touch the file managed by `self`.
    pub fn write_table<T: Display>(
        &self,
        path: impl AsRef<Path>,
        rows: &[Vec<T>],
    ) -> Result<usize> {
        let path = with_default_extension(path.as_ref(), &self.extension);
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        if rows.iter().any(Vec::is_empty) {
            return Err(CsvError::InvalidArgument(
                "a row needs at least one field".to_owned(),
            ));
        }

        let mut content = String::new();
        let mut written = 0;
        for row in rows {
            content.push_str(&join_line(row, self.delimiter()));
            written += row.len();
        }
        fs::write(&path, content)?;

        log::info!(
            "{} values in {} rows have been written to {}",
            written,
            rows.len(),
            path.display()
        );
        Ok(written)
    }

    /// See [`locator::read_row`].
    pub fn read_row(&mut self, row: usize) -> Result<String> {
        locator::read_row(self.readable("read a row")?, row)
    }

    /// See [`locator::read_column`].
    pub fn read_column(&mut self, column: usize) -> Result<Vec<String>> {
        let dialect = self.dialect;
        locator::read_column(self.readable("read a column")?, column, &dialect)
    }

    /// Same result as [`CsvFile::read_column`] in a single pass.
    pub fn read_column_scan(&mut self, column: usize) -> Result<Vec<String>> {
        let dialect = self.dialect;
        locator::read_column_scan(
            self.readable("read a column")?,
            column,
            &dialect,
        )
    }

    pub fn read_all(&mut self) -> Result<Vec<Vec<String>>> {
        let dialect = self.dialect;
        locator::read_all(self.readable("read the table")?, &dialect)
    }

    pub fn count_rows(&mut self) -> Result<usize> {
        locator::count_rows(self.readable("count rows")?)
    }

    pub fn count_columns(&mut self) -> Result<usize> {
        let dialect = self.dialect;
        locator::count_columns(self.readable("count columns")?, &dialect)
    }

    /// Fields of the first line, or nothing for an empty file.
    pub fn column_headers(&mut self) -> Result<Vec<String>> {
        match self.read_row(1) {
            Ok(line) => Ok(self.parse_line(&line)),
            Err(CsvError::RowOutOfRange(_)) => Ok(Vec::new()),
            Err(e) => Err(e),
        }
    }

    /// See [`locator::verify_rectangular`].
    pub fn verify_rectangular(&mut self) -> Result<usize> {
        let dialect = self.dialect;
        locator::verify_rectangular(self.readable("verify rows")?, &dialect)
    }

    pub fn parse_line(&self, line: &str) -> Vec<String> {
        self.dialect.split(line)
    }

    pub fn is_end_of_file(&mut self) -> Result<bool> {
        let file = self.file.as_mut().ok_or(CsvError::NotOpen)?;
        at_end(file)
    }

    /// Size in bytes, taken from the open file when there is one.
    pub fn file_size(&self) -> Result<u64> {
        let metadata = match &self.file {
            Some(file) => file.metadata()?,
            None => fs::metadata(&self.path)?,
        };
        Ok(metadata.len())
    }

    /// Rebuild the metadata snapshot from the file. In write-only modes
    /// the rows cannot be read, so only name, delimiter and size are set.
    pub fn file_info(&mut self) -> Result<CsvFileInfo> {
        if !self.is_open() {
            return Err(CsvError::NotOpen);
        }

        let mut info = CsvFileInfo {
            filename: self.path.display().to_string(),
            delimiter: self.delimiter(),
            size: self.file_size()?,
            ..CsvFileInfo::default()
        };
        if self.mode.is_readable() {
            info.column_names = self.column_headers()?;
            info.rows = self.count_rows()?;
            info.columns = self.count_columns()?;
        }
        Ok(info)
    }

    /// Truncate the file to zero bytes and rewind.
    pub fn clear(&mut self) -> Result<()> {
        let file = self.writable("clear the file")?;
        file.set_len(0)?;
        file.seek(SeekFrom::Start(0))?;
        log::info!("Cleared {}", self.label());
        Ok(())
    }

    /// Write every row to `out`, numbered from 1, with fields separated
    /// by `" | "`.
    pub fn print_data<W: Write + ?Sized>(&mut self, out: &mut W) -> Result<()> {
        let rows = self.read_all()?;
        for (index, fields) in rows.iter().enumerate() {
            writeln!(out, "{:>4}: {}", index + 1, fields.join(" | "))?;
        }
        Ok(())
    }

    fn readable(&mut self, operation: &'static str) -> Result<&mut File> {
        let mode = self.mode;
        let file = self.file.as_mut().ok_or(CsvError::NotOpen)?;
        if !mode.is_readable() {
            return Err(CsvError::WrongMode {
                mode: mode.to_string(),
                operation,
            });
        }
        Ok(file)
    }

    fn writable(&mut self, operation: &'static str) -> Result<&mut File> {
        let mode = self.mode;
        let file = self.file.as_mut().ok_or(CsvError::NotOpen)?;
        if !mode.is_writable() {
            return Err(CsvError::WrongMode {
                mode: mode.to_string(),
                operation,
            });
        }
        Ok(file)
    }

    fn label(&self) -> String {
        self.path.display().to_string()
    }
}

fn with_default_extension(path: &Path, extension: &str) -> PathBuf {
    if path.extension().is_some() {
        path.to_path_buf()
    } else {
        path.with_extension(extension)
    }
}

/// Whether the file is non-empty and its last byte is not `\n`. Leaves
/// the cursor at the end of the file.
fn ends_unterminated(file: &mut File) -> Result<bool> {
    if file.seek(SeekFrom::End(0))? == 0 {
        return Ok(false);
    }
    file.seek(SeekFrom::End(-1))?;
    let mut last = [0u8; 1];
    file.read_exact(&mut last)?;
    Ok(last[0] != b'\n')
}

fn join_line<T: Display>(values: &[T], delimiter: char) -> String {
    let mut line = values.iter().join(&delimiter.to_string());
    line.push('\n');
    line
}
