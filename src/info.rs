use std::fmt;

use serde::{Deserialize, Serialize};

/// Snapshot of a CSV file's shape. Never cached: it is rebuilt from the
/// live file each time [`crate::CsvFile::file_info`] is called.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CsvFileInfo {
    pub filename: String,
    pub column_names: Vec<String>,
    pub delimiter: char,
    pub rows: usize,
    pub columns: usize,
    pub size: u64,
}

impl CsvFileInfo {
    /// All fields are populated.
    pub fn is_valid(&self) -> bool {
        !self.filename.is_empty()
            && !self.column_names.is_empty()
            && self.delimiter != '\0'
            && self.rows != 0
            && self.columns != 0
            && self.size != 0
    }
}

impl fmt::Display for CsvFileInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "CSV Data:")?;
        writeln!(
            f,
            "\tValid:             {}",
            if self.is_valid() { "Valid" } else { "Not Valid" }
        )?;
        writeln!(f, "\tFilename:          {}", self.filename)?;
        writeln!(f, "\tDelimiter:         '{}'", self.delimiter)?;
        writeln!(f, "\tNumber of Rows:    {}", self.rows)?;
        writeln!(f, "\tNumber of Columns: {}", self.columns)?;
        writeln!(f, "\tColumn Names:")?;
        for (index, name) in self.column_names.iter().enumerate() {
            writeln!(f, "\t\tColumn {}: \"{}\"", index + 1, name)?;
        }
        writeln!(f, "\tFile Size:         {}", self.size)
    }
}
