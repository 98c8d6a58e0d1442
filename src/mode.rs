use std::fmt;
use std::fs::OpenOptions;
use std::str::FromStr;

use data_error::CsvError;
use serde::{Deserialize, Serialize};

/// How a [`crate::CsvFile`] opens its underlying file.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum AccessMode {
    /// Read an existing file.
    #[default]
    Read,
    /// Append rows, creating the file if needed.
    WriteAppend,
    /// Start from an empty file.
    WriteTruncate,
    ReadWriteAppend,
    ReadWriteTruncate,
}

impl AccessMode {
    pub fn is_readable(&self) -> bool {
        matches!(
            self,
            AccessMode::Read
                | AccessMode::ReadWriteAppend
                | AccessMode::ReadWriteTruncate
        )
    }

    pub fn is_writable(&self) -> bool {
        !matches!(self, AccessMode::Read)
    }

    /// Options for opening a file in this mode. The file is always opened
    /// with read access so appends can inspect the last byte; reads are
    /// still refused by [`crate::CsvFile`] in write-only modes.
    pub fn open_options(&self) -> OpenOptions {
        let mut options = OpenOptions::new();
        options.read(true);
        match self {
            AccessMode::Read => {}
            AccessMode::WriteAppend | AccessMode::ReadWriteAppend => {
                options.append(true).create(true);
            }
            AccessMode::WriteTruncate | AccessMode::ReadWriteTruncate => {
                options.write(true).truncate(true).create(true);
            }
        }
        options
    }

    fn as_str(&self) -> &'static str {
        match self {
            AccessMode::Read => "read",
            AccessMode::WriteAppend => "write_append",
            AccessMode::WriteTruncate => "write_truncate",
            AccessMode::ReadWriteAppend => "read_write_append",
            AccessMode::ReadWriteTruncate => "read_write_truncate",
        }
    }
}

impl fmt::Display for AccessMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AccessMode {
    type Err = CsvError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "read" => Ok(AccessMode::Read),
            "write_append" => Ok(AccessMode::WriteAppend),
            "write_truncate" => Ok(AccessMode::WriteTruncate),
            "read_write_append" => Ok(AccessMode::ReadWriteAppend),
            "read_write_truncate" => Ok(AccessMode::ReadWriteTruncate),
            other => Err(CsvError::InvalidArgument(format!(
                "unknown access mode: {}",
                other
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(AccessMode::Read, true, false)]
    #[case(AccessMode::WriteAppend, false, true)]
    #[case(AccessMode::WriteTruncate, false, true)]
    #[case(AccessMode::ReadWriteAppend, true, true)]
    #[case(AccessMode::ReadWriteTruncate, true, true)]
    fn capabilities(
        #[case] mode: AccessMode,
        #[case] readable: bool,
        #[case] writable: bool,
    ) {
        assert_eq!(mode.is_readable(), readable);
        assert_eq!(mode.is_writable(), writable);
        assert_eq!(mode.to_string().parse::<AccessMode>().unwrap(), mode);
    }

    #[test]
    fn unknown_mode_is_rejected() {
        assert!(matches!(
            "sideways".parse::<AccessMode>(),
            Err(CsvError::InvalidArgument(_))
        ));
    }
}
