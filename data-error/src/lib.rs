use std::{io, str::Utf8Error, string::FromUtf8Error};

use thiserror::Error;

pub type Result<T> = std::result::Result<T, CsvError>;

#[derive(Error, Debug)]
pub enum CsvError {
    #[error("File is not open")]
    NotOpen,
    #[error("File is already open")]
    AlreadyOpen,
    #[error("Wrong mode: cannot {operation} in {mode} mode")]
    WrongMode {
        mode: String,
        operation: &'static str,
    },
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("Row {0} is out of range")]
    RowOutOfRange(usize),
    #[error("Row {row} has no field at column {column}")]
    MissingField { row: usize, column: usize },
    #[error("Row {row} has {found} columns, expected {expected}")]
    NotRectangular {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[error("Parsing error")]
    Parse,
    #[error("Config error: {0}")]
    Config(String),
}

impl From<Utf8Error> for CsvError {
    fn from(_: Utf8Error) -> Self {
        Self::Parse
    }
}

impl From<FromUtf8Error> for CsvError {
    fn from(_: FromUtf8Error) -> Self {
        Self::Parse
    }
}

impl From<serde_json::Error> for CsvError {
    fn from(e: serde_json::Error) -> Self {
        Self::Config(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn io_errors_convert() {
        let err: CsvError =
            io::Error::new(io::ErrorKind::NotFound, "missing").into();
        assert!(matches!(err, CsvError::Io(_)));
    }

    #[test]
    fn invalid_utf8_is_a_parse_error() {
        let err: CsvError = String::from_utf8(vec![0xff, 0xfe])
            .unwrap_err()
            .into();
        assert!(matches!(err, CsvError::Parse));
    }

    #[test]
    fn json_errors_become_config_errors() {
        let err: CsvError = serde_json::from_str::<u32>("\"seven\"")
            .unwrap_err()
            .into();
        assert!(matches!(err, CsvError::Config(_)));
    }

    #[test]
    fn wrong_mode_message_names_the_operation() {
        let err = CsvError::WrongMode {
            mode: "write_append".to_owned(),
            operation: "read",
        };
        assert_eq!(
            err.to_string(),
            "Wrong mode: cannot read in write_append mode"
        );
    }
}
