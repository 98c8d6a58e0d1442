//! Reading and writing delimiter-separated text files.
//!
//! [`CsvFile`] manages a file on disk: opening it in an [`AccessMode`],
//! writing rows, and looking rows and columns up by position. The lookups
//! themselves live in [`locator`] and work on any `Read + Seek` stream, so
//! they can be used without a file as well:
//!
//! ```
//! use std::io::Cursor;
//! use csv_utility::locator::{read_column, Dialect};
//!
//! let mut stream = Cursor::new(b"one,two,three\n1,2,3\n4,5,6\n".to_vec());
//! let column = read_column(&mut stream, 2, &Dialect::default()).unwrap();
//! assert_eq!(column, vec!["two", "2", "5"]);
//! ```
//!
//! Fields are split on a single byte and quotes are not interpreted.

pub mod config;
pub mod cursor;
mod handle;
pub mod info;
pub mod locator;
pub mod mode;
pub mod tokenizer;

pub use data_error::{CsvError, Result};

pub use config::CsvConfig;
pub use handle::CsvFile;
pub use info::CsvFileInfo;
pub use locator::{Dialect, MissingField};
pub use mode::AccessMode;
pub use tokenizer::{tokenize, FieldPolicy};
