use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use data_error::{CsvError, Result};
use serde::{Deserialize, Serialize};

use crate::locator::{Dialect, MissingField};
use crate::mode::AccessMode;
use crate::tokenizer::{validate_delimiter, FieldPolicy};

pub const DEFAULT_EXTENSION: &str = "csv";

/// Settings for a [`crate::CsvFile`], usually loaded from a JSON file.
///
/// ```json
/// { "delimiter": ";", "mode": "read_write_append", "missing_field": "fail" }
/// ```
///
/// Missing keys fall back to their defaults.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CsvConfig {
    pub delimiter: char,
    pub mode: AccessMode,
    pub field_policy: FieldPolicy,
    pub missing_field: MissingField,
    pub extension: String,
}

impl Default for CsvConfig {
    fn default() -> Self {
        Self {
            delimiter: ',',
            mode: AccessMode::default(),
            field_policy: FieldPolicy::default(),
            missing_field: MissingField::default(),
            extension: DEFAULT_EXTENSION.to_owned(),
        }
    }
}

impl CsvConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let file = File::open(path)?;
        let config: CsvConfig =
            serde_json::from_reader(BufReader::new(file))?;
        config.validate()?;
        log::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        validate_delimiter(self.delimiter)?;
        if self.extension.is_empty() || self.extension.contains('.') {
            return Err(CsvError::Config(format!(
                "invalid extension {:?}",
                self.extension
            )));
        }
        Ok(())
    }

    pub fn dialect(&self) -> Result<Dialect> {
        Ok(Dialect {
            delimiter: validate_delimiter(self.delimiter)?,
            field_policy: self.field_policy,
            missing_field: self.missing_field,
        })
    }
}
