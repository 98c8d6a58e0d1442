use std::path::{Path, PathBuf};

use csv_utility::{AccessMode, CsvConfig, CsvFile, FieldPolicy, MissingField};

use crate::error::AppError;

/// Settings shared by every subcommand. Flags override the config file.
#[derive(Clone, Debug, Default, clap::Args)]
pub struct Options {
    #[clap(
        long,
        short,
        global = true,
        help = "Field delimiter (a single byte, default ',')"
    )]
    pub delimiter: Option<char>,

    #[clap(long, global = true, action, help = "Drop empty fields")]
    pub collapse: bool,

    #[clap(
        long,
        global = true,
        value_parser = parse_missing_field,
        help = "What to do with short rows: empty, skip or fail"
    )]
    pub missing: Option<MissingField>,

    #[clap(long, global = true, value_parser, help = "JSON config file")]
    pub config: Option<PathBuf>,
}

impl Options {
    pub fn config(&self) -> Result<CsvConfig, AppError> {
        let mut config = match &self.config {
            Some(path) => CsvConfig::load(path).map_err(|e| {
                AppError::ConfigLoadError(
                    path.display().to_string(),
                    e.to_string(),
                )
            })?,
            None => CsvConfig::default(),
        };

        if let Some(delimiter) = self.delimiter {
            config.delimiter = delimiter;
        }
        if self.collapse {
            config.field_policy = FieldPolicy::Collapse;
        }
        if let Some(missing) = self.missing {
            config.missing_field = missing;
        }
        Ok(config)
    }

    pub fn open(
        &self,
        path: &Path,
        mode: AccessMode,
    ) -> Result<CsvFile, AppError> {
        let mut config = self.config()?;
        config.mode = mode;
        let mut file = CsvFile::with_config(path, &config)?;
        file.open()?;
        Ok(file)
    }
}

fn parse_missing_field(s: &str) -> Result<MissingField, String> {
    match s.to_lowercase().as_str() {
        "empty" => Ok(MissingField::Empty),
        "skip" => Ok(MissingField::Skip),
        "fail" => Ok(MissingField::Fail),
        _ => Err("Invalid missing field policy".to_owned()),
    }
}
