use std::io::Write;
use std::path::PathBuf;

use csv_utility::AccessMode;

use crate::{error::AppError, options::Options};

#[derive(Clone, Debug, clap::Args)]
#[clap(name = "append", about = "Append a row, creating the file if needed")]
pub struct Append {
    #[clap(value_parser, help = "Path to the file")]
    path: PathBuf,
    #[clap(
        required = true,
        value_delimiter = ',',
        help = "Comma-separated values of the new row"
    )]
    values: Vec<String>,
}

impl Append {
    pub fn run(
        &self,
        options: &Options,
        _out: &mut dyn Write,
    ) -> Result<(), AppError> {
        let mut file = options.open(&self.path, AccessMode::WriteAppend)?;
        let written = file.write_row(&self.values)?;
        file.close()?;
        log::info!("Appended {} values", written);
        Ok(())
    }
}

#[derive(Clone, Debug, clap::Args)]
#[clap(name = "headers", about = "Write the header line of an empty file")]
pub struct Headers {
    #[clap(value_parser, help = "Path to the file")]
    path: PathBuf,
    #[clap(
        required = true,
        value_delimiter = ',',
        help = "Comma-separated column names"
    )]
    names: Vec<String>,
}

impl Headers {
    pub fn run(
        &self,
        options: &Options,
        _out: &mut dyn Write,
    ) -> Result<(), AppError> {
        let mut file = options.open(&self.path, AccessMode::WriteAppend)?;
        file.write_column_headers(&self.names)?;
        file.close()?;
        Ok(())
    }
}
