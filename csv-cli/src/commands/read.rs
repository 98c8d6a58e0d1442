use std::io::Write;
use std::path::PathBuf;

use csv_utility::AccessMode;

use crate::{error::AppError, options::Options};

#[derive(Clone, Debug, clap::Args)]
#[clap(name = "row", about = "Print one row, counting from 1")]
pub struct Row {
    #[clap(value_parser, help = "Path to the file")]
    path: PathBuf,
    #[clap(help = "Row number")]
    row: usize,
}

impl Row {
    pub fn run(
        &self,
        options: &Options,
        out: &mut dyn Write,
    ) -> Result<(), AppError> {
        let mut file = options.open(&self.path, AccessMode::Read)?;
        writeln!(out, "{}", file.read_row(self.row)?)?;
        Ok(())
    }
}

#[derive(Clone, Debug, clap::Args)]
#[clap(name = "column", about = "Print one column, counting from 1")]
pub struct Column {
    #[clap(value_parser, help = "Path to the file")]
    path: PathBuf,
    #[clap(help = "Column number")]
    column: usize,
}

impl Column {
    pub fn run(
        &self,
        options: &Options,
        out: &mut dyn Write,
    ) -> Result<(), AppError> {
        let mut file = options.open(&self.path, AccessMode::Read)?;
        for value in file.read_column_scan(self.column)? {
            writeln!(out, "{}", value)?;
        }
        Ok(())
    }
}

#[derive(Clone, Debug, clap::Args)]
#[clap(name = "count", about = "Print the number of rows and columns")]
pub struct Count {
    #[clap(value_parser, help = "Path to the file")]
    path: PathBuf,
}

impl Count {
    pub fn run(
        &self,
        options: &Options,
        out: &mut dyn Write,
    ) -> Result<(), AppError> {
        let mut file = options.open(&self.path, AccessMode::Read)?;
        writeln!(out, "rows: {}", file.count_rows()?)?;
        writeln!(out, "columns: {}", file.count_columns()?)?;
        Ok(())
    }
}

#[derive(Clone, Debug, clap::Args)]
#[clap(name = "print", about = "Print every row")]
pub struct Print {
    #[clap(value_parser, help = "Path to the file")]
    path: PathBuf,
}

impl Print {
    pub fn run(
        &self,
        options: &Options,
        out: &mut dyn Write,
    ) -> Result<(), AppError> {
        let mut file = options.open(&self.path, AccessMode::Read)?;
        file.print_data(out)?;
        Ok(())
    }
}

#[derive(Clone, Debug, clap::Args)]
#[clap(name = "check", about = "Check that all rows have the same width")]
pub struct Check {
    #[clap(value_parser, help = "Path to the file")]
    path: PathBuf,
}

impl Check {
    pub fn run(
        &self,
        options: &Options,
        out: &mut dyn Write,
    ) -> Result<(), AppError> {
        let mut file = options.open(&self.path, AccessMode::Read)?;
        let columns = file.verify_rectangular()?;
        writeln!(out, "{} columns", columns)?;
        Ok(())
    }
}
