use std::io::Write;

use clap::Subcommand;

use crate::{error::AppError, options::Options};

mod info;
mod read;
mod write;

#[derive(Debug, Subcommand)]
pub enum Commands {
    Info(info::Info),
    Row(read::Row),
    Column(read::Column),
    Count(read::Count),
    Print(read::Print),
    Check(read::Check),
    Append(write::Append),
    Headers(write::Headers),
}

impl Commands {
    pub fn run(
        &self,
        options: &Options,
        out: &mut dyn Write,
    ) -> Result<(), AppError> {
        match self {
            Commands::Info(info) => info.run(options, out),
            Commands::Row(row) => row.run(options, out),
            Commands::Column(column) => column.run(options, out),
            Commands::Count(count) => count.run(options, out),
            Commands::Print(print) => print.run(options, out),
            Commands::Check(check) => check.run(options, out),
            Commands::Append(append) => append.run(options, out),
            Commands::Headers(headers) => headers.run(options, out),
        }
    }
}
