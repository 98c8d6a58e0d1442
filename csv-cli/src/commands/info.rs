use std::io::Write;
use std::path::PathBuf;

use csv_utility::AccessMode;

use crate::{error::AppError, options::Options};

#[derive(Clone, Debug, clap::Args)]
#[clap(name = "info", about = "Show name, size and shape of a file")]
pub struct Info {
    #[clap(value_parser, help = "Path to the file")]
    path: PathBuf,
    #[clap(long, action, help = "Print the metadata as JSON")]
    json: bool,
}

impl Info {
    pub fn run(
        &self,
        options: &Options,
        out: &mut dyn Write,
    ) -> Result<(), AppError> {
        let mut file = options.open(&self.path, AccessMode::Read)?;
        let info = file.file_info()?;
        file.close()?;

        if self.json {
            writeln!(out, "{}", serde_json::to_string_pretty(&info)?)?;
        } else {
            write!(out, "{}", info)?;
        }
        Ok(())
    }
}
