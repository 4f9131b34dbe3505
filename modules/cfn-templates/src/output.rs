use clap::{Args, ValueEnum};

use crate::error::Result;
use crate::template::Template;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Yaml,
    Json,
}

/// Flags shared by the template printing binaries.
#[derive(Debug, Args)]
pub struct OutputArgs {
    /// Output format of the template
    #[arg(long, value_enum, default_value_t = OutputFormat::Yaml)]
    pub format: OutputFormat,
}

impl OutputArgs {
    pub fn render(&self, template: &Template) -> Result<String> {
        match self.format {
            OutputFormat::Yaml => template.to_yaml(),
            OutputFormat::Json => template.to_json(),
        }
    }
}
