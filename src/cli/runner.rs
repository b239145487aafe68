//! CLI runner - executes commands

use crate::cli::commands::{Cli, Commands, OutputFormat};
use crate::config::ParserConfig;
use crate::error::{Result, ResultExt};
use crate::parser::{Operation, ResponseFormat, ResponseParser};
use serde::Serialize;
use serde_json::json;
use std::fs;
use std::io::Read;
use std::path::Path;
use tracing::debug;

/// CLI runner
pub struct Runner {
    cli: Cli,
    config: ParserConfig,
}

impl Runner {
    /// Create a new runner over an already loaded config
    pub fn new(cli: Cli, config: ParserConfig) -> Self {
        Self { cli, config }
    }

    /// Load the config file named on the command line, or defaults when none is given
    pub fn load_config(cli: &Cli) -> Result<ParserConfig> {
        match &cli.config {
            Some(path) => ParserConfig::from_file(path),
            None => Ok(ParserConfig::default()),
        }
    }

    /// Run the CLI command, printing its output
    pub fn run(&self) -> Result<()> {
        let output = self.execute()?;
        println!("{output}");
        Ok(())
    }

    /// Run the CLI command and return its output
    pub fn execute(&self) -> Result<String> {
        let format = self.response_format()?;

        match &self.cli.command {
            Commands::Capabilities { file } => {
                let body = read_body(file)?;
                self.render(&format.parse_capability_urls(&body)?)
            }
            Commands::Metadata { file } => {
                let body = read_body(file)?;
                self.render(&format.parse_metadata(&body)?)
            }
            Commands::System { file } => {
                let body = read_body(file)?;
                self.render(&format.parse_system(&body)?)
            }
            Commands::Search { file } => {
                let body = read_body(file)?;
                self.render(&format.parse_search(&body)?)
            }
            Commands::Formats => self.formats(),
        }
    }

    /// Format from the command line, falling back to the config
    fn response_format(&self) -> Result<ResponseFormat> {
        let format = match &self.cli.response_format {
            Some(name) => ResponseFormat::select(name)?,
            None => self.config.format,
        };
        debug!(response_format = %format, "selected response format");
        Ok(format)
    }

    fn formats(&self) -> Result<String> {
        let formats: Vec<_> = ResponseFormat::ALL
            .iter()
            .map(|format| {
                let operations: Vec<&str> = [
                    Operation::CapabilityUrls,
                    Operation::Metadata,
                    Operation::System,
                    Operation::Search,
                ]
                .into_iter()
                .filter(|operation| format.supports(*operation))
                .map(Operation::name)
                .collect();
                json!({ "name": format.name(), "operations": operations })
            })
            .collect();
        self.render(&formats)
    }

    fn render<T: Serialize>(&self, value: &T) -> Result<String> {
        let output = match self.cli.output {
            OutputFormat::Json => serde_json::to_string(value)?,
            OutputFormat::Pretty => serde_json::to_string_pretty(value)?,
        };
        Ok(output)
    }
}

/// Read a reply body from a file, or stdin for "-"
fn read_body(path: &Path) -> Result<Vec<u8>> {
    if path.as_os_str() == "-" {
        let mut body = Vec::new();
        std::io::stdin()
            .read_to_end(&mut body)
            .context("Failed to read stdin")?;
        return Ok(body);
    }

    fs::read(path).with_context(|| format!("Failed to read {}", path.display()))
}
