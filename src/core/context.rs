//! Immutable run configuration built once from the command line

use crate::browser::{BrowserKind, RenderOptions};
use crate::cli::args::{Cli, OutputFormat};
use crate::payload::generator::Strategy;
use std::path::PathBuf;
use std::time::Duration;
use tracing::Level;

#[derive(Debug, Clone)]
pub struct Context {
    pub input: String,
    pub browser: BrowserKind,
    pub render: RenderOptions,
    pub strategies: Vec<Strategy>,
    pub encode: bool,
    pub compare: bool,
    pub quiet: bool,
    pub verbose: bool,
    pub output_format: OutputFormat,
    pub output_file: Option<PathBuf>,
}

impl Context {
    pub fn from_cli(cli: Cli) -> anyhow::Result<Self> {
        if cli.input.trim().is_empty() {
            anyhow::bail!("INPUT must be a URL or a path to a URL list");
        }

        let render = RenderOptions {
            settle: Duration::from_secs(cli.settle),
            chrome_path: cli.chrome_path,
            geckodriver: cli.geckodriver,
            webdriver_url: cli.webdriver_url,
        };

        Ok(Self {
            input: cli.input,
            browser: cli.browser,
            render,
            strategies: cli.strategy.strategies(),
            encode: cli.encode,
            compare: cli.compare,
            quiet: cli.quiet,
            verbose: cli.verbose,
            output_format: cli.format,
            output_file: cli.output,
        })
    }

    /// Maximum log level, fixed at startup
    pub fn log_level(&self) -> Level {
        if self.verbose {
            Level::DEBUG
        } else if self.quiet {
            Level::WARN
        } else {
            Level::INFO
        }
    }
}
