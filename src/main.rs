mod browser;
mod cli;
mod core;
mod error;
mod http;
mod payload;
mod reporting;
mod validation;
mod xss;

use clap::Parser;
use cli::args::{Cli, OutputFormat};
use crate::core::context::Context;
use crate::core::engine::Engine;
use reporting::reporter::Reporter;
use std::process::ExitCode;

const BANNER: &str = r#"
 ╔══════════════════════════════════════════════════════╗
 ║   x s s p r o b e                                    ║
 ║   Reflected & DOM-based XSS probe (headless browser) ║
 ╚══════════════════════════════════════════════════════╝
"#;

fn print_banner() {
    println!("\x1b[36m{}\x1b[0m", BANNER); // Cyan color
}

/// stdout must carry nothing but the report when JSON goes there
fn wants_banner(cli: &Cli) -> bool {
    let json_on_stdout = cli.format == OutputFormat::Json && cli.output.is_none();
    !cli.no_banner && !cli.quiet && !json_on_stdout
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    if wants_banner(&cli) {
        print_banner();
    }

    let ctx = Context::from_cli(cli)?;

    tracing_subscriber::fmt()
        .with_max_level(ctx.log_level())
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let output_format = ctx.output_format;
    let output_file = ctx.output_file.clone();
    let browser = ctx.browser.as_str();

    let engine = Engine::new(ctx)?;
    let mut reporter = Reporter::new();
    let summary = engine.run(&mut reporter).await;

    if summary.urls_total == 0 {
        return Ok(ExitCode::FAILURE);
    }

    let notable = reporter.notable();
    let rendered = match output_format {
        OutputFormat::Text => reporting::text::render(&summary, &notable),
        OutputFormat::Json => reporting::json::render(&summary, &notable, browser)?,
    };

    match output_file {
        Some(path) => {
            std::fs::write(&path, rendered)?;
            tracing::info!("Report written to {}", path.display());
        }
        None => println!("{}", rendered),
    }

    Ok(ExitCode::SUCCESS)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cli(args: &[&str]) -> Cli {
        let mut argv = vec!["xssprobe", "https://x.test/?a=1"];
        argv.extend_from_slice(args);
        Cli::try_parse_from(argv).unwrap()
    }

    #[test]
    fn test_banner_shown_for_text_report() {
        assert!(wants_banner(&cli(&[])));
        assert!(!wants_banner(&cli(&["--no-banner"])));
        assert!(!wants_banner(&cli(&["-q"])));
    }

    #[test]
    fn test_no_banner_when_json_goes_to_stdout() {
        assert!(!wants_banner(&cli(&["--format", "json"])));
        assert!(wants_banner(&cli(&["--format", "json", "-o", "report.json"])));
    }
}
