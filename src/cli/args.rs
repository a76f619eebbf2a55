use crate::browser::BrowserKind;
use crate::payload::generator::StrategySelection;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// xssprobe – reflected and DOM-based XSS probe
#[derive(Parser, Debug)]
#[command(
    name = "xssprobe",
    version,
    about = "Reflected and DOM-based XSS vulnerability scanner",
    long_about = r#"
xssprobe mutates every query-string parameter of the given URL(s), loads each
mutated URL in a headless browser, and inspects the rendered page for signs
that the injected text came back unescaped.

STRATEGIES:
  • chars     Append < > " ' to each value and after each key=value pair
  • payloads  Replace each value with a fixed XSS payload, look for alert(1)
  • all       Both of the above

DETECTION:
  Literal substring checks on the rendered markup. Every hit is reported
  as POTENTIAL: ordinary pages contain < and > too.
"#,
    after_help = r#"EXAMPLES:
  xssprobe "https://example.com/search?q=test"
  xssprobe urls.txt --browser firefox
  xssprobe urls.txt --browser firefox --webdriver-url http://localhost:4444
  xssprobe urls.txt --strategy payloads --compare
  xssprobe "https://example.com/?id=1" --format json -o report.json"#
)]
pub struct Cli {
    /// URL (http:// or https://) or path to a newline-delimited list of URLs
    #[arg(value_name = "INPUT")]
    pub input: String,

    // ═══════════════════════════════════════════════════════════════════
    // BROWSER
    // ═══════════════════════════════════════════════════════════════════

    /// Browser to use for scanning
    #[arg(long, value_enum, default_value_t = BrowserKind::Chrome, help_heading = "BROWSER")]
    pub browser: BrowserKind,

    /// Seconds to wait after navigation before reading the page
    #[arg(long, default_value_t = 3, help_heading = "BROWSER")]
    pub settle: u64,

    /// geckodriver binary started for each firefox fetch
    #[arg(long, default_value = "geckodriver", help_heading = "BROWSER")]
    pub geckodriver: PathBuf,

    /// Use an already running WebDriver endpoint instead of starting geckodriver
    #[arg(long = "webdriver-url", help_heading = "BROWSER")]
    pub webdriver_url: Option<String>,

    /// Chrome/Chromium binary (auto-detected when omitted)
    #[arg(long = "chrome-path", help_heading = "BROWSER")]
    pub chrome_path: Option<PathBuf>,

    // ═══════════════════════════════════════════════════════════════════
    // MUTATION
    // ═══════════════════════════════════════════════════════════════════

    /// Mutation strategy
    #[arg(long, value_enum, default_value_t = StrategySelection::Chars, help_heading = "MUTATION")]
    pub strategy: StrategySelection,

    /// Percent-encode injected text before inserting it into the URL
    #[arg(long, help_heading = "MUTATION")]
    pub encode: bool,

    /// Compare plain HTTP source with the rendered source for each candidate
    #[arg(short, long, help_heading = "MUTATION")]
    pub compare: bool,

    // ═══════════════════════════════════════════════════════════════════
    // OUTPUT
    // ═══════════════════════════════════════════════════════════════════

    /// Skip the banner display
    #[arg(long, help_heading = "OUTPUT")]
    pub no_banner: bool,

    /// Quiet mode (warnings and errors only)
    #[arg(short, long, conflicts_with = "verbose", help_heading = "OUTPUT")]
    pub quiet: bool,

    /// Verbose output (debug level)
    #[arg(short, long, help_heading = "OUTPUT")]
    pub verbose: bool,

    /// Summary format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text, help_heading = "OUTPUT")]
    pub format: OutputFormat,

    /// Write the summary to a file instead of stdout
    #[arg(short, long, help_heading = "OUTPUT")]
    pub output: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}
