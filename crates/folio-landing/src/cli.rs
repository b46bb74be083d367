#![forbid(unsafe_code)]

//! Command-line argument parsing for the landing page.
//!
//! Parses args manually (no external dependencies) to keep the binary lean.
//! Supports environment variable overrides via `FOLIO_*` prefix.

use std::env;
use std::fmt;
use std::process;

use folio_layout::ViewportClassifier;

const VERSION: &str = env!("CARGO_PKG_VERSION");

const HELP_TEXT: &str = "\
Folio - AI Book Generator landing page in the terminal

USAGE:
    folio-landing [OPTIONS]

OPTIONS:
    --px-per-cell=N      Logical pixels per terminal column (default: 8)
    --no-mouse           Disable mouse capture (no parallax or clicks)
    --exit-after-ms=N    Quit automatically after N milliseconds
    --snapshot=WxH       Render one settled frame headless and print it
    --dump-view          Print the composed showcase view as JSON
    --help, -h           Show this help message
    --version, -V        Show version

KEYBINDINGS:
    Tab / Shift-Tab      Next / previous technology panel
    Left / Right, h / l  Same as above
    1-6                  Jump to a panel
    j / k, Up / Down     Scroll one row
    Space, PgUp / PgDn   Scroll one page
    Home / End           Top / bottom of the page
    t                    Jump to the technology showcase
    q / Esc / Ctrl+C     Quit

ENVIRONMENT VARIABLES:
    FOLIO_PX_PER_CELL        Override --px-per-cell
    FOLIO_NO_MOUSE           Any value disables mouse capture
    FOLIO_EXIT_AFTER_MS      Override --exit-after-ms
    FOLIO_LOG_FILE           Write tracing output to this file
    FOLIO_LOG                Tracing filter (default: info)";

/// Parsed command-line options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Opts {
    /// Logical pixels per terminal column.
    pub px_per_cell: u16,
    /// Whether mouse events are enabled.
    pub mouse: bool,
    /// Auto-exit after this many milliseconds (0 = disabled).
    pub exit_after_ms: u64,
    /// Headless snapshot size.
    pub snapshot: Option<(u16, u16)>,
    /// Print the showcase view as JSON and exit.
    pub dump_view: bool,
}

impl Default for Opts {
    fn default() -> Self {
        Self {
            px_per_cell: ViewportClassifier::DEFAULT_PX_PER_CELL,
            mouse: true,
            exit_after_ms: 0,
            snapshot: None,
            dump_view: false,
        }
    }
}

/// What the command line asked for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Run(Opts),
    Help,
    Version,
}

/// A rejected argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CliError {
    /// `--flag=value` with an unparsable value.
    InvalidValue { flag: &'static str, value: String },
    /// Anything not listed in the help text.
    UnknownArgument(String),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidValue { flag, value } => write!(f, "Invalid {flag} value: {value}"),
            Self::UnknownArgument(arg) => write!(f, "Unknown argument: {arg}"),
        }
    }
}

impl std::error::Error for CliError {}

fn parse_size(val: &str) -> Option<(u16, u16)> {
    let (w, h) = val.split_once(['x', 'X'])?;
    let (w, h) = (w.parse().ok()?, h.parse().ok()?);
    (w > 0 && h > 0).then_some((w, h))
}

fn parse_px(val: &str) -> Option<u16> {
    val.parse().ok().filter(|&n| n > 0)
}

impl Opts {
    /// Parse command-line arguments and environment variables.
    ///
    /// Environment variables take precedence over defaults but are overridden
    /// by explicit command-line flags. Prints and exits on `--help`,
    /// `--version`, and bad input.
    pub fn parse() -> Self {
        let args: Vec<String> = env::args().skip(1).collect();
        match Self::parse_from(&args, |key| env::var(key).ok()) {
            Ok(Action::Run(opts)) => opts,
            Ok(Action::Help) => {
                println!("{HELP_TEXT}");
                process::exit(0);
            }
            Ok(Action::Version) => {
                println!("folio-landing {VERSION}");
                process::exit(0);
            }
            Err(err) => {
                eprintln!("{err}");
                eprintln!("Run with --help for usage information.");
                process::exit(1);
            }
        }
    }

    /// Parse `args` with environment lookups through `var`.
    pub fn parse_from(
        args: &[String],
        var: impl Fn(&str) -> Option<String>,
    ) -> Result<Action, CliError> {
        let mut opts = Self::default();

        // Apply environment variable defaults first
        if let Some(n) = var("FOLIO_PX_PER_CELL").as_deref().and_then(parse_px) {
            opts.px_per_cell = n;
        }
        if var("FOLIO_NO_MOUSE").is_some() {
            opts.mouse = false;
        }
        if let Some(val) = var("FOLIO_EXIT_AFTER_MS")
            && let Ok(n) = val.parse()
        {
            opts.exit_after_ms = n;
        }

        // Parse command-line args (override env vars)
        for arg in args {
            match arg.as_str() {
                "--help" | "-h" => return Ok(Action::Help),
                "--version" | "-V" => return Ok(Action::Version),
                "--no-mouse" => opts.mouse = false,
                "--dump-view" => opts.dump_view = true,
                other => {
                    if let Some(val) = other.strip_prefix("--px-per-cell=") {
                        opts.px_per_cell = parse_px(val).ok_or_else(|| CliError::InvalidValue {
                            flag: "--px-per-cell",
                            value: val.to_string(),
                        })?;
                    } else if let Some(val) = other.strip_prefix("--exit-after-ms=") {
                        opts.exit_after_ms = val.parse().map_err(|_| CliError::InvalidValue {
                            flag: "--exit-after-ms",
                            value: val.to_string(),
                        })?;
                    } else if let Some(val) = other.strip_prefix("--snapshot=") {
                        let size = parse_size(val).ok_or_else(|| CliError::InvalidValue {
                            flag: "--snapshot",
                            value: val.to_string(),
                        })?;
                        opts.snapshot = Some(size);
                    } else {
                        return Err(CliError::UnknownArgument(other.to_string()));
                    }
                }
            }
        }

        Ok(Action::Run(opts))
    }

    pub fn classifier(&self) -> ViewportClassifier {
        ViewportClassifier::new(self.px_per_cell)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| (*s).to_string()).collect()
    }

    fn run(list: &[&str]) -> Opts {
        match Opts::parse_from(&args(list), |_| None) {
            Ok(Action::Run(opts)) => opts,
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn default_opts() {
        let opts = Opts::default();
        assert_eq!(opts.px_per_cell, 8);
        assert!(opts.mouse);
        assert_eq!(opts.exit_after_ms, 0);
        assert_eq!(opts.snapshot, None);
        assert!(!opts.dump_view);
    }

    #[test]
    fn flags_parse() {
        let opts = run(&["--px-per-cell=10", "--no-mouse", "--snapshot=120x40", "--dump-view"]);
        assert_eq!(opts.px_per_cell, 10);
        assert!(!opts.mouse);
        assert_eq!(opts.snapshot, Some((120, 40)));
        assert!(opts.dump_view);
    }

    #[test]
    fn flags_override_env() {
        let env = |key: &str| match key {
            "FOLIO_PX_PER_CELL" => Some("12".to_string()),
            "FOLIO_EXIT_AFTER_MS" => Some("250".to_string()),
            _ => None,
        };
        let Ok(Action::Run(opts)) = Opts::parse_from(&args(&["--px-per-cell=6"]), env) else {
            panic!("expected run");
        };
        assert_eq!(opts.px_per_cell, 6);
        assert_eq!(opts.exit_after_ms, 250);
    }

    #[test]
    fn bad_values_are_errors() {
        assert_eq!(
            Opts::parse_from(&args(&["--px-per-cell=0"]), |_| None),
            Err(CliError::InvalidValue {
                flag: "--px-per-cell",
                value: "0".into()
            })
        );
        assert!(Opts::parse_from(&args(&["--snapshot=120"]), |_| None).is_err());
        assert_eq!(
            Opts::parse_from(&args(&["--frobnicate"]), |_| None),
            Err(CliError::UnknownArgument("--frobnicate".into()))
        );
    }

    #[test]
    fn help_and_version_short_circuit() {
        assert_eq!(
            Opts::parse_from(&args(&["--no-mouse", "-h", "--bogus"]), |_| None),
            Ok(Action::Help)
        );
        assert_eq!(Opts::parse_from(&args(&["-V"]), |_| None), Ok(Action::Version));
    }

    #[test]
    fn version_string_nonempty() {
        assert!(!VERSION.is_empty());
    }

    #[test]
    fn help_text_lists_env_vars() {
        assert!(HELP_TEXT.contains("FOLIO_PX_PER_CELL"));
        assert!(HELP_TEXT.contains("FOLIO_LOG_FILE"));
    }
}
