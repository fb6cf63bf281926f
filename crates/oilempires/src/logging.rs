//! Logging setup.
//!
//! Store failures that are swallowed into visitor notices still end up here,
//! at `warn` level, with their full cause. Everything is written to stderr so
//! rendered output on stdout can be piped.

use tracing::level_filters::LevelFilter;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// How much the binary says about itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum Verbosity {
    /// Errors only (`-q`).
    Quiet,
    /// Info and above.
    #[default]
    Normal,
    /// Debug and above (`-v`).
    Verbose,
    /// Everything (`-vv` or more).
    Trace,
}

impl Verbosity {
    /// Combine the `-v` count and the `-q` switch. Quiet overrides any `-v`.
    #[must_use]
    pub fn from_flags(verbose: u8, quiet: bool) -> Self {
        if quiet {
            return Self::Quiet;
        }
        match verbose {
            0 => Self::Normal,
            1 => Self::Verbose,
            _ => Self::Trace,
        }
    }

    /// Most detailed level that gets through.
    #[must_use]
    pub fn max_level(self) -> LevelFilter {
        match self {
            Self::Quiet => LevelFilter::ERROR,
            Self::Normal => LevelFilter::INFO,
            Self::Verbose => LevelFilter::DEBUG,
            Self::Trace => LevelFilter::TRACE,
        }
    }

    /// Filter directive used when `RUST_LOG` is unset.
    #[must_use]
    pub fn directive(self) -> String {
        format!("{}={}", env!("CARGO_CRATE_NAME"), self.max_level())
    }
}

/// Install the global subscriber.
///
/// `RUST_LOG`, when set and parseable, replaces the directive derived from
/// `verbosity`. Only the first call in a process has any effect.
///
/// ```no_run
/// use oilempires::{init_logging, logging::Verbosity};
///
/// init_logging(Verbosity::from_flags(1, false));
/// ```
pub fn init_logging(verbosity: Verbosity) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(verbosity.directive()));

    let layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(verbosity >= Verbosity::Verbose)
        .without_time();

    // A subscriber may already be installed (tests, embedding callers).
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(layer)
        .try_init();
}

/// Quiet subscriber for unit tests; warnings and errors only.
#[cfg(test)]
pub fn init_test_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("oilempires=warn")
        .with_test_writer()
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_map_to_verbosity() {
        let cases = [
            ((0, false), Verbosity::Normal),
            ((1, false), Verbosity::Verbose),
            ((2, false), Verbosity::Trace),
            ((7, false), Verbosity::Trace),
            ((0, true), Verbosity::Quiet),
            ((3, true), Verbosity::Quiet),
        ];
        for ((verbose, quiet), expected) in cases {
            assert_eq!(Verbosity::from_flags(verbose, quiet), expected);
        }
    }

    #[test]
    fn test_directive_names_this_crate() {
        assert_eq!(Verbosity::Normal.directive(), "oilempires=info");
        assert_eq!(Verbosity::Quiet.directive(), "oilempires=error");
        assert_eq!(Verbosity::Trace.directive(), "oilempires=trace");
    }

    #[test]
    fn test_levels_are_ordered() {
        assert!(Verbosity::Quiet.max_level() < Verbosity::Normal.max_level());
        assert!(Verbosity::Verbose.max_level() < Verbosity::Trace.max_level());
    }

    #[test]
    fn test_second_init_is_ignored() {
        init_test_logging();
        init_logging(Verbosity::Verbose);
        init_logging(Verbosity::Quiet);
    }
}
