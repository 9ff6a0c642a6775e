//! Utilities for logging messages from the library.
//!
//! There are two independent channels:
//!
//! * `svg_log!` prints diagnostics from this crate when the `SVGRENDER_LOG`
//!   environment variable is set.
//!
//! * [`init_log`] installs a logger for the [`log`] facade, which is what the
//!   rendering engine uses to report warnings about unsupported or malformed
//!   SVG content.

use once_cell::sync::Lazy;

#[doc(hidden)]
#[macro_export]
macro_rules! svg_log {
    (
        $($arg:tt)+
    ) => {
        if $crate::log::log_enabled() {
            eprintln!("{}", format_args!($($arg)+));
        }
    };
}

/// Whether `SVGRENDER_LOG` was set when the library was first used.
pub fn log_enabled() -> bool {
    static ENABLED: Lazy<bool> = Lazy::new(|| ::std::env::var_os("SVGRENDER_LOG").is_some());

    *ENABLED
}

struct StderrLogger;

impl ::log::Log for StderrLogger {
    fn enabled(&self, metadata: &::log::Metadata<'_>) -> bool {
        metadata.level() <= ::log::max_level()
    }

    fn log(&self, record: &::log::Record<'_>) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let target = if record.target().is_empty() {
            record.module_path().unwrap_or_default()
        } else {
            record.target()
        };

        let line = record.line().unwrap_or(0);

        match record.level() {
            ::log::Level::Error => eprintln!("Error (in {}:{}): {}", target, line, record.args()),
            ::log::Level::Warn => eprintln!("Warning (in {}:{}): {}", target, line, record.args()),
            ::log::Level::Info => eprintln!("Info (in {}:{}): {}", target, line, record.args()),
            ::log::Level::Debug | ::log::Level::Trace => {
                eprintln!("Debug (in {}:{}): {}", target, line, record.args())
            }
        }
    }

    fn flush(&self) {}
}

static LOGGER: StderrLogger = StderrLogger;

/// Routes warnings from the rendering engine to standard error.
///
/// Only warnings and errors are shown, unless `SVGRENDER_LOG` is set, in which
/// case everything down to debug messages is printed.
///
/// Call this once near the start of the program.  If a logger is already
/// installed (by an earlier call, or by the application itself), this does
/// nothing.
pub fn init_log() {
    if ::log::set_logger(&LOGGER).is_ok() {
        let level = if log_enabled() {
            ::log::LevelFilter::Debug
        } else {
            ::log::LevelFilter::Warn
        };

        ::log::set_max_level(level);
    }
}
