//! Terminal logger for progress output.
use std::io;

use console::style;
use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError};

struct Logger {
    target: &'static str,
}

impl Log for Logger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let is_native = record.target().starts_with(self.target);

        // Other crates (ureq, rustls) only get through at debug level.
        if !is_native && record.level() > Level::Warn && log::max_level() < LevelFilter::Debug {
            return;
        }

        let msg = record.args().to_string();
        let line = if is_native {
            match record.level() {
                Level::Error => style(format!("== {}", msg)).red().bold().to_string(),
                Level::Warn => format!("{} {}", style("=>").blue(), style(msg).yellow()),
                Level::Info => format!("{} {}", style("=>").blue(), style(msg).bold()),
                Level::Debug => format!("{} {}", style("=>").blue(), style(msg).dim()),
                Level::Trace => style(format!("=> {}", msg)).white().dim().to_string(),
            }
        } else {
            let msg = format!("** {} ({})", msg, record.target());
            match record.level() {
                Level::Error => style(msg).red().to_string(),
                Level::Warn => style(msg).yellow().to_string(),
                Level::Info => msg,
                Level::Debug | Level::Trace => style(msg).dim().to_string(),
            }
        };

        if record.level() <= Level::Warn {
            write(io::stderr(), &line);
        } else {
            write(io::stdout(), &line);
        }
    }

    fn flush(&self) {}
}

fn write(mut stream: impl io::Write, line: &str) {
    writeln!(stream, "{}", line).ok();
}

/// Install the logger for records from `target`.
pub fn init(target: &'static str, level: LevelFilter) -> Result<(), SetLoggerError> {
    log::set_boxed_logger(Box::new(Logger { target }))?;
    log::set_max_level(level);
    Ok(())
}

/// Level for the `--verbose` / `--quiet` flags.
pub fn level(verbose: bool, quiet: bool) -> LevelFilter {
    if verbose {
        LevelFilter::Debug
    } else if quiet {
        LevelFilter::Warn
    } else {
        LevelFilter::Info
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level() {
        assert_eq!(level(false, false), LevelFilter::Info);
        assert_eq!(level(true, false), LevelFilter::Debug);
        assert_eq!(level(false, true), LevelFilter::Warn);
    }
}
