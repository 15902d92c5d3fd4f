use console::style;
use std::process;

mod authorized_keys;
mod cli;
mod config;
mod error;
mod github;
mod logger;
mod sync;

fn main() {
    if let Err(err) = cli::run() {
        eprintln!("{} {:#}", style("error:").red().bold(), err);

        let code = err
            .downcast_ref::<error::Error>()
            .map_or(1, error::Error::exit_code);
        process::exit(code);
    }
}
