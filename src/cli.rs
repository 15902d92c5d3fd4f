use anyhow::Result;
use clap::Parser;
use std::env;
use std::ffi::OsString;
use std::path::PathBuf;

use crate::authorized_keys;
use crate::config::Config;
use crate::error::Error;
use crate::github::KeyFetcher;
use crate::logger;
use crate::sync::KeySync;

#[derive(Parser, Debug)]
#[clap(name = env!("CARGO_PKG_NAME"), version = env!("CARGO_PKG_VERSION"), author = env!("CARGO_PKG_AUTHORS"), about = env!("CARGO_PKG_DESCRIPTION"))]
struct Cli {
    /// GitHub username for which to retrieve keys
    #[clap(long, short, default_value = "")]
    username: String,

    /// The path to the config file [default: ~/.config/ghkeys/config.toml]
    #[clap(long, short)]
    config: Option<PathBuf>,

    /// Also print the fetched, local and merged key lists
    #[clap(long, short, conflicts_with = "quiet")]
    verbose: bool,

    /// Only print warnings and errors
    #[clap(long, short)]
    quiet: bool,
}

/// Rewrites the single-dash `-username` spelling into `--username`.
fn normalize_args<I>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = OsString>,
{
    args.into_iter()
        .map(|arg| match arg.to_str() {
            Some(s) if s == "-username" || s.starts_with("-username=") => {
                OsString::from(format!("-{}", s))
            }
            _ => arg,
        })
        .collect()
}

fn resolve_username(username: &str) -> Result<&str, Error> {
    let username = username.trim();
    if username.is_empty() {
        return Err(Error::MissingUsername);
    }
    // Would be resolved away as a path segment of the request URL
    if username == "." || username == ".." {
        return Err(Error::InvalidUsername(username.to_string()));
    }
    Ok(username)
}

pub fn run() -> Result<()> {
    let cli = Cli::parse_from(normalize_args(env::args_os()));

    logger::init(env!("CARGO_CRATE_NAME"), logger::level(cli.verbose, cli.quiet))?;

    let username = resolve_username(&cli.username)?;

    let home = dirs::home_dir().ok_or(Error::HomeDir)?;
    let config_path = cli
        .config
        .unwrap_or_else(|| Config::default_path(&home));
    let config = Config::open(&config_path)?;

    let sync = KeySync::new(
        KeyFetcher::new(&config)?,
        authorized_keys::default_path(&home),
    );
    let report = sync.run(username)?;

    log::info!("{} in {}", report, sync.keys_path().display());
    Ok(())
}
