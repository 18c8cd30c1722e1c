mod demo;

use anyhow::{bail, Result};
use clap::{value_parser, Parser};
use hashbreak_core::DEFAULT_ADAPTIVE_COST;
use tracing::Level;

use demo::demo;

/// The caller-side password limit. Cracking longer passwords by brute force
/// takes too long even for MD5, which defeats the purpose of the demo.
const MAX_INPUT_PASSWORD_LENGTH: usize = 6;

/// Hashes a password with MD5, SHA-1 and bcrypt, then brute-forces each hash
/// back out and reports how long every scheme held out.
#[derive(Parser)]
#[clap(author, version, about, long_about = None)]
pub struct Cli {
    /// The password to hash and crack.
    #[clap(value_parser = check_password)]
    password: String,

    /// The bcrypt cost factor of the adaptive scheme.
    #[clap(short, long, value_parser = value_parser!(u32).range(4..=31), default_value_t = DEFAULT_ADAPTIVE_COST)]
    cost: u32,

    /// Log the search engine's progress events.
    #[clap(short, long)]
    verbose: bool,
}

/// Checks that the password is short enough for the demo.
fn check_password(password: &str) -> Result<String> {
    if password.is_empty() {
        bail!("The password cannot be empty");
    }

    if !password.is_ascii() {
        bail!("The password can only contain ASCII characters");
    }

    if password.len() > MAX_INPUT_PASSWORD_LENGTH {
        bail!("The password is too long for this demo. Please use {MAX_INPUT_PASSWORD_LENGTH} characters or less");
    }

    Ok(password.to_owned())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let max_level = if cli.verbose { Level::DEBUG } else { Level::WARN };
    tracing_subscriber::fmt().with_max_level(max_level).init();

    demo(cli)
}
