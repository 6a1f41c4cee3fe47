//! Runs a lab script against a fresh tree, printing every answer to stdout.
//!
//! ```text
//! bst-lab [--echo] [SCRIPT]
//! ```
//!
//! With no `SCRIPT` (or `-`) the script is read from stdin. Logging goes to stderr and is
//! controlled by `BST_LAB_LOG`, e.g. `BST_LAB_LOG=bst_lab=trace`.

use std::fs::File;
use std::io::{self, BufReader};

use anyhow::Context;
use bst_lab::config::Config;
use bst_lab::script::Session;
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    let config = Config::from_env_and_args()?;

    let filter = EnvFilter::try_new(&config.log_filter)
        .with_context(|| format!("invalid log filter `{}`", config.log_filter))?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let stdout = io::stdout();
    let mut session = Session::new(stdout.lock()).with_echo(config.echo);
    match &config.script {
        Some(path) => {
            let file =
                File::open(path).with_context(|| format!("opening {}", path.display()))?;
            session.run_script(BufReader::new(file))?;
        }
        None => session.run_script(io::stdin().lock())?,
    }

    info!(len = session.tree().len(), "script finished");
    Ok(())
}
