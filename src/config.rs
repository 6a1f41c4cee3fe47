//! Settings for the `bst-lab` binary, layered from defaults, the environment and arguments.

use std::path::PathBuf;

use crate::error::{LabError, Result};

/// Environment variable holding the log filter directives for the `bst-lab` binary.
pub const LOG_ENV: &str = "BST_LAB_LOG";

/// How the `bst-lab` binary should run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Script to run. `None` reads the script from stdin.
    pub script: Option<PathBuf>,
    /// `tracing_subscriber::EnvFilter` directives.
    pub log_filter: String,
    /// Echo each command before its output.
    pub echo: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            script: None,
            log_filter: "warn".to_string(),
            echo: false,
        }
    }
}

impl Config {
    /// Builds a config from the defaults and the command line arguments, program name excluded.
    ///
    /// # Examples
    ///
    /// ```
    /// use bst_lab::config::Config;
    ///
    /// let config = Config::from_args(["--echo", "lab3.txt"]).unwrap();
    /// assert!(config.echo);
    /// assert_eq!(config.script.unwrap().to_str(), Some("lab3.txt"));
    ///
    /// assert!(Config::from_args(["--verbose"]).is_err());
    /// ```
    pub fn from_args<I, S>(args: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::default().with_args(args)
    }

    /// Reads [`LOG_ENV`] and the process arguments, in that order, on top of the defaults.
    pub fn from_env_and_args() -> Result<Self> {
        Self::default()
            .with_log_filter(std::env::var(LOG_ENV).ok())
            .with_args(std::env::args().skip(1))
    }

    /// Replaces the log filter when `filter` holds a non-blank value.
    pub fn with_log_filter(mut self, filter: Option<String>) -> Self {
        if let Some(filter) = filter.filter(|f| !f.trim().is_empty()) {
            self.log_filter = filter;
        }
        self
    }

    /// Applies `[--echo] [SCRIPT]`. A script of `-` means stdin.
    pub fn with_args<I, S>(mut self, args: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut seen_script = false;
        for arg in args {
            let arg: String = arg.into();
            match arg.as_str() {
                "--echo" => self.echo = true,
                flag if flag.starts_with("--") => {
                    return Err(LabError::Config(format!("unknown flag `{}`", flag)));
                }
                _ if seen_script => {
                    return Err(LabError::Config(format!(
                        "only one script may be given, got `{}` as well",
                        arg
                    )));
                }
                "-" => {
                    seen_script = true;
                    self.script = None;
                }
                path => {
                    seen_script = true;
                    self.script = Some(PathBuf::from(path));
                }
            }
        }
        Ok(self)
    }
}
