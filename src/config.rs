//! Run configuration for the generator.
//!
//! Defaults may be supplied by an optional `grategen.toml` in the working
//! directory; command-line flags override the file, and built-in defaults
//! apply when neither is present.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::cli::Cli;

/// Name of the optional configuration file.
const CONFIG_FILE: &str = "grategen.toml";

/// Default syscall definition file.
const DEFAULT_DEFS: &str = "syscalls";

/// Default clang-format style profile.
const DEFAULT_STYLE: &str = "file";

/// On-disk configuration, all fields optional.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    /// Path to the syscall definition file.
    pub defs: Option<PathBuf>,
    /// clang-format style profile.
    pub style: Option<String>,
    /// Whether to run clang-format over the output.
    pub format: Option<bool>,
}

/// Fully resolved run configuration.
#[derive(Debug)]
pub struct Config {
    pub defs: PathBuf,
    pub style: String,
    pub format: bool,
}

/// Resolve the effective configuration from CLI flags and `grategen.toml`.
pub fn resolve(cli: &Cli) -> Result<Config> {
    let file = load_config_file(Path::new(CONFIG_FILE))?;
    Ok(resolve_with(cli, file))
}

fn resolve_with(cli: &Cli, file: ConfigFile) -> Config {
    Config {
        defs: cli
            .defs
            .clone()
            .or(file.defs)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DEFS)),
        style: cli
            .style
            .clone()
            .or(file.style)
            .unwrap_or_else(|| DEFAULT_STYLE.to_string()),
        format: !cli.no_format && file.format.unwrap_or(true),
    }
}

/// Load the config file if present; a missing file is not an error.
fn load_config_file(path: &Path) -> Result<ConfigFile> {
    if !path.exists() {
        return Ok(ConfigFile::default());
    }
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    toml::from_str(&text).with_context(|| format!("failed to parse {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cli() -> Cli {
        Cli {
            mode: "1".to_string(),
            defs: None,
            style: None,
            no_format: false,
            quiet: false,
            verbose: false,
        }
    }

    #[test]
    fn built_in_defaults_apply() {
        let cfg = resolve_with(&cli(), ConfigFile::default());
        assert_eq!(cfg.defs, PathBuf::from("syscalls"));
        assert_eq!(cfg.style, "file");
        assert!(cfg.format);
    }

    #[test]
    fn config_file_overrides_defaults() {
        let file: ConfigFile =
            toml::from_str("defs = \"defs/posix\"\nstyle = \"llvm\"\nformat = false\n").unwrap();
        let cfg = resolve_with(&cli(), file);
        assert_eq!(cfg.defs, PathBuf::from("defs/posix"));
        assert_eq!(cfg.style, "llvm");
        assert!(!cfg.format);
    }

    #[test]
    fn cli_flags_override_config_file() {
        let file: ConfigFile = toml::from_str("style = \"llvm\"\n").unwrap();
        let mut args = cli();
        args.style = Some("google".to_string());
        args.no_format = true;
        let cfg = resolve_with(&args, file);
        assert_eq!(cfg.style, "google");
        assert!(!cfg.format);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(toml::from_str::<ConfigFile>("sytle = \"llvm\"\n").is_err());
    }
}
