use super::EditorConfig;
use crate::controller::Mode;
use crate::error::{ConfigError, Error, Result};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

const RC_FILE_NAME: &str = ".vifieldrc";

pub struct RcLoader;

impl RcLoader {
    /// Get the path to the RC file
    /// Looks for .vifieldrc in:
    /// 1. Current directory
    /// 2. Home directory (~/.vifieldrc)
    pub fn get_rc_path() -> Option<PathBuf> {
        let current_rc = Path::new(RC_FILE_NAME);
        if current_rc.exists() {
            return Some(current_rc.to_path_buf());
        }

        if let Ok(home) = env::var("HOME") {
            let home_rc = Path::new(&home).join(RC_FILE_NAME);
            if home_rc.exists() {
                return Some(home_rc);
            }
        }

        None
    }

    /// Load the RC file if there is one. Problems are logged, never fatal.
    pub fn load_config() -> EditorConfig {
        let Some(rc_path) = Self::get_rc_path() else {
            return EditorConfig::default();
        };
        match Self::load_from_path(&rc_path) {
            Ok(config) => config,
            Err(err) => {
                warn!(path = %rc_path.display(), "could not read rc file: {err}");
                EditorConfig::default()
            }
        }
    }

    pub fn load_from_path(path: &Path) -> Result<EditorConfig> {
        let content = fs::read_to_string(path)?;
        let mut config = EditorConfig::default();
        for err in Self::parse_config_content(&content, &mut config) {
            warn!(path = %path.display(), "{err}");
        }
        debug!(path = %path.display(), ?config, "rc file loaded");
        Ok(config)
    }

    /// Apply every line of `content`, returning the lines that failed.
    pub fn parse_config_content(content: &str, config: &mut EditorConfig) -> Vec<Error> {
        let mut errors = Vec::new();
        for (idx, line) in content.lines().enumerate() {
            let line = line.trim();

            // Skip empty lines and comments
            if line.is_empty() || line.starts_with('#') || line.starts_with('"') {
                continue;
            }

            if let Err(source) = Self::parse_config_line(line, config) {
                errors.push(Error::Config { line: idx + 1, source });
            }
        }
        errors
    }

    /// Parse a single configuration line
    pub fn parse_config_line(
        line: &str,
        config: &mut EditorConfig,
    ) -> std::result::Result<(), ConfigError> {
        let line = strip_comment(line).trim();
        if line.is_empty() {
            return Ok(());
        }

        // vim-style "set" commands
        if let Some(stripped) = line.strip_prefix("set ") {
            let setting = stripped.trim();
            return match setting {
                "vim" => {
                    config.vim_enabled = true;
                    Ok(())
                }
                "novim" => {
                    config.vim_enabled = false;
                    Ok(())
                }
                "submitinsert" => {
                    config.submit_in_insert = true;
                    Ok(())
                }
                "nosubmitinsert" => {
                    config.submit_in_insert = false;
                    Ok(())
                }
                _ => match setting.split_once('=') {
                    Some((key, value)) => Self::apply(key.trim(), value.trim(), config),
                    None => Err(ConfigError::UnknownSetting(setting.to_string())),
                },
            };
        }

        // Direct key-value pairs
        match line.split_once('=') {
            Some((key, value)) => Self::apply(key.trim(), value.trim(), config),
            None => Err(ConfigError::UnknownSetting(line.to_string())),
        }
    }

    fn apply(
        key: &str,
        value: &str,
        config: &mut EditorConfig,
    ) -> std::result::Result<(), ConfigError> {
        let invalid = || ConfigError::InvalidValue {
            key: key.to_string(),
            value: value.to_string(),
        };
        match key {
            "vim" | "vim_enabled" => config.vim_enabled = parse_bool(value).ok_or_else(invalid)?,
            "mode" | "default_mode" => {
                config.default_mode = match value {
                    "normal" => Mode::Normal,
                    "insert" => Mode::Insert,
                    _ => return Err(invalid()),
                }
            }
            "charlimit" | "char_limit" => config.char_limit = value.parse().map_err(|_| invalid())?,
            "maxheight" | "max_height" => config.max_height = value.parse().map_err(|_| invalid())?,
            "placeholder" => config.placeholder = value.trim_matches('"').to_string(),
            "submitinsert" | "submit_in_insert" => {
                config.submit_in_insert = parse_bool(value).ok_or_else(invalid)?
            }
            _ => return Err(ConfigError::UnknownSetting(key.to_string())),
        }
        Ok(())
    }

    /// Generate a sample RC file content
    pub fn generate_sample_rc() -> String {
        r#"# vi-field configuration file (.vifieldrc)
# Lines starting with # or " are comments

set vim                # Modal editing (or set novim for plain input)
set mode=normal        # Starting mode: normal or insert
set charlimit=0        # Maximum characters, 0 for unlimited
set maxheight=0        # Visible rows, 0 for no cap
set nosubmitinsert     # Enter inserts a newline in Insert mode

# Alternative key=value syntax:
# vim_enabled=true
# default_mode=insert
# char_limit=280
# max_height=5
# placeholder="Say something"
# submit_in_insert=true
"#
        .to_string()
    }
}

/// Cut a trailing `# comment`. A `#` only starts one after whitespace and
/// outside double quotes.
fn strip_comment(line: &str) -> &str {
    let mut in_quotes = false;
    let mut prev_blank = true;
    for (idx, c) in line.char_indices() {
        match c {
            '"' => in_quotes = !in_quotes,
            '#' if !in_quotes && prev_blank => return &line[..idx],
            _ => {}
        }
        prev_blank = c.is_whitespace();
    }
    line
}

fn parse_bool(value: &str) -> Option<bool> {
    match value {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}
