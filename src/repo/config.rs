use std::fmt::{self, Display, Formatter};

use super::{Error, Result};

/// The `[core]` settings stored in a repository's `config` file.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Config {
    pub repository_format_version: String,
    pub file_mode: bool,
    pub bare: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            repository_format_version: "0".to_string(),
            file_mode: false,
            bare: false,
        }
    }
}

impl Config {
    /// Parse the git-style ini text of a `config` file.
    ///
    /// Only the `[core]` section is interpreted. Other sections and unknown
    /// keys are skipped. Missing keys keep their default values.
    pub fn parse(text: &str) -> Result<Config> {
        let mut config = Config::default();
        let mut in_core = false;

        for (n, line) in text.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') || line.starts_with(';') {
                continue;
            }

            if line.starts_with('[') {
                if !line.ends_with(']') {
                    return Err(Error::InvalidConfig(format!(
                        "line {}: unterminated section header",
                        n + 1
                    )));
                }
                in_core = line[1..line.len() - 1].trim().eq_ignore_ascii_case("core");
                continue;
            }

            if !in_core {
                continue;
            }

            let (key, value) = match line.find('=') {
                Some(eq) => (line[..eq].trim(), line[eq + 1..].trim()),
                None => (line, "true"),
            };

            match key.to_ascii_lowercase().as_str() {
                "repositoryformatversion" => config.repository_format_version = value.to_string(),
                "filemode" => config.file_mode = parse_bool(value, n)?,
                "bare" => config.bare = parse_bool(value, n)?,
                _ => (),
            }
        }

        Ok(config)
    }
}

fn parse_bool(value: &str, n: usize) -> Result<bool> {
    match value.to_ascii_lowercase().as_str() {
        "true" | "yes" | "on" | "1" => Ok(true),
        "false" | "no" | "off" | "0" => Ok(false),
        _ => Err(Error::InvalidConfig(format!(
            "line {}: `{}` is not a boolean",
            n + 1,
            value
        ))),
    }
}

impl Display for Config {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        writeln!(f, "[core]")?;
        writeln!(
            f,
            "\trepositoryformatversion = {}",
            self.repository_format_version
        )?;
        writeln!(f, "\tfilemode = {}", self.file_mode)?;
        writeln!(f, "\tbare = {}", self.bare)
    }
}
