//! Command-line flags shared by all commands.

use tagsum_diagnostic::emitter::ColorMode;
use tagsum_eval::EvalConfig;
use thiserror::Error;

/// Driver configuration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CompileOptions {
    /// Treat warnings as errors (`--deny-warnings`).
    pub deny_warnings: bool,
    pub color: ColorMode,
    /// Whether diagnostics go to a terminal; decides `ColorMode::Auto`.
    pub tty: bool,
    /// Maximum errors reported per file (0 = unlimited).
    pub error_limit: usize,
    pub eval: EvalConfig,
}

impl Default for CompileOptions {
    fn default() -> Self {
        CompileOptions {
            deny_warnings: false,
            color: ColorMode::Auto,
            tty: false,
            error_limit: 10,
            eval: EvalConfig::default(),
        }
    }
}

/// A flag the driver does not understand.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum OptionError {
    #[error("unknown option '{0}'")]
    UnknownFlag(String),
    #[error("invalid value '{value}' for '{flag}'")]
    InvalidValue { flag: &'static str, value: String },
}

impl CompileOptions {
    /// Split `args` into flags (applied to `self`) and positional arguments.
    pub fn parse_args<'a>(&mut self, args: &'a [String]) -> Result<Vec<&'a str>, OptionError> {
        let mut positional = Vec::new();
        for arg in args {
            if arg.starts_with("--") {
                self.apply_flag(arg)?;
            } else {
                positional.push(arg.as_str());
            }
        }
        Ok(positional)
    }

    fn apply_flag(&mut self, arg: &str) -> Result<(), OptionError> {
        if arg == "--deny-warnings" {
            self.deny_warnings = true;
        } else if let Some(value) = arg.strip_prefix("--color=") {
            self.color = ColorMode::parse(value).ok_or_else(|| OptionError::InvalidValue {
                flag: "--color",
                value: value.to_string(),
            })?;
        } else if let Some(value) = arg.strip_prefix("--error-limit=") {
            self.error_limit = parse_count("--error-limit", value)?;
        } else if let Some(value) = arg.strip_prefix("--max-depth=") {
            self.eval.max_call_depth = parse_count("--max-depth", value)?;
        } else {
            return Err(OptionError::UnknownFlag(arg.to_string()));
        }
        Ok(())
    }
}

fn parse_count(flag: &'static str, value: &str) -> Result<usize, OptionError> {
    value.parse().map_err(|_| OptionError::InvalidValue {
        flag,
        value: value.to_string(),
    })
}
