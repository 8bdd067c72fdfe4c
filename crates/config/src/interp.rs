//! `${VAR}` placeholder interpolation.

use crate::ConfigError;
use regex::{Captures, Regex};
use std::sync::LazyLock;

static RE_PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$\{([A-Za-z0-9_]+)\}").expect("invalid placeholder regex"));

/// Replaces every `${VAR}` in `input` with the value of the environment variable `VAR`.
pub fn interpolate(input: &str, context: &str) -> Result<String, ConfigError> {
    interpolate_with(input, context, |var| std::env::var(var).ok())
}

/// Same as [`interpolate`] but resolves variables through `lookup`.
pub fn interpolate_with(
    input: &str,
    context: &str,
    lookup: impl Fn(&str) -> Option<String>,
) -> Result<String, ConfigError> {
    let mut missing = None;
    let out = RE_PLACEHOLDER.replace_all(input, |caps: &Captures<'_>| {
        let var = &caps[1];
        lookup(var).unwrap_or_else(|| {
            missing.get_or_insert_with(|| var.to_string());
            String::new()
        })
    });
    match missing {
        Some(var) => Err(ConfigError::MissingEnv { var, context: context.to_string() }),
        None => Ok(out.into_owned()),
    }
}
