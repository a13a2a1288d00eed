//! Environment helpers

use std::env::var;

/// Get the value of an ENV var
///
/// Only when:
/// - It is set
/// - It is not empty
pub fn env_var(var_name: &str) -> Option<String> {
    var(var_name).ok().filter(|value| !value.is_empty())
}

/// Get the value of an ENV var, or a default
///
/// Empty values are treated as not set
pub fn env_var_or_else(var_name: &str, or_else: impl FnOnce() -> String) -> String {
    env_var(var_name).unwrap_or_else(or_else)
}
