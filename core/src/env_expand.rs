//! Environment-variable expansion for configured program paths.
//!
//! `%NAME%` references are expanded on every host. Unix-like hosts also
//! expand `$NAME` and `${NAME}`. A reference whose variable is not set is
//! left in place, byte for byte. A value that is not valid Unicode is
//! substituted with U+FFFD in place of the invalid sequences.

use std::ffi::OsString;
use std::sync::LazyLock;

use regex_lite::Regex;
use tracing::debug;

#[cfg(not(windows))]
static REFERENCE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    compile_regex(r"%([^%]+)%|\$\{([A-Za-z_][A-Za-z0-9_]*)\}|\$([A-Za-z_][A-Za-z0-9_]*)")
});

#[cfg(windows)]
static REFERENCE_REGEX: LazyLock<Regex> = LazyLock::new(|| compile_regex(r"%([^%]+)%"));

/// Expands references against the current process environment.
pub fn expand_env_vars(raw: &str) -> String {
    expand_env_vars_with(raw, lookup_env)
}

fn lookup_env(name: &str) -> Option<String> {
    std::env::var_os(name).map(|value| env_value_to_string(name, value))
}

fn env_value_to_string(name: &str, value: OsString) -> String {
    match value.into_string() {
        Ok(value) => value,
        Err(value) => {
            debug!(name, "environment variable is not valid unicode");
            value.to_string_lossy().into_owned()
        }
    }
}

/// Expands references using `lookup` to resolve variable names.
///
/// Substituted values are never rescanned. When a `%NAME%` reference does
/// not resolve, its closing `%` may still open the next reference, so
/// `%MISSING%HOME%` expands the `%HOME%` part.
pub fn expand_env_vars_with<F>(raw: &str, lookup: F) -> String
where
    F: Fn(&str) -> Option<String>,
{
    let mut expanded = String::with_capacity(raw.len());
    let mut copied = 0;
    let mut search_from = 0;

    while let Some(captures) = REFERENCE_REGEX.captures_at(raw, search_from) {
        let Some(reference) = captures.get(0) else {
            break;
        };
        let percent_name = captures.get(1);
        let Some(name) = percent_name.or_else(|| captures.get(2)).or_else(|| captures.get(3))
        else {
            break;
        };

        match lookup(name.as_str()) {
            Some(value) => {
                expanded.push_str(&raw[copied..reference.start()]);
                expanded.push_str(&value);
                copied = reference.end();
                search_from = reference.end();
            }
            // Both delimiters are a single ASCII byte, so stepping back one
            // byte stays on a char boundary.
            None if percent_name.is_some() => search_from = reference.end() - 1,
            None => search_from = reference.end(),
        }
    }

    expanded.push_str(&raw[copied..]);
    expanded
}

fn compile_regex(pattern: &str) -> Regex {
    match Regex::new(pattern) {
        Ok(regex) => regex,
        // Panic is ok thanks to `load_regex` test.
        Err(err) => panic!("invalid regex pattern `{pattern}`: {err}"),
    }
}
