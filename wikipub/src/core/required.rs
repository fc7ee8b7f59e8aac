//! Gate that refuses to run the tool without its connection settings.

use crate::core::environment::Environment;

pub const CONFLUENCE_HOST: &str = "CONFLUENCE_HOST";
pub const CONFLUENCE_TOKEN: &str = "CONFLUENCE_TOKEN";
pub const CONFLUENCE_SPACE: &str = "CONFLUENCE_SPACE";

/// Variables that must be non-empty before the tool is launched, in the
/// order they are checked.
pub const REQUIRED_VARS: [&str; 3] = [CONFLUENCE_HOST, CONFLUENCE_TOKEN, CONFLUENCE_SPACE];

/// Return the first name in `required` that is unset or empty in `env`.
pub fn first_missing<'a>(env: &Environment, required: &[&'a str]) -> Option<&'a str> {
    required.iter().copied().find(|name| !env.is_set(name))
}
