// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Placeholder codes in expected values, e.g. `%username%`.

/// Login name of the actor.
pub const USERNAME: &str = "%username%";
/// Display name of the actor.
pub const DISPLAY_NAME: &str = "%displayname%";
/// Password of the actor.
pub const PASSWORD: &str = "%password%";
/// Server base URL, without trailing slash.
pub const BASE_URL: &str = "%base_url%";
/// Path part of the server base URL, often empty.
pub const BASE_PATH: &str = "%base_path%";
/// Personal space id of the actor.
pub const SPACE_ID: &str = "%spaceid%";
/// Token of the last created public link.
pub const PUBLIC_TOKEN: &str = "%public_token%";

/// Values to substitute for placeholder codes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Substitutions {
    values: Vec<(&'static str, String)>,
}

impl Substitutions {
    /// No substitutions.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the value of a code, replacing any previous one.
    #[must_use]
    pub fn set(mut self, code: &'static str, value: impl Into<String>) -> Self {
        let value = value.into();
        match self.values.iter_mut().find(|(c, _)| *c == code) {
            Some((_, v)) => *v = value,
            None => self.values.push((code, value)),
        }
        self
    }

    /// Value of a code.
    #[must_use]
    pub fn get(&self, code: &str) -> Option<&str> {
        self.values
            .iter()
            .find(|(c, _)| *c == code)
            .map(|(_, v)| v.as_str())
    }

    /// Replaces every known code with its value.
    #[must_use]
    pub fn apply(&self, text: &str) -> String {
        self.values
            .iter()
            .fold(text.to_string(), |acc, (code, value)| acc.replace(code, value))
    }

    /// Replaces every known code with its value quoted for a regex.
    ///
    /// `/` is quoted too, so values can go into patterns written with `/`
    /// delimiters.
    #[must_use]
    pub fn apply_quoted(&self, text: &str) -> String {
        self.values
            .iter()
            .fold(text.to_string(), |acc, (code, value)| {
                acc.replace(code, &quote(value))
            })
    }
}

/// Escapes regex meta characters and `/`.
#[must_use]
pub fn quote(value: &str) -> String {
    regex::escape(value).replace('/', "\\/")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn replaces_codes() {
        let subs = Substitutions::new()
            .set(USERNAME, "alice")
            .set(BASE_PATH, "")
            .set(USERNAME, "Alice");
        assert_eq!(
            subs.apply("/%base_path%/remote.php/dav/files/%username%/"),
            "//remote.php/dav/files/Alice/"
        );
        assert_eq!(subs.apply("%unknown%"), "%unknown%");
        assert_eq!(subs.get(USERNAME), Some("Alice"));
    }

    #[test]
    fn quoted_values_are_literal_in_patterns() {
        let subs = Substitutions::new().set(SPACE_ID, "a-b$c/d");
        let pattern = subs.apply_quoted("^dav/spaces/%spaceid%$");
        assert_eq!(pattern, r"^dav/spaces/a\-b\$c\/d$");
        let re = regex::Regex::new(&pattern).unwrap();
        assert!(re.is_match("dav/spaces/a-b$c/d"));
    }
}
