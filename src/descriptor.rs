// CLASSIFICATION: COMMUNITY
// Filename: descriptor.rs v0.1
// Author: Lukas Bower
// Date Modified: 2026-10-19

//! Immutable metadata describing one declared command line option.

use serde::{Deserialize, Serialize};

/// Metadata for a single option: its names, value form, default and help text.
///
/// Empty strings for `long_name` and `default_value` are treated as absent so
/// descriptor tables written by hand behave the same as builder-made ones.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Descriptor {
    /// Single character introduced by `-`.
    pub short_name: Option<char>,
    /// Name introduced by `--` (or used bare for property options).
    pub long_name: Option<String>,
    /// Value follows the short flag without a separator, e.g. `-O2`.
    pub embedded_value: bool,
    /// Option is given as `name=value` with no leading dash.
    pub property_value: bool,
    /// Text applied before any token is scanned.
    pub default_value: Option<String>,
    /// Help text rendered by the usage formatter.
    pub description: String,
    /// Parsing fails unless a token names this option.
    pub required: bool,
}

impl Descriptor {
    /// Empty descriptor; chain the builder methods to fill it in.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the short name.
    pub fn short(mut self, name: char) -> Self {
        self.short_name = Some(name);
        self
    }

    /// Set the long (or property) name.
    pub fn long(mut self, name: impl Into<String>) -> Self {
        self.long_name = Some(name.into());
        self
    }

    /// Mark the value as embedded in the short flag.
    pub fn embedded(mut self) -> Self {
        self.embedded_value = true;
        self
    }

    /// Mark the option as a `name=value` property.
    pub fn property(mut self) -> Self {
        self.property_value = true;
        self
    }

    /// Set the default value text.
    pub fn default_value(mut self, value: impl Into<String>) -> Self {
        self.default_value = Some(value.into());
        self
    }

    /// Set the help text.
    pub fn description(mut self, text: impl Into<String>) -> Self {
        self.description = text.into();
        self
    }

    /// Require the option on every parse.
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Long name, if present and non-empty.
    pub fn long_name(&self) -> Option<&str> {
        self.long_name.as_deref().filter(|name| !name.is_empty())
    }

    /// Default value, if present and non-empty.
    pub fn default_text(&self) -> Option<&str> {
        self.default_value.as_deref().filter(|value| !value.is_empty())
    }

    /// Human readable name used in error messages and log lines.
    pub fn display_name(&self) -> String {
        match (self.short_name, self.long_name()) {
            (_, Some(long)) if self.property_value => long.to_owned(),
            (_, Some(long)) => format!("--{long}"),
            (Some(short), None) if self.property_value => short.to_string(),
            (Some(short), None) => format!("-{short}"),
            (None, None) => "<unnamed>".to_owned(),
        }
    }

    /// Every form the option can be given in, e.g. `[-O|--oName]`.
    pub fn synopsis(&self) -> String {
        let mut forms = Vec::with_capacity(2);
        if let Some(short) = self.short_name {
            if self.property_value {
                forms.push(format!("{short}=<value>"));
            } else {
                forms.push(format!("-{short}"));
            }
        }
        if let Some(long) = self.long_name() {
            if self.property_value {
                forms.push(format!("{long}=<value>"));
            } else {
                forms.push(format!("--{long}"));
            }
        }
        format!("[{}]", forms.join("|"))
    }

    /// Usage presentation of the names, value form and default, without the
    /// description. `takes_value` comes from the bound operation.
    pub(crate) fn usage_names(&self, takes_value: bool) -> String {
        let mut out = String::from("  ");
        let mut named = false;
        if let Some(short) = self.short_name {
            named = true;
            if self.property_value {
                out.push(short);
                out.push_str("=[value]");
            } else {
                out.push('-');
                out.push(short);
                if self.embedded_value {
                    out.push_str("[value]");
                } else if takes_value {
                    out.push_str(" [value]");
                }
            }
        }
        if let Some(long) = self.long_name() {
            if named {
                out.push_str(", ");
            }
            if self.property_value {
                out.push_str(long);
                out.push_str("=[value]");
            } else {
                out.push_str("--");
                out.push_str(long);
                if takes_value {
                    out.push_str("[=value| value]");
                }
            }
        }
        if let Some(default) = self.default_text() {
            out.push_str(", default=");
            out.push_str(default);
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_strings_count_as_absent() {
        let descriptor = Descriptor::new().short('O').long("").default_value("");
        assert_eq!(descriptor.long_name(), None);
        assert_eq!(descriptor.default_text(), None);
        assert_eq!(descriptor.synopsis(), "[-O]");
    }

    #[test]
    fn synopsis_covers_property_forms() {
        let descriptor = Descriptor::new().short('f').long("foo").property();
        assert_eq!(descriptor.synopsis(), "[f=<value>|foo=<value>]");
        assert_eq!(descriptor.display_name(), "foo");
    }

    #[test]
    fn usage_names_render_value_forms() {
        let level = Descriptor::new().short('O').embedded().default_value("2");
        assert_eq!(level.usage_names(true), "  -O[value], default=2");

        let name = Descriptor::new().short('n').long("name");
        assert_eq!(name.usage_names(true), "  -n [value], --name[=value| value]");
        assert_eq!(name.usage_names(false), "  -n, --name");

        let prop = Descriptor::new().long("foo").property();
        assert_eq!(prop.usage_names(true), "  foo=[value]");
    }

    #[test]
    fn descriptor_deserializes_with_defaults() {
        let descriptor: Descriptor =
            serde_json::from_str(r#"{"short_name":"T","long_name":"trace"}"#).unwrap();
        assert_eq!(descriptor, Descriptor::new().short('T').long("trace"));
    }
}
