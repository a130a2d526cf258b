// CLASSIFICATION: COMMUNITY
// Filename: matcher.rs v0.1
// Author: Lukas Bower
// Date Modified: 2026-10-19

//! Argument matching.
//!
//! Defaults are applied to every reachable instance first. Tokens are then
//! scanned left to right; each is a long option, a short option (single,
//! embedded or clustered), a `name=value` property, or a positional argument.
//! Values are applied to the first reachable instance of the declaring type.

use std::collections::HashSet;

use log::debug;

use crate::discover::TargetGraph;
use crate::error::OptionsError;
use crate::registry::Options;
use crate::target::{identity, OptionTarget};

struct Tokens<'a, S> {
    args: &'a [S],
    pos: usize,
}

impl<'a, S: AsRef<str>> Tokens<'a, S> {
    fn advance(&mut self) -> Option<&'a str> {
        let token = self.args.get(self.pos)?;
        self.pos += 1;
        Some(token.as_ref())
    }

    fn value_for(&mut self, option: &str) -> Result<&'a str, OptionsError> {
        self.advance()
            .ok_or_else(|| OptionsError::MissingValue(option.to_owned()))
    }
}

struct Matcher<'r, 'g, 'o> {
    options: &'r Options,
    graph: TargetGraph<'g, 'o>,
    applied: HashSet<usize>,
}

impl Options {
    /// Match `args` against the registry, applying values to `targets` and
    /// every instance reachable from them. Returns the positional arguments
    /// in their original order.
    ///
    /// Values already applied stay applied when an error is returned.
    pub fn parse<S: AsRef<str>>(
        &self,
        args: &[S],
        targets: &mut [&mut dyn OptionTarget],
    ) -> Result<Vec<String>, OptionsError> {
        let mut matcher = Matcher {
            options: self,
            graph: TargetGraph::new(targets),
            applied: HashSet::new(),
        };
        matcher.apply_defaults()?;

        let mut tokens = Tokens { args, pos: 0 };
        let mut positional = Vec::new();
        while let Some(token) = tokens.advance() {
            if let Some(name) = token.strip_prefix("--") {
                matcher.long(name, &mut tokens)?;
            } else if let Some(rest) = token.strip_prefix('-').filter(|rest| !rest.is_empty()) {
                matcher.short(rest, token, &mut tokens)?;
            } else if let Some((name, value)) = token.split_once('=') {
                matcher.property(name, value)?;
            } else {
                positional.push(token.to_owned());
            }
        }
        matcher.check_required()?;
        debug!(
            "matched {} options, {} positional arguments",
            matcher.applied.len(),
            positional.len()
        );
        Ok(positional)
    }
}

impl Matcher<'_, '_, '_> {
    fn apply_defaults(&mut self) -> Result<(), OptionsError> {
        let options = self.options;
        self.graph.visit::<OptionsError, _>(|node| {
            for &slot in options.defaults_for(identity(node)) {
                let processor = options.processor(slot);
                let descriptor = processor.descriptor();
                if let Some(default) = descriptor.default_text() {
                    debug!("default {}={}", descriptor.display_name(), default);
                    processor.process(&mut *node, &descriptor.display_name(), Some(default))?;
                }
            }
            Ok(())
        })
    }

    fn apply(&mut self, slot: usize, name: &str, value: Option<&str>) -> Result<(), OptionsError> {
        let options = self.options;
        let processor = options.processor(slot);
        let class = processor.class();
        let target = self
            .graph
            .find(class.id())
            .ok_or_else(|| OptionsError::NoTargetInstance {
                option: name.to_owned(),
                class: class.name(),
            })?;
        debug!("matched {} for {}", name, class.name());
        processor.process(target, name, value)?;
        self.applied.insert(slot);
        Ok(())
    }

    fn long<S: AsRef<str>>(&mut self, name: &str, tokens: &mut Tokens<'_, S>) -> Result<(), OptionsError> {
        let options = self.options;
        if let Some(slot) = options.long_slot(name) {
            let shown = format!("--{name}");
            let value = if options.processor(slot).has_value() {
                Some(tokens.value_for(&shown)?)
            } else {
                None
            };
            return self.apply(slot, &shown, value);
        }
        match name.split_once('=') {
            Some((key, value)) if !key.is_empty() => {
                let shown = format!("--{key}");
                let slot = options
                    .long_slot(key)
                    .ok_or_else(|| OptionsError::NoSuchOption(shown.clone()))?;
                if !options.processor(slot).has_value() {
                    return Err(OptionsError::UnexpectedValue { option: shown });
                }
                if value.is_empty() {
                    return Err(OptionsError::MissingEmbeddedValue(shown));
                }
                self.apply(slot, &shown, Some(value))
            }
            _ => Err(OptionsError::NoSuchOption(format!("--{name}"))),
        }
    }

    fn short<S: AsRef<str>>(
        &mut self,
        rest: &str,
        token: &str,
        tokens: &mut Tokens<'_, S>,
    ) -> Result<(), OptionsError> {
        let options = self.options;
        let mut chars = rest.chars();
        let Some(first) = chars.next() else {
            return Err(OptionsError::NoSuchOption(token.to_owned()));
        };
        let tail = chars.as_str();
        let shown = format!("-{first}");
        let slot = options
            .short_slot(first)
            .ok_or_else(|| OptionsError::NoSuchOption(shown.clone()))?;
        let processor = options.processor(slot);
        let embedded = processor.descriptor().embedded_value;

        if tail.is_empty() {
            if embedded {
                return Err(OptionsError::MissingEmbeddedValue(shown));
            }
            let value = if processor.has_value() {
                Some(tokens.value_for(&shown)?)
            } else {
                None
            };
            return self.apply(slot, &shown, value);
        }
        if embedded {
            return self.apply(slot, &shown, Some(tail));
        }

        let value = if processor.has_value() {
            Some(tokens.value_for(&shown)?)
        } else {
            None
        };
        self.apply(slot, &shown, value)?;
        for name in tail.chars() {
            let shown = format!("-{name}");
            let slot = options
                .short_slot(name)
                .ok_or_else(|| OptionsError::NoSuchOption(shown.clone()))?;
            let processor = options.processor(slot);
            let value = if processor.has_value() {
                if processor.descriptor().embedded_value {
                    return Err(OptionsError::EmbeddedNotSupportedInCluster {
                        option: shown,
                        token: token.to_owned(),
                    });
                }
                Some(tokens.value_for(&shown)?)
            } else {
                None
            };
            self.apply(slot, &shown, value)?;
        }
        Ok(())
    }

    fn property(&mut self, name: &str, value: &str) -> Result<(), OptionsError> {
        let slot = self
            .options
            .property_slot(name)
            .ok_or_else(|| OptionsError::NoSuchOption(name.to_owned()))?;
        if value.is_empty() {
            return Err(OptionsError::MissingValue(name.to_owned()));
        }
        self.apply(slot, name, Some(value))
    }

    fn check_required(&self) -> Result<(), OptionsError> {
        let missing: Vec<String> = self
            .options
            .required_slots()
            .iter()
            .filter(|slot| !self.applied.contains(slot))
            .map(|&slot| self.options.processor(slot).descriptor().synopsis())
            .collect();
        if missing.is_empty() {
            Ok(())
        } else {
            debug!("missing required options: {}", missing.join(", "));
            Err(OptionsError::MissingRequiredOptions(missing))
        }
    }
}
