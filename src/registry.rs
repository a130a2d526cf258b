// CLASSIFICATION: COMMUNITY
// Filename: registry.rs v0.1
// Author: Lukas Bower
// Date Modified: 2026-10-19

//! Option registry.
//!
//! Built once from a set of root types. Every declared option becomes an
//! [`OptionProcessor`] indexed by short name, long name or property name;
//! options with defaults are grouped by declaring type and required options
//! are remembered for post-parse validation. Construction is all-or-nothing.

use std::any::{Any, TypeId};
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::hash::Hash;

use log::{debug, info};

use crate::convert::ConverterRegistry;
use crate::descriptor::Descriptor;
use crate::discover::discover_classes;
use crate::error::OptionsError;
use crate::processor::OptionProcessor;
use crate::target::{DeclaredOption, OptionTarget, TargetClass};

/// Immutable registry of every option declared by a set of types.
///
/// Holds no instance references, so one registry can serve concurrent parse
/// calls that each bring their own targets.
#[derive(Debug)]
pub struct Options {
    processors: Vec<OptionProcessor>,
    short_names: HashMap<char, usize>,
    long_names: HashMap<String, usize>,
    property_names: HashMap<String, usize>,
    defaults: HashMap<TypeId, Vec<usize>>,
    required: Vec<usize>,
    classes: Vec<TargetClass>,
}

/// Collects root types and custom converters before building [`Options`].
#[derive(Default)]
pub struct OptionsBuilder {
    roots: Vec<TargetClass>,
    converters: ConverterRegistry,
}

impl OptionsBuilder {
    /// Add `T` as a root type.
    pub fn target<T: OptionTarget>(self) -> Self {
        self.class(TargetClass::of::<T>())
    }

    /// Add a root type handle.
    pub fn class(mut self, class: TargetClass) -> Self {
        self.roots.push(class);
        self
    }

    /// Register a converter for `V`, overriding any built-in.
    pub fn converter<V, F>(mut self, convert: F) -> Self
    where
        V: Any,
        F: Fn(&str) -> Result<V, String> + Send + Sync + 'static,
    {
        self.converters.register::<V, F>(convert);
        self
    }

    /// Discover every reachable type and build the registry.
    pub fn build(self) -> Result<Options, OptionsError> {
        Options::with_converters(&self.roots, self.converters)
    }
}

impl Options {
    /// Start a builder.
    pub fn builder() -> OptionsBuilder {
        OptionsBuilder::default()
    }

    /// Registry over `roots` and every type reachable from them, using the
    /// built-in converters.
    pub fn new(roots: &[TargetClass]) -> Result<Self, OptionsError> {
        Self::with_converters(roots, ConverterRegistry::new())
    }

    fn with_converters(
        roots: &[TargetClass],
        mut converters: ConverterRegistry,
    ) -> Result<Self, OptionsError> {
        let classes = discover_classes(roots);
        let mut options = Self {
            processors: Vec::new(),
            short_names: HashMap::new(),
            long_names: HashMap::new(),
            property_names: HashMap::new(),
            defaults: HashMap::new(),
            required: Vec::new(),
            classes: Vec::new(),
        };
        for class in &classes {
            for declared in class.declarations().options {
                options.register(*class, declared, &mut converters)?;
            }
        }
        options.classes = classes;
        info!(
            "registered {} options from {} types",
            options.processors.len(),
            options.classes.len()
        );
        Ok(options)
    }

    fn register(
        &mut self,
        class: TargetClass,
        declared: DeclaredOption,
        converters: &mut ConverterRegistry,
    ) -> Result<(), OptionsError> {
        let DeclaredOption {
            descriptor,
            operation,
        } = declared;
        let arity = operation.arity();
        if arity > 1 {
            return Err(OptionsError::InvalidArity {
                class: class.name(),
                operation: operation.name().to_owned(),
                arity,
            });
        }
        if arity == 0 && (descriptor.embedded_value || descriptor.property_value) {
            return Err(OptionsError::InvalidFlagCombination {
                class: class.name(),
                operation: operation.name().to_owned(),
                reason: "the operation takes no parameter",
            });
        }
        if descriptor.embedded_value && descriptor.property_value {
            return Err(OptionsError::InvalidFlagCombination {
                class: class.name(),
                operation: operation.name().to_owned(),
                reason: "embedded and property values are exclusive",
            });
        }

        let processor = match operation.params().first() {
            None => OptionProcessor::no_value(descriptor, class, operation),
            Some(param) => {
                let converter = converters.resolve(param);
                OptionProcessor::converting(descriptor, class, operation, converter)
            }
        };
        let slot = self.processors.len();
        let descriptor = processor.descriptor();

        if let Some(short) = descriptor.short_name {
            if descriptor.property_value {
                claim(&mut self.property_names, short.to_string(), short.to_string(), slot)?;
            } else {
                claim(&mut self.short_names, short, format!("-{short}"), slot)?;
            }
        }
        if let Some(long) = descriptor.long_name() {
            if descriptor.property_value {
                claim(&mut self.property_names, long.to_owned(), long.to_owned(), slot)?;
            } else {
                claim(&mut self.long_names, long.to_owned(), format!("--{long}"), slot)?;
            }
        }
        if descriptor.default_text().is_some() {
            self.defaults.entry(class.id()).or_default().push(slot);
        }
        if descriptor.required {
            self.required.push(slot);
        }
        debug!(
            "registered {} for {}",
            descriptor.display_name(),
            class.name()
        );
        self.processors.push(processor);
        Ok(())
    }

    /// Every descriptor in declaration order.
    pub fn descriptors(&self) -> impl Iterator<Item = &Descriptor> {
        self.processors.iter().map(OptionProcessor::descriptor)
    }

    /// Every processor in declaration order.
    pub fn processors(&self) -> &[OptionProcessor] {
        &self.processors
    }

    /// Types the registry was built from, in discovery order.
    pub fn classes(&self) -> &[TargetClass] {
        &self.classes
    }

    /// Processor registered under short name `name`.
    pub fn short_option(&self, name: char) -> Option<&OptionProcessor> {
        self.short_names.get(&name).map(|&slot| &self.processors[slot])
    }

    /// Processor registered under long name `name`.
    pub fn long_option(&self, name: &str) -> Option<&OptionProcessor> {
        self.long_names.get(name).map(|&slot| &self.processors[slot])
    }

    /// Processor registered under property name `name`.
    pub fn property_option(&self, name: &str) -> Option<&OptionProcessor> {
        self.property_names.get(name).map(|&slot| &self.processors[slot])
    }

    pub(crate) fn short_slot(&self, name: char) -> Option<usize> {
        self.short_names.get(&name).copied()
    }

    pub(crate) fn long_slot(&self, name: &str) -> Option<usize> {
        self.long_names.get(name).copied()
    }

    pub(crate) fn property_slot(&self, name: &str) -> Option<usize> {
        self.property_names.get(name).copied()
    }

    pub(crate) fn processor(&self, slot: usize) -> &OptionProcessor {
        &self.processors[slot]
    }

    pub(crate) fn defaults_for(&self, id: TypeId) -> &[usize] {
        self.defaults.get(&id).map(Vec::as_slice).unwrap_or(&[])
    }

    pub(crate) fn required_slots(&self) -> &[usize] {
        &self.required
    }
}

fn claim<K: Hash + Eq>(
    index: &mut HashMap<K, usize>,
    key: K,
    shown: String,
    slot: usize,
) -> Result<(), OptionsError> {
    match index.entry(key) {
        Entry::Occupied(_) => Err(OptionsError::DuplicateOption(shown)),
        Entry::Vacant(entry) => {
            entry.insert(slot);
            Ok(())
        }
    }
}
