// CLASSIFICATION: COMMUNITY
// Filename: processor.rs v0.1
// Author: Lukas Bower
// Date Modified: 2026-10-19

//! Option processors: one descriptor bound to its conversion and setter.

use log::trace;

use crate::convert::{Converter, Value};
use crate::descriptor::Descriptor;
use crate::error::{ConversionError, OptionsError};
use crate::operation::{Mismatch, TargetOperation};
use crate::target::{as_any_mut, OptionTarget, TargetClass};

enum Action {
    NoValue,
    Convert {
        type_name: &'static str,
        converter: Converter,
    },
}

/// Stateless unit the matcher invokes. Reusable across parse calls and
/// across instances of the declaring type.
pub struct OptionProcessor {
    descriptor: Descriptor,
    class: TargetClass,
    operation: TargetOperation,
    action: Action,
}

impl OptionProcessor {
    /// Processor for a zero-parameter operation.
    pub(crate) fn no_value(
        descriptor: Descriptor,
        class: TargetClass,
        operation: TargetOperation,
    ) -> Self {
        Self {
            descriptor,
            class,
            operation,
            action: Action::NoValue,
        }
    }

    /// Processor for a one-parameter operation using `converter`.
    pub(crate) fn converting(
        descriptor: Descriptor,
        class: TargetClass,
        operation: TargetOperation,
        converter: Converter,
    ) -> Self {
        let type_name = operation
            .params()
            .first()
            .map(|param| param.name())
            .unwrap_or("()");
        Self {
            descriptor,
            class,
            operation,
            action: Action::Convert {
                type_name,
                converter,
            },
        }
    }

    /// Metadata of the option.
    pub fn descriptor(&self) -> &Descriptor {
        &self.descriptor
    }

    /// Declaring type.
    pub fn class(&self) -> TargetClass {
        self.class
    }

    /// Bound operation.
    pub fn operation(&self) -> &TargetOperation {
        &self.operation
    }

    /// True if the option consumes a value.
    pub fn has_value(&self) -> bool {
        matches!(self.action, Action::Convert { .. })
    }

    /// Name of the value type, if the option consumes a value.
    pub fn value_type(&self) -> Option<&'static str> {
        match &self.action {
            Action::NoValue => None,
            Action::Convert { type_name, .. } => Some(*type_name),
        }
    }

    /// Convert `raw` to the operation's parameter type.
    pub fn convert(&self, raw: &str) -> Result<Option<Value>, ConversionError> {
        match &self.action {
            Action::NoValue => Ok(None),
            Action::Convert { converter, .. } => converter(raw).map(Some),
        }
    }

    /// Convert `value` and apply it to `target`. `name` is the form the user
    /// wrote, used in errors.
    pub fn process(
        &self,
        target: &mut dyn OptionTarget,
        name: &str,
        value: Option<&str>,
    ) -> Result<(), OptionsError> {
        let args = match (&self.action, value) {
            (Action::NoValue, _) => Vec::new(),
            (Action::Convert { .. }, None) => {
                return Err(OptionsError::MissingValue(name.to_owned()))
            }
            (Action::Convert { converter, .. }, Some(raw)) => {
                let converted = converter(raw).map_err(|source| OptionsError::ConversionFailed {
                    option: name.to_owned(),
                    source,
                })?;
                vec![converted]
            }
        };
        trace!(
            "applying {} to {} via {}",
            value.unwrap_or("<none>"),
            self.class.name(),
            self.operation.name()
        );
        self.operation
            .invoke(as_any_mut(target), args)
            .map_err(|mismatch| match mismatch {
                Mismatch::Target => OptionsError::NoTargetInstance {
                    option: name.to_owned(),
                    class: self.class.name(),
                },
                Mismatch::Argument => OptionsError::ConversionFailed {
                    option: name.to_owned(),
                    source: ConversionError::new(
                        self.value_type().unwrap_or("()"),
                        value.unwrap_or_default(),
                        "converted value does not match the parameter type",
                    ),
                },
            })
    }
}

impl std::fmt::Debug for OptionProcessor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OptionProcessor")
            .field("descriptor", &self.descriptor)
            .field("class", &self.class)
            .field("operation", &self.operation.name())
            .field("value_type", &self.value_type())
            .finish()
    }
}
