// CLASSIFICATION: COMMUNITY
// Filename: lib.rs v0.1
// Author: Lukas Bower
// Date Modified: 2026-10-19

//! Declarative command line option binding.
//!
//! Types describe their options by implementing [`OptionTarget`]. An
//! [`Options`] registry is built once from the root types, then
//! [`Options::parse`] matches an argument vector against live instances and
//! returns the positional arguments. [`Options::usage`] renders help text
//! from the same registry.

/// Error taxonomy for construction, conversion and matching.
pub mod error;

/// Option metadata.
pub mod descriptor;

/// String to value converters.
pub mod convert;

/// Type-erased setters.
pub mod operation;

/// Option-bearing types and declaration tables.
pub mod target;

/// Type and instance graph traversal.
pub mod discover;

/// Option processors.
pub mod processor;

/// Registry construction and lookup.
pub mod registry;

/// Token matching.
pub mod matcher;

/// Usage text.
pub mod usage;

/// YAML and JSON descriptor tables.
pub mod table;

pub use convert::{Converter, ConverterRegistry, ParamType, Value};
pub use descriptor::Descriptor;
pub use discover::{discover_classes, TargetGraph};
pub use error::{ConversionError, OptionsError, TableError};
pub use operation::{Mismatch, TargetOperation};
pub use processor::OptionProcessor;
pub use registry::{Options, OptionsBuilder};
pub use table::DescriptorTable;
pub use target::{ClassDeclarations, DeclaredOption, OptionSet, OptionTarget, TargetClass};
pub use usage::UsageLayout;
