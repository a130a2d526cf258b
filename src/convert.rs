// CLASSIFICATION: COMMUNITY
// Filename: convert.rs v0.1
// Author: Lukas Bower
// Date Modified: 2026-10-19

//! String to value conversion.
//!
//! A [`ConverterRegistry`] maps a parameter type to the function that turns
//! raw command line text into a boxed value of that type. Built-in converters
//! cover text, fixed-width numbers, booleans and the arbitrary precision
//! numeric types. Types without a registered converter fall back to their
//! `FromStr` implementation, captured when the parameter type is declared.

use std::any::{type_name, Any, TypeId};
use std::collections::HashMap;
use std::fmt::Display;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::atomic::{AtomicI32, AtomicI64};
use std::sync::Arc;

use log::trace;
use num_bigint::BigInt;
use once_cell::sync::Lazy;
use rust_decimal::Decimal;

use crate::error::ConversionError;

/// Boxed value produced by a converter.
pub type Value = Box<dyn Any>;

/// Shared conversion function for one parameter type.
pub type Converter = Arc<dyn Fn(&str) -> Result<Value, ConversionError> + Send + Sync>;

/// Runtime description of an operation parameter.
#[derive(Clone)]
pub struct ParamType {
    id: TypeId,
    name: &'static str,
    fallback: Option<Converter>,
}

impl ParamType {
    /// Parameter of type `V`, falling back to `V::from_str` when no converter
    /// is registered for it.
    pub fn of<V>() -> Self
    where
        V: FromStr + Any,
        V::Err: Display,
    {
        Self {
            id: TypeId::of::<V>(),
            name: type_name::<V>(),
            fallback: Some(from_str_converter::<V>()),
        }
    }

    /// Parameter of type `V` with no string constructor. Conversion only works
    /// if a converter for `V` is registered.
    pub fn opaque<V: Any>() -> Self {
        Self {
            id: TypeId::of::<V>(),
            name: type_name::<V>(),
            fallback: None,
        }
    }

    /// Type identity of the parameter.
    pub fn type_id(&self) -> TypeId {
        self.id
    }

    /// Type name of the parameter.
    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl std::fmt::Debug for ParamType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ParamType")
            .field("name", &self.name)
            .field("from_str", &self.fallback.is_some())
            .finish()
    }
}

fn from_str_converter<V>() -> Converter
where
    V: FromStr + Any,
    V::Err: Display,
{
    Arc::new(|raw: &str| {
        V::from_str(raw)
            .map(|value| Box::new(value) as Value)
            .map_err(|err| ConversionError::new(type_name::<V>(), raw, err))
    })
}

fn typed<V: Any>(parse: fn(&str) -> Result<V, String>) -> Converter {
    Arc::new(move |raw: &str| {
        parse(raw)
            .map(|value| Box::new(value) as Value)
            .map_err(|reason| ConversionError::new(type_name::<V>(), raw, reason))
    })
}

fn parse_with<V>(raw: &str) -> Result<V, String>
where
    V: FromStr,
    V::Err: Display,
{
    raw.parse::<V>().map_err(|err| err.to_string())
}

fn parse_bool(raw: &str) -> Result<bool, String> {
    if raw.eq_ignore_ascii_case("true") {
        Ok(true)
    } else if raw.eq_ignore_ascii_case("false") {
        Ok(false)
    } else {
        Err("expected true or false".to_owned())
    }
}

fn parse_decimal(raw: &str) -> Result<Decimal, String> {
    Decimal::from_str_exact(raw)
        .or_else(|_| Decimal::from_scientific(raw))
        .map_err(|err| err.to_string())
}

static BUILTIN: Lazy<HashMap<TypeId, Converter>> = Lazy::new(|| {
    let mut map: HashMap<TypeId, Converter> = HashMap::new();
    map.insert(
        TypeId::of::<String>(),
        typed::<String>(|raw| Ok(raw.to_owned())),
    );
    map.insert(TypeId::of::<i8>(), typed::<i8>(parse_with));
    map.insert(TypeId::of::<i16>(), typed::<i16>(parse_with));
    map.insert(TypeId::of::<i32>(), typed::<i32>(parse_with));
    map.insert(TypeId::of::<i64>(), typed::<i64>(parse_with));
    map.insert(TypeId::of::<isize>(), typed::<isize>(parse_with));
    map.insert(TypeId::of::<u8>(), typed::<u8>(parse_with));
    map.insert(TypeId::of::<u16>(), typed::<u16>(parse_with));
    map.insert(TypeId::of::<u32>(), typed::<u32>(parse_with));
    map.insert(TypeId::of::<u64>(), typed::<u64>(parse_with));
    map.insert(TypeId::of::<usize>(), typed::<usize>(parse_with));
    map.insert(TypeId::of::<f32>(), typed::<f32>(parse_with));
    map.insert(TypeId::of::<f64>(), typed::<f64>(parse_with));
    map.insert(TypeId::of::<bool>(), typed::<bool>(parse_bool));
    map.insert(TypeId::of::<char>(), typed::<char>(parse_with));
    map.insert(TypeId::of::<PathBuf>(), typed::<PathBuf>(parse_with));
    map.insert(
        TypeId::of::<AtomicI32>(),
        typed::<AtomicI32>(|raw| parse_with::<i32>(raw).map(AtomicI32::new)),
    );
    map.insert(
        TypeId::of::<AtomicI64>(),
        typed::<AtomicI64>(|raw| parse_with::<i64>(raw).map(AtomicI64::new)),
    );
    map.insert(TypeId::of::<BigInt>(), typed::<BigInt>(parse_with));
    map.insert(TypeId::of::<Decimal>(), typed::<Decimal>(parse_decimal));
    map
});

/// Converter lookup table.
///
/// Built-ins are shared process-wide; per-registry overrides and resolved
/// fallbacks are cached so that every processor for the same type reuses one
/// converter.
#[derive(Clone, Default)]
pub struct ConverterRegistry {
    custom: HashMap<TypeId, Converter>,
    resolved: HashMap<TypeId, Converter>,
}

impl ConverterRegistry {
    /// Registry holding only the built-in converters.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register (or override) the converter for `V`.
    pub fn register<V, F>(&mut self, convert: F)
    where
        V: Any,
        F: Fn(&str) -> Result<V, String> + Send + Sync + 'static,
    {
        let converter: Converter = Arc::new(move |raw: &str| {
            convert(raw)
                .map(|value| Box::new(value) as Value)
                .map_err(|reason| ConversionError::new(type_name::<V>(), raw, reason))
        });
        self.resolved.remove(&TypeId::of::<V>());
        self.custom.insert(TypeId::of::<V>(), converter);
    }

    /// Resolve the converter for `param`, caching the result.
    ///
    /// Lookup order is custom, built-in, then the parameter's own `FromStr`
    /// fallback. A type with none of these resolves to a converter that
    /// always fails.
    pub fn resolve(&mut self, param: &ParamType) -> Converter {
        if let Some(converter) = self.resolved.get(&param.id) {
            return Arc::clone(converter);
        }
        let found = self
            .custom
            .get(&param.id)
            .or_else(|| BUILTIN.get(&param.id))
            .cloned()
            .or_else(|| param.fallback.clone());
        // Misses stay uncached so a later declaration with `FromStr` still
        // resolves.
        let Some(converter) = found else {
            trace!("no string constructor for {}", param.name);
            return missing_constructor(param.name);
        };
        trace!("resolved converter for {}", param.name);
        self.resolved.insert(param.id, Arc::clone(&converter));
        converter
    }
}

fn missing_constructor(type_name: &'static str) -> Converter {
    Arc::new(move |raw: &str| {
        Err(ConversionError::new(
            type_name,
            raw,
            "type has no string constructor",
        ))
    })
}
