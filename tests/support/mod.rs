// CLASSIFICATION: COMMUNITY
// Filename: mod.rs v0.1
// Author: Lukas Bower
// Date Modified: 2026-10-19

//! Shared option-bearing fixtures for the integration tests.

#![allow(dead_code)]

use std::path::PathBuf;
use std::str::FromStr;
use std::sync::atomic::{AtomicI32, AtomicI64};

use num_bigint::BigInt;
use optbind::{Descriptor, OptionSet, OptionTarget, Options, OptionsError, TargetClass};
use rust_decimal::Decimal;

/// Value type with only a string constructor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParameterValue(pub String);

impl FromStr for ParameterValue {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.starts_with('!') {
            return Err(format!("{s} is not a parameter"));
        }
        Ok(Self(s.to_owned()))
    }
}

/// One option of every supported value form.
#[derive(Debug, Default)]
pub struct Simple {
    pub parameter: Option<ParameterValue>,
    pub byte: i8,
    pub int: i32,
    pub long: i64,
    pub short: i16,
    pub float: f32,
    pub double: f64,
    pub default_int: i32,
    pub traced: bool,
    pub boolean: bool,
    pub zillow: bool,
    pub foo: Option<String>,
    pub default_property: String,
    pub atomic_int: AtomicI32,
    pub atomic_long: AtomicI64,
    pub big_int: BigInt,
    pub decimal: Option<Decimal>,
    pub path: Option<PathBuf>,
}

impl OptionTarget for Simple {
    fn declare(set: &mut OptionSet<Self>) {
        set.value(
            Descriptor::new().short('C').long("cName"),
            |s: &mut Simple, v: ParameterValue| s.parameter = Some(v),
        )
        .value(
            Descriptor::new().short('A').long("aName").default_value("75"),
            |s: &mut Simple, v: i8| s.byte = v,
        )
        .value(
            Descriptor::new().short('I').long("iName").default_value("3"),
            |s: &mut Simple, v: i32| s.int = v,
        )
        .value(
            Descriptor::new().short('L').long("lName").default_value("3"),
            |s: &mut Simple, v: i64| s.long = v,
        )
        .value(
            Descriptor::new().short('S').long("sName").default_value("3"),
            |s: &mut Simple, v: i16| s.short = v,
        )
        .value(
            Descriptor::new().short('H').long("hName").default_value("1.5"),
            |s: &mut Simple, v: f32| s.float = v,
        )
        .value(
            Descriptor::new().short('K').long("kName").default_value("4.5"),
            |s: &mut Simple, v: f64| s.double = v,
        )
        .value(
            Descriptor::new().short('D').default_value("100"),
            |s: &mut Simple, v: i32| s.default_int = v,
        )
        .flag(
            Descriptor::new()
                .short('T')
                .long("trace")
                .description("Option with no value"),
            |s| s.traced = true,
        )
        .value(
            Descriptor::new()
                .short('B')
                .long("boolean")
                .default_value("true")
                .description("Boolean option"),
            |s: &mut Simple, v: bool| s.boolean = v,
        )
        .value(
            Descriptor::new()
                .short('Z')
                .long("zillow")
                .default_value("true")
                .description("Another boolean option"),
            |s: &mut Simple, v: bool| s.zillow = v,
        )
        .value(
            Descriptor::new()
                .long("foo")
                .property()
                .description("Property option"),
            |s: &mut Simple, v: String| s.foo = Some(v),
        )
        .value(
            Descriptor::new()
                .long("default")
                .property()
                .default_value("default")
                .description("Property option with a default"),
            |s: &mut Simple, v: String| s.default_property = v,
        )
        .opaque_value(
            Descriptor::new().short('O').long("oName").default_value("101"),
            |s: &mut Simple, v: AtomicI32| s.atomic_int = v,
        )
        .opaque_value(
            Descriptor::new().short('P').long("pName").default_value("10100"),
            |s: &mut Simple, v: AtomicI64| s.atomic_long = v,
        )
        .value(
            Descriptor::new()
                .short('Q')
                .long("qName")
                .default_value("12345678901234567890"),
            |s: &mut Simple, v: BigInt| s.big_int = v,
        )
        .value(
            Descriptor::new().short('R').long("rName"),
            |s: &mut Simple, v: Decimal| s.decimal = Some(v),
        )
        .value(
            Descriptor::new().short('U').long("uName"),
            |s: &mut Simple, v: PathBuf| s.path = Some(v),
        );
    }
}

/// Holds embedded-value options reached through a reference link.
#[derive(Debug, Default)]
pub struct Embedded {
    pub int: i32,
    pub default_int: i32,
}

impl OptionTarget for Embedded {
    fn declare(set: &mut OptionSet<Self>) {
        set.value(
            Descriptor::new().short('A').embedded(),
            |e: &mut Embedded, v: i32| e.int = v,
        )
        .value(
            Descriptor::new().short('B').embedded().default_value("10"),
            |e: &mut Embedded, v: i32| e.default_int = v,
        );
    }
}

/// Root type owning an [`Embedded`].
#[derive(Debug, Default)]
pub struct WithReference {
    pub int: i32,
    pub default_int: i32,
    pub embedded: Embedded,
}

impl OptionTarget for WithReference {
    fn declare(set: &mut OptionSet<Self>) {
        set.value(
            Descriptor::new().short('C').embedded(),
            |r: &mut WithReference, v: i32| r.int = v,
        )
        .value(
            Descriptor::new().short('D').embedded().default_value("20"),
            |r: &mut WithReference, v: i32| r.default_int = v,
        )
        .reference::<Embedded>();
    }

    fn references(&mut self) -> Vec<&mut dyn OptionTarget> {
        vec![&mut self.embedded as &mut dyn OptionTarget]
    }
}

/// Registry over [`Simple`].
pub fn simple_options() -> Options {
    Options::new(&[TargetClass::of::<Simple>()]).unwrap()
}

/// Parse `args` into a fresh [`Simple`].
pub fn parse_simple(args: &[&str]) -> Result<(Simple, Vec<String>), OptionsError> {
    let mut simple = Simple::default();
    let rest = simple_options().parse(args, &mut [&mut simple as &mut dyn OptionTarget])?;
    Ok((simple, rest))
}
