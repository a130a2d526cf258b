// CLASSIFICATION: COMMUNITY
// Filename: target.rs v0.1
// Author: Lukas Bower
// Date Modified: 2026-10-19

//! Option-bearing types and their declaration tables.

use std::any::{type_name, Any, TypeId};
use std::fmt::Display;
use std::str::FromStr;

use crate::convert::ParamType;
use crate::descriptor::Descriptor;
use crate::operation::TargetOperation;

/// Concrete type identity of a live instance.
pub(crate) fn identity(target: &dyn OptionTarget) -> TypeId {
    let any: &dyn Any = target;
    any.type_id()
}

/// Borrow a live instance for downcasting.
pub(crate) fn as_any_mut(target: &mut dyn OptionTarget) -> &mut dyn Any {
    target
}

/// A type whose state is set from command line options.
///
/// ```
/// use optbind::{Descriptor, OptionSet, OptionTarget};
///
/// #[derive(Default)]
/// struct Settings {
///     level: i32,
///     trace: bool,
/// }
///
/// impl OptionTarget for Settings {
///     fn declare(set: &mut OptionSet<Self>) {
///         set.value(
///             Descriptor::new().short('O').embedded().default_value("1"),
///             |s: &mut Settings, v: i32| s.level = v,
///         )
///         .flag(Descriptor::new().short('T').long("trace"), |s| s.trace = true);
///     }
/// }
/// ```
pub trait OptionTarget: Any + 'static {
    /// Declare the options and reference links of this type.
    fn declare(set: &mut OptionSet<Self>)
    where
        Self: Sized;

    /// Live option-bearing objects owned by this instance.
    fn references(&mut self) -> Vec<&mut dyn OptionTarget> {
        Vec::new()
    }
}

/// One declared option before it is bound into a registry.
#[derive(Clone, Debug)]
pub struct DeclaredOption {
    /// Option metadata.
    pub descriptor: Descriptor,
    /// Bound operation.
    pub operation: TargetOperation,
}

/// Everything a type declares: options in order plus reference links.
#[derive(Debug, Default)]
pub struct ClassDeclarations {
    /// Options in declaration order.
    pub options: Vec<DeclaredOption>,
    /// Types reachable through reference links.
    pub references: Vec<TargetClass>,
}

/// Type-level handle for an option-bearing type.
#[derive(Clone, Copy)]
pub struct TargetClass {
    id: TypeId,
    name: &'static str,
    declare: fn() -> ClassDeclarations,
}

impl TargetClass {
    /// Handle for `T`.
    pub fn of<T: OptionTarget>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: type_name::<T>(),
            declare: declarations_of::<T>,
        }
    }

    /// Type identity.
    pub fn id(&self) -> TypeId {
        self.id
    }

    /// Type name.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Run the type's declaration table.
    pub fn declarations(&self) -> ClassDeclarations {
        (self.declare)()
    }
}

impl PartialEq for TargetClass {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for TargetClass {}

impl std::fmt::Debug for TargetClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name)
    }
}

fn declarations_of<T: OptionTarget>() -> ClassDeclarations {
    let mut set = OptionSet::<T>::new();
    T::declare(&mut set);
    set.declarations
}

/// Declaration collector handed to [`OptionTarget::declare`].
pub struct OptionSet<T> {
    declarations: ClassDeclarations,
    _target: std::marker::PhantomData<fn(&mut T)>,
}

impl<T: OptionTarget> OptionSet<T> {
    fn new() -> Self {
        Self {
            declarations: ClassDeclarations::default(),
            _target: std::marker::PhantomData,
        }
    }

    /// Option that takes no value.
    pub fn flag<F>(&mut self, descriptor: Descriptor, op: F) -> &mut Self
    where
        F: Fn(&mut T) + Send + Sync + 'static,
    {
        let name = descriptor.display_name();
        self.operation(descriptor, TargetOperation::nullary(name, op))
    }

    /// Option whose value converts to `V`.
    pub fn value<V, F>(&mut self, descriptor: Descriptor, op: F) -> &mut Self
    where
        V: FromStr + Any,
        V::Err: Display,
        F: Fn(&mut T, V) + Send + Sync + 'static,
    {
        let name = descriptor.display_name();
        self.operation(descriptor, TargetOperation::unary(name, op))
    }

    /// Option whose value type has no `FromStr`; it relies on a registered
    /// converter.
    pub fn opaque_value<V, F>(&mut self, descriptor: Descriptor, op: F) -> &mut Self
    where
        V: Any,
        F: Fn(&mut T, V) + Send + Sync + 'static,
    {
        let name = descriptor.display_name();
        self.operation(
            descriptor,
            TargetOperation::typed(name, ParamType::opaque::<V>(), op),
        )
    }

    /// Option bound to an explicit operation.
    pub fn operation(&mut self, descriptor: Descriptor, operation: TargetOperation) -> &mut Self {
        self.declarations.options.push(DeclaredOption {
            descriptor,
            operation,
        });
        self
    }

    /// Reference link to another option-bearing type.
    pub fn reference<U: OptionTarget>(&mut self) -> &mut Self {
        self.declarations.references.push(TargetClass::of::<U>());
        self
    }
}
