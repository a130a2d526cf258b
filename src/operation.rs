// CLASSIFICATION: COMMUNITY
// Filename: operation.rs v0.1
// Author: Lukas Bower
// Date Modified: 2026-10-19

//! Target operations: the setter an option invokes on a live instance.
//!
//! An operation is type-erased at declaration time. It keeps the parameter
//! list for validation and a closure that downcasts the target and the
//! converted arguments back to their concrete types.

use std::any::{Any, TypeId};
use std::fmt::Display;
use std::str::FromStr;
use std::sync::Arc;

use crate::convert::{ParamType, Value};

/// Reason an erased invocation could not reach the typed setter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mismatch {
    /// The instance is not of the declaring type.
    Target,
    /// An argument is missing or of the wrong type.
    Argument,
}

type Invoke = Arc<dyn Fn(&mut dyn Any, Vec<Value>) -> Result<(), Mismatch> + Send + Sync>;

/// An invocable unit bound to a declaring type, taking a runtime-described
/// parameter list.
#[derive(Clone)]
pub struct TargetOperation {
    name: String,
    params: Vec<ParamType>,
    invoke: Invoke,
}

impl TargetOperation {
    /// Operation with no parameter.
    pub fn nullary<T, F>(name: impl Into<String>, op: F) -> Self
    where
        T: Any,
        F: Fn(&mut T) + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            params: Vec::new(),
            invoke: Arc::new(move |target: &mut dyn Any, _args: Vec<Value>| {
                let target = target.downcast_mut::<T>().ok_or(Mismatch::Target)?;
                op(target);
                Ok(())
            }),
        }
    }

    /// Operation with a single `FromStr` parameter.
    pub fn unary<T, V, F>(name: impl Into<String>, op: F) -> Self
    where
        T: Any,
        V: FromStr + Any,
        V::Err: Display,
        F: Fn(&mut T, V) + Send + Sync + 'static,
    {
        Self::typed(name, ParamType::of::<V>(), op)
    }

    /// Operation with a single parameter described by `param`.
    ///
    /// Fails with [`Mismatch::Argument`] when `param` does not describe `V`.
    pub fn unary_with<T, V, F>(
        name: impl Into<String>,
        param: ParamType,
        op: F,
    ) -> Result<Self, Mismatch>
    where
        T: Any,
        V: Any,
        F: Fn(&mut T, V) + Send + Sync + 'static,
    {
        if param.type_id() != TypeId::of::<V>() {
            return Err(Mismatch::Argument);
        }
        Ok(Self::typed(name, param, op))
    }

    pub(crate) fn typed<T, V, F>(name: impl Into<String>, param: ParamType, op: F) -> Self
    where
        T: Any,
        V: Any,
        F: Fn(&mut T, V) + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            params: vec![param],
            invoke: Arc::new(move |target: &mut dyn Any, mut args: Vec<Value>| {
                let target = target.downcast_mut::<T>().ok_or(Mismatch::Target)?;
                let value = args
                    .pop()
                    .ok_or(Mismatch::Argument)?
                    .downcast::<V>()
                    .map_err(|_| Mismatch::Argument)?;
                op(target, *value);
                Ok(())
            }),
        }
    }

    /// Operation with an arbitrary parameter list, for bindings whose shape
    /// is only known at runtime. The registry rejects more than one parameter.
    pub fn with_params<T, F>(name: impl Into<String>, params: Vec<ParamType>, op: F) -> Self
    where
        T: Any,
        F: Fn(&mut T, Vec<Value>) + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            params,
            invoke: Arc::new(move |target: &mut dyn Any, args: Vec<Value>| {
                let target = target.downcast_mut::<T>().ok_or(Mismatch::Target)?;
                op(target, args);
                Ok(())
            }),
        }
    }

    /// Operation name, used in construction errors.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of declared parameters.
    pub fn arity(&self) -> usize {
        self.params.len()
    }

    /// Declared parameter list.
    pub fn params(&self) -> &[ParamType] {
        &self.params
    }

    pub(crate) fn invoke(&self, target: &mut dyn Any, args: Vec<Value>) -> Result<(), Mismatch> {
        (self.invoke)(target, args)
    }
}

impl std::fmt::Debug for TargetOperation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TargetOperation")
            .field("name", &self.name)
            .field("params", &self.params)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Counter {
        hits: u32,
        last: i64,
    }

    #[test]
    fn nullary_invokes_on_matching_type() {
        let op = TargetOperation::nullary("hit", |c: &mut Counter| c.hits += 1);
        let mut counter = Counter::default();
        op.invoke(&mut counter, Vec::new()).unwrap();
        assert_eq!(counter.hits, 1);
        assert_eq!(op.arity(), 0);
    }

    #[test]
    fn unary_downcasts_argument() {
        let op = TargetOperation::unary("last", |c: &mut Counter, v: i64| c.last = v);
        let mut counter = Counter::default();
        op.invoke(&mut counter, vec![Box::new(42_i64) as Value]).unwrap();
        assert_eq!(counter.last, 42);
        assert_eq!(
            op.invoke(&mut counter, vec![Box::new("42") as Value]),
            Err(Mismatch::Argument)
        );
    }

    #[test]
    fn unary_with_rejects_param_of_other_type() {
        let err = TargetOperation::unary_with(
            "last",
            ParamType::of::<u8>(),
            |c: &mut Counter, v: i64| c.last = v,
        )
        .unwrap_err();
        assert_eq!(err, Mismatch::Argument);
        let op = TargetOperation::unary_with(
            "last",
            ParamType::opaque::<i64>(),
            |c: &mut Counter, v: i64| c.last = v,
        )
        .unwrap();
        assert_eq!(op.params()[0].name(), "i64");
    }

    #[test]
    fn wrong_target_is_reported() {
        let op = TargetOperation::nullary("hit", |c: &mut Counter| c.hits += 1);
        let mut other = 5_u8;
        assert_eq!(op.invoke(&mut other, Vec::new()), Err(Mismatch::Target));
    }
}
