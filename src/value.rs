//! Dynamically typed map values
//!
//! Map entries hold arbitrary field values behind the object-safe [`AnyValue`]
//! trait. [`Value`] is the owned, cloneable handle stored in a [`RecordMap`].

use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::fmt;

/// A flat map from field names to dynamically typed values
pub type RecordMap = HashMap<String, Value>;

/// Object-safe view of a value that can live in a [`RecordMap`]
///
/// Implemented for every `'static` type that is `Clone + PartialEq + Debug +
/// Send + Sync`, so record fields of those types convert without any extra
/// code.
pub trait AnyValue: Any + Send + Sync {
    /// Borrow as [`Any`] for downcasting
    fn as_any(&self) -> &dyn Any;

    /// Mutably borrow as [`Any`] for downcasting
    fn as_any_mut(&mut self) -> &mut dyn Any;

    /// Convert the box into a `Box<dyn Any>` for by-value downcasting
    fn into_any(self: Box<Self>) -> Box<dyn Any + Send + Sync>;

    /// Clone into a new box
    fn clone_box(&self) -> Box<dyn AnyValue>;

    /// Compare with another dynamic value; values of different types are never equal
    fn eq_dyn(&self, other: &dyn AnyValue) -> bool;

    /// Debug-format the concrete value
    fn fmt_dyn(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result;

    /// Name of the concrete type, as reported by [`std::any::type_name`]
    fn type_name(&self) -> &'static str;
}

impl<T> AnyValue for T
where
    T: Any + Clone + PartialEq + fmt::Debug + Send + Sync,
{
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn into_any(self: Box<Self>) -> Box<dyn Any + Send + Sync> {
        self
    }

    fn clone_box(&self) -> Box<dyn AnyValue> {
        Box::new(self.clone())
    }

    fn eq_dyn(&self, other: &dyn AnyValue) -> bool {
        other
            .as_any()
            .downcast_ref::<T>()
            .is_some_and(|other| self == other)
    }

    fn fmt_dyn(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }

    fn type_name(&self) -> &'static str {
        std::any::type_name::<T>()
    }
}

/// An owned dynamically typed value
///
/// Equality compares the concrete types first and then the values, so
/// `Value::new(1_i32) != Value::new(1_i64)`.
pub struct Value(Box<dyn AnyValue>);

impl Value {
    /// Wrap a concrete value
    pub fn new<T: AnyValue>(value: T) -> Self {
        Self(Box::new(value))
    }

    /// Wrap an already boxed dynamic value
    #[must_use]
    pub fn from_boxed(value: Box<dyn AnyValue>) -> Self {
        Self(value)
    }

    /// [`TypeId`] of the wrapped value (not of the box)
    #[must_use]
    pub fn value_type_id(&self) -> TypeId {
        self.0.as_any().type_id()
    }

    /// Name of the wrapped value's concrete type
    #[must_use]
    pub fn type_name(&self) -> &'static str {
        self.0.type_name()
    }

    /// Whether the wrapped value is a `T`
    #[must_use]
    pub fn is<T: Any>(&self) -> bool {
        self.0.as_any().is::<T>()
    }

    /// Borrow the wrapped value as a `T`
    #[must_use]
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.0.as_any().downcast_ref::<T>()
    }

    /// Mutably borrow the wrapped value as a `T`
    pub fn downcast_mut<T: Any>(&mut self) -> Option<&mut T> {
        self.0.as_any_mut().downcast_mut::<T>()
    }

    /// Take the wrapped value as a `T`, handing the value back on a type mismatch
    pub fn downcast<T: Any>(self) -> std::result::Result<T, Self> {
        if self.is::<T>() {
            match self.0.into_any().downcast::<T>() {
                Ok(value) => Ok(*value),
                // `is` just confirmed the type
                Err(_) => unreachable!("type checked before downcast"),
            }
        } else {
            Err(self)
        }
    }

    /// Borrow the wrapped value as [`AnyValue`]
    #[must_use]
    pub fn as_dyn(&self) -> &dyn AnyValue {
        self.0.as_ref()
    }

    /// Mutably borrow the wrapped value as [`Any`]
    pub fn as_any_mut(&mut self) -> &mut dyn Any {
        self.0.as_any_mut()
    }
}

impl Clone for Value {
    fn clone(&self) -> Self {
        Self(self.0.clone_box())
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        self.0.eq_dyn(other.0.as_ref())
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt_dyn(f)
    }
}
