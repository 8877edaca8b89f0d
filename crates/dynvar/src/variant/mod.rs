// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! The Variant value: kind-tagged payload plus a constant lock.
//!
//! Kind and payload live in one [`Value`] enum, so they can only change
//! together. The lock is shallow: a locked Array or Object cannot be replaced
//! or deleted, but its elements and entries stay mutable unless they are
//! locked themselves.

mod array;
mod object;

pub use object::Object;

use crate::{ClonePolicy, Function, Kind, Pointer, Result, VariantError};
use std::any::Any;
use std::sync::Arc;

/// Kind-dependent payload of a [`Variant`].
///
/// Exposed read-only through [`Variant::value`] for pattern matching; all
/// mutation goes through `Variant` methods so lock and key rules hold.
#[derive(Debug, Default)]
pub enum Value {
    #[default]
    Undefined,
    Null,
    Boolean(bool),
    Number(i32),
    String(String),
    Pointer(Pointer),
    Function(Function),
    Array(Vec<Variant>),
    Object(Object),
}

impl Value {
    pub fn kind(&self) -> Kind {
        match self {
            Value::Undefined => Kind::Undefined,
            Value::Null => Kind::Null,
            Value::Boolean(_) => Kind::Boolean,
            Value::Number(_) => Kind::Number,
            Value::String(_) => Kind::String,
            Value::Pointer(_) => Kind::Pointer,
            Value::Function(_) => Kind::Function,
            Value::Array(_) => Kind::Array,
            Value::Object(_) => Kind::Object,
        }
    }

    /// Deep copy: fresh nested Variants, tombstones dropped, locks cleared.
    pub(crate) fn deep_clone(&self, policy: ClonePolicy) -> Result<Value> {
        Ok(match self {
            Value::Undefined => Value::Undefined,
            Value::Null => Value::Null,
            Value::Boolean(b) => Value::Boolean(*b),
            Value::Number(n) => Value::Number(*n),
            Value::String(s) => Value::String(s.clone()),
            Value::Pointer(p) => Value::Pointer(p.clone()),
            Value::Function(f) => Value::Function(f.fresh(policy)?),
            Value::Array(items) => Value::Array(
                items
                    .iter()
                    .map(|item| item.value.deep_clone(policy).map(Variant::from_value))
                    .collect::<Result<Vec<_>>>()?,
            ),
            Value::Object(object) => Value::Object(object.deep_clone(policy)?),
        })
    }

    /// Take ownership the way a clone would look: locks cleared and
    /// tombstones dropped at every level, without copying payloads.
    pub(crate) fn adopt(self) -> Value {
        match self {
            Value::Array(items) => Value::Array(items.into_iter().map(Variant::adopt).collect()),
            Value::Object(object) => Value::Object(object.adopt()),
            other => other,
        }
    }
}

/// A dynamically-typed value.
///
/// Created by a kind constructor, a host conversion (`From`), or by cloning.
/// `Clone` is a deep copy: Arrays and Objects get fresh nested Variants,
/// tombstoned Object entries are dropped, Functions are asked for a fresh
/// instance (sharing the handle if they have none), Pointers copy the
/// reference. Clones are never constant-locked.
#[derive(Debug, Default)]
pub struct Variant {
    value: Value,
    constant: bool,
}

impl Variant {
    pub(crate) fn from_value(value: Value) -> Self {
        Self {
            value,
            constant: false,
        }
    }

    pub(crate) fn adopt(self) -> Self {
        Self::from_value(self.value.adopt())
    }

    // ------------------------------------------------------------------
    // Kind constructors
    // ------------------------------------------------------------------

    /// The uninitialized marker.
    pub fn undefined() -> Self {
        Self::from_value(Value::Undefined)
    }

    pub fn null() -> Self {
        Self::from_value(Value::Null)
    }

    pub fn boolean(value: bool) -> Self {
        Self::from_value(Value::Boolean(value))
    }

    pub fn number(value: i32) -> Self {
        Self::from_value(Value::Number(value))
    }

    pub fn string(value: impl Into<String>) -> Self {
        Self::from_value(Value::String(value.into()))
    }

    /// Wrap a host object as an opaque Pointer.
    pub fn pointer<T: Any + Send + Sync>(object: T) -> Self {
        Self::from_value(Value::Pointer(Pointer::new(object)))
    }

    /// Reference an already shared host object.
    pub fn pointer_shared(object: Arc<dyn Any + Send + Sync>) -> Self {
        Self::from_value(Value::Pointer(Pointer::from_arc(object)))
    }

    pub fn function(function: Function) -> Self {
        Self::from_value(Value::Function(function))
    }

    /// Array of the given items, each converted as by [`Variant::assign`].
    pub fn array<I, T>(items: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Variant>,
    {
        Self::from_value(Value::Array(
            items
                .into_iter()
                .map(|item| {
                    let item: Variant = item.into();
                    item.adopt()
                })
                .collect(),
        ))
    }

    pub fn empty_array() -> Self {
        Self::from_value(Value::Array(Vec::new()))
    }

    pub fn object() -> Self {
        Self::from_value(Value::Object(Object::new()))
    }

    // Pre-locked constants

    pub fn locked_null() -> Self {
        Self::constant(Value::Null)
    }

    pub fn locked_true() -> Self {
        Self::constant(Value::Boolean(true))
    }

    pub fn locked_false() -> Self {
        Self::constant(Value::Boolean(false))
    }

    fn constant(value: Value) -> Self {
        Self {
            value,
            constant: true,
        }
    }

    // ------------------------------------------------------------------
    // Introspection
    // ------------------------------------------------------------------

    pub fn kind(&self) -> Kind {
        self.value.kind()
    }

    /// Read-only view of the payload.
    pub fn value(&self) -> &Value {
        &self.value
    }

    pub fn is_undefined(&self) -> bool {
        matches!(self.value, Value::Undefined)
    }

    /// Compare the kind against a name, ignoring ASCII case.
    pub fn is_kind_named(&self, name: &str) -> bool {
        Kind::from_name(name) == Some(self.kind())
    }

    /// Undefined variants are never constant.
    pub fn is_constant(&self) -> bool {
        !self.is_undefined() && self.constant
    }

    // ------------------------------------------------------------------
    // Lock, assignment, deletion
    // ------------------------------------------------------------------

    pub fn lock(&mut self) -> Result<&mut Self> {
        self.check_defined("lock()")?;
        self.constant = true;
        Ok(self)
    }

    pub fn unlock(&mut self) -> Result<&mut Self> {
        self.check_defined("unlock()")?;
        self.constant = false;
        Ok(self)
    }

    /// Builder-style [`Variant::lock`] for freshly constructed values.
    pub fn locked(mut self) -> Result<Self> {
        self.lock()?;
        Ok(self)
    }

    /// Replace kind and payload wholesale (`let`).
    ///
    /// Host values map to their kinds (`None` to Null); a `&Variant` is deep
    /// cloned; an owned Variant is taken over as a clone would be. Fails
    /// with `ConstantViolation` on a locked Variant, leaving it unchanged.
    pub fn assign(&mut self, value: impl Into<Variant>) -> Result<&mut Self> {
        self.check_mutable("let()")?;
        let incoming: Variant = value.into();
        self.value = incoming.value.adopt();
        Ok(self)
    }

    /// Deep-clone `source` into `self` (`cloneFrom`).
    pub fn clone_from_variant(&mut self, source: &Variant) -> Result<&mut Self> {
        self.clone_from_with(source, ClonePolicy::default())
    }

    /// [`Variant::clone_from_variant`] with an explicit Function clone policy.
    ///
    /// The copy is built before `self` is touched, so a failure leaves it
    /// unchanged.
    pub fn clone_from_with(&mut self, source: &Variant, policy: ClonePolicy) -> Result<&mut Self> {
        self.check_mutable("cloneFrom()")?;
        self.value = source.value.deep_clone(policy)?;
        Ok(self)
    }

    /// Deep clone (`clone`). Fails on Undefined.
    pub fn try_clone(&self) -> Result<Variant> {
        self.try_clone_with(ClonePolicy::default())
    }

    pub fn try_clone_with(&self, policy: ClonePolicy) -> Result<Variant> {
        self.check_defined("clone()")?;
        Ok(Self::from_value(self.value.deep_clone(policy)?))
    }

    /// Turn this Variant back into Undefined.
    pub fn delete(&mut self) -> Result<()> {
        self.check_mutable("delete()")?;
        self.value = Value::Undefined;
        self.constant = false;
        Ok(())
    }

    // ------------------------------------------------------------------
    // Typed accessors
    // ------------------------------------------------------------------

    pub fn as_bool(&self) -> Result<bool> {
        match &self.value {
            Value::Boolean(b) => Ok(*b),
            other => Err(Self::access_error("Boolean::as_bool()", "Boolean", other)),
        }
    }

    pub fn as_number(&self) -> Result<i32> {
        match &self.value {
            Value::Number(n) => Ok(*n),
            other => Err(Self::access_error("Number::as_number()", "Number", other)),
        }
    }

    pub fn as_str(&self) -> Result<&str> {
        match &self.value {
            Value::String(s) => Ok(s.as_str()),
            other => Err(Self::access_error("String::as_str()", "String", other)),
        }
    }

    pub fn as_pointer(&self) -> Result<&Pointer> {
        match &self.value {
            Value::Pointer(p) => Ok(p),
            other => Err(Self::access_error("Pointer::as_pointer()", "Pointer", other)),
        }
    }

    pub fn as_function(&self) -> Result<&Function> {
        match &self.value {
            Value::Function(f) => Ok(f),
            other => Err(Self::access_error(
                "Function::as_function()",
                "Function",
                other,
            )),
        }
    }

    pub fn as_array(&self) -> Result<&[Variant]> {
        self.array_ref("Array::as_array()").map(Vec::as_slice)
    }

    pub fn as_object(&self) -> Result<&Object> {
        self.object_ref("Object::as_object()")
    }

    /// Invoke a Function variant.
    pub fn call(&self, args: &[Variant]) -> Result<Variant> {
        match &self.value {
            Value::Function(f) => f.call(args),
            other => Err(Self::access_error("Function::call()", "Function", other)),
        }
    }

    // ------------------------------------------------------------------
    // Array / Object shared operations
    // ------------------------------------------------------------------

    /// Drop Undefined elements of an Array (compacting it) or purge the
    /// tombstones of an Object.
    pub fn clean(&mut self) -> Result<()> {
        match &mut self.value {
            Value::Array(items) => {
                items.retain(|item| !item.is_undefined());
                Ok(())
            }
            Value::Object(object) => {
                let purged = object.purge_tombstones();
                log::trace!("[variant] clean() purged {} tombstones", purged);
                Ok(())
            }
            other => Err(Self::access_error(
                "{Array, Object}::clean()",
                "Array or Object",
                other,
            )),
        }
    }

    /// Remove every element or entry.
    pub fn clear(&mut self) -> Result<()> {
        match &mut self.value {
            Value::Array(items) => {
                items.clear();
                Ok(())
            }
            Value::Object(object) => {
                object.clear();
                Ok(())
            }
            other => Err(Self::access_error(
                "{Array, Object}::clear()",
                "Array or Object",
                other,
            )),
        }
    }

    // ------------------------------------------------------------------
    // Checks
    // ------------------------------------------------------------------

    fn check_defined(&self, op: &'static str) -> Result<()> {
        if self.is_undefined() {
            return Err(VariantError::InvalidOperationOnUndefined { op });
        }
        Ok(())
    }

    pub(crate) fn check_mutable(&self, op: &'static str) -> Result<()> {
        if self.is_constant() {
            return Err(VariantError::ConstantViolation { op });
        }
        Ok(())
    }

    fn access_error(op: &'static str, expected: &'static str, found: &Value) -> VariantError {
        match found {
            Value::Undefined => VariantError::InvalidOperationOnUndefined { op },
            other => VariantError::wrong_kind(op, expected, other.kind()),
        }
    }

    pub(crate) fn array_ref(&self, op: &'static str) -> Result<&Vec<Variant>> {
        match &self.value {
            Value::Array(items) => Ok(items),
            other => Err(Self::access_error(op, "Array", other)),
        }
    }

    pub(crate) fn array_mut(&mut self, op: &'static str) -> Result<&mut Vec<Variant>> {
        match &mut self.value {
            Value::Array(items) => Ok(items),
            other => Err(Self::access_error(op, "Array", other)),
        }
    }

    pub(crate) fn object_ref(&self, op: &'static str) -> Result<&Object> {
        match &self.value {
            Value::Object(object) => Ok(object),
            other => Err(Self::access_error(op, "Object", other)),
        }
    }

    pub(crate) fn object_mut(&mut self, op: &'static str) -> Result<&mut Object> {
        match &mut self.value {
            Value::Object(object) => Ok(object),
            other => Err(Self::access_error(op, "Object", other)),
        }
    }
}

impl Clone for Variant {
    fn clone(&self) -> Self {
        // ShareFallback never fails: every other kind copies infallibly.
        let value = self
            .value
            .deep_clone(ClonePolicy::ShareFallback)
            .unwrap_or_default();
        Self::from_value(value)
    }
}

// Host conversions

impl From<bool> for Variant {
    fn from(value: bool) -> Self {
        Self::boolean(value)
    }
}

impl From<i32> for Variant {
    fn from(value: i32) -> Self {
        Self::number(value)
    }
}

impl From<&str> for Variant {
    fn from(value: &str) -> Self {
        Self::string(value)
    }
}

impl From<String> for Variant {
    fn from(value: String) -> Self {
        Self::string(value)
    }
}

impl From<&Variant> for Variant {
    fn from(value: &Variant) -> Self {
        value.clone()
    }
}

impl From<Function> for Variant {
    fn from(value: Function) -> Self {
        Self::function(value)
    }
}

impl From<Pointer> for Variant {
    fn from(value: Pointer) -> Self {
        Self::from_value(Value::Pointer(value))
    }
}

impl From<Object> for Variant {
    fn from(value: Object) -> Self {
        Self::from_value(Value::Object(value))
    }
}

impl<T: Into<Variant>> From<Option<T>> for Variant {
    fn from(value: Option<T>) -> Self {
        value.map_or_else(Self::null, Into::into)
    }
}

impl<T: Into<Variant>> From<Vec<T>> for Variant {
    fn from(items: Vec<T>) -> Self {
        Self::array(items)
    }
}
