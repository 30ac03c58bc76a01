//! Field descriptors: `(name, declared_type, optional, nested_type_name)`.

#[cfg(not(feature = "std"))]
use alloc::string::String;
#[cfg(feature = "std")]
use std::string::String;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::value::Value;

/// The closed set of semantic types a field can declare, per `spec.md`
/// §3.2. `Class` is the one variant that carries extra information (the
/// nested class's name) rather than mapping one-to-one onto a [`Value`]
/// variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum FieldType {
    /// Matches [`Value::Null`].
    Null,
    /// Matches [`Value::Bool`].
    Bool,
    /// Matches [`Value::Int`].
    Int,
    /// Matches [`Value::Float`].
    Float,
    /// Matches [`Value::String`].
    String,
    /// Matches [`Value::Binary`].
    Binary,
    /// Matches [`Value::Array`].
    Array,
    /// Matches [`Value::Map`] directly (a map field with no associated
    /// record schema).
    Map,
    /// A nested record reference. The wire representation is still a
    /// [`Value::Map`]; `Class` additionally names which registered class
    /// describes that map's shape.
    Class,
}

impl FieldType {
    /// `true` if a value of this runtime variant satisfies this declared
    /// type. `Class` is satisfied by any `Map`, since the nested schema
    /// check is a separate registry lookup (`spec.md` §4.5/§4.6), not a
    /// property of the value itself.
    #[must_use]
    pub const fn accepts(self, value: &Value) -> bool {
        matches!(
            (self, value),
            (FieldType::Null, Value::Null)
                | (FieldType::Bool, Value::Bool(_))
                | (FieldType::Int, Value::Int(_))
                | (FieldType::Float, Value::Float(_))
                | (FieldType::String, Value::String(_))
                | (FieldType::Binary, Value::Binary(_))
                | (FieldType::Array, Value::Array(_))
                | (FieldType::Map, Value::Map(_))
                | (FieldType::Class, Value::Map(_))
        )
    }

    /// Display name used in [`crate::error::EncodeError::FieldTypeMismatch`]
    /// and [`crate::error::DecodeError::FieldTypeMismatch`].
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            FieldType::Null => "null",
            FieldType::Bool => "bool",
            FieldType::Int => "int",
            FieldType::Float => "float",
            FieldType::String => "string",
            FieldType::Binary => "binary",
            FieldType::Array => "array",
            FieldType::Map => "map",
            FieldType::Class => "class",
        }
    }
}

/// Errors raised when constructing a [`FieldDescriptor`] that violates the
/// invariants of `spec.md` §3.2. Distinct from [`crate::error::EncodeError`]
/// / [`crate::error::DecodeError`]: this is a metadata-construction-time
/// check, not something that happens while walking bytes or a value tree.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FieldDescriptorError {
    /// `name` was empty.
    #[error("field name must not be empty")]
    EmptyName,
    /// `declared_type` was `Class` but `nested_type_name` was empty.
    #[error("field `{field}` declares type Class but has no nested_type_name")]
    MissingNestedTypeName {
        /// Field name.
        field: String,
    },
    /// `declared_type` was not `Class` but `nested_type_name` was non-empty.
    #[error("field `{field}` declares a nested_type_name but its type is not Class")]
    UnexpectedNestedTypeName {
        /// Field name.
        field: String,
    },
}

/// `(name, declared_type, optional, nested_type_name)`, per `spec.md` §3.2.
///
/// Fields are private: `new`/`required`/`optional`/`class` are the only
/// construction paths, so the §3.2 invariants they enforce (non-empty
/// name; `nested_type_name` present iff `declared_type == Class`) cannot be
/// bypassed via a struct literal, matching [`crate::record::class::ClassDescriptor`]'s
/// own private-fields-plus-getters shape.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FieldDescriptor {
    name: String,
    declared_type: FieldType,
    optional: bool,
    nested_type_name: Option<String>,
}

impl FieldDescriptor {
    /// Build a field descriptor, enforcing the invariants of `spec.md`
    /// §3.2: `name` non-empty; `nested_type_name` present iff
    /// `declared_type == Class`.
    ///
    /// # Errors
    ///
    /// Returns [`FieldDescriptorError`] if an invariant is violated.
    pub fn new(
        name: impl Into<String>,
        declared_type: FieldType,
        optional: bool,
        nested_type_name: Option<impl Into<String>>,
    ) -> Result<Self, FieldDescriptorError> {
        let name = name.into();
        if name.is_empty() {
            return Err(FieldDescriptorError::EmptyName);
        }
        let nested_type_name = nested_type_name.map(Into::into);
        match declared_type {
            FieldType::Class => {
                if nested_type_name.as_deref().map_or(true, str::is_empty) {
                    return Err(FieldDescriptorError::MissingNestedTypeName { field: name });
                }
            }
            _ => {
                if nested_type_name.is_some() {
                    return Err(FieldDescriptorError::UnexpectedNestedTypeName { field: name });
                }
            }
        }
        Ok(Self { name, declared_type, optional, nested_type_name })
    }

    /// Convenience constructor for a non-`Class`, required field.
    ///
    /// # Errors
    ///
    /// Returns [`FieldDescriptorError`] if `name` is empty or
    /// `declared_type` is `Class` (use [`FieldDescriptor::class`] instead).
    pub fn required(name: impl Into<String>, declared_type: FieldType) -> Result<Self, FieldDescriptorError> {
        Self::new(name, declared_type, false, None::<String>)
    }

    /// Convenience constructor for a non-`Class`, optional field.
    ///
    /// # Errors
    ///
    /// See [`FieldDescriptor::required`].
    pub fn optional(name: impl Into<String>, declared_type: FieldType) -> Result<Self, FieldDescriptorError> {
        Self::new(name, declared_type, true, None::<String>)
    }

    /// Convenience constructor for a `Class`-typed field referencing
    /// `nested_class`.
    ///
    /// # Errors
    ///
    /// See [`FieldDescriptor::new`].
    pub fn class(
        name: impl Into<String>,
        nested_class: impl Into<String>,
        optional: bool,
    ) -> Result<Self, FieldDescriptorError> {
        Self::new(name, FieldType::Class, optional, Some(nested_class))
    }

    /// Field name, unique within its owning class.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Declared semantic type.
    #[must_use]
    pub const fn declared_type(&self) -> FieldType {
        self.declared_type
    }

    /// Whether the field may be absent (on the accessor side) or missing
    /// (on the wire).
    #[must_use]
    pub const fn is_optional(&self) -> bool {
        self.optional
    }

    /// Name of the nested class, present iff `declared_type() == FieldType::Class`.
    #[must_use]
    pub fn nested_type_name(&self) -> Option<&str> {
        self.nested_type_name.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_empty_name() {
        assert_eq!(
            FieldDescriptor::required("", FieldType::Int).unwrap_err(),
            FieldDescriptorError::EmptyName
        );
    }

    #[test]
    fn class_requires_nested_name() {
        assert!(matches!(
            FieldDescriptor::new("x", FieldType::Class, false, None::<String>),
            Err(FieldDescriptorError::MissingNestedTypeName { .. })
        ));
    }

    #[test]
    fn non_class_rejects_nested_name() {
        assert!(matches!(
            FieldDescriptor::new("x", FieldType::Int, false, Some("Y")),
            Err(FieldDescriptorError::UnexpectedNestedTypeName { .. })
        ));
    }

    #[test]
    fn accepts_matching_variant() {
        assert!(FieldType::Int.accepts(&Value::Int(1)));
        assert!(!FieldType::Int.accepts(&Value::Bool(true)));
        assert!(FieldType::Class.accepts(&Value::Map(vec![])));
    }
}
