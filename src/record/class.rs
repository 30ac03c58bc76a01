//! Class descriptors: `(class_name, ordered field descriptors)`.

#[cfg(not(feature = "std"))]
use alloc::{string::String, vec::Vec};
#[cfg(feature = "std")]
use std::{string::String, vec::Vec};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::record::field::FieldDescriptor;

/// Errors raised when constructing a [`ClassDescriptor`] that violates the
/// invariants of `spec.md` §3.3.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ClassDescriptorError {
    /// `class_name` was empty.
    #[error("class name must not be empty")]
    EmptyClassName,
    /// Two fields in the same class share a name (case-sensitive).
    #[error("class `{class}` declares field `{field}` more than once")]
    DuplicateFieldName {
        /// Owning class name.
        class: String,
        /// The repeated field name.
        field: String,
    },
}

/// `(class_name, fields)`, per `spec.md` §3.3. Field order is preserved and
/// is the order `encode_record`/`decode_record` walk in (§4.5/§4.6).
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ClassDescriptor {
    class_name: String,
    fields: Vec<FieldDescriptor>,
}

impl ClassDescriptor {
    /// Build a class descriptor, enforcing the invariants of `spec.md`
    /// §3.3: `class_name` non-empty; field names unique within the class.
    ///
    /// # Errors
    ///
    /// Returns [`ClassDescriptorError`] if an invariant is violated.
    pub fn new(
        class_name: impl Into<String>,
        fields: Vec<FieldDescriptor>,
    ) -> Result<Self, ClassDescriptorError> {
        let class_name = class_name.into();
        if class_name.is_empty() {
            return Err(ClassDescriptorError::EmptyClassName);
        }
        for (i, f) in fields.iter().enumerate() {
            if fields[..i].iter().any(|other| other.name() == f.name()) {
                return Err(ClassDescriptorError::DuplicateFieldName {
                    class: class_name,
                    field: f.name().to_owned(),
                });
            }
        }
        Ok(Self { class_name, fields })
    }

    /// The class name.
    #[must_use]
    pub fn class_name(&self) -> &str {
        &self.class_name
    }

    /// Fields, in declaration order.
    #[must_use]
    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    /// Look up a field by name.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|f| f.name() == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::field::FieldType;

    #[test]
    fn rejects_empty_class_name() {
        assert_eq!(
            ClassDescriptor::new("", vec![]).unwrap_err(),
            ClassDescriptorError::EmptyClassName
        );
    }

    #[test]
    fn rejects_duplicate_field_names() {
        let fields = vec![
            FieldDescriptor::required("name", FieldType::String).unwrap(),
            FieldDescriptor::required("name", FieldType::Int).unwrap(),
        ];
        assert!(matches!(
            ClassDescriptor::new("User", fields),
            Err(ClassDescriptorError::DuplicateFieldName { .. })
        ));
    }

    #[test]
    fn field_lookup() {
        let fields = vec![FieldDescriptor::required("age", FieldType::Int).unwrap()];
        let class = ClassDescriptor::new("User", fields).unwrap();
        assert!(class.field("age").is_some());
        assert!(class.field("missing").is_none());
    }
}
