//! Given a registered record instance, materializes a field map and
//! encodes it — `spec.md` §4.5.

#[cfg(not(feature = "std"))]
use alloc::{string::String, vec::Vec};
#[cfg(feature = "std")]
use std::{string::String, vec::Vec};

use crate::encoder::encode;
use crate::error::EncodeError;
use crate::record::class::ClassDescriptor;
use crate::record::field::FieldType;
use crate::record::registry::Registry;
use crate::value::Value;

/// One field's worth of data an instance can hand back to the encoder.
///
/// `spec.md` §4.5 describes a single `field_value(name) -> value node?`
/// accessor, with `Class`-typed fields expected to already carry a fully
/// nested `Map` built by the caller recursively invoking this same
/// operation. That phrasing makes the `CircularReference` error kind
/// (reserved by §7, required to be reachable by §1) permanently dead: a
/// caller that pre-builds the nested map has already finished recursing
/// before this crate ever sees it, so there is nothing left here to detect
/// a cycle in.
///
/// [`FieldValue::Nested`] is the alternative this crate actually
/// implements: a `Class`-typed field may instead hand back a live
/// [`Recordable`] reference, and [`encode_record`] does the recursion
/// itself, tracking instance identity on the way down so a cycle is
/// rejected instead of overflowing the stack. `FieldValue::Scalar` with an
/// already-built `Value::Map` is still accepted for a `Class` field (the
/// literal §4.5 reading), it just forgoes cycle detection for that subtree
/// since there is no live instance to track. See `DESIGN.md` for the full
/// rationale.
#[derive(Debug)]
pub enum FieldValue<'a> {
    /// A value ready to encode as-is (including an already-nested `Map`
    /// for a `Class` field).
    Scalar(Value),
    /// A live nested record instance; only meaningful for a `Class`-typed
    /// field. [`encode_record`] recurses into it.
    Nested(&'a dyn Recordable),
}

/// The accessor contract a host record type implements to meet the codec,
/// per `spec.md` §6 ("Accessor contract supplied by caller for records").
pub trait Recordable {
    /// The registered class name this instance should be encoded as.
    fn class_name(&self) -> &str;

    /// The value for `field_name`, or `None` if the field is absent on this
    /// instance (only valid for optional fields — see §4.5). Returning a
    /// [`FieldValue::Scalar`] whose variant does not match the field's
    /// declared type is a caller error surfaced as
    /// [`EncodeError::FieldTypeMismatch`].
    fn field_value(&self, field_name: &str) -> Option<FieldValue<'_>>;
}

/// Encode `instance` using the class schema registered under
/// `instance.class_name()` in `registry`.
///
/// # Errors
///
/// - [`EncodeError::UnregisteredClass`] if `instance.class_name()` has no
///   registered [`ClassDescriptor`].
/// - [`EncodeError::MissingRequiredField`] if a required field's accessor
///   returns `None`.
/// - [`EncodeError::FieldTypeMismatch`] if a field's value does not match
///   its declared type.
/// - [`EncodeError::UnregisteredNestedClass`] if a `Class`-typed field
///   names a class that is not registered.
/// - [`EncodeError::CircularReference`] if a `Class`-typed field's
///   [`FieldValue::Nested`] instance is already an ancestor of `instance`
///   in the current encode call.
pub fn encode_record(instance: &dyn Recordable, registry: &Registry) -> Result<Vec<u8>, EncodeError> {
    let mut visited: Vec<*const dyn Recordable> = Vec::new();
    let value = encode_record_value(instance, registry, &mut visited)?;
    encode(&value)
}

fn encode_record_value(
    instance: &dyn Recordable,
    registry: &Registry,
    visited: &mut Vec<*const dyn Recordable>,
) -> Result<Value, EncodeError> {
    let class_name = instance.class_name();
    let class: &ClassDescriptor = registry
        .get(class_name)
        .ok_or_else(|| EncodeError::UnregisteredClass { class_name: class_name.to_owned() })?;

    visited.push(instance);
    let result = encode_fields(instance, class, registry, visited);
    visited.pop();
    result
}

fn encode_fields(
    instance: &dyn Recordable,
    class: &ClassDescriptor,
    registry: &Registry,
    visited: &mut Vec<*const dyn Recordable>,
) -> Result<Value, EncodeError> {
    let class_name = class.class_name();
    let mut entries = Vec::with_capacity(class.fields().len());

    for field in class.fields() {
        match instance.field_value(field.name()) {
            None => {
                if field.is_optional() {
                    continue;
                }
                return Err(EncodeError::MissingRequiredField {
                    field: field.name().to_owned(),
                    class: class_name.to_owned(),
                });
            }
            Some(FieldValue::Scalar(v)) => {
                if !field.declared_type().accepts(&v) {
                    return Err(EncodeError::FieldTypeMismatch {
                        field: field.name().to_owned(),
                        class: class_name.to_owned(),
                        expected: field.declared_type().display_name().into(),
                        actual: v.variant_name().into(),
                    });
                }
                if field.declared_type() == FieldType::Class {
                    check_nested_registered(field, class_name, registry)?;
                }
                entries.push((field.name().to_owned(), v));
            }
            Some(FieldValue::Nested(nested)) => {
                if field.declared_type() != FieldType::Class {
                    return Err(EncodeError::FieldTypeMismatch {
                        field: field.name().to_owned(),
                        class: class_name.to_owned(),
                        expected: field.declared_type().display_name().into(),
                        actual: "class".into(),
                    });
                }
                check_nested_registered(field, class_name, registry)?;

                let identity: *const dyn Recordable = nested;
                if visited.iter().any(|v| core::ptr::eq(*v, identity)) {
                    return Err(EncodeError::CircularReference {
                        class: class_name.to_owned(),
                        field: field.name().to_owned(),
                    });
                }
                let nested_value = encode_record_value(nested, registry, visited)?;
                entries.push((field.name().to_owned(), nested_value));
            }
        }
    }

    Ok(Value::Map(entries))
}

fn check_nested_registered(
    field: &crate::record::field::FieldDescriptor,
    class_name: &str,
    registry: &Registry,
) -> Result<(), EncodeError> {
    let nested_name = field.nested_type_name().unwrap_or_default();
    if !registry.is_registered(nested_name) {
        return Err(EncodeError::UnregisteredNestedClass {
            field: field.name().to_owned(),
            class: class_name.to_owned(),
            nested: nested_name.to_owned(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::class::ClassDescriptor;
    use crate::record::field::FieldDescriptor;

    struct User {
        name: String,
        age: i64,
        email: Option<String>,
    }

    impl Recordable for User {
        fn class_name(&self) -> &str {
            "User"
        }
        fn field_value(&self, field_name: &str) -> Option<FieldValue<'_>> {
            match field_name {
                "name" => Some(FieldValue::Scalar(Value::String(self.name.clone()))),
                "age" => Some(FieldValue::Scalar(Value::Int(self.age))),
                "email" => self.email.clone().map(|e| FieldValue::Scalar(Value::String(e))),
                _ => None,
            }
        }
    }

    fn user_registry() -> Registry {
        let mut r = Registry::new();
        r.register(
            ClassDescriptor::new(
                "User",
                vec![
                    FieldDescriptor::required("name", FieldType::String).unwrap(),
                    FieldDescriptor::required("age", FieldType::Int).unwrap(),
                    FieldDescriptor::optional("email", FieldType::String).unwrap(),
                ],
            )
            .unwrap(),
        )
        .unwrap();
        r
    }

    #[test]
    fn optional_absent_field_is_skipped() {
        let registry = user_registry();
        let user = User { name: "Alice".into(), age: 30, email: None };
        let bytes = encode_record(&user, &registry).unwrap();
        let decoded = crate::decoder::decode(&bytes).unwrap();
        assert_eq!(
            decoded,
            Value::Map(vec![("name".into(), Value::String("Alice".into())), ("age".into(), Value::Int(30))])
        );
    }

    #[test]
    fn unregistered_class_fails() {
        let registry = Registry::new();
        let user = User { name: "Alice".into(), age: 30, email: None };
        assert_eq!(
            encode_record(&user, &registry).unwrap_err(),
            EncodeError::UnregisteredClass { class_name: "User".into() }
        );
    }

    #[test]
    fn missing_required_field_fails() {
        struct Empty;
        impl Recordable for Empty {
            fn class_name(&self) -> &str {
                "User"
            }
            fn field_value(&self, _: &str) -> Option<FieldValue<'_>> {
                None
            }
        }
        let registry = user_registry();
        assert!(matches!(
            encode_record(&Empty, &registry).unwrap_err(),
            EncodeError::MissingRequiredField { .. }
        ));
    }

    struct Node {
        label: String,
        next: Option<alloc_box::Box<Node>>,
    }

    mod alloc_box {
        #[cfg(not(feature = "std"))]
        pub use alloc::boxed::Box;
        #[cfg(feature = "std")]
        pub use std::boxed::Box;
    }

    impl Recordable for Node {
        fn class_name(&self) -> &str {
            "Node"
        }
        fn field_value(&self, field_name: &str) -> Option<FieldValue<'_>> {
            match field_name {
                "label" => Some(FieldValue::Scalar(Value::String(self.label.clone()))),
                "next" => self.next.as_deref().map(|n| FieldValue::Nested(n as &dyn Recordable)),
                _ => None,
            }
        }
    }

    fn node_registry() -> Registry {
        let mut r = Registry::new();
        r.register(
            ClassDescriptor::new(
                "Node",
                vec![
                    FieldDescriptor::required("label", FieldType::String).unwrap(),
                    FieldDescriptor::class("next", "Node", true).unwrap(),
                ],
            )
            .unwrap(),
        )
        .unwrap();
        r
    }

    #[test]
    fn nested_record_round_trips() {
        let registry = node_registry();
        let leaf = Node { label: "b".into(), next: None };
        let root = Node { label: "a".into(), next: Some(alloc_box::Box::new(leaf)) };
        let bytes = encode_record(&root, &registry).unwrap();
        let decoded = crate::decoder::decode(&bytes).unwrap();
        assert_eq!(
            decoded,
            Value::Map(vec![
                ("label".into(), Value::String("a".into())),
                ("next".into(), Value::Map(vec![("label".into(), Value::String("b".into()))])),
            ])
        );
    }

    #[test]
    fn self_reference_is_rejected_as_circular() {
        struct SelfLoop;
        impl Recordable for SelfLoop {
            fn class_name(&self) -> &str {
                "Node"
            }
            fn field_value(&self, field_name: &str) -> Option<FieldValue<'_>> {
                match field_name {
                    "label" => Some(FieldValue::Scalar(Value::String("loop".into()))),
                    "next" => Some(FieldValue::Nested(self)),
                    _ => None,
                }
            }
        }

        let registry = node_registry();
        let err = encode_record(&SelfLoop, &registry).unwrap_err();
        assert!(matches!(err, EncodeError::CircularReference { .. }));
    }
}
