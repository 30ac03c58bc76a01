//! Given bytes and a registered class schema, rebuilds a host record
//! instance via a caller-supplied factory — `spec.md` §4.6.

#[cfg(not(feature = "std"))]
use alloc::string::String;
#[cfg(feature = "std")]
use std::string::String;

use crate::error::DecodeError;
use crate::record::class::ClassDescriptor;
use crate::record::field::FieldType;
use crate::record::registry::Registry;
use crate::value::Value;

/// The construction contract a host record type implements to meet the
/// codec, per `spec.md` §6 ("Accessor/factory pair ... substitute for
/// runtime reflection").
///
/// `decode_record` hands every field value to [`RecordFactory::set_field`]
/// as a plain [`Value`], including `Class`-typed fields, which arrive as a
/// `Value::Map`. A factory whose host type nests another record-backed type
/// is responsible for recursing itself, by calling
/// [`decode_record_from_value`] again with its own nested factory — the
/// same asymmetry [`crate::record::encode::Recordable`] resolves the other
/// direction by owning the recursion inside `encode_record` rather than
/// inside the accessor. Decode has no live instance to track identity
/// against (there is nothing to point at before `create` returns), so
/// there is no decode-side counterpart to `EncodeError::CircularReference`;
/// a cyclic class graph on decode instead runs until the wire bytes run
/// out, which is bounded by [`crate::decoder::DecodeOptions::max_depth`].
pub trait RecordFactory {
    /// The concrete host type this factory produces.
    type Output;

    /// Create a fresh, empty instance for `class_name`.
    fn create(&self, class_name: &str) -> Self::Output;

    /// Apply a decoded field value to `instance`.
    ///
    /// # Errors
    ///
    /// A factory may return any [`DecodeError`] appropriate to a
    /// type-conversion failure it detects itself (for example, a `String`
    /// value that does not parse as the host field's richer type).
    fn set_field(&self, instance: &mut Self::Output, field_name: &str, value: Value) -> Result<(), DecodeError>;
}

/// Look up `class_name`, then wire-decode one value from `bytes`, then
/// decode it into `class_name` using `factory` and `registry`.
///
/// Per `spec.md` §4.6's algorithm, the registry lookup (step 1) happens
/// *before* the wire-decode (step 2): an unregistered class name fails
/// with [`DecodeError::UnregisteredClass`] even if `bytes` is itself
/// malformed, rather than surfacing a lower-level decode error first.
///
/// # Errors
///
/// Returns [`DecodeError::UnregisteredClass`] if `class_name` has no
/// registered [`ClassDescriptor`]; otherwise [`DecodeError`] if the bytes
/// do not decode, per [`crate::decoder::decode`], or per
/// [`decode_record_from_value`].
pub fn decode_record<F: RecordFactory>(
    bytes: &[u8],
    class_name: &str,
    factory: &F,
    registry: &Registry,
) -> Result<F::Output, DecodeError> {
    if !registry.is_registered(class_name) {
        return Err(DecodeError::UnregisteredClass { class_name: class_name.to_owned() });
    }
    let value = crate::decoder::decode(bytes)?;
    decode_record_from_value(value, class_name, factory, registry)
}

/// Decode an already wire-decoded [`Value`] into `class_name`, using
/// `factory` and `registry`.
///
/// This is the entry point a [`RecordFactory`] calls recursively to handle
/// a `Class`-typed field whose [`Value`] it was just handed by
/// [`RecordFactory::set_field`].
///
/// # Errors
///
/// - [`DecodeError::UnregisteredClass`] if `class_name` has no registered
///   [`ClassDescriptor`].
/// - [`DecodeError::NotAMap`] if `value` is not a `Value::Map`.
/// - [`DecodeError::MissingRequiredField`] if a required field is absent
///   from the map.
/// - [`DecodeError::FieldTypeMismatch`] if a present field's value does not
///   match its declared type.
/// - [`DecodeError::UnregisteredNestedClass`] if a `Class`-typed field
///   names a class that is not registered.
pub fn decode_record_from_value<F: RecordFactory>(
    value: Value,
    class_name: &str,
    factory: &F,
    registry: &Registry,
) -> Result<F::Output, DecodeError> {
    let class: &ClassDescriptor = registry
        .get(class_name)
        .ok_or_else(|| DecodeError::UnregisteredClass { class_name: class_name.to_owned() })?;

    let entries = match value {
        Value::Map(entries) => entries,
        other => {
            return Err(DecodeError::NotAMap {
                class_name: class_name.to_owned(),
                actual: other.variant_name().into(),
            })
        }
    };

    let mut instance = factory.create(class_name);

    for field in class.fields() {
        let found = entries.iter().find(|(k, _)| k == field.name());
        match found {
            None => {
                if field.is_optional() {
                    continue;
                }
                return Err(DecodeError::MissingRequiredField {
                    field: field.name().to_owned(),
                    class: class_name.to_owned(),
                });
            }
            Some((_, v)) => {
                if !field.declared_type().accepts(v) {
                    return Err(DecodeError::FieldTypeMismatch {
                        field: field.name().to_owned(),
                        class: class_name.to_owned(),
                        expected: field.declared_type().display_name().into(),
                        actual: v.variant_name().into(),
                    });
                }
                if field.declared_type() == FieldType::Class {
                    let nested_name = field.nested_type_name().unwrap_or_default();
                    if !registry.is_registered(nested_name) {
                        return Err(DecodeError::UnregisteredNestedClass {
                            field: field.name().to_owned(),
                            class: class_name.to_owned(),
                            nested: nested_name.to_owned(),
                        });
                    }
                }
                factory.set_field(&mut instance, field.name(), v.clone())?;
            }
        }
    }

    Ok(instance)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::class::ClassDescriptor;
    use crate::record::field::FieldDescriptor;

    #[cfg(not(feature = "std"))]
    use alloc::{string::String, vec::Vec};
    #[cfg(feature = "std")]
    use std::{string::String, vec::Vec};

    #[derive(Debug, Default, PartialEq)]
    struct User {
        name: String,
        age: i64,
        email: Option<String>,
    }

    struct UserFactory;

    impl RecordFactory for UserFactory {
        type Output = User;

        fn create(&self, _class_name: &str) -> User {
            User::default()
        }

        fn set_field(&self, instance: &mut User, field_name: &str, value: Value) -> Result<(), DecodeError> {
            match field_name {
                "name" => {
                    if let Value::String(s) = value {
                        instance.name = s;
                    }
                }
                "age" => {
                    if let Value::Int(i) = value {
                        instance.age = i;
                    }
                }
                "email" => {
                    if let Value::String(s) = value {
                        instance.email = Some(s);
                    }
                }
                _ => {}
            }
            Ok(())
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
    fn decodes_full_record() {
        let registry = user_registry();
        let bytes = crate::encoder::encode(&Value::Map(vec![
            ("name".into(), Value::String("Alice".into())),
            ("age".into(), Value::Int(30)),
            ("email".into(), Value::String("a@example.com".into())),
        ]))
        .unwrap();
        let user = decode_record(&bytes, "User", &UserFactory, &registry).unwrap();
        assert_eq!(
            user,
            User { name: "Alice".into(), age: 30, email: Some("a@example.com".into()) }
        );
    }

    #[test]
    fn missing_optional_field_leaves_default() {
        let registry = user_registry();
        let bytes = crate::encoder::encode(&Value::Map(vec![
            ("name".into(), Value::String("Bob".into())),
            ("age".into(), Value::Int(40)),
        ]))
        .unwrap();
        let user = decode_record(&bytes, "User", &UserFactory, &registry).unwrap();
        assert_eq!(user, User { name: "Bob".into(), age: 40, email: None });
    }

    #[test]
    fn missing_required_field_fails() {
        let registry = user_registry();
        let bytes = crate::encoder::encode(&Value::Map(vec![("name".into(), Value::String("Eve".into()))])).unwrap();
        let err = decode_record(&bytes, "User", &UserFactory, &registry).unwrap_err();
        assert_eq!(err, DecodeError::MissingRequiredField { field: "age".into(), class: "User".into() });
    }

    #[test]
    fn field_type_mismatch_fails() {
        let registry = user_registry();
        let bytes = crate::encoder::encode(&Value::Map(vec![
            ("name".into(), Value::String("Eve".into())),
            ("age".into(), Value::String("not a number".into())),
        ]))
        .unwrap();
        let err = decode_record(&bytes, "User", &UserFactory, &registry).unwrap_err();
        assert!(matches!(err, DecodeError::FieldTypeMismatch { .. }));
    }

    #[test]
    fn unregistered_class_fails() {
        let registry = Registry::new();
        let bytes = crate::encoder::encode(&Value::Map(vec![])).unwrap();
        assert_eq!(
            decode_record(&bytes, "User", &UserFactory, &registry).unwrap_err(),
            DecodeError::UnregisteredClass { class_name: "User".into() }
        );
    }

    #[test]
    fn unregistered_class_wins_over_malformed_bytes() {
        // spec.md §4.6: step 1 is the registry lookup, step 2 is the
        // wire-decode. An unregistered class name must surface
        // `UnregisteredClass` even when the bytes themselves are garbage.
        let registry = Registry::new();
        let malformed = [0xc1]; // reserved format byte
        assert_eq!(
            decode_record(&malformed, "User", &UserFactory, &registry).unwrap_err(),
            DecodeError::UnregisteredClass { class_name: "User".into() }
        );
    }

    #[test]
    fn non_map_top_level_fails() {
        let registry = user_registry();
        let bytes = crate::encoder::encode(&Value::Int(1)).unwrap();
        assert_eq!(
            decode_record(&bytes, "User", &UserFactory, &registry).unwrap_err(),
            DecodeError::NotAMap { class_name: "User".into(), actual: "int".into() }
        );
    }

    #[derive(Debug, Default, PartialEq)]
    struct Node {
        label: String,
        next: Option<Vec<Node>>,
    }

    struct NodeFactory;

    impl RecordFactory for NodeFactory {
        type Output = Node;

        fn create(&self, _class_name: &str) -> Node {
            Node::default()
        }

        fn set_field(&self, instance: &mut Node, field_name: &str, value: Value) -> Result<(), DecodeError> {
            match field_name {
                "label" => {
                    if let Value::String(s) = value {
                        instance.label = s;
                    }
                }
                "next" => {
                    let nested = decode_record_from_value(value, "Node", &NodeFactory, &node_registry())?;
                    instance.next = Some(Vec::from([nested]));
                }
                _ => {}
            }
            Ok(())
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
    fn nested_class_recurses_through_factory() {
        let registry = node_registry();
        let bytes = crate::encoder::encode(&Value::Map(vec![
            ("label".into(), Value::String("a".into())),
            ("next".into(), Value::Map(vec![("label".into(), Value::String("b".into()))])),
        ]))
        .unwrap();
        let root = decode_record(&bytes, "Node", &NodeFactory, &registry).unwrap();
        assert_eq!(root.label, "a");
        let nested = root.next.unwrap();
        assert_eq!(nested.len(), 1);
        assert_eq!(nested[0].label, "b");
        assert!(nested[0].next.is_none());
    }
}
