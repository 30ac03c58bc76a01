//! Exercises the `serde` feature named in `SPEC_FULL.md` §10.5: the value
//! tree and record metadata types derive `Serialize`/`Deserialize` so
//! callers can introspect them independently of the wire format.

#![cfg(feature = "serde")]

use vitte_msgpack::record::{ClassDescriptor, FieldDescriptor, FieldType};
use vitte_msgpack::value::Value;

#[test]
fn value_round_trips_through_json() {
    let v = Value::Map(vec![
        ("name".into(), Value::String("Alice".into())),
        ("tags".into(), Value::Array(vec![Value::Int(1), Value::Int(2)])),
        ("active".into(), Value::Bool(true)),
        ("score".into(), Value::Float(3.5)),
    ]);

    let json = serde_json::to_string(&v).unwrap();
    let back: Value = serde_json::from_str(&json).unwrap();
    assert_eq!(back, v);
}

#[test]
fn class_descriptor_round_trips_through_json() {
    let class = ClassDescriptor::new(
        "User",
        vec![
            FieldDescriptor::required("name", FieldType::String).unwrap(),
            FieldDescriptor::optional("email", FieldType::String).unwrap(),
            FieldDescriptor::class("manager", "User", true).unwrap(),
        ],
    )
    .unwrap();

    let json = serde_json::to_string(&class).unwrap();
    let back: ClassDescriptor = serde_json::from_str(&json).unwrap();
    assert_eq!(back, class);
}
