//! Metadata-driven record serialization on top of the wire codec —
//! `spec.md` §3.2-§3.4, §4.5-§4.6.
//!
//! A record is not a ninth [`crate::value::Value`] variant; it is a schema
//! ([`class::ClassDescriptor`], built from [`field::FieldDescriptor`]s)
//! registered in a [`registry::Registry`], plus two free functions
//! ([`encode::encode_record`], [`decode::decode_record`]) that use that
//! schema to walk a host type through the same `Value` tree the wire codec
//! already speaks.

pub mod class;
pub mod decode;
pub mod encode;
pub mod field;
pub mod registry;

pub use class::{ClassDescriptor, ClassDescriptorError};
pub use decode::{decode_record, decode_record_from_value, RecordFactory};
pub use encode::{encode_record, FieldValue, Recordable};
pub use field::{FieldDescriptor, FieldDescriptorError, FieldType};
pub use registry::{Registry, RegistryError};

#[cfg(feature = "sync")]
pub use registry::{clear_registry, get_class_metadata, register_class, registered_class_names, unregister_class};
