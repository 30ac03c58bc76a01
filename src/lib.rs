//! vitte-msgpack — a MessagePack wire codec and metadata-driven record
//! serialization layer (no_std-ready).
//!
//! Provides:
//! - [`value::Value`], the eight-variant tree every encode/decode call
//!   walks.
//! - [`encoder::encode`] / [`decoder::decode`], the wire codec proper.
//! - [`buffer::ByteWriter`] / [`cursor::ByteReader`], the append-only
//!   output buffer and bounds-checked input cursor underneath it.
//! - [`record`], a metadata-driven record layer on top: [`record::ClassDescriptor`],
//!   [`record::FieldDescriptor`], [`record::Registry`], and the
//!   [`record::encode_record`] / [`record::decode_record`] pair.
//! - [`error::EncodeError`] / [`error::DecodeError`], the error taxonomy
//!   both layers share.
//!
//! Features:
//! - `std` (default): enables `std::error::Error` impls via `thiserror`'s
//!   own feature detection and pulls in `std` collections. Without it the
//!   crate is `no_std` + `alloc`.
//! - `serde`: derives `Serialize`/`Deserialize` on [`value::Value`] and the
//!   record metadata types. Wire bytes are unaffected; this is for callers
//!   who want to serialize the metadata itself (to JSON, for example).
//! - `sync` (default): a process-wide [`record::Registry`] singleton behind
//!   a `parking_lot::RwLock`, for callers who don't want to thread a
//!   registry handle through their call graph.
//! - `tracing`: instruments registry mutation and top-level encode/decode
//!   entry points with `tracing` spans. Off by default; never on the
//!   recursive hot path.

#![deny(missing_docs)]
#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(not(feature = "std"))]
extern crate alloc;

pub mod buffer;
pub mod cursor;
pub mod decoder;
pub mod encoder;
pub mod error;
pub mod format;
pub mod record;
pub mod value;

/// Convenience re-exports of the crate's most commonly used items.
pub mod prelude {
    pub use crate::decoder::{decode, decode_with_options, DecodeOptions};
    pub use crate::encoder::encode;
    pub use crate::error::{DecodeError, DecodeResult, EncodeError, EncodeResult};
    pub use crate::record::{
        decode_record, encode_record, ClassDescriptor, FieldDescriptor, FieldType, Recordable, RecordFactory,
        Registry,
    };
    pub use crate::value::Value;
}
