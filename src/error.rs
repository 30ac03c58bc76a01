//! The error taxonomy from `spec.md` §7, split into the two families the
//! spec names: [`EncodeError`] and [`DecodeError`]. No shared umbrella type
//! is introduced — callers of `encode`/`encode_record` only ever see
//! `EncodeError`, callers of `decode`/`decode_record` only ever see
//! `DecodeError`, and they can match narrowly.

#[cfg(not(feature = "std"))]
use alloc::string::String;
#[cfg(feature = "std")]
use std::string::String;

/// A position in an encode call. Encode has no cursor, so this is a
/// conceptual offset into the value tree being walked (depth-first index),
/// or `-1` when no meaningful position exists.
pub type EncodePosition = i64;

/// Shorthand for a fallible encode, mirroring `vitte-core`'s own
/// `CoreResult<T>` convention.
pub type EncodeResult<T> = Result<T, EncodeError>;

/// Shorthand for a fallible decode.
pub type DecodeResult<T> = Result<T, DecodeError>;

/// Errors raised while walking a [`crate::value::Value`] tree or a record
/// instance and emitting MessagePack bytes.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EncodeError {
    /// The encoder was asked to emit a variant it does not recognise. Only
    /// reachable if [`crate::value::Value`] grows a variant without a
    /// matching arm in [`crate::encoder::encode`]; kept for exhaustive
    /// error-path coverage.
    #[error("unsupported value variant `{type_name}` at position {position}")]
    UnsupportedType {
        /// Name of the offending variant.
        type_name: String,
        /// Conceptual offset (see [`EncodePosition`]).
        position: EncodePosition,
    },

    /// Reserved: the output buffer could not grow to hold the requested
    /// write. Practically unreachable with a growable `Vec`-backed buffer;
    /// kept so callers matching exhaustively have a stable variant to bind.
    #[error("buffer overflow: needed {needed} bytes, {available} available at position {position}")]
    BufferOverflow {
        /// Bytes requested.
        needed: usize,
        /// Bytes actually available.
        available: usize,
        /// Conceptual offset.
        position: usize,
    },

    /// `encode_record` was asked to encode an instance of an unregistered
    /// class.
    #[error("class `{class_name}` is not registered; register it before encoding")]
    UnregisteredClass {
        /// The class name the caller asked for.
        class_name: String,
    },

    /// A required field's accessor returned `None`.
    #[error("field `{field}` on class `{class}` is required but the accessor returned nothing")]
    MissingRequiredField {
        /// Field name.
        field: String,
        /// Owning class name.
        class: String,
    },

    /// A field's accessor returned a value whose runtime variant does not
    /// match the field's declared type.
    #[error(
        "field `{field}` on class `{class}` expected a `{expected}` value but the accessor returned `{actual}`"
    )]
    FieldTypeMismatch {
        /// Field name.
        field: String,
        /// Owning class name.
        class: String,
        /// Declared type, as a display name.
        expected: String,
        /// Actual runtime variant, as a display name.
        actual: String,
    },

    /// A `Class`-typed field's nested class name is not registered.
    #[error(
        "field `{field}` on class `{class}` references nested class `{nested}`, which is not registered; register it before encoding"
    )]
    UnregisteredNestedClass {
        /// Field name.
        field: String,
        /// Owning (parent) class name.
        class: String,
        /// The nested class name that is missing.
        nested: String,
    },

    /// The record graph reachable from this instance contains a cycle.
    /// Reserved by `spec.md` §7; activated by [`crate::record::encode`]'s
    /// visited-set tracking rather than left dead, per §1's requirement
    /// that cycles "must be surfaced as errors rather than silently
    /// looped".
    #[error("circular reference detected: class `{class}` field `{field}` revisits an ancestor instance")]
    CircularReference {
        /// Class name where the cycle was detected.
        class: String,
        /// Field name that closes the cycle.
        field: String,
    },
}

/// Errors raised while reading a format byte, dispatching on it, and
/// reconstructing a [`crate::value::Value`] tree (or a record on top of
/// it).
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DecodeError {
    /// A read would have advanced past the end of the input.
    #[error("unexpected end of input: needed {needed} bytes, {available} available at position {position}")]
    UnexpectedEnd {
        /// Bytes the read required.
        needed: usize,
        /// Bytes actually remaining.
        available: usize,
        /// Cursor position of the read that failed.
        position: usize,
    },

    /// The format byte is reserved, or names the `ext`/`fixext` family,
    /// which this codec does not implement (`spec.md` §1).
    #[error("unsupported format byte 0x{byte:02x} at position {position}")]
    UnsupportedFormat {
        /// The offending format byte.
        byte: u8,
        /// Cursor position of the format byte (inclusive).
        position: usize,
    },

    /// A semantic violation that is not a simple end-of-input or
    /// bad-format-byte condition: a uint64 too large for `Value::Int`, a
    /// nesting depth beyond the configured limit, and similar.
    #[error("malformed data at position {position}: {message}")]
    MalformedData {
        /// Human-readable description.
        message: String,
        /// Cursor position where the violation was detected.
        position: usize,
        /// The format byte under decode when the violation was detected,
        /// if any.
        format_byte: Option<u8>,
    },

    /// A string payload was not valid UTF-8.
    #[error("invalid UTF-8 in string payload at position {position}")]
    InvalidUtf8 {
        /// Cursor position of the start of the string payload.
        position: usize,
    },

    /// `decode_record` was asked to decode into an unregistered class.
    #[error("class `{class_name}` is not registered; register it before decoding")]
    UnregisteredClass {
        /// The class name the caller asked for.
        class_name: String,
    },

    /// A required field was absent from the decoded map.
    #[error("field `{field}` on class `{class}` is required but absent from the decoded map")]
    MissingRequiredField {
        /// Field name.
        field: String,
        /// Owning class name.
        class: String,
    },

    /// A decoded map entry's runtime variant does not match the field's
    /// declared type.
    #[error(
        "field `{field}` on class `{class}` expected a `{expected}` value but decoded a `{actual}`"
    )]
    FieldTypeMismatch {
        /// Field name.
        field: String,
        /// Owning class name.
        class: String,
        /// Declared type, as a display name.
        expected: String,
        /// Actual decoded variant, as a display name.
        actual: String,
    },

    /// A `Class`-typed field's nested class name is not registered.
    #[error(
        "field `{field}` on class `{class}` references nested class `{nested}`, which is not registered; register it before decoding"
    )]
    UnregisteredNestedClass {
        /// Field name.
        field: String,
        /// Owning (parent) class name.
        class: String,
        /// The nested class name that is missing.
        nested: String,
    },

    /// A `Class`-typed field decoded to something other than a `Map`.
    #[error("field `{field}` on class `{class}` is a nested class but decoded a `{actual}`, not a map")]
    InvalidNestedClassFormat {
        /// Field name.
        field: String,
        /// Owning (parent) class name.
        class: String,
        /// Actual decoded variant, as a display name.
        actual: String,
    },

    /// `decode_record`'s top-level wire-decoded value was not a `Map`, so
    /// there is no field set to read a record out of.
    #[error("class `{class_name}` expected a decoded map at the top level but got a `{actual}`")]
    NotAMap {
        /// The class name the caller asked for.
        class_name: String,
        /// Actual decoded variant, as a display name.
        actual: String,
    },
}
