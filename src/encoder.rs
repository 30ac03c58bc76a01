//! Walks a [`Value`] tree and emits the shortest valid MessagePack
//! representation.

#[cfg(not(feature = "std"))]
use alloc::vec::Vec;
#[cfg(feature = "std")]
use std::vec::Vec;

use crate::buffer::ByteWriter;
use crate::error::EncodeError;
use crate::format;
use crate::value::Value;

/// Encode a complete [`Value`] tree into a fresh byte buffer.
///
/// Picks the shortest admissible format for every scalar: the
/// integer/string/binary/array/map width tables in `spec.md` §4.3 are
/// normative and enforced by [`encode_into`].
///
/// # Errors
///
/// Returns [`EncodeError::UnsupportedType`] only if `Value` ever grows a
/// variant without a matching arm here; every current variant encodes
/// unconditionally.
#[cfg_attr(feature = "tracing", tracing::instrument(skip(value), fields(variant = value.variant_name())))]
pub fn encode(value: &Value) -> Result<Vec<u8>, EncodeError> {
    let mut writer = ByteWriter::new();
    encode_into(&mut writer, value)?;
    #[cfg(feature = "tracing")]
    tracing::trace!(bytes = writer.len(), "encoded value");
    Ok(writer.into_vec())
}

/// Like [`encode`], but appends to a caller-supplied, possibly reused
/// [`ByteWriter`] instead of allocating a fresh one. The encoder does not
/// reset the writer first — call [`ByteWriter::reset`] yourself if you want
/// a clean slate; this lets callers batch multiple values into one buffer.
///
/// # Errors
///
/// See [`encode`]. On failure the writer may hold a partially written
/// value; reset it before reuse.
pub fn encode_into(writer: &mut ByteWriter, value: &Value) -> Result<(), EncodeError> {
    match value {
        Value::Null => writer.write_u8(format::NIL),
        Value::Bool(false) => writer.write_u8(format::FALSE),
        Value::Bool(true) => writer.write_u8(format::TRUE),
        Value::Int(v) => encode_int(writer, *v),
        Value::Float(v) => encode_float(writer, *v),
        Value::String(s) => encode_str(writer, s),
        Value::Binary(b) => encode_bin(writer, b),
        Value::Array(items) => {
            encode_len(writer, items.len(), format::FIXARRAY_TAG, format::FIXARRAY_MAX_LEN, format::ARRAY16, format::ARRAY32)?;
            for item in items {
                encode_into(writer, item)?;
            }
        }
        Value::Map(entries) => {
            encode_len(writer, entries.len(), format::FIXMAP_TAG, format::FIXMAP_MAX_LEN, format::MAP16, format::MAP32)?;
            for (key, val) in entries {
                encode_str(writer, key);
                encode_into(writer, val)?;
            }
        }
    }
    Ok(())
}

/// Shortest admissible integer encoding, per `spec.md` §4.3's table. The
/// positive-fixint check precedes uint8 so that small values stay
/// single-byte.
fn encode_int(writer: &mut ByteWriter, v: i64) {
    match v {
        0..=127 => writer.write_u8(v as u8),
        -32..=-1 => writer.write_u8(v as u8),
        128..=255 => {
            writer.write_u8(format::UINT8);
            writer.write_u8(v as u8);
        }
        256..=65_535 => {
            writer.write_u8(format::UINT16);
            writer.write_u16_be(v as u16);
        }
        65_536..=4_294_967_295 => {
            writer.write_u8(format::UINT32);
            writer.write_u32_be(v as u32);
        }
        -128..=-33 => {
            writer.write_u8(format::INT8);
            writer.write_i8(v as i8);
        }
        -32_768..=-129 => {
            writer.write_u8(format::INT16);
            writer.write_i16_be(v as i16);
        }
        -2_147_483_648..=-32_769 => {
            writer.write_u8(format::INT32);
            writer.write_i32_be(v as i32);
        }
        v if v >= 4_294_967_296 => {
            writer.write_u8(format::UINT64);
            writer.write_u64_be(v as u64);
        }
        _ => {
            writer.write_u8(format::INT64);
            writer.write_i64_be(v);
        }
    }
}

/// Always float64, per `spec.md` §4.3 ("An implementation MAY emit
/// float32 if the value round-trips exactly, but this is not required").
/// Emitting float32 opportunistically would save bytes but complicates the
/// shortest-integer-style reasoning for a property this spec does not
/// require; kept as float64-only so the encoder has one float path to
/// reason about.
fn encode_float(writer: &mut ByteWriter, v: f64) {
    writer.write_u8(format::FLOAT64);
    writer.write_f64_be(v);
}

fn encode_str(writer: &mut ByteWriter, s: &str) {
    let bytes = s.as_bytes();
    let len = bytes.len() as u32;
    match len {
        0..=format::FIXSTR_MAX_LEN => writer.write_u8(format::FIXSTR_TAG | len as u8),
        len if len <= format::LEN_U8_MAX => {
            writer.write_u8(format::STR8);
            writer.write_u8(len as u8);
        }
        len if len <= format::LEN_U16_MAX => {
            writer.write_u8(format::STR16);
            writer.write_u16_be(len as u16);
        }
        len => {
            writer.write_u8(format::STR32);
            writer.write_u32_be(len);
        }
    }
    writer.write_bytes(bytes);
}

fn encode_bin(writer: &mut ByteWriter, bytes: &[u8]) {
    let len = bytes.len() as u32;
    match len {
        len if len <= format::LEN_U8_MAX => {
            writer.write_u8(format::BIN8);
            writer.write_u8(len as u8);
        }
        len if len <= format::LEN_U16_MAX => {
            writer.write_u8(format::BIN16);
            writer.write_u16_be(len as u16);
        }
        len => {
            writer.write_u8(format::BIN32);
            writer.write_u32_be(len);
        }
    }
    writer.write_bytes(bytes);
}

/// Shared array/map length-prefix selection: fix-width header for small
/// counts, otherwise a 16- or 32-bit prefixed header.
fn encode_len(
    writer: &mut ByteWriter,
    len: usize,
    fix_tag: u8,
    fix_max: u32,
    header16: u8,
    header32: u8,
) -> Result<(), EncodeError> {
    let len = len as u32;
    match len {
        len if len <= fix_max => writer.write_u8(fix_tag | len as u8),
        len if len <= format::LEN_U16_MAX => {
            writer.write_u8(header16);
            writer.write_u16_be(len as u16);
        }
        len => {
            writer.write_u8(header32);
            writer.write_u32_be(len);
        }
    }
    Ok(())
}
