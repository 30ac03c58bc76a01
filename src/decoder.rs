//! Reads a format byte, dispatches on it, and reconstructs a [`Value`] tree
//! (recursively, for arrays and maps).

#[cfg(not(feature = "std"))]
use alloc::{string::String, vec::Vec};
#[cfg(feature = "std")]
use std::{string::String, vec::Vec};

use crate::cursor::ByteReader;
use crate::error::DecodeError;
use crate::format;
use crate::value::Value;

/// The default maximum nesting depth enforced by [`decode`]. `spec.md` §5
/// calls this out as a SHOULD, not a MUST, but an unbounded depth on
/// adversarial input is a stack-exhaustion footgun this crate does not
/// leave open by default.
pub const DEFAULT_MAX_DEPTH: u32 = 256;

/// Tunables for [`decode_with_options`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodeOptions {
    /// Maximum array/map/nested-value recursion depth before decoding
    /// fails with [`DecodeError::MalformedData`] ("nesting too deep").
    pub max_depth: u32,
}

impl Default for DecodeOptions {
    fn default() -> Self {
        Self { max_depth: DEFAULT_MAX_DEPTH }
    }
}

/// Decode one complete [`Value`] from `bytes`, using [`DecodeOptions::default`].
///
/// Trailing bytes after the decoded value are not an error at this layer
/// (`spec.md` §4.4): the caller gets back exactly the value and can inspect
/// how many bytes were consumed via the return of [`decode_with_options`]
/// if that matters to them.
///
/// # Errors
///
/// See [`DecodeError`].
pub fn decode(bytes: &[u8]) -> Result<Value, DecodeError> {
    decode_with_options(bytes, DecodeOptions::default())
}

/// Like [`decode`], with caller-supplied [`DecodeOptions`].
///
/// # Errors
///
/// See [`DecodeError`].
#[cfg_attr(feature = "tracing", tracing::instrument(skip(bytes, opts), fields(len = bytes.len(), max_depth = opts.max_depth)))]
pub fn decode_with_options(bytes: &[u8], opts: DecodeOptions) -> Result<Value, DecodeError> {
    let mut cursor = ByteReader::new(bytes);
    let format_byte = bytes.first().copied();
    let result = decode_value(&mut cursor, &opts, 0);
    #[cfg(feature = "tracing")]
    match (&result, format_byte) {
        (Ok(v), Some(b)) => tracing::trace!(format_byte = b, variant = v.variant_name(), "decoded value"),
        (Err(e), _) => tracing::trace!(error = %e, "decode failed"),
        _ => {}
    }
    result
}

fn decode_value(cursor: &mut ByteReader<'_>, opts: &DecodeOptions, depth: u32) -> Result<Value, DecodeError> {
    if depth > opts.max_depth {
        return Err(DecodeError::MalformedData {
            message: "nesting too deep".into(),
            position: cursor.position(),
            format_byte: None,
        });
    }

    let format_pos = cursor.position();
    let byte = cursor.read_u8()?;

    let value = match byte {
        b if format::is_fixmap(b) => decode_map(cursor, opts, depth, u32::from(b & 0x0f))?,
        b if format::is_fixarray(b) => decode_array(cursor, opts, depth, u32::from(b & 0x0f))?,
        b if format::is_fixstr(b) => decode_str(cursor, u32::from(b & 0x1f))?,
        b if format::is_positive_fixint(b) => Value::Int(i64::from(b)),

        format::NIL => Value::Null,
        format::NEVER_USED => return Err(unsupported(byte, format_pos)),
        format::FALSE => Value::Bool(false),
        format::TRUE => Value::Bool(true),

        format::BIN8 => {
            let len = u32::from(cursor.read_u8()?);
            decode_bin(cursor, len)?
        }
        format::BIN16 => {
            let len = u32::from(cursor.read_u16_be()?);
            decode_bin(cursor, len)?
        }
        format::BIN32 => {
            let len = cursor.read_u32_be()?;
            decode_bin(cursor, len)?
        }

        format::EXT8 | format::EXT16 | format::EXT32 => return Err(unsupported(byte, format_pos)),

        format::FLOAT32 => Value::Float(f64::from(cursor.read_f32_be()?)),
        format::FLOAT64 => Value::Float(cursor.read_f64_be()?),

        format::UINT8 => Value::Int(i64::from(cursor.read_u8()?)),
        format::UINT16 => Value::Int(i64::from(cursor.read_u16_be()?)),
        format::UINT32 => Value::Int(i64::from(cursor.read_u32_be()?)),
        format::UINT64 => {
            let v = cursor.read_u64_be()?;
            if v > i64::MAX as u64 {
                return Err(DecodeError::MalformedData {
                    message: "uint64 out of range".into(),
                    position: format_pos,
                    format_byte: Some(byte),
                });
            }
            Value::Int(v as i64)
        }

        format::INT8 => Value::Int(i64::from(cursor.read_i8()?)),
        format::INT16 => Value::Int(i64::from(cursor.read_i16_be()?)),
        format::INT32 => Value::Int(i64::from(cursor.read_i32_be()?)),
        format::INT64 => Value::Int(cursor.read_i64_be()?),

        format::FIXEXT1 | format::FIXEXT2 | format::FIXEXT4 | format::FIXEXT8 | format::FIXEXT16 => {
            return Err(unsupported(byte, format_pos));
        }

        format::STR8 => {
            let len = u32::from(cursor.read_u8()?);
            decode_str(cursor, len)?
        }
        format::STR16 => {
            let len = u32::from(cursor.read_u16_be()?);
            decode_str(cursor, len)?
        }
        format::STR32 => {
            let len = cursor.read_u32_be()?;
            decode_str(cursor, len)?
        }

        format::ARRAY16 => {
            let len = u32::from(cursor.read_u16_be()?);
            decode_array(cursor, opts, depth, len)?
        }
        format::ARRAY32 => {
            let len = cursor.read_u32_be()?;
            decode_array(cursor, opts, depth, len)?
        }

        format::MAP16 => {
            let len = u32::from(cursor.read_u16_be()?);
            decode_map(cursor, opts, depth, len)?
        }
        format::MAP32 => {
            let len = cursor.read_u32_be()?;
            decode_map(cursor, opts, depth, len)?
        }

        b if format::is_negative_fixint(b) => Value::Int(i64::from(b as i8)),

        _ => unreachable!("every byte value is covered by the arms above"),
    };

    Ok(value)
}

const fn unsupported(byte: u8, position: usize) -> DecodeError {
    DecodeError::UnsupportedFormat { byte, position }
}

fn decode_str(cursor: &mut ByteReader<'_>, len: u32) -> Result<Value, DecodeError> {
    let payload_pos = cursor.position();
    let bytes = cursor.read_bytes(len as usize)?;
    match core::str::from_utf8(bytes) {
        Ok(s) => Ok(Value::String(String::from(s))),
        Err(_) => Err(DecodeError::InvalidUtf8 { position: payload_pos }),
    }
}

fn decode_bin(cursor: &mut ByteReader<'_>, len: u32) -> Result<Value, DecodeError> {
    let bytes = cursor.read_bytes(len as usize)?;
    Ok(Value::Binary(bytes.to_vec()))
}

fn decode_array(
    cursor: &mut ByteReader<'_>,
    opts: &DecodeOptions,
    depth: u32,
    len: u32,
) -> Result<Value, DecodeError> {
    let mut items = Vec::with_capacity(core::cmp::min(len, 4096) as usize);
    for _ in 0..len {
        items.push(decode_value(cursor, opts, depth + 1)?);
    }
    Ok(Value::Array(items))
}

fn decode_map(
    cursor: &mut ByteReader<'_>,
    opts: &DecodeOptions,
    depth: u32,
    len: u32,
) -> Result<Value, DecodeError> {
    let mut entries = Vec::with_capacity(core::cmp::min(len, 4096) as usize);
    for _ in 0..len {
        let key_pos = cursor.position();
        let key_value = decode_value(cursor, opts, depth + 1)?;
        let key = match key_value {
            Value::String(s) => s,
            _ => {
                return Err(DecodeError::MalformedData {
                    message: "non-string map key".into(),
                    position: key_pos,
                    format_byte: None,
                })
            }
        };
        let value = decode_value(cursor, opts, depth + 1)?;
        // First occurrence wins on a duplicate key (spec.md §9: the source
        // neither dedups on encode nor rejects duplicates on decode; this
        // chooses first-wins rather than leaving the policy to whatever a
        // downstream Vec-based lookup happens to do).
        if !entries.iter().any(|(k, _): &(String, Value)| k == &key) {
            entries.push((key, value));
        }
    }
    Ok(Value::Map(entries))
}
