//! Named MessagePack format bytes and the range boundaries used to pick
//! between them.
//!
//! Kept as plain `u8` constants rather than a `repr(u8)` enum: several of
//! the entries here are *ranges*, not single values, and a format byte is
//! only ever looked at once, at the very top of [`crate::decoder::decode`].

/// `nil`.
pub const NIL: u8 = 0xc0;
/// Reserved; never appears on the wire.
pub const NEVER_USED: u8 = 0xc1;
/// `false`.
pub const FALSE: u8 = 0xc2;
/// `true`.
pub const TRUE: u8 = 0xc3;

/// bin8 header.
pub const BIN8: u8 = 0xc4;
/// bin16 header.
pub const BIN16: u8 = 0xc5;
/// bin32 header.
pub const BIN32: u8 = 0xc6;

/// ext8 header (rejected — see [`crate::error::DecodeError::UnsupportedFormat`]).
pub const EXT8: u8 = 0xc7;
/// ext16 header (rejected).
pub const EXT16: u8 = 0xc8;
/// ext32 header (rejected).
pub const EXT32: u8 = 0xc9;

/// float32 header.
pub const FLOAT32: u8 = 0xca;
/// float64 header.
pub const FLOAT64: u8 = 0xcb;

/// uint8 header.
pub const UINT8: u8 = 0xcc;
/// uint16 header.
pub const UINT16: u8 = 0xcd;
/// uint32 header.
pub const UINT32: u8 = 0xce;
/// uint64 header.
pub const UINT64: u8 = 0xcf;

/// int8 header.
pub const INT8: u8 = 0xd0;
/// int16 header.
pub const INT16: u8 = 0xd1;
/// int32 header.
pub const INT32: u8 = 0xd2;
/// int64 header.
pub const INT64: u8 = 0xd3;

/// fixext1 (rejected).
pub const FIXEXT1: u8 = 0xd4;
/// fixext2 (rejected).
pub const FIXEXT2: u8 = 0xd5;
/// fixext4 (rejected).
pub const FIXEXT4: u8 = 0xd6;
/// fixext8 (rejected).
pub const FIXEXT8: u8 = 0xd7;
/// fixext16 (rejected).
pub const FIXEXT16: u8 = 0xd8;

/// str8 header.
pub const STR8: u8 = 0xd9;
/// str16 header.
pub const STR16: u8 = 0xda;
/// str32 header.
pub const STR32: u8 = 0xdb;

/// array16 header.
pub const ARRAY16: u8 = 0xdc;
/// array32 header.
pub const ARRAY32: u8 = 0xdd;

/// map16 header.
pub const MAP16: u8 = 0xde;
/// map32 header.
pub const MAP32: u8 = 0xdf;

/// Low bound of the positive-fixint range (`0x00..=0x7f`).
pub const POSITIVE_FIXINT_MAX: u8 = 0x7f;
/// High bound of the negative-fixint range (`0xe0..=0xff`), as signed i8.
pub const NEGATIVE_FIXINT_MIN: u8 = 0xe0;

/// fixmap tag mask: `0x80 | size` for `size` in `0..=15`.
pub const FIXMAP_TAG: u8 = 0x80;
/// fixarray tag mask: `0x90 | len` for `len` in `0..=15`.
pub const FIXARRAY_TAG: u8 = 0x90;
/// fixstr tag mask: `0xa0 | len` for `len` in `0..=31`.
pub const FIXSTR_TAG: u8 = 0xa0;

/// Maximum payload length representable by a fix-width prefix.
pub const FIXMAP_MAX_LEN: u32 = 15;
/// See [`FIXMAP_MAX_LEN`].
pub const FIXARRAY_MAX_LEN: u32 = 15;
/// See [`FIXMAP_MAX_LEN`].
pub const FIXSTR_MAX_LEN: u32 = 31;

/// Boundary below which a length fits in a `u8` prefix.
pub const LEN_U8_MAX: u32 = 0xff;
/// Boundary below which a length fits in a `u16` prefix.
pub const LEN_U16_MAX: u32 = 0xffff;

/// `true` if `b` falls in the positive-fixint range.
#[must_use]
pub const fn is_positive_fixint(b: u8) -> bool {
    b <= POSITIVE_FIXINT_MAX
}

/// `true` if `b` falls in the negative-fixint range.
#[must_use]
pub const fn is_negative_fixint(b: u8) -> bool {
    b >= NEGATIVE_FIXINT_MIN
}

/// `true` if `b` is a fixmap header.
#[must_use]
pub const fn is_fixmap(b: u8) -> bool {
    b & 0xf0 == FIXMAP_TAG
}

/// `true` if `b` is a fixarray header.
#[must_use]
pub const fn is_fixarray(b: u8) -> bool {
    b & 0xf0 == FIXARRAY_TAG
}

/// `true` if `b` is a fixstr header.
#[must_use]
pub const fn is_fixstr(b: u8) -> bool {
    b & 0xe0 == FIXSTR_TAG
}
