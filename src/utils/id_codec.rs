//! 短标识编解码
//!
//! Maps a `u32` link identifier to a compact, URL-safe string and back.
//! The alphabet is base-32 with the visually ambiguous symbols `0`, `i`,
//! `l` and `o` removed, so every digit value `v` is rendered as the `v`-th
//! symbol of `123456789abcdefghjkmnpqrstuvwxyz`.

use crate::errors::{LinkError, Result};

/// 32 个符号，下标即数值
pub const ALPHABET: &[u8; 32] = b"123456789abcdefghjkmnpqrstuvwxyz";

/// `u32::MAX` 编码后的长度（32 bit / 5 bit 向上取整）
pub const MAX_ENCODED_LEN: usize = 7;

const INVALID: u8 = 0xFF;

const DECODE_TABLE: [u8; 128] = build_decode_table();

const fn build_decode_table() -> [u8; 128] {
    let mut table = [INVALID; 128];
    let mut i = 0;
    while i < ALPHABET.len() {
        table[ALPHABET[i] as usize] = i as u8;
        i += 1;
    }
    table
}

/// Encode an identifier, most significant digit first, without padding.
///
/// `encode(0)` is `"1"`, the symbol for digit value zero.
pub fn encode(id: u32) -> String {
    let mut buf = [0u8; MAX_ENCODED_LEN];
    let mut pos = MAX_ENCODED_LEN;
    let mut value = id;

    loop {
        pos -= 1;
        buf[pos] = ALPHABET[(value & 0x1F) as usize];
        value >>= 5;
        if value == 0 {
            break;
        }
    }

    buf[pos..].iter().map(|&b| b as char).collect()
}

/// Decode a path segment back into an identifier.
///
/// Fails with [`LinkError::InvalidIdentifier`] when the input is empty,
/// longer than [`MAX_ENCODED_LEN`], contains a symbol outside [`ALPHABET`]
/// (uppercase is rejected), or does not fit in a `u32`.
pub fn decode(code: &str) -> Result<u32> {
    if code.is_empty() {
        return Err(LinkError::invalid_identifier("Empty identifier"));
    }
    if code.len() > MAX_ENCODED_LEN {
        return Err(LinkError::invalid_identifier(format!(
            "Identifier '{}' is longer than {} characters",
            code, MAX_ENCODED_LEN
        )));
    }

    let mut value: u64 = 0;
    for byte in code.bytes() {
        let digit = symbol_value(byte).ok_or_else(|| {
            LinkError::invalid_identifier(format!(
                "Identifier '{}' contains unsupported character",
                code
            ))
        })?;
        value = (value << 5) | u64::from(digit);
    }

    u32::try_from(value).map_err(|_| {
        LinkError::invalid_identifier(format!("Identifier '{}' is out of range", code))
    })
}

#[inline]
fn symbol_value(byte: u8) -> Option<u8> {
    DECODE_TABLE
        .get(byte as usize)
        .copied()
        .filter(|&v| v != INVALID)
}
