//! Variable-length decimal literal codec.
//!
//! A literal is a run of decimal digit nibbles closed by a terminator. A
//! plain terminator yields the digits as written. A prefixed terminator adds
//! an implicit leading `1` in front of them, so values whose most significant
//! digit is `1` take one nibble less.
//!
//! ```text
//! 42    -> 4 2 A
//! 100   -> 0 0 B
//! 0     -> 0 A
//! ```

use nibble_core::ErrorKind;

use super::code::Bytecode;

/// Terminator: value is the digits as written.
pub const PLAIN_END: u8 = 0xA;
/// Terminator: value is `1` followed by the digits.
pub const PREFIXED_END: u8 = 0xB;

#[inline]
pub fn is_terminator(n: u8) -> bool {
    n == PLAIN_END || n == PREFIXED_END
}

/// Encode a value as digit nibbles plus terminator.
pub fn encode(value: u64) -> Vec<u8> {
    encode_decimal(&value.to_string())
}

/// Encode a decimal numeral of any length.
///
/// Leading zeros are ignored. Non-digit characters are not expected; the
/// lexer only hands over `[0-9]+`.
pub fn encode_decimal(digits: &str) -> Vec<u8> {
    debug_assert!(digits.bytes().all(|b| b.is_ascii_digit()));

    let digits = digits.trim_start_matches('0').as_bytes();
    let Some((&first, rest)) = digits.split_first() else {
        return vec![0, PLAIN_END];
    };

    let (body, end) = if first == b'1' {
        (rest, PREFIXED_END)
    } else {
        (digits, PLAIN_END)
    };

    let mut out = Vec::with_capacity(body.len() + 1);
    out.extend(body.iter().map(|b| b - b'0'));
    out.push(end);
    out
}

/// A decoded literal and the nibble index just past its terminator.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Decoded {
    pub value: i64,
    pub next: usize,
}

/// Decode the literal whose first digit nibble is at `at`.
pub fn decode(code: &Bytecode, at: usize) -> Result<Decoded, DecodeError> {
    let mut value: i64 = 0;
    let mut digits: u32 = 0;
    let mut ip = at;

    loop {
        let n = code.get(ip).ok_or(DecodeError::Truncated { at })?;
        ip += 1;

        match n {
            0..=9 => {
                value = value
                    .checked_mul(10)
                    .and_then(|v| v.checked_add(i64::from(n)))
                    .ok_or(DecodeError::Overflow { at })?;
                digits += 1;
            }
            PLAIN_END => return Ok(Decoded { value, next: ip }),
            PREFIXED_END => {
                let value = 10i64
                    .checked_pow(digits)
                    .and_then(|place| value.checked_add(place))
                    .ok_or(DecodeError::Overflow { at })?;
                return Ok(Decoded { value, next: ip });
            }
            _ => return Err(DecodeError::InvalidDigit { code: n, at: ip - 1 }),
        }
    }
}

/// Malformed literal in bytecode.
#[derive(Clone, Copy, PartialEq, Eq, Debug, thiserror::Error)]
pub enum DecodeError {
    #[error("invalid literal digit {code:#X} at nibble {at}")]
    InvalidDigit { code: u8, at: usize },

    #[error("literal at nibble {at} runs past the end of the code")]
    Truncated { at: usize },

    #[error("literal at nibble {at} does not fit a 64-bit integer")]
    Overflow { at: usize },
}

impl DecodeError {
    pub fn kind(&self) -> ErrorKind {
        ErrorKind::Structural
    }
}
