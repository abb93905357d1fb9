//! Wire encodings shared by messages and program instructions.
//!
//! ## Compact length prefix
//!
//! Array lengths inside a message use the compact-u16 encoding: seven bits
//! per byte, least significant group first, with the high bit set on every
//! byte except the last.
//!
//! ```text
//! 0x05        -> [0x05]
//! 0x80        -> [0x80, 0x01]
//! 0x3fff      -> [0xff, 0x7f]
//! 0x4000      -> [0x80, 0x80, 0x01]
//! ```
//!
//! ## Instruction discriminator
//!
//! Program instructions are selected by the first eight bytes of
//! `sha256("global:<instruction_name>")`, followed by the Borsh encoded
//! arguments.

use crate::crypto::hash;

/// Length of the instruction selector prefix
pub const DISCRIMINATOR_SIZE: usize = 8;

/// Namespace used for instruction selectors
pub const INSTRUCTION_NAMESPACE: &str = "global";

/// Append `len` as a compact-u16 to `out`.
pub fn encode_length(len: u16, out: &mut Vec<u8>) {
    let mut rem = len;
    loop {
        let mut elem = (rem & 0x7f) as u8;
        rem >>= 7;
        if rem == 0 {
            out.push(elem);
            break;
        }
        elem |= 0x80;
        out.push(elem);
    }
}

/// Selector for the instruction named `name` (snake_case, as declared on chain).
pub fn instruction_discriminator(name: &str) -> [u8; DISCRIMINATOR_SIZE] {
    let preimage = format!("{}:{}", INSTRUCTION_NAMESPACE, name);
    let digest = hash(preimage.as_bytes());
    let mut out = [0u8; DISCRIMINATOR_SIZE];
    out.copy_from_slice(&digest.as_bytes()[..DISCRIMINATOR_SIZE]);
    out
}
