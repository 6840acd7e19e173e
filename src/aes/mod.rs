//! AES round primitives: a portable implementation plus, on x86/x86_64 with the
//! `aesni` feature, a hardware-accelerated one selected at runtime.
//!
//! The backend split lives at the primitive boundary rather than duplicated across
//! the whole pipeline: the main pipeline (`crate::pipeline`) is written once against
//! [`aes_round`], [`derive_key`] and [`aes_pseudo_round`], and those three functions
//! alone dispatch to AES-NI when available.
use std::ops::BitXor;

use constants::*;

mod constants;

#[cfg(all(any(target_arch = "x86", target_arch = "x86_64"), feature = "aesni"))]
mod aesni;

fn multiplicative_inverse(b: u8) -> u8 {
    if b <= 1 {
        b
    } else {
        ANTI_LOG_LOOKUP[255 - LOG_LOOKUP[b as usize] as usize]
    }
}

fn s_box(c: u8) -> u8 {
    let b = multiplicative_inverse(c);
    b.bitxor(b.rotate_left(1))
        .bitxor(b.rotate_left(2))
        .bitxor(b.rotate_left(3))
        .bitxor(b.rotate_left(4))
        .bitxor(0x63)
}

/// Optimized version of gmul for multiplying by two
#[inline]
fn gmul2(a: u8) -> u8 {
    let h = !(a >> 7).wrapping_sub(1);

    (a << 1) ^ (0x1B & h)
}

/// SubBytes step
fn sub_bytes(block: &mut [u8]) {
    for c in block.iter_mut() {
        *c = s_box(*c)
    }
}

/// ShiftRows step
fn shift_rows(block: &mut [u8]) {
    // Row 0 doesn't move
    // Swap row 1
    let tmp = block[1];
    for col in 0..3 {
        let index = 1 + 4 * col;
        block[index] = block[index + 4];
    }
    block[13] = tmp;

    // Swap row 2
    block.swap(2, 10);
    block.swap(6, 14);

    // Swap row 3
    let tmp = block[15];
    for col in (1..4).rev() {
        block[col * 4 + 3] = block[col * 4 - 1];
    }
    block[3] = tmp;
}

fn mix_column(slice: &mut [u8]) {
    let mut a = [0u8; 4];
    let mut b = [0u8; 4];

    a.copy_from_slice(slice);

    for (c, db) in slice.iter().zip(b.iter_mut()) {
        *db = gmul2(*c);
    }

    for (i, dest) in slice.iter_mut().enumerate() {
        *dest = b[i] ^ a[(i + 3) % 4] ^ a[(i + 2) % 4] ^ a[(i + 1) % 4] ^ b[(i + 1) % 4];
    }
}

fn mix_columns(block: &mut [u8]) {
    for column in block.chunks_exact_mut(4) {
        mix_column(column);
    }
}

pub fn xor(block: &mut [u8], round_key: &[u8]) {
    for (c, k) in block.iter_mut().zip(round_key.iter()) {
        *c ^= *k;
    }
}

pub(crate) fn aes_round_portable(block: &mut [u8], round_key: &[u8]) {
    sub_bytes(block);
    shift_rows(block);
    mix_columns(block);
    xor(block, round_key);
}

/// One AES round (SubBytes, ShiftRows, MixColumns, AddRoundKey) on a 16-byte block
/// with an arbitrary 16-byte round key, dispatching to AES-NI when available.
pub fn aes_round(block: &mut [u8], round_key: &[u8]) {
    #[cfg(all(any(target_arch = "x86", target_arch = "x86_64"), feature = "aesni"))]
    {
        if is_x86_feature_detected!("aes") {
            unsafe { aesni::aes_round(block, round_key) };
            return;
        }
    }
    aes_round_portable(block, round_key);
}

fn schedule_core(new_key: &mut [u8], rcon: u8) {
    new_key.rotate_left(1);
    sub_bytes(new_key);
    new_key[0] ^= rcon;
}

/// The OAES key schedule: an AES-256 style expansion of a 32-byte key into ten
/// 16-byte round keys, used as a 10-round single-block transform (the "pseudo
/// round"), not as genuine AES-256 encryption.
pub fn derive_key(main: &[u8]) -> [u8; 160] {
    let mut key_buffer = [0u8; 160];
    key_buffer[..32].copy_from_slice(main);

    let mut rcon = 1;

    for offset in (32..key_buffer.len()).step_by(4) {
        let (finished, in_progress) = key_buffer.split_at_mut(offset);
        let previous = &finished[offset - 4..];
        let next = &mut in_progress[..4];
        next.copy_from_slice(previous);

        if offset % 32 == 0 {
            schedule_core(next, rcon);
            rcon = gmul2(rcon);
        } else if offset % 32 == 16 {
            sub_bytes(next);
        }

        xor(next, &finished[(offset - 32)..]);
    }

    key_buffer
}

/// Ten AES rounds applied in sequence to a 16-byte block, using the ten round keys
/// produced by [`derive_key`] from a 32-byte key.
pub fn aes_pseudo_round(block: &mut [u8], expanded_key: &[u8; 160]) {
    for key in expanded_key.chunks_exact(16) {
        aes_round(block, key);
    }
}
