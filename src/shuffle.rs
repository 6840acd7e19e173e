//! Variant-2 shuffle-add: a three-chunk rotate-add permutation on 64 bytes of
//! scratchpad around the current access offset.
use crate::endian::{load_u64x2_le, store_u64x2_le};

/// Rotate-add the three 16-byte scratchpad chunks at `j ^ 0x10`, `j ^ 0x20`, `j ^ 0x30`
/// around `a` and `b`, active for `variant >= 2`.
///
/// `out` is the 16-byte block the caller is otherwise producing this iteration
/// (`c1`); when `at_least_4` it is additionally XORed with the three pre-image chunks,
/// which only variant 4 does.
pub fn shuffle_add(out: &mut [u8], a: &[u8], b: &[u8], scratchpad: &mut [u8], j: usize, at_least_4: bool) {
    let chunk1_off = j ^ 0x10;
    let chunk2_off = j ^ 0x20;
    let chunk3_off = j ^ 0x30;

    let chunk1_old = load_u64x2_le(&scratchpad[chunk1_off..chunk1_off + 16]);
    let chunk2_old = load_u64x2_le(&scratchpad[chunk2_off..chunk2_off + 16]);
    let chunk3_old = load_u64x2_le(&scratchpad[chunk3_off..chunk3_off + 16]);

    let b_hi = load_u64x2_le(&b[16..32]);
    let b_lo = load_u64x2_le(&b[0..16]);
    let a_words = load_u64x2_le(a);

    let new_chunk1 = add_u64x2(chunk3_old, b_hi);
    let new_chunk3 = add_u64x2(chunk2_old, a_words);
    let new_chunk2 = add_u64x2(chunk1_old, b_lo);

    store_u64x2_le(&mut scratchpad[chunk1_off..chunk1_off + 16], new_chunk1);
    store_u64x2_le(&mut scratchpad[chunk2_off..chunk2_off + 16], new_chunk2);
    store_u64x2_le(&mut scratchpad[chunk3_off..chunk3_off + 16], new_chunk3);

    if at_least_4 {
        let mut out_words = load_u64x2_le(out);
        out_words[0] ^= chunk1_old[0] ^ chunk2_old[0] ^ chunk3_old[0];
        out_words[1] ^= chunk1_old[1] ^ chunk2_old[1] ^ chunk3_old[1];
        store_u64x2_le(out, out_words);
    }
}

#[inline]
fn add_u64x2(lhs: [u64; 2], rhs: [u64; 2]) -> [u64; 2] {
    [lhs[0].wrapping_add(rhs[0]), lhs[1].wrapping_add(rhs[1])]
}
