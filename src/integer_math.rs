//! Variant-2/3 integer-math step: the division/sqrt mix folded into the
//! current `c1`/`c2` blocks.
use crate::endian::{load_u64_le, store_u64_le};
use crate::isqrt::isqrt_special;

/// Apply one integer-math step in place. `division_result` and `sqrt_result` carry
/// forward from one main-loop iteration to the next; `c1` and `c2` are the two
/// 16-byte scratchpad blocks currently in hand.
pub fn integer_math(c1: &mut [u8], c2: &mut [u8], division_result: &mut u64, sqrt_result: &mut u64) {
    let tmpx = *division_result ^ (*sqrt_result << 32);
    let c1_lo = load_u64_le(&c1[0..8]) ^ tmpx;
    store_u64_le(&mut c1[0..8], c1_lo);

    let dividend = load_u64_le(&c2[8..16]);
    let divisor = ((load_u64_le(&c2[0..8]).wrapping_add(*sqrt_result << 1)) as u32) | 0x8000_0001;

    *division_result = u64::from((dividend / u64::from(divisor)) as u32) | ((dividend % u64::from(divisor)) << 32);

    let sqrt_input = load_u64_le(&c2[0..8]).wrapping_add(*division_result);
    *sqrt_result = isqrt_special(sqrt_input);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn divisor_is_never_zero_or_even() {
        let mut c1 = [0u8; 16];
        let mut c2 = [0xFFu8; 16];
        let mut division_result = u64::MAX;
        let mut sqrt_result = u64::MAX;

        // The divisor is internal, but we can confirm the step never panics (a
        // division by zero would panic) across boundary-ish inputs.
        integer_math(&mut c1, &mut c2, &mut division_result, &mut sqrt_result);
        assert_ne!(division_result, 0);
    }

    #[test]
    fn quotient_is_truncated_to_32_bits_before_packing() {
        // divisor forced to its minimum, 0x8000_0001, by zeroing c2[0..8] and
        // sqrt_result; dividend forced to u64::MAX by setting c2[8..16] to all
        // 0xFF. The resulting quotient (0x1_ffff_fffc) overflows a u32, so this
        // exercises the `as u32` truncation before it's packed with the
        // remainder into the high half of division_result.
        let mut c1 = [0u8; 16];
        let mut c2 = [0u8; 16];
        c2[8..16].copy_from_slice(&[0xFFu8; 8]);
        let mut division_result = 0u64;
        let mut sqrt_result = 0u64;

        integer_math(&mut c1, &mut c2, &mut division_result, &mut sqrt_result);

        assert_eq!(division_result, 0x3_ffff_fffc);
    }

    #[test]
    fn step_is_deterministic() {
        let mut c1a = [1u8; 16];
        let mut c2a = [2u8; 16];
        let mut dra = 3u64;
        let mut sra = 4u64;

        let mut c1b = c1a;
        let mut c2b = c2a;
        let mut drb = dra;
        let mut srb = sra;

        integer_math(&mut c1a, &mut c2a, &mut dra, &mut sra);
        integer_math(&mut c1b, &mut c2b, &mut drb, &mut srb);

        assert_eq!(c1a, c1b);
        assert_eq!(c2a, c2b);
        assert_eq!(dra, drb);
        assert_eq!(sra, srb);
    }
}
