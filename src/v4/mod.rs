//! Variant-4 random-math: program generation and evaluation, plus the per-iteration
//! register refresh/pack-back glue the main pipeline calls each round.
mod evaluator;
mod generator;
mod instruction;

pub use generator::{generate_program, NUM_INSTRUCTIONS_MAX, NUM_REGISTERS};
pub use instruction::Instruction;

use crate::endian::{load_u32_le, load_u64_le, store_u64_le};

/// One call of the variant-4 random-math mixing step: refreshes `r[4..9]` from the
/// live iteration state, runs `code` over all nine registers, then folds the result
/// back into `a1` and `c2`.
pub fn apply(a1: &mut [u8], c2: &mut [u8], r: &mut [u32; NUM_REGISTERS], b_1st16: &[u8], b_2nd16: &[u8], code: &[Instruction]) {
    let t0 = load_u64_le(&c2[0..8]) ^ ((u64::from(r[0].wrapping_add(r[1]))) | (u64::from(r[2].wrapping_add(r[3])) << 32));
    store_u64_le(&mut c2[0..8], t0);

    r[4] = load_u32_le(&a1[0..4]);
    r[5] = load_u32_le(&a1[8..12]);
    r[6] = load_u32_le(&b_1st16[0..4]);
    r[7] = load_u32_le(&b_2nd16[0..4]);
    r[8] = load_u32_le(&b_2nd16[8..12]);

    evaluator::evaluate(code, r);

    let a1_lo = load_u64_le(&a1[0..8]) ^ (u64::from(r[2]) | (u64::from(r[3]) << 32));
    let a1_hi = load_u64_le(&a1[8..16]) ^ (u64::from(r[0]) | (u64::from(r[1]) << 32));
    store_u64_le(&mut a1[0..8], a1_lo);
    store_u64_le(&mut a1[8..16], a1_hi);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_program_zero_registers_leaves_register_file_at_zero() {
        let code = [Instruction::RET];
        let mut a1 = [0u8; 16];
        let mut c2 = [0u8; 16];
        let mut r = [0u32; NUM_REGISTERS];
        apply(&mut a1, &mut c2, &mut r, &[0u8; 16], &[0u8; 16], &code);
        assert_eq!(r, [0u32; NUM_REGISTERS]);
        assert_eq!(a1, [0u8; 16]);
    }

    #[test]
    fn apply_is_deterministic() {
        let code = generate_program(55);
        let mut a1a = [7u8; 16];
        let mut c2a = [9u8; 16];
        let mut ra = [1, 2, 3, 4, 0, 0, 0, 0, 0];

        let mut a1b = a1a;
        let mut c2b = c2a;
        let mut rb = ra;

        apply(&mut a1a, &mut c2a, &mut ra, &[1u8; 16], &[2u8; 16], &code);
        apply(&mut a1b, &mut c2b, &mut rb, &[1u8; 16], &[2u8; 16], &code);

        assert_eq!(a1a, a1b);
        assert_eq!(c2a, c2b);
        assert_eq!(ra, rb);
    }
}
