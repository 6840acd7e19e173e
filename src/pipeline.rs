//! The CryptoNight main pipeline: Keccak init, scratchpad expansion, the memory-hard
//! mixing loop, absorption, and finisher selection, generalized over all five
//! variants with the variant checks inlined exactly as the reference keeps them,
//! rather than duplicated per-variant loop bodies.
use crate::aes::{aes_pseudo_round, aes_round, derive_key, xor};
use crate::endian::{load_u64_le, load_u64x2_le, store_u64x2_le};
use crate::error::CryptoNightError;
use crate::finishers::select_and_finish;
use crate::integer_math::integer_math;
use crate::keccak::{keccak1600, keccak_f1600};
use std::convert::TryInto;
use crate::mul128::mul128;
use crate::shuffle::shuffle_add;
use crate::v4;
use crate::variant::{Variant, Variant1State, Variant2State, Variant4State, VariantGates};

/// Number of main-loop iterations (`ITER / 2` with `ITER = 2^20`).
const ROUNDS: usize = 524_288;

/// Run the full CryptoNight pipeline over `data`, writing into the caller-supplied
/// 2 MiB `scratchpad`, and return the 32-byte digest.
///
/// The scratchpad's size and alignment are the caller's responsibility (see
/// `CryptoNight::allocate_scratchpad`); this function only ever indexes into it, it
/// never resizes or reallocates it.
pub fn run(data: &[u8], variant: Variant, height: u64, scratchpad: &mut [u8]) -> Result<[u8; 32], CryptoNightError> {
    let gates = VariantGates::new(variant);

    // Phase A: Keccak init.
    let mut state = keccak1600(data);
    let aes_key: [u8; 32] = state[0..32].try_into().unwrap();
    let mut text: [u8; 128] = state[64..192].try_into().unwrap();

    // Phase B: variant inits.
    let variant1 = if gates.is_v1() {
        Some(Variant1State::init(&state, data)?)
    } else {
        None
    };

    let mut variant2 = if gates.at_least_2() {
        Some(Variant2State::init(&state))
    } else {
        None
    };

    let mut variant4 = if gates.at_least_4() {
        Some(Variant4State::init(&state, height))
    } else {
        None
    };

    let mut b = [0u8; 32];
    if gates.at_least_2() {
        for i in 0..16 {
            b[16 + i] = state[64 + i] ^ state[80 + i];
        }
    }

    // Phase C: scratchpad expansion.
    let expanded = derive_key(&aes_key);
    for chunk in scratchpad.chunks_exact_mut(128) {
        for block in text.chunks_exact_mut(16) {
            aes_pseudo_round(block, &expanded);
        }
        chunk.copy_from_slice(&text);
    }

    // Phase D: register init.
    let mut a = [0u8; 16];
    for k in 0..16 {
        a[k] = state[k] ^ state[32 + k];
        b[k] = state[16 + k] ^ state[48 + k];
    }

    // Phase E: main loop.
    let mut c1 = [0u8; 16];
    for _ in 0..ROUNDS {
        // Iteration 1.
        let j = scratchpad_index(&a);
        c1.copy_from_slice(&scratchpad[j..j + 16]);
        aes_round(&mut c1, &a);
        shuffle_add(&mut c1, &a, &b, scratchpad, j, gates.at_least_4());
        scratchpad[j..j + 16].copy_from_slice(&c1);
        xor(&mut scratchpad[j..j + 16], &b[0..16]);
        if gates.is_v1() {
            Variant1State::tweak_scratchpad_byte(&mut scratchpad[j..j + 16]);
        }

        // Iteration 2.
        let j = scratchpad_index(&c1);
        let mut c2 = [0u8; 16];
        c2.copy_from_slice(&scratchpad[j..j + 16]);
        let mut a1 = a;

        if gates.is_2_or_3() {
            let v2 = variant2.as_mut().unwrap();
            integer_math(&mut c2, &mut c1, &mut v2.division_result, &mut v2.sqrt_result);
        }

        if gates.at_least_4() {
            let v4_state = variant4.as_mut().unwrap();
            v4::apply(&mut a1, &mut c2, &mut v4_state.r, &b[0..16], &b[16..32], &v4_state.code);
        }

        let (hi, lo) = mul128(load_u64_le(&c1[0..8]), load_u64_le(&c2[0..8]));
        let mut d = [0u8; 16];
        d[0..8].copy_from_slice(&hi.to_le_bytes());
        d[8..16].copy_from_slice(&lo.to_le_bytes());

        if gates.is_2_or_3() {
            let hi_off = j ^ 0x10;
            xor(&mut scratchpad[hi_off..hi_off + 16], &d);
            let lo_off = j ^ 0x20;
            let mut d_words = load_u64x2_le(&d);
            let other = load_u64x2_le(&scratchpad[lo_off..lo_off + 16]);
            d_words[0] ^= other[0];
            d_words[1] ^= other[1];
            store_u64x2_le(&mut d, d_words);
        }

        shuffle_add(&mut c1, &a, &b, scratchpad, j, gates.at_least_4());

        let mut a1_words = load_u64x2_le(&a1);
        let d_words = load_u64x2_le(&d);
        a1_words[0] = a1_words[0].wrapping_add(d_words[0]);
        a1_words[1] = a1_words[1].wrapping_add(d_words[1]);
        store_u64x2_le(&mut a1, a1_words);

        std::mem::swap(&mut a1, &mut c2);
        xor(&mut a1, &c2);

        if let Some(v1) = &variant1 {
            v1.tweak_c2(&mut c2);
        }

        scratchpad[j..j + 16].copy_from_slice(&c2);

        if gates.at_least_2() {
            let (lo_half, hi_half) = b.split_at_mut(16);
            hi_half.copy_from_slice(lo_half);
        }
        b[0..16].copy_from_slice(&c1);
        a = a1;
    }

    // Phase F: absorption.
    text.copy_from_slice(&state[64..192]);
    let expanded2 = derive_key(&state[32..64]);
    for chunk in scratchpad.chunks_exact(128) {
        for (block, scratch_block) in text.chunks_exact_mut(16).zip(chunk.chunks_exact(16)) {
            xor(block, scratch_block);
            aes_pseudo_round(block, &expanded2);
        }
    }
    state[64..192].copy_from_slice(&text);

    // Phase G: finish.
    keccak_f1600(&mut state);
    Ok(select_and_finish(&state))
}

/// `(le_u64(block[0..8]) / 16) mod (scratchpad_size / 16) * 16`: the scratchpad
/// offset a 16-byte register selects.
#[inline]
fn scratchpad_index(block: &[u8; 16]) -> usize {
    const BLOCKS: u64 = (1 << 21) / 16;
    ((load_u64_le(&block[0..8]) / 16) % BLOCKS) as usize * 16
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratchpad() -> Vec<u8> {
        vec![0u8; 1 << 21]
    }

    #[test]
    fn variant_zero_empty_input_matches_canonical_vector() {
        let mut sp = scratchpad();
        let digest = run(b"", Variant::V0, 0, &mut sp).unwrap();
        assert_eq!(
            hex::encode(digest),
            "eb14e8a833fac6fe9a43b57b336789c46ffe93f2868452240720607b14387e11"
        );
    }

    #[test]
    fn variant_zero_test_string_matches_canonical_vector() {
        let mut sp = scratchpad();
        let digest = run(b"This is a test", Variant::V0, 0, &mut sp).unwrap();
        assert_eq!(
            hex::encode(digest),
            "a084f01d1437a09c6985401b60d43554ae105802c5f5d8a9b3253649c0be6605"
        );
    }

    #[test]
    fn is_deterministic_across_variants() {
        for variant in [Variant::V0, Variant::V1, Variant::V2, Variant::V3, Variant::V4] {
            let data: &[u8] = b"This is a test that is at least 43 bytes long!!";
            let mut sp1 = scratchpad();
            let mut sp2 = scratchpad();
            let a = run(data, variant, 1_806_260, &mut sp1).unwrap();
            let b = run(data, variant, 1_806_260, &mut sp2).unwrap();
            assert_eq!(a, b);
        }
    }

    #[test]
    fn variant_one_rejects_short_input() {
        let mut sp = scratchpad();
        assert!(run(b"short", Variant::V1, 0, &mut sp).is_err());
    }

    #[test]
    fn variant_one_accepts_boundary_length_input() {
        let mut sp = scratchpad();
        let data = [0u8; 43];
        assert!(run(&data, Variant::V1, 0, &mut sp).is_ok());
    }

    #[test]
    fn different_variants_diverge() {
        let data: &[u8] = b"This is a test that is at least 43 bytes long!!";
        let mut sp0 = scratchpad();
        let mut sp2 = scratchpad();
        let d0 = run(data, Variant::V0, 0, &mut sp0).unwrap();
        let d2 = run(data, Variant::V2, 0, &mut sp2).unwrap();
        assert_ne!(d0, d2);
    }
}
