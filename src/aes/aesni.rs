//! Hardware-accelerated [`aes_round`] using the `AESENC` instruction.
//!
//! `AESENC` computes `AddRoundKey(MixColumns(ShiftRows(SubBytes(block))))`, i.e. it
//! applies the round key *after* the other three steps. The portable [`super::aes_round`]
//! has the same step order, so this is a drop-in replacement for the hot inner-loop
//! call, not a different cipher.
#[cfg(target_arch = "x86")]
use std::arch::x86::*;
#[cfg(target_arch = "x86_64")]
use std::arch::x86_64::*;

/// # Safety
///
/// Caller must have verified `is_x86_feature_detected!("aes")`.
#[target_feature(enable = "aes")]
pub unsafe fn aes_round(block: &mut [u8], round_key: &[u8]) {
    let state = _mm_loadu_si128(block.as_ptr() as *const __m128i);
    let key = _mm_loadu_si128(round_key.as_ptr() as *const __m128i);
    let result = _mm_aesenc_si128(state, key);
    _mm_storeu_si128(block.as_mut_ptr() as *mut __m128i, result);
}

#[cfg(test)]
mod tests {
    use super::super::aes_round_portable;
    use super::*;

    #[test]
    fn matches_portable_round() {
        if !is_x86_feature_detected!("aes") {
            return;
        }

        let round_key = [0x5Au8; 16];
        let mut via_ni = [0x11u8; 16];
        let mut via_portable = via_ni;

        unsafe { aes_round(&mut via_ni, &round_key) };
        aes_round_portable(&mut via_portable, &round_key);
        assert_eq!(via_ni, via_portable);
    }
}
