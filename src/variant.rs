//! The variant selector and the small per-hash state each of the higher variants
//! threads through the main loop: the variant-1 tweak, the variant-2/3 division/sqrt
//! scalars, and the variant-4 register file and generated program.
use std::convert::TryFrom;

use crate::endian::{load_u32_le, load_u64_le};
use crate::error::CryptoNightError;
use crate::v4;

/// Which of the five CryptoNight mixing-rule variants to run.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Variant {
    V0,
    V1,
    V2,
    V3,
    V4,
}

impl Variant {
    #[inline]
    pub fn as_u8(self) -> u8 {
        match self {
            Variant::V0 => 0,
            Variant::V1 => 1,
            Variant::V2 => 2,
            Variant::V3 => 3,
            Variant::V4 => 4,
        }
    }

    #[inline]
    fn at_least(self, floor: u8) -> bool {
        self.as_u8() >= floor
    }
}

impl TryFrom<u8> for Variant {
    type Error = u8;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Variant::V0),
            1 => Ok(Variant::V1),
            2 => Ok(Variant::V2),
            3 => Ok(Variant::V3),
            4 => Ok(Variant::V4),
            other => Err(other),
        }
    }
}

/// Variant-1 tweak seed: `state[192..200] XOR data[35..43]`, present only when
/// `variant == 1` and `data` is at least 43 bytes long (enforced at construction).
pub struct Variant1State {
    pub tweak1_2: [u8; 8],
}

impl Variant1State {
    pub fn init(state: &[u8; 200], data: &[u8]) -> Result<Self, CryptoNightError> {
        if data.len() < 43 {
            return Err(CryptoNightError::VariantOneInputTooShort { actual: data.len() });
        }

        let mut tweak1_2 = [0u8; 8];
        for i in 0..8 {
            tweak1_2[i] = state[192 + i] ^ data[35 + i];
        }

        Ok(Variant1State { tweak1_2 })
    }

    /// VARIANT1_1: tweak the low bit pattern of the byte at offset 11 of the just
    /// written scratchpad block.
    pub fn tweak_scratchpad_byte(block: &mut [u8]) {
        let tmp = block[11];
        let index = (((tmp >> 3) & 6) | (tmp & 1)) << 1;
        block[11] = tmp ^ ((0x75310u32 >> index) & 0x30) as u8;
    }

    /// VARIANT1_2: XOR the tweak into the high 8 bytes of `c2`.
    pub fn tweak_c2(&self, c2: &mut [u8]) {
        for i in 0..8 {
            c2[8 + i] ^= self.tweak1_2[i];
        }
    }
}

/// Variant-2/3 division/sqrt scalars, seeded from the Keccak state's 64-bit words 12
/// and 13.
pub struct Variant2State {
    pub division_result: u64,
    pub sqrt_result: u64,
}

impl Variant2State {
    pub fn init(state: &[u8; 200]) -> Self {
        Variant2State {
            division_result: load_u64_le(&state[12 * 8..]),
            sqrt_result: load_u64_le(&state[13 * 8..]),
        }
    }
}

/// Variant-4 register file and generated random-math program.
pub struct Variant4State {
    pub r: [u32; 9],
    pub code: [v4::Instruction; v4::NUM_INSTRUCTIONS_MAX + 1],
}

impl Variant4State {
    pub fn init(state: &[u8; 200], height: u64) -> Self {
        let mut r = [0u32; 9];
        for i in 0..4 {
            r[i] = load_u32_le(&state[12 * 8 + i * 4..]);
        }

        Variant4State {
            r,
            code: v4::generate_program(height),
        }
    }
}

/// Which variant-gated code paths are active for this hash, bundled so the main
/// pipeline can check `variant.at_least(n)` instead of matching the enum everywhere.
pub struct VariantGates {
    pub variant: Variant,
}

impl VariantGates {
    pub fn new(variant: Variant) -> Self {
        VariantGates { variant }
    }

    #[inline]
    pub fn is_v1(&self) -> bool {
        self.variant == Variant::V1
    }

    #[inline]
    pub fn at_least_2(&self) -> bool {
        self.variant.at_least(2)
    }

    #[inline]
    pub fn is_2_or_3(&self) -> bool {
        matches!(self.variant, Variant::V2 | Variant::V3)
    }

    #[inline]
    pub fn at_least_4(&self) -> bool {
        self.variant.at_least(4)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn try_from_rejects_out_of_range() {
        assert!(Variant::try_from(5).is_err());
        assert_eq!(Variant::try_from(0), Ok(Variant::V0));
        assert_eq!(Variant::try_from(4), Ok(Variant::V4));
    }

    #[test]
    fn variant1_state_rejects_short_input() {
        let state = [0u8; 200];
        assert!(Variant1State::init(&state, &[0u8; 42]).is_err());
        assert!(Variant1State::init(&state, &[0u8; 43]).is_ok());
    }

    #[test]
    fn gates_match_variant_thresholds() {
        let g0 = VariantGates::new(Variant::V0);
        assert!(!g0.at_least_2());
        assert!(!g0.at_least_4());

        let g2 = VariantGates::new(Variant::V2);
        assert!(g2.at_least_2());
        assert!(g2.is_2_or_3());
        assert!(!g2.at_least_4());

        let g4 = VariantGates::new(Variant::V4);
        assert!(g4.at_least_2());
        assert!(!g4.is_2_or_3());
        assert!(g4.at_least_4());
    }
}
