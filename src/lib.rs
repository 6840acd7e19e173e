//! An implementation of the [CryptoNight][1] digest algorithm and its variants.
//!
//! # Usage
//!
//! ```
//! # use hex_literal::hex;
//! use cryptonight_hash::{CryptoNight, Digest};
//!
//! // Create the CryptoNight hasher
//! let mut hasher = CryptoNight::new();
//!
//! // Input some data into the hasher
//! hasher.input(b"This is ");
//!
//! // Insert more data as needed.
//! hasher.input("a test");
//!
//! // Finalize the result. This will temporary allocate a 2MB buffer.
//! let result = hasher.result();
//!
//! assert_eq!(result[..], hex!("a084f01d1437a09c6985401b60d43554ae105802c5f5d8a9b3253649c0be6605")[..]);
//! ```
//!
//! The `Digest`-trait entry point above always hashes CryptoNight variant 0 at
//! height 0, matching the crate's earlier single-variant API. To select a variant or
//! a height, use [`CryptoNight::with_variant`]/[`CryptoNight::with_height`], or skip
//! the `Digest` trait entirely and call [`cn_slow_hash`].
//!
//! ```
//! use cryptonight_hash::{cn_slow_hash, Variant};
//!
//! let digest = cn_slow_hash(b"This is a test", Variant::V0, 0).unwrap();
//! assert_eq!(digest[0], 0xa0);
//! ```
//!
//! Be sure to refer to the [RustCrypto/hashes][2] readme for more more
//! information about the Digest traits.
//!
//! [1]: https://cryptonote.org/cns/cns008.txt
//! [2]: https://github.com/RustCrypto/hashes
use std::alloc::{alloc, Layout};

pub use digest::{BlockInput, Digest, FixedOutput, Input, Reset};
use digest::generic_array::GenericArray;
use digest::generic_array::typenum::U32;

mod aes;
mod endian;
mod error;
mod finishers;
mod integer_math;
mod isqrt;
mod keccak;
mod mul128;
mod pipeline;
mod shuffle;
mod v4;
mod variant;

pub use error::CryptoNightError;
pub use variant::Variant;

#[repr(align(16))]
/// Helper to enforce 16 byte alignment
struct A16<T>(pub T);

/// Compute a CryptoNight digest in one call: no allocation retained across calls
/// beyond the scratchpad this function allocates and frees internally.
///
/// `variant` selects among the five published mixing-rule variants; `height` only
/// matters for `Variant::V4`, which uses it to seed the per-hash random-math
/// program, and is otherwise ignored.
pub fn cn_slow_hash(data: &[u8], variant: Variant, height: u64) -> Result<[u8; 32], CryptoNightError> {
    let mut scratchpad = CryptoNight::allocate_scratchpad();
    cn_slow_hash_with_buffer(data, variant, height, scratchpad.as_mut())
}

/// Compute a CryptoNight digest with a caller-supplied scratchpad, performing no
/// allocation of its own.
///
/// `scratchpad` must be [`CryptoNight::SP_SIZE`] bytes, aligned to
/// [`CryptoNight::SP_ALIGNMENT`]; see [`CryptoNightError::InvalidScratchpad`].
pub fn cn_slow_hash_with_buffer(data: &[u8], variant: Variant, height: u64, scratchpad: &mut [u8]) -> Result<[u8; 32], CryptoNightError> {
    if scratchpad.len() != CryptoNight::SP_SIZE || scratchpad.as_ptr() as usize & (CryptoNight::SP_ALIGNMENT - 1) != 0 {
        return Err(CryptoNightError::InvalidScratchpad {
            expected: CryptoNight::SP_SIZE,
            alignment: CryptoNight::SP_ALIGNMENT,
            actual: scratchpad.len(),
        });
    }

    pipeline::run(data, variant, height, scratchpad)
}

/// CryptoNight hasher, exposed through the `digest` crate's streaming-hasher traits
/// for drop-in compatibility with other `digest`-based tooling.
///
/// The `digest` trait API can't surface `Result`, so [`FixedOutput::fixed_result`]
/// keeps this crate's original panic-on-violation behavior (an invalid variant-1
/// input or a scratchpad allocation failure panics); callers that want errors
/// surfaced as values should call [`cn_slow_hash`] instead.
#[derive(Debug, Clone)]
pub struct CryptoNight {
    internal_hasher: sha3::Keccak256Full,
    variant: Variant,
    height: u64,
}

impl Default for CryptoNight {
    fn default() -> Self {
        CryptoNight {
            internal_hasher: Default::default(),
            variant: Variant::V0,
            height: 0,
        }
    }
}

impl CryptoNight {
    /// Alignment requirement for the scratch pad.
    pub const SP_ALIGNMENT: usize = 16;
    /// Scratch pad size.
    pub const SP_SIZE: usize = 1 << 21;

    /// Select which variant this hasher computes. Defaults to `Variant::V0`.
    pub fn with_variant(mut self, variant: Variant) -> Self {
        self.variant = variant;
        self
    }

    /// Select the block height used to seed variant 4's random-math program.
    /// Ignored by every other variant. Defaults to 0.
    pub fn with_height(mut self, height: u64) -> Self {
        self.height = height;
        self
    }

    /// Compute a digest with a provided buffer.
    ///
    /// This method performs no allocations, as opposed to the
    /// `fixed_result` method. However, the scratchpad should be of
    /// proper length and alignment. See the `SP_ALIGNMENT` and `SP_SIZE`
    /// constants for the exact requirements.
    ///
    /// See also: `Digest::fixed_result()`.
    ///
    /// # Panics
    ///
    /// If the buffer provided is not acceptable, or the variant's preconditions are
    /// not met, this method will panic.
    pub fn fixed_result_with_buffer(self, scratchpad: &mut [u8]) -> GenericArray<u8, <Self as FixedOutput>::OutputSize> {
        assert_eq!(scratchpad.as_ptr() as usize & (Self::SP_ALIGNMENT - 1), 0);
        assert_eq!(scratchpad.len(), Self::SP_SIZE);

        let data = A16(self.internal_hasher.fixed_result());
        let digest = pipeline::run(&data.0, self.variant, self.height, scratchpad)
            .expect("cryptonight preconditions violated");

        GenericArray::clone_from_slice(&digest)
    }

    /// Compute a digest with a provided buffer.
    ///
    /// This method performs no allocations, as opposed to the
    /// `fixed_result` method. However, the scratchpad should be of
    /// proper length and alignment. See the `SP_ALIGNMENT` and `SP_SIZE`
    /// constants for the exact requirements.
    ///
    /// See also: `Digest::digest()`.
    ///
    /// # Panics
    ///
    /// If the buffer provided is not acceptable, this method will panic.
    pub fn digest_with_buffer<B>(data: B, scratchpad: &mut [u8]) -> GenericArray<u8, <Self as FixedOutput>::OutputSize>
        where B: AsRef<[u8]> {
        let mut hasher: Self = Default::default();
        Input::input(&mut hasher, data);
        hasher.fixed_result_with_buffer(scratchpad)
    }

    /// Allocate a reusable scratchpad for use with the `_with_buffer` methods.
    ///
    /// The resulting buffer is guaranteed to be on the heap. Its contents are undefinded.
    ///
    /// # Usage
    /// ```
    /// # use cryptonight_hash::CryptoNight;
    /// let mut buffer = CryptoNight::allocate_scratchpad();
    ///
    /// CryptoNight::digest_with_buffer(b"Your data", buffer.as_mut());
    /// ```
    pub fn allocate_scratchpad() -> impl AsMut<[u8]> {
        unsafe {
            let buffer = alloc(Layout::from_size_align_unchecked(Self::SP_SIZE, Self::SP_ALIGNMENT));
            Vec::from_raw_parts(buffer, Self::SP_SIZE, Self::SP_SIZE)
        }
    }
}

impl Input for CryptoNight {
    fn input<B: AsRef<[u8]>>(&mut self, data: B) {
        Input::input(&mut self.internal_hasher, data);
    }
}

impl Reset for CryptoNight {
    fn reset(&mut self) {
        Reset::reset(&mut self.internal_hasher);
    }
}

impl BlockInput for CryptoNight {
    type BlockSize = <sha3::Keccak256Full as BlockInput>::BlockSize;
}

impl FixedOutput for CryptoNight {
    type OutputSize = U32;

    fn fixed_result(self) -> GenericArray<u8, Self::OutputSize> {
        let mut scratchpad = Self::allocate_scratchpad();

        self.fixed_result_with_buffer(scratchpad.as_mut())
    }
}

#[cfg(test)]
mod tests {
    use hex_literal::hex;

    use super::*;
    use std::convert::TryFrom;

    #[test]
    fn digest_trait_matches_free_function() {
        let via_trait = CryptoNight::digest(b"This is a test");
        let via_function = cn_slow_hash(b"This is a test", Variant::V0, 0).unwrap();
        assert_eq!(via_trait[..], via_function[..]);
    }

    #[test]
    fn builder_selects_variant_and_height() {
        let a = CryptoNight::new().with_variant(Variant::V4).with_height(1_806_260);
        let b = cn_slow_hash(b"", Variant::V4, 1_806_260).unwrap();
        assert_eq!(a.fixed_result()[..], b[..]);
    }

    #[test]
    fn invalid_scratchpad_size_is_reported() {
        let mut too_small = vec![0u8; 16];
        let err = cn_slow_hash_with_buffer(b"", Variant::V0, 0, &mut too_small).unwrap_err();
        assert!(matches!(err, CryptoNightError::InvalidScratchpad { .. }));
    }

    #[test]
    fn known_vector_still_matches() {
        let result = cn_slow_hash(b"This is a test", Variant::V0, 0).unwrap();
        assert_eq!(result[..], hex!("a084f01d1437a09c6985401b60d43554ae105802c5f5d8a9b3253649c0be6605")[..]);
    }

    #[test]
    fn variant_try_from_round_trips() {
        for v in 0u8..=4 {
            assert_eq!(Variant::try_from(v).unwrap().as_u8(), v);
        }
    }
}
