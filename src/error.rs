//! Error handling: the core's two failure modes, surfaced via `thiserror`.
use thiserror::Error;

/// The two ways a `cn_slow_hash` call can fail.
#[derive(Debug, Error)]
pub enum CryptoNightError {
    /// Variant 1 needs at least 43 bytes of input to derive its tweak from; shorter
    /// input is a precondition violation, not a value the algorithm can process.
    #[error("cryptonight variant 1 requires at least 43 bytes of input, got {actual}")]
    VariantOneInputTooShort {
        /// The length of the input that was rejected.
        actual: usize,
    },

    /// The 2 MiB scratchpad could not be allocated.
    #[error("failed to allocate the {size}-byte scratchpad")]
    ScratchpadAllocation {
        /// The size, in bytes, of the allocation that failed.
        size: usize,
    },

    /// A caller-supplied scratchpad buffer didn't meet the size/alignment contract.
    #[error("scratchpad buffer must be {expected} bytes aligned to {alignment}, got {actual} bytes")]
    InvalidScratchpad {
        /// The required scratchpad size in bytes.
        expected: usize,
        /// The required alignment in bytes.
        alignment: usize,
        /// The size of the buffer that was actually supplied.
        actual: usize,
    },
}
