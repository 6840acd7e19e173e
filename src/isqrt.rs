//! The variant-2/3 integer square root helper.
//!
//! `isqrt_special(x) == floor(sqrt(x + 2^64)) * 2 - 2^33`, fixed up by at most one
//! unit in the last place against the exact integer result. Two admissible
//! implementations are provided, an FP-assisted one (matching the reference's use of
//! `sqrt()` plus a fix-up) and a pure-integer one; both must agree on every input.

const TWO_POW_64_F64: f64 = 1.844_674_407_370_955_2e19;

/// FP-assisted `isqrt_special`, per the reference formula.
#[inline]
pub fn isqrt_special_fp(sqrt_input: u64) -> u64 {
    let mut round = ((sqrt_input as f64 + TWO_POW_64_F64).sqrt() * 2.0) as u64;
    round = round.wrapping_sub(8_589_934_592);
    fixup(round, sqrt_input)
}

/// Pure-integer `isqrt_special`, using a binary search over the candidate root
/// instead of a floating point square root.
///
/// The FP path computes `round = sqrt(x + 2^64) * 2 - 2^33`; squaring that scale
/// factor gives an equivalent exact-integer target `4x + 2^66`, whose floor square
/// root (computed here over `u128`, which comfortably holds the 68-bit target) is
/// bit-for-bit identical to the FP path before the shared fix-up runs.
pub fn isqrt_special_int(sqrt_input: u64) -> u64 {
    let target = 4u128 * u128::from(sqrt_input) + (1u128 << 66);

    let mut lo: u128 = 0;
    let mut hi: u128 = 1u128 << 34;
    while lo < hi {
        let mid = lo + (hi - lo + 1) / 2;
        if mid * mid <= target {
            lo = mid;
        } else {
            hi = mid - 1;
        }
    }

    let round = (lo - (1u128 << 33)) as u64;
    fixup(round, sqrt_input)
}

/// Fix-up logic required even in the FP path: nudge the candidate root by at most
/// one in either direction so it matches the exact integer result.
#[inline]
fn fixup(mut round: u64, sqrt_input: u64) -> u64 {
    let r2 = half_square(round);
    if r2.wrapping_add(round & 1) > sqrt_input {
        round = round.wrapping_sub(1);
    } else if r2.wrapping_add(1u64 << 32) < sqrt_input.wrapping_sub(round / 2) {
        round = round.wrapping_add(1);
    }
    round
}

/// `(round/2) * (round/2 + round&1) + (round << 32)`, the repeated half-square term
/// from the reference fix-up.
#[inline]
fn half_square(round: u64) -> u64 {
    let half = round / 2;
    let lsb = round & 1;
    half.wrapping_mul(half.wrapping_add(lsb))
        .wrapping_add(round << 32)
}

/// Default `isqrt_special`: the FP-assisted implementation, matching the reference.
#[inline]
pub fn isqrt_special(sqrt_input: u64) -> u64 {
    isqrt_special_fp(sqrt_input)
}
