//! Full unsigned 64x64 -> 128 bit multiplication, used once per main-loop iteration.

/// Full unsigned product of `x` and `y`, returned as `(hi, lo)`.
#[inline]
pub fn mul128(x: u64, y: u64) -> (u64, u64) {
    let product = u128::from(x) * u128::from(y);
    ((product >> 64) as u64, product as u64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;

    #[test]
    fn matches_u128_reference() {
        let mut rng = rand::thread_rng();
        for _ in 0..10_000 {
            let x: u64 = rng.gen();
            let y: u64 = rng.gen();
            let expected = u128::from(x) * u128::from(y);
            let (hi, lo) = mul128(x, y);
            assert_eq!(hi, (expected >> 64) as u64);
            assert_eq!(lo, expected as u64);
        }
    }

    #[test]
    fn handles_extremes() {
        assert_eq!(mul128(0, 0), (0, 0));
        assert_eq!(mul128(u64::MAX, u64::MAX), (u64::MAX - 1, 1));
    }
}
