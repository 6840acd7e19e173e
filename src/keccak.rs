//! Keccak-1600: one-shot sponge initializer producing 200 bytes of state, plus
//! the final Keccak-f[1600] permutation applied before finisher selection.
use digest::{FixedOutput, Input};
use std::convert::TryInto;

/// Absorb `data` with the Keccak sponge (b=1600, c=512) and return the full 200-byte
/// state, i.e. `Keccak256Full` without the usual 32-byte truncation.
///
/// This is the same primitive the main pipeline uses to seed its working state, kept
/// separate so external callers and tests can observe it directly.
pub fn keccak1600(data: &[u8]) -> [u8; 200] {
    let mut hasher = sha3::Keccak256Full::default();
    Input::input(&mut hasher, data);
    let digest = hasher.fixed_result();

    let mut state = [0u8; 200];
    state.copy_from_slice(&digest);
    state
}

/// Apply one Keccak-f[1600] permutation in place to the 200-byte state, run
/// immediately before finisher selection.
pub fn keccak_f1600(state: &mut [u8; 200]) {
    // tiny_keccak::keccakf operates on the state as 25 little-endian u64 lanes.
    let mut lanes = [0u64; 25];
    for (lane, chunk) in lanes.iter_mut().zip(state.chunks_exact(8)) {
        *lane = u64::from_le_bytes(chunk.try_into().unwrap());
    }

    tiny_keccak::keccakf(&mut lanes);

    for (lane, chunk) in lanes.iter().zip(state.chunks_exact_mut(8)) {
        chunk.copy_from_slice(&lane.to_le_bytes());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keccak1600_is_deterministic() {
        assert_eq!(keccak1600(b"This is a test"), keccak1600(b"This is a test"));
    }

    #[test]
    fn keccak1600_distinguishes_inputs() {
        assert_ne!(keccak1600(b""), keccak1600(b"x"));
    }

    #[test]
    fn permutation_changes_state() {
        let mut state = keccak1600(b"This is a test");
        let before = state;
        keccak_f1600(&mut state);
        assert_ne!(before, state);
    }
}
