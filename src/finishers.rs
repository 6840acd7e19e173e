//! Finisher hashes: BLAKE-256, Groestl-256, JH-256, Skein-256, selected by
//! `state[0] & 3` after the final Keccak-f permutation.
use blake_hash::Blake256;
use digest::Digest;
use groestl::Groestl256;
use jh_x86_64::Jh256;
use skein_hash::Skein512;

/// Run the finisher selected by `state[0] & 3` over the full 200-byte state and
/// return its 32-byte output.
pub fn select_and_finish(state: &[u8; 200]) -> [u8; 32] {
    let mut out = [0u8; 32];
    match state[0] & 3 {
        0 => out.copy_from_slice(&Blake256::digest(state)),
        1 => out.copy_from_slice(&Groestl256::digest(state)),
        2 => out.copy_from_slice(&Jh256::digest(state)),
        3 => {
            use digest09::Digest as Digest09;
            use skein_hash::digest::generic_array::typenum::U32;
            out.copy_from_slice(&Skein512::<U32>::digest(state));
        }
        x => unreachable!("finisher selector out of range: {}", x),
    };

    out
}
