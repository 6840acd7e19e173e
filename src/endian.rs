//! Little/big-endian load and store helpers for the fixed-size byte views the
//! main pipeline juggles throughout its working registers.

/// Read a little-endian `u32` from the first 4 bytes of `bytes`.
#[inline]
pub fn load_u32_le(bytes: &[u8]) -> u32 {
    let mut buf = [0u8; 4];
    buf.copy_from_slice(&bytes[..4]);
    u32::from_le_bytes(buf)
}

/// Read a little-endian `u64` from the first 8 bytes of `bytes`.
#[inline]
pub fn load_u64_le(bytes: &[u8]) -> u64 {
    let mut buf = [0u8; 8];
    buf.copy_from_slice(&bytes[..8]);
    u64::from_le_bytes(buf)
}

/// Write `value` into the first 4 bytes of `bytes`, little-endian.
#[inline]
pub fn store_u32_le(bytes: &mut [u8], value: u32) {
    bytes[..4].copy_from_slice(&value.to_le_bytes());
}

/// Write `value` into the first 8 bytes of `bytes`, little-endian.
#[inline]
pub fn store_u64_le(bytes: &mut [u8], value: u64) {
    bytes[..8].copy_from_slice(&value.to_le_bytes());
}

/// Read a 16-byte block as a pair of little-endian `u64`s.
#[inline]
pub fn load_u64x2_le(bytes: &[u8]) -> [u64; 2] {
    [load_u64_le(&bytes[0..8]), load_u64_le(&bytes[8..16])]
}

/// Write a pair of little-endian `u64`s back into a 16-byte block.
#[inline]
pub fn store_u64x2_le(bytes: &mut [u8], value: [u64; 2]) {
    store_u64_le(&mut bytes[0..8], value[0]);
    store_u64_le(&mut bytes[8..16], value[1]);
}
