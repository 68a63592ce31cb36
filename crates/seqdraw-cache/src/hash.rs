//! Content hashing for cache keys.

const FNV_OFFSET_BASIS: u32 = 0x811c_9dc5;
const FNV_PRIME: u32 = 0x0100_0193;

/// Compute a compact content hash for use as a cache key.
///
/// 32-bit FNV-1a over the UTF-16 code units of `content`, rendered in
/// base 36. Collisions are possible; two inputs sharing a key will share a
/// cache slot.
#[must_use]
pub fn content_hash(content: &str) -> String {
    let hash = content.encode_utf16().fold(FNV_OFFSET_BASIS, |hash, unit| {
        (hash ^ u32::from(unit)).wrapping_mul(FNV_PRIME)
    });
    to_base36(hash)
}

fn to_base36(mut value: u32) -> String {
    const DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

    if value == 0 {
        return "0".to_owned();
    }
    let mut buf = Vec::with_capacity(7);
    while value > 0 {
        buf.push(DIGITS[(value % 36) as usize]);
        value /= 36;
    }
    buf.iter().rev().map(|&digit| char::from(digit)).collect()
}
