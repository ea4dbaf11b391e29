//! MD5 digest used to turn a date and DJIA value into coordinate offsets.
//!
//! The geohashing algorithm is defined in terms of MD5, so this is not a
//! security boundary: the digest only needs to be deterministic and match the
//! reference values published with the algorithm.

use md5::{Digest, Md5};

/// Length of an MD5 digest in bytes.
pub const DIGEST_LEN: usize = 16;

/// Computes the MD5 digest of a byte sequence.
pub fn digest(bytes: &[u8]) -> [u8; DIGEST_LEN] {
    let mut hasher = Md5::new();
    hasher.update(bytes);

    let mut out = [0u8; DIGEST_LEN];
    out.copy_from_slice(&hasher.finalize());
    out
}

/// Computes the MD5 digest of the UTF-8 encoding of a string.
#[inline]
pub fn digest_str(input: &str) -> [u8; DIGEST_LEN] {
    digest(input.as_bytes())
}

/// Renders a digest as lowercase hexadecimal.
pub fn to_hex(digest: &[u8; DIGEST_LEN]) -> String {
    digest.iter().map(|b| format!("{:02x}", b)).collect()
}

/// Splits a digest into its two big-endian 64-bit halves.
#[inline]
pub fn split_halves(digest: &[u8; DIGEST_LEN]) -> (u64, u64) {
    let mut first = [0u8; 8];
    let mut second = [0u8; 8];
    first.copy_from_slice(&digest[..8]);
    second.copy_from_slice(&digest[8..]);
    (u64::from_be_bytes(first), u64::from_be_bytes(second))
}
