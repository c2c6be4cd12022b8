//! Centered binomial sampling and rejection sampling from uniform bytes.
//!
//! `poly_cbd2`/`poly_cbd3` are kept as two separate entry points (one per
//! eta) rather than a single eta-dispatching function, so the η=2 vs η=3
//! byte-layout difference (4-byte vs. 3-byte groups) is a call-site choice
//! the type system can check instead of a runtime branch on a plain
//! `usize`. Rejection sampling reads 3 bytes at a time into two 12-bit
//! candidates, accepting each independently iff it is `< q`.

use crate::error::debug_check_bound;
use crate::params::{N, Q};

/// Samples a degree-255 polynomial with coefficients drawn from the
/// centered binomial distribution with eta=2, from `2*N/4 = 128` input
/// bytes. Every nibble of `buf` yields one coefficient: `a - b` where `a`
/// and `b` are each the popcount of a 2-bit field.
pub fn poly_cbd2(buf: &[u8], out: &mut [i16; N]) {
    debug_assert_eq!(buf.len(), 2 * N / 4);
    for i in 0..(N / 8) {
        let t = u32::from_le_bytes([buf[4 * i], buf[4 * i + 1], buf[4 * i + 2], buf[4 * i + 3]]);
        let mut d = t & 0x5555_5555;
        d = d.wrapping_add((t >> 1) & 0x5555_5555);

        for j in 0..8 {
            let a = ((d >> (4 * j)) & 0x3) as i16;
            let b = ((d >> (4 * j + 2)) & 0x3) as i16;
            out[8 * i + j] = a - b;
        }
    }
    debug_assert!(debug_check_bound(out, -2, 2).is_ok());
}

/// Samples a degree-255 polynomial with coefficients drawn from the
/// centered binomial distribution with eta=3, from `3*N/4 = 192` input
/// bytes. Used only by ML-KEM-512's secret/error vectors (eta1=3).
pub fn poly_cbd3(buf: &[u8], out: &mut [i16; N]) {
    debug_assert_eq!(buf.len(), 3 * N / 4);
    for i in 0..(N / 4) {
        let t = (buf[3 * i] as u32) | ((buf[3 * i + 1] as u32) << 8) | ((buf[3 * i + 2] as u32) << 16);
        let mut d = t & 0x0024_9249;
        d = d.wrapping_add((t >> 1) & 0x0024_9249);
        d = d.wrapping_add((t >> 2) & 0x0024_9249);

        for j in 0..4 {
            let a = ((d >> (6 * j)) & 0x7) as i16;
            let b = ((d >> (6 * j + 3)) & 0x7) as i16;
            out[4 * i + j] = a - b;
        }
    }
    debug_assert!(debug_check_bound(out, -3, 3).is_ok());
}

/// Rejection-samples up to `N` coefficients uniform on `[0, q)` from a
/// stream of bytes taken 3 at a time (two 12-bit candidates per triple,
/// each accepted independently iff `< q`). Returns the number of
/// coefficients written into `out` (at most `out.len()`, which the caller
/// sizes to `N`); returns fewer than `out.len()` only if `buf` runs out of
/// triples before `out` fills, in which case the caller re-invokes with
/// fresh XOF output rather than this function looping unboundedly.
pub fn rej_uniform(buf: &[u8], out: &mut [i16]) -> usize {
    let mut written = 0usize;
    let mut pos = 0usize;
    while pos + 3 <= buf.len() && written < out.len() {
        let b0 = buf[pos] as u32;
        let b1 = buf[pos + 1] as u32;
        let b2 = buf[pos + 2] as u32;
        pos += 3;

        let d1 = (b0 | (b1 << 8)) & 0x0FFF;
        let d2 = ((b1 >> 4) | (b2 << 4)) & 0x0FFF;

        if d1 < Q as u32 && written < out.len() {
            out[written] = d1 as i16;
            written += 1;
        }
        if d2 < Q as u32 && written < out.len() {
            out[written] = d2 as i16;
            written += 1;
        }
    }
    debug_assert!(debug_check_bound(&out[..written], 0, Q as i32 - 1).is_ok());
    written
}
