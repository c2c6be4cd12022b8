//! Number-Theoretic Transform, its inverse, and base multiplication with a
//! precomputed "mul-cache".
//!
//! This is a direct, branch-free-on-data layered Cooley-Tukey / Gentleman-Sande
//! transform over the 256 coefficients of `R_q`. Layer order and zeta-index
//! bookkeeping follow the standard bit-reversed layout against the zetas
//! table in `params::ZETAS`.

use crate::arith::{barrett_reduce, fqmul};
use crate::error::debug_check_bound;
use crate::params::{INVNTT_F, N, Q, ZETAS};

/// Forward NTT. Input coefficients must be signed-canonical (`|c| < q`); on
/// return every coefficient has been Barrett-reduced once, so the result is
/// again signed-canonical. Intermediate coefficients during the transform
/// are bounded by `8*q` in absolute value.
pub fn ntt(p: &mut [i16; N]) {
    debug_assert!(debug_check_bound(p, -(Q as i32 - 1), Q as i32 - 1).is_ok());
    let mut k = 1usize;
    let mut len = 128usize;
    while len >= 2 {
        let mut start = 0usize;
        while start < N {
            let zeta = ZETAS[k];
            k += 1;
            for j in start..start + len {
                let t = fqmul(zeta, p[j + len]);
                p[j + len] = p[j].wrapping_sub(t);
                p[j] = p[j].wrapping_add(t);
            }
            start += 2 * len;
        }
        len >>= 1;
    }

    for c in p.iter_mut() {
        *c = barrett_reduce(*c);
    }
    debug_assert!(debug_check_bound(p, -(Q as i32), Q as i32).is_ok());
}

/// Inverse NTT, Gentleman-Sande decimation. Leaves the result
/// signed-canonical and already scaled by the constant `f` (folded in as the
/// final pass below), matching the reference's single extra pass rather than
/// interleaving it into the last butterfly layer.
///
/// `f = R^2 * 128^-1 mod q`, not `R * 128^-1 mod q`, so one Montgomery factor
/// of `R` deliberately survives: for plain-domain `p`, `invntt(ntt(p))` is
/// congruent to `to_mont(p)` coefficient-wise, not to `p` itself. Callers
/// that need a plain-domain result apply one more `fqmul(_, 1)`.
pub fn invntt(p: &mut [i16; N]) {
    debug_assert!(debug_check_bound(p, -(Q as i32 - 1), Q as i32 - 1).is_ok());
    let mut k = 127usize;
    let mut len = 2usize;
    while len <= 128 {
        let mut start = 0usize;
        while start < N {
            let zeta = ZETAS[k];
            k = k.wrapping_sub(1);
            for j in start..start + len {
                let t = p[j];
                p[j] = barrett_reduce(t.wrapping_add(p[j + len]));
                p[j + len] = fqmul(zeta, p[j + len].wrapping_sub(t));
            }
            start += 2 * len;
        }
        len <<= 1;
    }

    for c in p.iter_mut() {
        *c = fqmul(*c, INVNTT_F);
    }
    debug_assert!(debug_check_bound(p, -(Q as i32), Q as i32).is_ok());
}

/// Degree-1 base multiplication: `(a0 + a1*X) * (b0 + b1*X) mod (X^2 - zeta)`.
#[inline(always)]
fn basemul(a0: i16, a1: i16, b0: i16, b1: i16, zeta: i16) -> (i16, i16) {
    let t0 = fqmul(a1, b1);
    let t0z = fqmul(t0, zeta);
    let t1 = fqmul(a0, b0);
    let r0 = t1.wrapping_add(t0z);

    let t2 = fqmul(a0, b1);
    let t3 = fqmul(a1, b0);
    let r1 = t2.wrapping_add(t3);

    (r0, r1)
}

/// Precomputes, for each pair index `i ∈ [0, 128)`, the products
/// `a[4i+1]*zeta_i` and `a[4i+3]*(-zeta_i)` in Montgomery form.
/// The cache is bounded by `q` in absolute value.
pub fn mulcache_compute(a: &[i16; N]) -> [i16; N / 2] {
    let mut cache = [0i16; N / 2];
    for i in 0..(N / 4) {
        let zeta = ZETAS[64 + i];
        cache[2 * i] = fqmul(a[4 * i + 1], zeta);
        cache[2 * i + 1] = fqmul(a[4 * i + 3], zeta.wrapping_neg());
    }
    cache
}

/// Base multiplication in the NTT domain using a precomputed mul-cache for
/// `b`: 4 `fqmul`s per degree-1 product instead of 5.
pub fn basemul_cached(a: &[i16; N], b: &[i16; N], b_cache: &[i16; N / 2]) -> [i16; N] {
    let mut r = [0i16; N];
    for i in 0..(N / 4) {
        let (r0, r1) = basemul_with_cache(a[4 * i], a[4 * i + 1], b[4 * i], b[4 * i + 1], b_cache[2 * i]);
        r[4 * i] = r0;
        r[4 * i + 1] = r1;

        let (r2, r3) = basemul_with_cache(
            a[4 * i + 2],
            a[4 * i + 3],
            b[4 * i + 2],
            b[4 * i + 3],
            b_cache[2 * i + 1],
        );
        r[4 * i + 2] = r2;
        r[4 * i + 3] = r3;
    }
    r
}

/// Degree-1 base multiplication using `b1 * zeta` (or `-zeta`) already
/// precomputed in `cached`, 4 `fqmul`s instead of the 5 `basemul` needs.
#[inline(always)]
fn basemul_with_cache(a0: i16, a1: i16, b0: i16, b1: i16, cached: i16) -> (i16, i16) {
    let t0z = fqmul(a1, cached);
    let t1 = fqmul(a0, b0);
    let r0 = t1.wrapping_add(t0z);

    let t2 = fqmul(a0, b1);
    let t3 = fqmul(a1, b0);
    let r1 = t2.wrapping_add(t3);

    (r0, r1)
}

/// Uncached base multiplication, kept for testing `basemul_cached` against
/// a reference path and for callers that have not built a mul-cache.
pub fn basemul_montgomery(a: &[i16; N], b: &[i16; N]) -> [i16; N] {
    let mut r = [0i16; N];
    for i in 0..(N / 4) {
        let zeta = ZETAS[64 + i];
        let (r0, r1) = basemul(a[4 * i], a[4 * i + 1], b[4 * i], b[4 * i + 1], zeta);
        r[4 * i] = r0;
        r[4 * i + 1] = r1;

        let (r2, r3) = basemul(
            a[4 * i + 2],
            a[4 * i + 3],
            b[4 * i + 2],
            b[4 * i + 3],
            zeta.wrapping_neg(),
        );
        r[4 * i + 2] = r2;
        r[4 * i + 3] = r3;
    }
    r
}
