//! Module-rank-generic vector-of-polynomials operations.
//!
//! `PolyVec<const K: usize>` is generic over the module rank `K`, so the
//! same code path serves every ML-KEM parameter set, the caller picks `K`
//! via [`crate::params::ParameterSet::K`]. Compression/serialization
//! delegate to the bit-width-specific functions in [`crate::poly`] chosen
//! by `P::DU`/`P::DV` at each call site, since a `du`/`dv`-generic byte
//! array size needs `generic_const_exprs`. For the same reason the
//! serializing functions below write through a caller-supplied `&mut [u8]`
//! rather than returning an owned buffer sized by `K`, that also keeps
//! this module free of heap allocation.

use crate::arith::barrett_reduce;
use crate::params::{N, POLYBYTES};
use crate::poly::{self, Poly};

pub type PolyVec<const K: usize> = [Poly; K];

pub fn zero<const K: usize>() -> PolyVec<K> {
    [poly::zero(); K]
}

pub fn add<const K: usize>(a: &PolyVec<K>, b: &PolyVec<K>) -> PolyVec<K> {
    core::array::from_fn(|i| poly::add(&a[i], &b[i]))
}

pub fn sub<const K: usize>(a: &PolyVec<K>, b: &PolyVec<K>) -> PolyVec<K> {
    core::array::from_fn(|i| poly::sub(&a[i], &b[i]))
}

pub fn ntt<const K: usize>(v: &mut PolyVec<K>) {
    for p in v.iter_mut() {
        poly::ntt(p);
    }
}

pub fn invntt<const K: usize>(v: &mut PolyVec<K>) {
    for p in v.iter_mut() {
        poly::invntt(p);
    }
}

pub fn reduce<const K: usize>(v: &mut PolyVec<K>) {
    for p in v.iter_mut() {
        poly::reduce(p);
    }
}

pub fn tomont<const K: usize>(v: &mut PolyVec<K>) {
    for p in v.iter_mut() {
        poly::tomont(p);
    }
}

/// `sum_i a[i] * b[i]` in the NTT domain, reduced. Each
/// `basemul_montgomery_cached` call contributes coefficients bounded by
/// `q` in absolute value; the running sum before the final reduce is
/// bounded by `K * q`, which fits `i16` for every ML-KEM rank (`K <= 4`,
/// `4*q < 2^15`).
pub fn basemul_acc_montgomery_cached<const K: usize>(
    a: &PolyVec<K>,
    b: &PolyVec<K>,
    b_caches: &[[i16; N / 2]; K],
) -> Poly {
    let mut acc = poly::basemul_montgomery_cached(&a[0], &b[0], &b_caches[0]);
    for i in 1..K {
        let term = poly::basemul_montgomery_cached(&a[i], &b[i], &b_caches[i]);
        for j in 0..N {
            acc[j] = acc[j].wrapping_add(term[j]);
        }
    }
    for c in acc.iter_mut() {
        *c = barrett_reduce(*c);
    }
    acc
}

/// Precomputes the mul-cache for every component of `b`.
pub fn mulcache_compute<const K: usize>(v: &PolyVec<K>) -> [[i16; N / 2]; K] {
    core::array::from_fn(|i| poly::mulcache_compute(&v[i]))
}

/// Serializes `K` polynomials, `POLYBYTES` bytes each, back to back into
/// `out`. Panics if `out.len() != K * POLYBYTES`. Writes through a
/// caller-provided buffer rather than returning an owned `Vec` because `K`
/// is a generic parameter: stable Rust cannot size `[u8; K * POLYBYTES]`
/// without `generic_const_exprs`, and this module allocates nothing on the
/// heap regardless.
pub fn tobytes<const K: usize>(v: &PolyVec<K>, out: &mut [u8]) {
    assert_eq!(out.len(), K * POLYBYTES, "polyvec_tobytes: length mismatch");
    for (p, chunk) in v.iter().zip(out.chunks_mut(POLYBYTES)) {
        chunk.copy_from_slice(&poly::tobytes(p));
    }
}

/// Deserializes `K` back-to-back `POLYBYTES`-byte blocks. Panics if
/// `bytes.len() != K * POLYBYTES`; like [`crate::poly::frombytes`], does
/// not reduce mod q.
pub fn frombytes<const K: usize>(bytes: &[u8]) -> PolyVec<K> {
    assert_eq!(bytes.len(), K * POLYBYTES, "polyvec_frombytes: length mismatch");
    core::array::from_fn(|i| {
        let mut block = [0u8; POLYBYTES];
        block.copy_from_slice(&bytes[i * POLYBYTES..(i + 1) * POLYBYTES]);
        poly::frombytes(&block)
    })
}

/// Compresses each component at `du = 10` and concatenates into `out`
/// (`ML-KEM-512/768`). Panics if `out.len() != K * 320`.
pub fn compress_du10<const K: usize>(v: &PolyVec<K>, out: &mut [u8]) {
    assert_eq!(out.len(), K * 320, "polyvec_compress_du10: length mismatch");
    for (p, chunk) in v.iter().zip(out.chunks_mut(320)) {
        chunk.copy_from_slice(&poly::compress_d10(p));
    }
}

pub fn decompress_du10<const K: usize>(bytes: &[u8]) -> PolyVec<K> {
    assert_eq!(bytes.len(), K * 320, "polyvec_decompress_du10: length mismatch");
    core::array::from_fn(|i| {
        let mut block = [0u8; 320];
        block.copy_from_slice(&bytes[i * 320..(i + 1) * 320]);
        poly::decompress_d10(&block)
    })
}

/// Compresses each component at `du = 11` and concatenates into `out`
/// (`ML-KEM-1024`). Panics if `out.len() != K * 352`.
pub fn compress_du11<const K: usize>(v: &PolyVec<K>, out: &mut [u8]) {
    assert_eq!(out.len(), K * 352, "polyvec_compress_du11: length mismatch");
    for (p, chunk) in v.iter().zip(out.chunks_mut(352)) {
        chunk.copy_from_slice(&poly::compress_d11(p));
    }
}

pub fn decompress_du11<const K: usize>(bytes: &[u8]) -> PolyVec<K> {
    assert_eq!(bytes.len(), K * 352, "polyvec_decompress_du11: length mismatch");
    core::array::from_fn(|i| {
        let mut block = [0u8; 352];
        block.copy_from_slice(&bytes[i * 352..(i + 1) * 352]);
        poly::decompress_d11(&block)
    })
}
