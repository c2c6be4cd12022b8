//! Noise-polynomial sampling: builds the `seed || nonce` extended key, drives
//! it through SHAKE-256, and feeds the result to centered binomial sampling.
//!
//! Four named entry points (`poly_getnoise_eta1_4x`, `poly_getnoise_eta2`,
//! `poly_getnoise_eta2_4x`, `poly_getnoise_eta1122_4x`) rather than one
//! eta-dispatching function, key generation and encryption call these at
//! different batch shapes (4 same-eta draws, 1 eta2 draw, 2+2 mixed-eta
//! draws), each matching its call site's natural batch width. The extended
//! key is always 33 bytes: `SYMBYTES` seed plus a 1-byte nonce.
//!
//! `poly_getnoise_eta1122_4x` draws two lanes at `eta1` and two at `eta2`
//! in a single `shake256x4` call regardless of whether `eta1 == eta2`,
//! since [`crate::hash::shake256x4`] takes four independently-sized output
//! slices rather than requiring a uniform length across lanes.
//!
//! Every extended key and XOF output buffer here holds secret-derived
//! material and is wiped on drop via `zeroize`.

use zeroize::Zeroize;

use crate::hash::{shake256, shake256x4};
use crate::params::{N, SYMBYTES};
use crate::poly::{self, Poly};
use crate::sample::{poly_cbd2, poly_cbd3};

/// Longest extended-key buffer any noise draw needs: `seed || nonce`.
const EXTKEY_LEN: usize = SYMBYTES + 1;

/// Longest PRF output buffer any noise draw needs (`eta = 3`, the largest
/// value ML-KEM uses, for ML-KEM-512's `eta1`).
const MAX_BUFLEN: usize = 3 * N / 4;

fn extkey(seed: &[u8; SYMBYTES], nonce: u8) -> [u8; EXTKEY_LEN] {
    let mut buf = [0u8; EXTKEY_LEN];
    buf[..SYMBYTES].copy_from_slice(seed);
    buf[SYMBYTES] = nonce;
    buf
}

fn cbd_for_eta(eta: usize, buf: &[u8]) -> Poly {
    let mut out = poly::zero();
    match eta {
        2 => poly_cbd2(buf, &mut out),
        3 => poly_cbd3(buf, &mut out),
        _ => unreachable!("ML-KEM only uses eta in {{2, 3}}"),
    }
    out
}

/// Draws 4 independent `eta1`-CBD polynomials in one batched XOF call,
/// the batch width key generation and encryption drive secret and error
/// vectors through. `eta1` is 2 for ML-KEM-768/1024 and 3 for ML-KEM-512,
/// callers pass `P::ETA1` from their chosen [`crate::params::ParameterSet`].
pub fn poly_getnoise_eta1_4x(
    seed: &[u8; SYMBYTES],
    nonces: [u8; 4],
    eta1: usize,
) -> [Poly; 4] {
    let buflen = eta1 * N / 4;
    let mut keys: [[u8; EXTKEY_LEN]; 4] = core::array::from_fn(|i| extkey(seed, nonces[i]));
    let mut bufs = [[0u8; MAX_BUFLEN]; 4];

    {
        let [k0, k1, k2, k3] = &keys;
        let [b0, b1, b2, b3] = &mut bufs;
        shake256x4(
            [k0.as_slice(), k1.as_slice(), k2.as_slice(), k3.as_slice()],
            [
                &mut b0[..buflen],
                &mut b1[..buflen],
                &mut b2[..buflen],
                &mut b3[..buflen],
            ],
        );
    }

    let out = core::array::from_fn(|i| cbd_for_eta(eta1, &bufs[i][..buflen]));

    for k in keys.iter_mut() {
        k.zeroize();
    }
    for b in bufs.iter_mut() {
        b.zeroize();
    }
    out
}

/// Draws a single `eta2`-CBD polynomial (`eta2` is always 2): the
/// single-lane noise draw used for the ciphertext-side error term that
/// does not participate in a 4-wide batch.
pub fn poly_getnoise_eta2(seed: &[u8; SYMBYTES], nonce: u8) -> Poly {
    const ETA2: usize = 2;
    const BUFLEN: usize = ETA2 * N / 4;

    let mut key = extkey(seed, nonce);
    let mut buf = [0u8; BUFLEN];
    shake256(&key, &mut buf);
    let out = cbd_for_eta(ETA2, &buf);

    key.zeroize();
    buf.zeroize();
    out
}

/// Draws 4 independent `eta2`-CBD polynomials in one batched XOF call.
pub fn poly_getnoise_eta2_4x(seed: &[u8; SYMBYTES], nonces: [u8; 4]) -> [Poly; 4] {
    const ETA2: usize = 2;
    const BUFLEN: usize = ETA2 * N / 4;

    let mut keys: [[u8; EXTKEY_LEN]; 4] = core::array::from_fn(|i| extkey(seed, nonces[i]));
    let mut bufs = [[0u8; BUFLEN]; 4];

    {
        let [k0, k1, k2, k3] = &keys;
        let [b0, b1, b2, b3] = &mut bufs;
        shake256x4(
            [k0.as_slice(), k1.as_slice(), k2.as_slice(), k3.as_slice()],
            [
                b0.as_mut_slice(),
                b1.as_mut_slice(),
                b2.as_mut_slice(),
                b3.as_mut_slice(),
            ],
        );
    }

    let out = core::array::from_fn(|i| cbd_for_eta(ETA2, &bufs[i]));

    for k in keys.iter_mut() {
        k.zeroize();
    }
    for b in bufs.iter_mut() {
        b.zeroize();
    }
    out
}

/// Draws 2 `eta1`-CBD polynomials and 2 `eta2`-CBD polynomials in one
/// batched XOF call, encryption's `r` vector at `eta1` alongside `e1`'s
/// error terms at `eta2`. `nonces[0]` and `nonces[1]` use `eta1`;
/// `nonces[2]` and `nonces[3]` use `eta2 = 2`.
pub fn poly_getnoise_eta1122_4x(
    seed: &[u8; SYMBYTES],
    nonces: [u8; 4],
    eta1: usize,
) -> [Poly; 4] {
    const ETA2: usize = 2;
    let buflens = [eta1 * N / 4, eta1 * N / 4, ETA2 * N / 4, ETA2 * N / 4];

    let mut keys: [[u8; EXTKEY_LEN]; 4] = core::array::from_fn(|i| extkey(seed, nonces[i]));
    let mut bufs = [[0u8; MAX_BUFLEN]; 4];

    {
        let [k0, k1, k2, k3] = &keys;
        let [b0, b1, b2, b3] = &mut bufs;
        shake256x4(
            [k0.as_slice(), k1.as_slice(), k2.as_slice(), k3.as_slice()],
            [
                &mut b0[..buflens[0]],
                &mut b1[..buflens[1]],
                &mut b2[..buflens[2]],
                &mut b3[..buflens[3]],
            ],
        );
    }

    let etas = [eta1, eta1, ETA2, ETA2];
    let out = core::array::from_fn(|i| cbd_for_eta(etas[i], &bufs[i][..buflens[i]]));

    for k in keys.iter_mut() {
        k.zeroize();
    }
    for b in bufs.iter_mut() {
        b.zeroize();
    }
    out
}
