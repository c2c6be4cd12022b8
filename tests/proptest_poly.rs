//! Property-based tests for the polynomial core. Unit tests alongside each
//! module check a handful of hand-picked cases; these drive hundreds of
//! random inputs through the same round-trip, bound, and determinism
//! contracts.

use proptest::prelude::*;

use mlkem_poly_core::arith::to_mont;
use mlkem_poly_core::noise::poly_getnoise_eta2;
use mlkem_poly_core::params::{N, Q, SYMBYTES};
use mlkem_poly_core::poly::{self, Poly};
use mlkem_poly_core::sample::{poly_cbd2, poly_cbd3, rej_uniform};

fn arb_unsigned_poly() -> impl Strategy<Item = Poly> {
    proptest::collection::vec(0i16..Q, N).prop_map(|v| {
        let mut p = [0i16; N];
        p.copy_from_slice(&v);
        p
    })
}

fn arb_signed_poly() -> impl Strategy<Item = Poly> {
    proptest::collection::vec(-(Q - 1)..Q, N).prop_map(|v| {
        let mut p = [0i16; N];
        p.copy_from_slice(&v);
        p
    })
}

fn arb_small_poly(bound: i16) -> impl Strategy<Item = Poly> {
    proptest::collection::vec(-bound..=bound, N).prop_map(|v| {
        let mut p = [0i16; N];
        p.copy_from_slice(&v);
        p
    })
}

fn arb_msg() -> impl Strategy<Item = [u8; SYMBYTES]> {
    proptest::collection::vec(any::<u8>(), SYMBYTES).prop_map(|v| {
        let mut m = [0u8; SYMBYTES];
        m.copy_from_slice(&v);
        m
    })
}

proptest! {
    /// `frombytes(tobytes(p)) == p` for unsigned-canonical p.
    #[test]
    fn tobytes_frombytes_round_trip(p in arb_unsigned_poly()) {
        let bytes = poly::tobytes(&p);
        let back = poly::frombytes(&bytes);
        prop_assert_eq!(back, p);
    }

    /// Compress/decompress error is bounded by ceil(q / 2^(d+1)).
    #[test]
    fn compress_d4_bounded_error(p in arb_unsigned_poly()) {
        let bytes = poly::compress_d4(&p);
        let back = poly::decompress_d4(&bytes);
        for i in 0..N {
            let err = (p[i] as i32 - back[i] as i32).rem_euclid(Q as i32);
            let err = err.min(Q as i32 - err);
            prop_assert!(err <= Q as i32 / (2 * 16) + 1, "coeff {i}: {} -> {}", p[i], back[i]);
        }
    }

    #[test]
    fn compress_d5_bounded_error(p in arb_unsigned_poly()) {
        let bytes = poly::compress_d5(&p);
        let back = poly::decompress_d5(&bytes);
        for i in 0..N {
            let err = (p[i] as i32 - back[i] as i32).rem_euclid(Q as i32);
            let err = err.min(Q as i32 - err);
            prop_assert!(err <= Q as i32 / (2 * 32) + 1, "coeff {i}: {} -> {}", p[i], back[i]);
        }
    }

    #[test]
    fn compress_d10_bounded_error(p in arb_unsigned_poly()) {
        let bytes = poly::compress_d10(&p);
        let back = poly::decompress_d10(&bytes);
        for i in 0..N {
            let err = (p[i] as i32 - back[i] as i32).rem_euclid(Q as i32);
            let err = err.min(Q as i32 - err);
            prop_assert!(err <= Q as i32 / (2 * 1024) + 1, "coeff {i}: {} -> {}", p[i], back[i]);
        }
    }

    #[test]
    fn compress_d11_bounded_error(p in arb_unsigned_poly()) {
        let bytes = poly::compress_d11(&p);
        let back = poly::decompress_d11(&bytes);
        for i in 0..N {
            let err = (p[i] as i32 - back[i] as i32).rem_euclid(Q as i32);
            let err = err.min(Q as i32 - err);
            prop_assert!(err <= Q as i32 / (2 * 2048) + 1, "coeff {i}: {} -> {}", p[i], back[i]);
        }
    }

    /// `tomsg(frommsg(m)) == m` for every 32-byte message.
    #[test]
    fn frommsg_tomsg_round_trip(msg in arb_msg()) {
        let p = poly::frommsg(&msg);
        let back = poly::tomsg(&p);
        prop_assert_eq!(back, msg);
    }

    /// invntt(ntt(p)) leaves exactly one surviving Montgomery factor of R,
    /// i.e. is congruent to `to_mont(p)` coefficient-wise.
    #[test]
    fn ntt_invntt_round_trip_is_montgomery_scaled(p in arb_signed_poly()) {
        let mut q = p;
        poly::ntt(&mut q);
        poly::invntt(&mut q);
        for i in 0..N {
            let want = to_mont(p[i]) as i32;
            let diff = (q[i] as i32 - want).rem_euclid(Q as i32);
            prop_assert_eq!(diff, 0, "mismatch at {i}: got {} want {}", q[i], want);
        }
    }

    /// add/sub perform no modular reduction, exact in Z as long as the
    /// sum stays within i16, which a +/-1000 bound guarantees.
    #[test]
    fn add_sub_are_exact_with_no_reduction(
        a in arb_small_poly(1000),
        b in arb_small_poly(1000),
    ) {
        let summed = poly::add(&a, &b);
        for i in 0..N {
            prop_assert_eq!(summed[i] as i32, a[i] as i32 + b[i] as i32);
        }
        let back = poly::sub(&summed, &b);
        prop_assert_eq!(back, a);
    }

    /// CBD(eta=2) coefficients always land in [-2, 2] regardless of the
    /// input byte pattern.
    #[test]
    fn cbd2_support_is_bounded(buf in proptest::collection::vec(any::<u8>(), 2 * N / 4)) {
        let mut out = [0i16; N];
        poly_cbd2(&buf, &mut out);
        for &c in out.iter() {
            prop_assert!((-2..=2).contains(&c));
        }
    }

    /// CBD(eta=3) coefficients always land in [-3, 3] regardless of the
    /// input byte pattern.
    #[test]
    fn cbd3_support_is_bounded(buf in proptest::collection::vec(any::<u8>(), 3 * N / 4)) {
        let mut out = [0i16; N];
        poly_cbd3(&buf, &mut out);
        for &c in out.iter() {
            prop_assert!((-3..=3).contains(&c));
        }
    }

    /// Every accepted rej_uniform coefficient is in [0, q), whatever
    /// random byte stream it is fed.
    #[test]
    fn rej_uniform_output_is_always_canonical(
        buf in proptest::collection::vec(any::<u8>(), 0..600),
    ) {
        let mut out = [0i16; N];
        let n = rej_uniform(&buf, &mut out);
        for &c in &out[..n] {
            prop_assert!(c >= 0 && c < Q);
        }
    }

    /// Noise draws for a given seed are a pure function of (seed, nonce):
    /// calling twice with the same inputs reproduces the same polynomial.
    #[test]
    fn noise_eta2_is_deterministic_in_seed_and_nonce(
        seed in proptest::collection::vec(any::<u8>(), SYMBYTES),
        nonce in any::<u8>(),
    ) {
        let mut s = [0u8; SYMBYTES];
        s.copy_from_slice(&seed);
        let a = poly_getnoise_eta2(&s, nonce);
        let b = poly_getnoise_eta2(&s, nonce);
        prop_assert_eq!(a, b);
    }
}
