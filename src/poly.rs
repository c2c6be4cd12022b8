//! Single-polynomial operations over `R_q`: arithmetic, transforms,
//! serialization, compression, and message (en/de)coding.
//!
//! The compression bit-width is fixed by the caller (`compress_d4` for
//! a `dv = 4` ciphertext component, `compress_d11` for a `du = 11`
//! component, etc.) rather than threaded through a const generic: a
//! `du`/`dv`-generic byte array needs `generic_const_exprs`, which is
//! unstable, so the four widths each get their own named function and
//! [`crate::polyvec`] picks among them per [`crate::params::ParameterSet`].

use crate::arith::{
    scalar_compress_q_16, scalar_compress_q_1024, scalar_compress_q_2048, scalar_compress_q_32,
    scalar_decompress_q_16, scalar_decompress_q_1024, scalar_decompress_q_2048,
    scalar_decompress_q_32, signed_to_unsigned_q, to_mont,
};
use crate::error::debug_check_bound;
use crate::ntt;
use crate::params::{N, POLYBYTES, Q, SYMBYTES};

/// A single degree-255 polynomial over `Z_q`. No invariant is attached to
/// the type itself, whether coefficients are signed-canonical, unsigned
/// [0, q), or carry a Montgomery factor depends on which operations have
/// been applied.
pub type Poly = [i16; N];

pub fn zero() -> Poly {
    [0i16; N]
}

pub fn add(a: &Poly, b: &Poly) -> Poly {
    let mut r = zero();
    for i in 0..N {
        r[i] = crate::arith::add(a[i], b[i]);
    }
    r
}

pub fn sub(a: &Poly, b: &Poly) -> Poly {
    let mut r = zero();
    for i in 0..N {
        r[i] = crate::arith::sub(a[i], b[i]);
    }
    r
}

/// Barrett-reduces every coefficient to the signed-canonical range `|c| <= q`.
pub fn reduce(p: &mut Poly) {
    for c in p.iter_mut() {
        *c = crate::arith::barrett_reduce(*c);
    }
}

/// Converts every coefficient into Montgomery form (`c * R mod q`).
pub fn tomont(p: &mut Poly) {
    for c in p.iter_mut() {
        *c = to_mont(*c);
    }
}

/// Forward NTT in place.
pub fn ntt(p: &mut Poly) {
    ntt::ntt(p);
}

/// Inverse NTT in place. See [`crate::ntt::invntt`] for the
/// residual Montgomery factor this leaves behind.
pub fn invntt(p: &mut Poly) {
    ntt::invntt(p);
}

/// Precomputes `b`'s mul-cache for repeated `basemul_montgomery_cached`
/// calls against the same `b`.
pub fn mulcache_compute(p: &Poly) -> [i16; N / 2] {
    ntt::mulcache_compute(p)
}

/// NTT-domain base multiplication using a precomputed mul-cache for `b`.
pub fn basemul_montgomery_cached(a: &Poly, b: &Poly, b_cache: &[i16; N / 2]) -> Poly {
    ntt::basemul_cached(a, b, b_cache)
}

/// Serializes 256 coefficients into 384 bytes, 12 bits each, little-endian
/// within each pair. Callers pass coefficients already brought to unsigned
/// canonical form (this only flips the sign of negative inputs, it does
/// not reduce anything `>= q`).
pub fn tobytes(p: &Poly) -> [u8; POLYBYTES] {
    debug_assert!(debug_check_bound(p, -(Q as i32 - 1), Q as i32 - 1).is_ok());
    let mut r = [0u8; POLYBYTES];
    for i in 0..(N / 2) {
        let t0 = signed_to_unsigned_q(p[2 * i]) as u16;
        let t1 = signed_to_unsigned_q(p[2 * i + 1]) as u16;
        r[3 * i] = (t0 & 0xFF) as u8;
        r[3 * i + 1] = ((t0 >> 8) | (t1 << 4)) as u8;
        r[3 * i + 2] = (t1 >> 4) as u8;
    }
    r
}

/// Deserializes 384 bytes into 256 coefficients, 12 bits each. Coefficients
/// land in `[0, 4096)`, *not* reduced mod q: a malformed or adversarial
/// encoding can carry values in `[q, 4096)`, and this function leaves them
/// as-is rather than silently reducing them. Callers that need a
/// canonical result call [`reduce`] afterwards.
pub fn frombytes(bytes: &[u8; POLYBYTES]) -> Poly {
    let mut p = zero();
    for i in 0..(N / 2) {
        let b0 = bytes[3 * i] as u16;
        let b1 = bytes[3 * i + 1] as u16;
        let b2 = bytes[3 * i + 2] as u16;
        p[2 * i] = (b0 | ((b1 & 0x0F) << 8)) as i16;
        p[2 * i + 1] = ((b1 >> 4) | (b2 << 4)) as i16;
    }
    debug_assert!(debug_check_bound(&p, 0, 4095).is_ok());
    p
}

/// Compresses to 4 bits/coefficient, 128 bytes total (`dv = 4`).
pub fn compress_d4(p: &Poly) -> [u8; 128] {
    debug_assert!(debug_check_bound(p, -(Q as i32 - 1), Q as i32 - 1).is_ok());
    let mut r = [0u8; 128];
    let mut t = [0u8; 8];
    for i in 0..(N / 8) {
        for j in 0..8 {
            let u = signed_to_unsigned_q(p[8 * i + j]);
            t[j] = scalar_compress_q_16(u);
        }
        r[4 * i] = t[0] | (t[1] << 4);
        r[4 * i + 1] = t[2] | (t[3] << 4);
        r[4 * i + 2] = t[4] | (t[5] << 4);
        r[4 * i + 3] = t[6] | (t[7] << 4);
    }
    r
}

pub fn decompress_d4(bytes: &[u8; 128]) -> Poly {
    let mut p = zero();
    for i in 0..128 {
        p[2 * i] = scalar_decompress_q_16(bytes[i] & 0x0F);
        p[2 * i + 1] = scalar_decompress_q_16(bytes[i] >> 4);
    }
    p
}

/// Compresses to 5 bits/coefficient, 160 bytes total (`dv = 5`).
pub fn compress_d5(p: &Poly) -> [u8; 160] {
    debug_assert!(debug_check_bound(p, -(Q as i32 - 1), Q as i32 - 1).is_ok());
    let mut r = [0u8; 160];
    let mut t = [0u8; 8];
    for i in 0..(N / 8) {
        for j in 0..8 {
            let u = signed_to_unsigned_q(p[8 * i + j]);
            t[j] = scalar_compress_q_32(u);
        }
        r[5 * i] = t[0] | (t[1] << 5);
        r[5 * i + 1] = (t[1] >> 3) | (t[2] << 2) | (t[3] << 7);
        r[5 * i + 2] = (t[3] >> 1) | (t[4] << 4);
        r[5 * i + 3] = (t[4] >> 4) | (t[5] << 1) | (t[6] << 6);
        r[5 * i + 4] = (t[6] >> 2) | (t[7] << 3);
    }
    r
}

pub fn decompress_d5(bytes: &[u8; 160]) -> Poly {
    let mut p = zero();
    for i in 0..(N / 8) {
        let b = &bytes[5 * i..5 * i + 5];
        let t0 = b[0] & 0x1F;
        let t1 = ((b[0] >> 5) | (b[1] << 3)) & 0x1F;
        let t2 = (b[1] >> 2) & 0x1F;
        let t3 = ((b[1] >> 7) | (b[2] << 1)) & 0x1F;
        let t4 = ((b[2] >> 4) | (b[3] << 4)) & 0x1F;
        let t5 = (b[3] >> 1) & 0x1F;
        let t6 = ((b[3] >> 6) | (b[4] << 2)) & 0x1F;
        let t7 = (b[4] >> 3) & 0x1F;
        for (j, t) in [t0, t1, t2, t3, t4, t5, t6, t7].into_iter().enumerate() {
            p[8 * i + j] = scalar_decompress_q_32(t);
        }
    }
    p
}

/// Compresses to 10 bits/coefficient, 320 bytes total (`du = 10`).
pub fn compress_d10(p: &Poly) -> [u8; 320] {
    debug_assert!(debug_check_bound(p, -(Q as i32 - 1), Q as i32 - 1).is_ok());
    let mut r = [0u8; 320];
    let mut t = [0u16; 4];
    for i in 0..(N / 4) {
        for j in 0..4 {
            let u = signed_to_unsigned_q(p[4 * i + j]);
            t[j] = scalar_compress_q_1024(u);
        }
        r[5 * i] = (t[0] & 0xFF) as u8;
        r[5 * i + 1] = ((t[0] >> 8) | (t[1] << 2)) as u8;
        r[5 * i + 2] = ((t[1] >> 6) | (t[2] << 4)) as u8;
        r[5 * i + 3] = ((t[2] >> 4) | (t[3] << 6)) as u8;
        r[5 * i + 4] = (t[3] >> 2) as u8;
    }
    r
}

pub fn decompress_d10(bytes: &[u8; 320]) -> Poly {
    let mut p = zero();
    for i in 0..(N / 4) {
        let b0 = bytes[5 * i] as u16;
        let b1 = bytes[5 * i + 1] as u16;
        let b2 = bytes[5 * i + 2] as u16;
        let b3 = bytes[5 * i + 3] as u16;
        let b4 = bytes[5 * i + 4] as u16;
        let t0 = b0 | ((b1 & 0x03) << 8);
        let t1 = (b1 >> 2) | ((b2 & 0x0F) << 6);
        let t2 = (b2 >> 4) | ((b3 & 0x3F) << 4);
        let t3 = (b3 >> 6) | (b4 << 2);
        for (j, t) in [t0, t1, t2, t3].into_iter().enumerate() {
            p[4 * i + j] = scalar_decompress_q_1024(t & 0x03FF);
        }
    }
    p
}

/// Compresses to 11 bits/coefficient, 352 bytes total (`du = 11`).
pub fn compress_d11(p: &Poly) -> [u8; 352] {
    debug_assert!(debug_check_bound(p, -(Q as i32 - 1), Q as i32 - 1).is_ok());
    let mut r = [0u8; 352];
    let mut t = [0u16; 8];
    for i in 0..(N / 8) {
        for j in 0..8 {
            let u = signed_to_unsigned_q(p[8 * i + j]);
            t[j] = scalar_compress_q_2048(u);
        }
        r[11 * i] = t[0] as u8;
        r[11 * i + 1] = ((t[0] >> 8) | (t[1] << 3)) as u8;
        r[11 * i + 2] = ((t[1] >> 5) | (t[2] << 6)) as u8;
        r[11 * i + 3] = (t[2] >> 2) as u8;
        r[11 * i + 4] = ((t[2] >> 10) | (t[3] << 1)) as u8;
        r[11 * i + 5] = ((t[3] >> 7) | (t[4] << 4)) as u8;
        r[11 * i + 6] = ((t[4] >> 4) | (t[5] << 7)) as u8;
        r[11 * i + 7] = (t[5] >> 1) as u8;
        r[11 * i + 8] = ((t[5] >> 9) | (t[6] << 2)) as u8;
        r[11 * i + 9] = ((t[6] >> 6) | (t[7] << 5)) as u8;
        r[11 * i + 10] = (t[7] >> 3) as u8;
    }
    r
}

pub fn decompress_d11(bytes: &[u8; 352]) -> Poly {
    let mut p = zero();
    for i in 0..(N / 8) {
        let b: [u16; 11] = core::array::from_fn(|k| bytes[11 * i + k] as u16);
        let t0 = b[0] | ((b[1] & 0x07) << 8);
        let t1 = (b[1] >> 3) | ((b[2] & 0x3F) << 5);
        let t2 = (b[2] >> 6) | (b[3] << 2) | ((b[4] & 0x01) << 10);
        let t3 = (b[4] >> 1) | ((b[5] & 0x0F) << 7);
        let t4 = (b[5] >> 4) | ((b[6] & 0x7F) << 4);
        let t5 = (b[6] >> 7) | (b[7] << 1) | ((b[8] & 0x03) << 9);
        let t6 = (b[8] >> 2) | ((b[9] & 0x1F) << 6);
        let t7 = (b[9] >> 5) | (b[10] << 3);
        for (j, t) in [t0, t1, t2, t3, t4, t5, t6, t7].into_iter().enumerate() {
            p[8 * i + j] = scalar_decompress_q_2048(t & 0x07FF);
        }
    }
    p
}

/// Decodes a 32-byte message into a polynomial whose coefficients are each
/// `0` or `(q+1)/2`, one coefficient per bit.
pub fn frommsg(msg: &[u8; SYMBYTES]) -> Poly {
    let mut p = zero();
    for i in 0..SYMBYTES {
        for j in 0..8 {
            let bit = (msg[i] >> j) & 1;
            let mask = (bit as i16).wrapping_neg();
            p[8 * i + j] = mask & ((Q + 1) / 2);
        }
    }
    p
}

/// Encodes a polynomial back to a 32-byte message: bit `j` of byte `i` is 1
/// iff `round(2 * coeff / q) mod 2 == 1`, computed via the same
/// magic-multiplier trick as [`crate::arith::scalar_compress_q_16`] with a
/// 1-bit target width.
pub fn tomsg(p: &Poly) -> [u8; SYMBYTES] {
    debug_assert!(debug_check_bound(p, -(Q as i32 - 1), Q as i32 - 1).is_ok());
    const MAGIC: u32 = (1u32 << 28) / (Q as u32);
    let mut msg = [0u8; SYMBYTES];
    for i in 0..SYMBYTES {
        let mut byte = 0u8;
        for j in 0..8 {
            let u = signed_to_unsigned_q(p[8 * i + j]);
            let num = ((u as u32) << 1) + (Q as u32) / 2;
            let bit = (((num as u64) * (MAGIC as u64)) >> 28) as u8 & 1;
            byte |= bit << j;
        }
        msg[i] = byte;
    }
    msg
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ramp() -> Poly {
        let mut p = zero();
        for i in 0..N {
            p[i] = ((i as i16) * 11 - 1500).rem_euclid(Q);
        }
        p
    }

    #[test]
    fn tobytes_frombytes_round_trip() {
        let p = ramp();
        let bytes = tobytes(&p);
        let back = frombytes(&bytes);
        assert_eq!(back, p);
    }

    /// `tobytes` of the sequential polynomial (0, 1, 2, ...) packs
    /// little-endian 12-bit pairs into 3-byte groups.
    #[test]
    fn tobytes_matches_known_answer_for_sequential_coefficients() {
        let mut p = zero();
        for i in 0..N {
            p[i] = i as i16;
        }
        let bytes = tobytes(&p);
        let expected = hex::decode("001000023000045000").unwrap();
        assert_eq!(&bytes[..expected.len()], expected.as_slice());
    }

    /// A message with only the first byte's bits set maps coefficients
    /// 0..7 to `(q+1)/2` and the rest to 0.
    #[test]
    fn frommsg_matches_known_answer_for_single_set_byte() {
        let mut msg = [0u8; SYMBYTES];
        msg[0] = 0xFF;
        let p = frommsg(&msg);
        for c in p[..8].iter() {
            assert_eq!(*c, (Q + 1) / 2);
        }
        for c in p[8..].iter() {
            assert_eq!(*c, 0);
        }
    }

    #[test]
    fn compress_d4_round_trip_within_tolerance() {
        let p = ramp();
        let bytes = compress_d4(&p);
        let back = decompress_d4(&bytes);
        for i in 0..N {
            let orig = signed_to_unsigned_q(p[i]) as i32;
            let got = back[i] as i32;
            let err = (orig - got).rem_euclid(Q as i32);
            let err = err.min(Q as i32 - err);
            assert!(err <= Q as i32 / (2 * 16) + 1, "coeff {i}: {orig} -> {got}");
        }
    }

    #[test]
    fn compress_d5_round_trip_within_tolerance() {
        let p = ramp();
        let bytes = compress_d5(&p);
        let back = decompress_d5(&bytes);
        for i in 0..N {
            let orig = signed_to_unsigned_q(p[i]) as i32;
            let got = back[i] as i32;
            let err = (orig - got).rem_euclid(Q as i32);
            let err = err.min(Q as i32 - err);
            assert!(err <= Q as i32 / (2 * 32) + 1, "coeff {i}: {orig} -> {got}");
        }
    }

    #[test]
    fn compress_d10_round_trip_within_tolerance() {
        let p = ramp();
        let bytes = compress_d10(&p);
        let back = decompress_d10(&bytes);
        for i in 0..N {
            let orig = signed_to_unsigned_q(p[i]) as i32;
            let got = back[i] as i32;
            let err = (orig - got).rem_euclid(Q as i32);
            let err = err.min(Q as i32 - err);
            assert!(err <= Q as i32 / (2 * 1024) + 1, "coeff {i}: {orig} -> {got}");
        }
    }

    #[test]
    fn compress_d11_round_trip_within_tolerance() {
        let p = ramp();
        let bytes = compress_d11(&p);
        let back = decompress_d11(&bytes);
        for i in 0..N {
            let orig = signed_to_unsigned_q(p[i]) as i32;
            let got = back[i] as i32;
            let err = (orig - got).rem_euclid(Q as i32);
            let err = err.min(Q as i32 - err);
            assert!(err <= Q as i32 / (2 * 2048) + 1, "coeff {i}: {orig} -> {got}");
        }
    }

    #[test]
    fn frommsg_tomsg_round_trip() {
        let mut msg = [0u8; SYMBYTES];
        for (i, b) in msg.iter_mut().enumerate() {
            *b = (i as u8).wrapping_mul(73) ^ 0x5A;
        }
        let p = frommsg(&msg);
        let back = tomsg(&p);
        assert_eq!(back, msg);
    }

    #[test]
    fn frommsg_produces_only_zero_or_half_q() {
        let msg = [0xA5u8; SYMBYTES];
        let p = frommsg(&msg);
        for c in p.iter() {
            assert!(*c == 0 || *c == (Q + 1) / 2);
        }
    }

    #[test]
    fn add_sub_are_inverse_with_no_reduction() {
        let a = ramp();
        let mut b = zero();
        for i in 0..N {
            b[i] = (i as i16) - 7;
        }
        let summed = add(&a, &b);
        let back = sub(&summed, &b);
        assert_eq!(back, a);
    }

    #[test]
    fn mulcache_basemul_matches_uncached_path() {
        let mut a = zero();
        let mut b = zero();
        for i in 0..N {
            a[i] = ((i as i16) * 3 - 50) % Q;
            b[i] = ((i as i16) * 17 + 9) % Q;
        }
        let cache = mulcache_compute(&b);
        let via_cache = basemul_montgomery_cached(&a, &b, &cache);
        let direct = ntt::basemul_montgomery(&a, &b);
        assert_eq!(via_cache, direct);
    }
}
