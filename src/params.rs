//! Compile-time constants and per-level parameter sets for ML-KEM (FIPS-203).
//!
//! `N` and `Q` are fixed by the standard. `K`, `ETA1`, `ETA2`, `DU`, `DV` vary
//! by security level and are carried by the [`ParameterSet`] marker types
//! below, selected by the caller at the type level, a deployment picks
//! exactly one parameter set.

/// Ring degree: R_q = Z_q[X]/(X^256 + 1).
pub const N: usize = 256;

/// Modulus (13-bit prime).
pub const Q: i16 = 3329;

/// q^-1 mod 2^16, used by Montgomery reduction (see `arith::montgomery_reduce`).
pub const QINV: i32 = -3327;

/// R = 2^16 mod q, the Montgomery radix's residue.
pub const MONT_R: i16 = 2285;

/// R^2 mod q, used by `poly::tomont`.
pub const MONT_R2: i16 = 1353;

/// floor(2^26 / q) rounding constant used by the Kyber-style Barrett reduce.
pub const BARRETT_V: i32 = 20159;

/// f = 2^32 mod q * (N^-1 mod q) mod q, the inverse-NTT final scaling factor
/// (1441 = 128^-1 * R^2 mod q, folded into the last invntt layer upstream of
/// this crate's plain multiply-by-constant in [`crate::ntt::invntt`]).
pub const INVNTT_F: i16 = 1441;

pub const SYMBYTES: usize = 32;

/// 256 * 12 / 8.
pub const POLYBYTES: usize = 384;

/// Forward NTT twiddle factors in Montgomery form, bit-reversed layer order.
/// Lifted verbatim from the FIPS-203 reference zetas table.
pub const ZETAS: [i16; 128] = [
    -1044, -758, -359, -1517, 1493, 1422, 287, 202, -171, 622, 1577, 182, 962, -1202, -1474, 1468,
    573, -1325, 264, 383, -829, 1458, -1602, -130, -681, 1017, 732, 608, -1542, 411, -205, -1571,
    1223, 652, -552, 1015, -1293, 1491, -282, -1544, 516, -8, -320, -666, -1618, -1162, 126, 1469,
    -853, -90, -271, 830, 107, -1421, -247, -951, -398, 961, -1508, -725, 448, -1065, 677, -1275,
    -1103, 430, 555, 843, -1251, 871, 1550, 105, 422, 587, 177, -235, -291, -460, 1574, 1653, -246,
    778, 1159, -147, -777, 1483, -602, 1119, -1590, 644, -872, 349, 418, 329, -156, -75, 817, 1097,
    603, 610, 1322, -1285, -1465, 384, -1215, -136, 1218, -1335, -874, 220, -1187, -1659, -1185,
    -1530, -1278, 794, -1510, -854, -870, 478, -108, -308, 996, 991, 958, -1460, 1522, 1628,
];

/// Per-security-level constants fixed at the type level. One security level
/// is chosen per build; there is no runtime dispatch between them.
pub trait ParameterSet {
    /// Module rank: 2, 3, or 4.
    const K: usize;
    /// Noise parameter for the secret/error vectors (3 for ML-KEM-512, else 2).
    const ETA1: usize;
    /// Noise parameter for the ciphertext-side error terms (always 2).
    const ETA2: usize;
    /// Compression width for polynomial vectors (10 or 11 bits).
    const DU: usize;
    /// Compression width for the single message-carrying polynomial (4 or 5 bits).
    const DV: usize;

    /// `N/8 * ETA1`: PRF output length feeding `poly_cbd_eta1`.
    const ETA1_BUFLEN: usize = Self::ETA1 * N / 4;
    /// `N/8 * ETA2`: PRF output length feeding `poly_cbd_eta2`.
    const ETA2_BUFLEN: usize = Self::ETA2 * N / 4;
}

/// ML-KEM-512: k=2, (eta1, eta2) = (3, 2), (du, dv) = (10, 4).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MlKem512;

impl ParameterSet for MlKem512 {
    const K: usize = 2;
    const ETA1: usize = 3;
    const ETA2: usize = 2;
    const DU: usize = 10;
    const DV: usize = 4;
}

/// ML-KEM-768: k=3, (eta1, eta2) = (2, 2), (du, dv) = (10, 4).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MlKem768;

impl ParameterSet for MlKem768 {
    const K: usize = 3;
    const ETA1: usize = 2;
    const ETA2: usize = 2;
    const DU: usize = 10;
    const DV: usize = 4;
}

/// ML-KEM-1024: k=4, (eta1, eta2) = (2, 2), (du, dv) = (11, 5).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MlKem1024;

impl ParameterSet for MlKem1024 {
    const K: usize = 4;
    const ETA1: usize = 2;
    const ETA2: usize = 2;
    const DU: usize = 11;
    const DV: usize = 5;
}
