//! Constant-time polynomial arithmetic core for ML-KEM (FIPS-203).
//!
//! Covers serialization, centered-binomial and rejection sampling, the
//! NTT/inverse-NTT, mul-cache base multiplication, and noise generation
//! over `R_q = Z_q[X]/(X^256 + 1)`. The IND-CCA KEM composition
//! (keygen/encaps/decaps) and the Keccak/SHAKE permutation's status as a
//! standalone primitive are the only pieces this crate does not own as a
//! first-class concern, `hash` wraps just enough of the latter to drive
//! and test the polynomial layer.

pub mod params;
pub mod arith;
pub mod keccak;
pub mod hash;
pub mod sample;
pub mod ntt;
pub mod poly;
pub mod polyvec;
pub mod noise;
pub mod error;
