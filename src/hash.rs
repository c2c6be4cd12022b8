//! The SHAKE oracle the core calls into. This module is deliberately thin:
//! incremental SHAKE-128 (`shake128_absorb`/`shake128_squeezeblocks`),
//! one-shot SHAKE-256, and a 4-way batched SHAKE-256 (`shake256x4`), just
//! enough surface to drive rejection sampling and noise generation and to
//! exercise them in tests.
//!
//! `shake256x4` is a pure data-parallel primitive: four independent sponges
//! driven in lock-step, each absorbing its own input and squeezing its own
//! output length, mathematically identical to four sequential `shake256`
//! calls.

use crate::keccak::keccak_f1600;

const SHAKE128_RATE: usize = 168;
const SHAKE256_RATE: usize = 136;

/// Incremental sponge state for the 168-byte-rate SHAKE-128 stream used by
/// rejection sampling (absorbing `rho || i || j`).
pub struct KeccakState {
    lanes: [u64; 25],
    buf: [u8; SHAKE128_RATE],
    pos: usize,
}

impl Default for KeccakState {
    fn default() -> Self {
        Self {
            lanes: [0u64; 25],
            buf: [0u8; SHAKE128_RATE],
            pos: SHAKE128_RATE,
        }
    }
}

fn xor_bytes_into_lanes(lanes: &mut [u64; 25], block: &[u8]) {
    for (i, chunk) in block.chunks(8).enumerate() {
        let mut lane = 0u64;
        for (b, &byte) in chunk.iter().enumerate() {
            lane |= (byte as u64) << (8 * b);
        }
        lanes[i] ^= lane;
    }
}

fn squeeze_lanes_into(lanes: &[u64; 25], out: &mut [u8]) {
    for (i, slot) in out.iter_mut().enumerate() {
        let lane = lanes[i / 8];
        *slot = ((lane >> (8 * (i % 8))) & 0xFF) as u8;
    }
}

/// Absorbs `input` into `state` with SHAKE-128 padding (domain byte `0x1F`),
/// leaving `state` ready for [`shake128_squeezeblocks`].
pub fn shake128_absorb(state: &mut KeccakState, input: &[u8]) {
    state.lanes = [0u64; 25];
    let mut off = 0usize;
    while input.len() - off >= SHAKE128_RATE {
        xor_bytes_into_lanes(&mut state.lanes, &input[off..off + SHAKE128_RATE]);
        keccak_f1600(&mut state.lanes);
        off += SHAKE128_RATE;
    }

    let mut block = [0u8; SHAKE128_RATE];
    let rem = input.len() - off;
    block[..rem].copy_from_slice(&input[off..]);
    block[rem] ^= 0x1F;
    block[SHAKE128_RATE - 1] ^= 0x80;

    xor_bytes_into_lanes(&mut state.lanes, &block);
    state.pos = SHAKE128_RATE;
}

/// Squeezes `nblocks` rate-sized (168-byte) blocks out of `state` into
/// `out`, which must be exactly `nblocks * 168` bytes.
pub fn shake128_squeezeblocks(state: &mut KeccakState, out: &mut [u8], nblocks: usize) {
    debug_assert_eq!(out.len(), nblocks * SHAKE128_RATE);
    for block in out.chunks_mut(SHAKE128_RATE) {
        keccak_f1600(&mut state.lanes);
        squeeze_lanes_into(&state.lanes, block);
    }
    state.pos = SHAKE128_RATE;
}

fn shake256_absorb_lanes(input: &[u8]) -> [u64; 25] {
    let mut lanes = [0u64; 25];
    let mut off = 0usize;
    while input.len() - off >= SHAKE256_RATE {
        xor_bytes_into_lanes(&mut lanes, &input[off..off + SHAKE256_RATE]);
        keccak_f1600(&mut lanes);
        off += SHAKE256_RATE;
    }

    let mut block = [0u8; SHAKE256_RATE];
    let rem = input.len() - off;
    block[..rem].copy_from_slice(&input[off..]);
    block[rem] ^= 0x1F;
    block[SHAKE256_RATE - 1] ^= 0x80;

    xor_bytes_into_lanes(&mut lanes, &block);
    lanes
}

/// One-shot SHAKE-256: absorbs `input`, squeezes exactly `out.len()` bytes.
pub fn shake256(input: &[u8], out: &mut [u8]) {
    let mut lanes = shake256_absorb_lanes(input);
    let mut produced = 0usize;
    while produced < out.len() {
        keccak_f1600(&mut lanes);
        let take = (out.len() - produced).min(SHAKE256_RATE);
        squeeze_lanes_into(&lanes, &mut out[produced..produced + take]);
        produced += take;
    }
}

/// Four independent SHAKE-256 streams driven in lock-step: absorbs each of
/// `inputs[i]` and squeezes `outputs[i].len()` bytes into it. Each lane is
/// mathematically identical to calling [`shake256`] on that lane alone;
/// batching only changes the call shape, not the output.
pub fn shake256x4(inputs: [&[u8]; 4], outputs: [&mut [u8]; 4]) {
    let mut lanes: [[u64; 25]; 4] = core::array::from_fn(|i| shake256_absorb_lanes(inputs[i]));
    let mut produced = [0usize; 4];
    let [o0, o1, o2, o3] = outputs;
    let mut outs: [&mut [u8]; 4] = [o0, o1, o2, o3];

    loop {
        let mut any_remaining = false;
        for lane in 0..4 {
            if produced[lane] < outs[lane].len() {
                any_remaining = true;
                keccak_f1600(&mut lanes[lane]);
                let take = (outs[lane].len() - produced[lane]).min(SHAKE256_RATE);
                let start = produced[lane];
                squeeze_lanes_into(&lanes[lane], &mut outs[lane][start..start + take]);
                produced[lane] += take;
            }
        }
        if !any_remaining {
            break;
        }
    }
}
