//! Deterministic RNG using PCG32 with BLAKE3 seed derivation.
//!
//! All noise in the synthesis bank flows through this module. Each event
//! gets an independent stream derived from the track seed and the event's
//! position, so inserting or removing one event never shifts the texture of
//! the others.

use rand::SeedableRng;
use rand_pcg::Pcg32;

/// Creates a PCG32 RNG from a 32-bit seed.
///
/// The 32-bit seed is expanded to 64 bits by duplicating the value in both
/// halves, as required by PCG32's state initialization.
pub fn create_rng(seed: u32) -> Pcg32 {
    let seed64 = (seed as u64) | ((seed as u64) << 32);
    Pcg32::seed_from_u64(seed64)
}

/// Derives an independent seed for one event from the track seed.
///
/// Hashes the track seed concatenated with the event index using BLAKE3 and
/// truncates to 32 bits.
pub fn derive_event_seed(track_seed: u32, event_index: u32) -> u32 {
    let mut input = Vec::with_capacity(8);
    input.extend_from_slice(&track_seed.to_le_bytes());
    input.extend_from_slice(&event_index.to_le_bytes());

    let hash = blake3::hash(&input);
    let bytes: [u8; 4] = hash.as_bytes()[0..4].try_into().expect("hash is 32 bytes");
    u32::from_le_bytes(bytes)
}

/// Creates the RNG for one event.
pub fn create_event_rng(track_seed: u32, event_index: u32) -> Pcg32 {
    create_rng(derive_event_seed(track_seed, event_index))
}
