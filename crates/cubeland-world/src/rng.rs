//! Deterministic placement hash.
//!
//! Pure function of (seed, index, salt); no hidden generator state, so the
//! same seed always scatters features at the same columns.

/// Hash a seed, a feature index and a salt into a well-mixed u32.
pub fn placement_hash(seed: u64, index: u32, salt: u32) -> u32 {
    let seed_lo = seed as u32;
    let seed_hi = (seed >> 32) as u32;
    let mut state = seed_lo
        .wrapping_mul(0x9E3779B9)
        .wrapping_add(seed_hi.wrapping_mul(0x517CC1B7))
        .wrapping_add(index.wrapping_mul(0x6C62272E))
        .wrapping_add(salt.wrapping_mul(0x2545F491));

    // PCG-style mixing rounds
    state ^= state >> 16;
    state = state.wrapping_mul(0x45D9F3B);
    state ^= state >> 16;
    state = state.wrapping_mul(0x45D9F3B);
    state ^= state >> 16;

    state
}

/// Map a hash onto `0..bound`. `bound` must be non-zero.
pub fn hash_to_range(hash: u32, bound: u32) -> u32 {
    ((hash as u64 * bound as u64) >> 32) as u32
}
