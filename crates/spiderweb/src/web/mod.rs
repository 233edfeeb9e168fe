//! Strand-network generation.
//!
//! Phases and their reseed checkpoints (all reseed to the configured seed):
//! 1. Point distribution: reseed, shuffle the objects, sample each one.
//! 2. Main strands: reseed, pair anchors; reseed, drape all main strands.
//! 3. Sub-strands: reseed, then recursive or flat rounds, draping as they go.
//!
//! The RNG is an explicit `StdRng` handle passed through every phase so the
//! checkpoints are visible at the call sites.

pub mod distribute;
pub mod main_strands;
pub mod sub_strands;

pub use distribute::{allocate_counts, build_sample_pool};
pub use main_strands::{generate_main_strands, pair_main_strands};
pub use sub_strands::{
    generate_sub_strands, grow_flat, grow_recursive, resolution_domain, sub_strand_round,
};

use rand::rngs::StdRng;
use rand::SeedableRng;

/// Retry budget for rejection sampling of a distinct partner.
pub const MAX_PAIRING_ATTEMPTS: usize = 9999;

/// RNG seeded from a user seed. Negative seeds map bitwise.
#[inline]
pub fn seeded_rng(seed: i64) -> StdRng {
    StdRng::seed_from_u64(seed as u64)
}

/// Reset `rng` to the state `seeded_rng(seed)` would produce.
#[inline]
pub fn reseed(rng: &mut StdRng, seed: i64) {
    *rng = seeded_rng(seed);
}
