//! Spreading the anchor budget over the selected objects.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use tracing::debug;

use super::reseed;
use crate::error::WebError;
use crate::host::{ObjectId, PointSampler};
use crate::params::WebParams;
use crate::strand::Vec3;

/// Per-slot counts summing to `amount`.
///
/// Every slot gets `amount / slots`; the first `amount % slots` slots get one more.
pub fn allocate_counts(amount: usize, slots: usize) -> Result<Vec<usize>, WebError> {
    if slots == 0 {
        return Err(WebError::EmptyPool);
    }
    let quotient = amount / slots;
    let remainder = amount % slots;
    Ok((0..slots)
        .map(|i| if i < remainder { quotient + 1 } else { quotient })
        .collect())
}

/// Build the sample pool for `objects`.
///
/// Reseeds `rng`, shuffles the objects so the remainder lands on seed-dependent
/// objects, then concatenates each object's samples in shuffled order. Every
/// sampler call gets the same seed.
pub fn build_sample_pool<S: PointSampler + ?Sized>(
    sampler: &mut S,
    objects: &[ObjectId],
    params: &WebParams,
    rng: &mut StdRng,
) -> Result<Vec<Vec3>, WebError> {
    let counts = allocate_counts(params.amount as usize, objects.len())?;
    reseed(rng, params.seed);
    let mut order = objects.to_vec();
    order.shuffle(rng);

    let mut pool = Vec::with_capacity(params.amount as usize);
    for (object, count) in order.into_iter().zip(counts) {
        let points = sampler.sample(object, count, params.method, true, params.seed)?;
        debug!(%object, requested = count, got = points.len(), "sampled anchors");
        pool.extend(points);
    }
    Ok(pool)
}
