//! Main strands: random pairs of anchors from the sample pool.

use rand::rngs::StdRng;
use rand::Rng;
use tracing::debug;

use super::{reseed, MAX_PAIRING_ATTEMPTS};
use crate::drape::Drape;
use crate::error::WebError;
use crate::params::WebParams;
use crate::strand::{Strand, Vec3};

/// Pair every pool point with a random distinct partner, `iterations` times.
///
/// Returns `iterations * pool.len()` undraped strands in generation order.
pub fn pair_main_strands<R: Rng + ?Sized>(
    pool: &[Vec3],
    iterations: u32,
    rng: &mut R,
) -> Result<Vec<Strand>, WebError> {
    ensure_two_distinct(pool)?;
    let mut strands = Vec::with_capacity(pool.len() * iterations as usize);
    for _ in 0..iterations {
        for &start in pool {
            let end = draw_partner(pool, start, rng)?;
            strands.push(Strand::between(start, end));
        }
    }
    Ok(strands)
}

/// Pair, then drape. Both steps start from a fresh seed so the drape draws do
/// not depend on how many draws pairing consumed.
pub fn generate_main_strands(
    pool: &[Vec3],
    params: &WebParams,
    rng: &mut StdRng,
) -> Result<Vec<Strand>, WebError> {
    reseed(rng, params.seed);
    let mut strands = pair_main_strands(pool, params.main_iterations, rng)?;
    reseed(rng, params.seed);
    Drape::from_params(params).apply_all(&mut strands, rng);
    debug!(count = strands.len(), "main strands");
    Ok(strands)
}

fn ensure_two_distinct(pool: &[Vec3]) -> Result<(), WebError> {
    match pool.first() {
        Some(first) if pool.iter().any(|p| p != first) => Ok(()),
        _ => Err(WebError::degenerate(format!(
            "sample pool of {} point(s) has fewer than 2 distinct points",
            pool.len()
        ))),
    }
}

fn draw_partner<R: Rng + ?Sized>(pool: &[Vec3], start: Vec3, rng: &mut R) -> Result<Vec3, WebError> {
    for _ in 0..MAX_PAIRING_ATTEMPTS {
        let end = pool[rng.gen_range(0..pool.len())];
        if end != start {
            return Ok(end);
        }
    }
    Err(WebError::degenerate(format!(
        "no end point distinct from {start:?} after {MAX_PAIRING_ATTEMPTS} attempts"
    )))
}
