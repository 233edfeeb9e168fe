//! Sub-strands anchored on points along earlier strands.
//!
//! A round looks at the resolution points of a set of strands (the dense
//! evaluation, not just the control points), picks two different strands,
//! picks a point on each and spans a draped strand between them.

use rand::rngs::StdRng;
use rand::Rng;
use rand_distr::{Distribution, Triangular};
use tracing::debug;

use super::{reseed, MAX_PAIRING_ATTEMPTS};
use crate::drape::Drape;
use crate::error::WebError;
use crate::params::WebParams;
use crate::strand::{Strand, Vec3};

/// Resolution points of every strand, in strand order.
pub fn resolution_domain(strands: &[Strand], resolution_u: u32) -> Vec<Vec<Vec3>> {
    strands
        .iter()
        .map(|s| s.resolution_points(resolution_u))
        .collect()
}

/// One round: `ceil(domain.len() / 2)` new draped strands.
///
/// Partners are chosen by index, so two sequences with equal points still
/// count as different strands.
pub fn sub_strand_round<R: Rng + ?Sized>(
    domain: &[Vec<Vec3>],
    drape: &Drape,
    rng: &mut R,
) -> Result<Vec<Strand>, WebError> {
    let passes = domain.len().div_ceil(2);
    if passes > 0 && domain.len() < 2 {
        return Err(WebError::degenerate(
            "sub-strands need at least 2 strands to anchor on",
        ));
    }
    let mut out = Vec::with_capacity(passes);
    for _ in 0..passes {
        let first = rng.gen_range(0..domain.len());
        let second = draw_other_index(domain.len(), first, rng)?;
        let start = pick_along(&domain[first], rng)?;
        let end = pick_along(&domain[second], rng)?;
        out.push(drape.apply(Strand::between(start, end), rng));
    }
    Ok(out)
}

/// Recursive growth: each round samples from every strand generated so far.
pub fn grow_recursive<R: Rng + ?Sized>(
    mut strands: Vec<Strand>,
    rounds: u32,
    resolution_u: u32,
    drape: &Drape,
    rng: &mut R,
) -> Result<Vec<Strand>, WebError> {
    for round in 0..rounds {
        let domain = resolution_domain(&strands, resolution_u);
        let new = sub_strand_round(&domain, drape, rng)?;
        debug!(round, domain = domain.len(), added = new.len(), "recursive sub-strand round");
        strands.extend(new);
    }
    Ok(strands)
}

/// Flat growth: every round samples from the main strands only.
pub fn grow_flat<R: Rng + ?Sized>(
    main: Vec<Strand>,
    rounds: u32,
    resolution_u: u32,
    drape: &Drape,
    rng: &mut R,
) -> Result<Vec<Strand>, WebError> {
    let domain = resolution_domain(&main, resolution_u);
    let mut sub = Vec::new();
    for round in 0..rounds {
        let new = sub_strand_round(&domain, drape, rng)?;
        debug!(round, added = new.len(), "flat sub-strand round");
        sub.extend(new);
    }
    let mut strands = main;
    strands.extend(sub);
    Ok(strands)
}

/// Reseed and run the configured sub-strand mode. Returns `main` untouched
/// when `sub_iterations` is 0.
pub fn generate_sub_strands(
    main: Vec<Strand>,
    params: &WebParams,
    rng: &mut StdRng,
) -> Result<Vec<Strand>, WebError> {
    reseed(rng, params.seed);
    if params.sub_iterations == 0 {
        return Ok(main);
    }
    let drape = Drape::from_params(params);
    if params.include_sub {
        grow_recursive(main, params.sub_iterations, params.resolution_u, &drape, rng)
    } else {
        grow_flat(main, params.sub_iterations, params.resolution_u, &drape, rng)
    }
}

fn draw_other_index<R: Rng + ?Sized>(len: usize, first: usize, rng: &mut R) -> Result<usize, WebError> {
    for _ in 0..MAX_PAIRING_ATTEMPTS {
        let second = rng.gen_range(0..len);
        if second != first {
            return Ok(second);
        }
    }
    Err(WebError::degenerate(format!(
        "no second strand distinct from #{first} after {MAX_PAIRING_ATTEMPTS} attempts"
    )))
}

/// Point at a triangular-distributed index in `[0, len)` with its mode at the middle.
fn pick_along<R: Rng + ?Sized>(points: &[Vec3], rng: &mut R) -> Result<Vec3, WebError> {
    if points.is_empty() {
        return Err(WebError::degenerate("strand has no resolution points"));
    }
    let len = points.len() as f64;
    let tri = Triangular::new(0.0, len, len / 2.0)
        .map_err(|e| WebError::degenerate(format!("triangular index distribution: {e}")))?;
    let idx = (tri.sample(rng) as usize).min(points.len() - 1);
    Ok(points[idx])
}
