use crate::optimizer::fitness::FitnessTable;
use crate::optimizer::genotype::Genotype;
use crate::optimizer::population::Population;
use fastrand::Rng;

/// Roulette-wheel draw over `weights`. Returns an index.
#[inline]
pub fn pick_weighted_index(rng: &mut Rng, weights: &[f64], total: f64) -> usize {
    let target = rng.f64() * total;
    let mut current = 0.0;

    for (i, &w) in weights.iter().enumerate() {
        current += w;
        if current >= target {
            return i;
        }
    }
    // Float rounding can leave the target just past the last bucket
    weights.len() - 1
}

/// Draws two parents with probability proportional to fitness.
///
/// The second parent is redrawn until it differs from the first, unless every member of
/// the population is the same genotype.
pub fn select_parents<'a>(
    rng: &mut Rng,
    population: &'a Population,
    fitness: &FitnessTable,
) -> (&'a Genotype, &'a Genotype) {
    let members = population.all();
    let first = &members[pick_weighted_index(rng, &fitness.weights, fitness.total)];
    let mut second = &members[pick_weighted_index(rng, &fitness.weights, fitness.total)];

    if population.distinct() > 1 {
        while second == first {
            second = &members[pick_weighted_index(rng, &fitness.weights, fitness.total)];
        }
    }

    (first, second)
}
