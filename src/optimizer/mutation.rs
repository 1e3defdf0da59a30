use crate::optimizer::genotype::Genotype;
use fastrand::Rng;

/// Number of mutations for this generation, uniform in `[0, len / factor]`.
#[inline]
pub fn draw_mutation_count(rng: &mut Rng, len: usize, factor: usize) -> usize {
    rng.usize(0..=len / factor)
}

/// Flips the first `m` bits.
///
/// Always the leading positions, never randomly chosen ones. Kept as is so results stay
/// comparable with earlier runs of this algorithm.
pub fn flip_prefix(child: &mut Genotype, m: usize) {
    for bit in child.genes_mut().iter_mut().take(m) {
        *bit ^= 1;
    }
}

/// Restores `|zeros - ones| <= 1` by flipping majority bits, scanning circularly from a
/// random start. Returns the number of flips made.
pub fn repair_balance(rng: &mut Rng, child: &mut Genotype) -> usize {
    let (zeros, ones) = child.bit_counts();
    if zeros.abs_diff(ones) <= 1 {
        return 0;
    }

    let majority = if zeros > ones { 0 } else { 1 };
    let needed = zeros.abs_diff(ones) / 2;
    let len = child.len();
    let genes = child.genes_mut();

    let mut idx = rng.usize(0..len);
    let mut flips = 0;
    while flips < needed {
        let pos = idx % len;
        if genes[pos] == majority {
            genes[pos] ^= 1;
            flips += 1;
        }
        idx += 1;
    }
    flips
}

pub fn mutate_partition(rng: &mut Rng, child: &mut Genotype, m: usize) {
    flip_prefix(child, m);
    repair_balance(rng, child);
}

/// Moves `m` randomly chosen cells to random free slots.
///
/// On a full grid there is no free slot, so the chosen cell swaps slots with another
/// random cell instead.
pub fn mutate_placement(rng: &mut Rng, child: &mut Genotype, m: usize, slot_count: usize) {
    let len = child.len();
    let mut used = vec![false; slot_count];
    for &s in child.genes() {
        used[s as usize] = true;
    }

    let genes = child.genes_mut();
    for _ in 0..m {
        let cell = rng.usize(0..len);

        let free: Vec<u32> = (0..slot_count as u32)
            .filter(|&s| !used[s as usize])
            .collect();

        if free.is_empty() {
            let other = rng.usize(0..len);
            genes.swap(cell, other);
            continue;
        }

        let target = free[rng.usize(0..free.len())];
        used[genes[cell] as usize] = false;
        used[target as usize] = true;
        genes[cell] = target;
    }
}
