use crate::optimizer::genotype::Genotype;
use fastrand::Rng;

/// Random split point in `[1, len - 1]`.
#[inline]
pub fn draw_split(rng: &mut Rng, len: usize) -> usize {
    rng.usize(1..len)
}

/// Single-point crossover for bit strings.
///
/// The first child is `p1[..split] ++ p2[split..]`; the second takes the complemented
/// tail of `p2` instead, i.e. the mirror image of the same recombination.
pub fn crossover_partition_at(p1: &Genotype, p2: &Genotype, split: usize) -> (Genotype, Genotype) {
    debug_assert_eq!(p1.len(), p2.len());

    let head = &p1.genes()[..split];
    let tail = &p2.genes()[split..];

    let mut direct = Vec::with_capacity(p1.len());
    direct.extend_from_slice(head);
    direct.extend_from_slice(tail);

    let mut mirrored = Vec::with_capacity(p1.len());
    mirrored.extend_from_slice(head);
    mirrored.extend(tail.iter().map(|&b| b ^ 1));

    (Genotype::from_genes(direct), Genotype::from_genes(mirrored))
}

pub fn crossover_partition(rng: &mut Rng, p1: &Genotype, p2: &Genotype) -> (Genotype, Genotype) {
    let split = draw_split(rng, p1.len());
    crossover_partition_at(p1, p2, split)
}

/// Order-preserving crossover for slot permutations.
///
/// Keeps `p1[..split]`, then for each later index takes `p2[i]` if that slot is still free,
/// else `p1[i]` if free, else a uniformly random free slot. The child never repeats a slot.
pub fn crossover_placement_at(
    rng: &mut Rng,
    p1: &Genotype,
    p2: &Genotype,
    split: usize,
    slot_count: usize,
) -> Genotype {
    let len = p1.len();
    let mut used = vec![false; slot_count];
    let mut child = Vec::with_capacity(len);

    for &slot in &p1.genes()[..split] {
        used[slot as usize] = true;
        child.push(slot);
    }

    for i in split..len {
        let from_p2 = p2.genes()[i];
        let from_p1 = p1.genes()[i];

        let slot = if !used[from_p2 as usize] {
            from_p2
        } else if !used[from_p1 as usize] {
            from_p1
        } else {
            let free: Vec<u32> = (0..slot_count as u32)
                .filter(|&s| !used[s as usize])
                .collect();
            free[rng.usize(0..free.len())]
        };

        used[slot as usize] = true;
        child.push(slot);
    }

    assert_eq!(
        used.iter().filter(|&&u| u).count(),
        len,
        "placement crossover produced a duplicate slot"
    );

    Genotype::from_genes(child)
}

pub fn crossover_placement(
    rng: &mut Rng,
    p1: &Genotype,
    p2: &Genotype,
    slot_count: usize,
) -> Genotype {
    let split = draw_split(rng, p1.len());
    crossover_placement_at(rng, p1, p2, split, slot_count)
}
