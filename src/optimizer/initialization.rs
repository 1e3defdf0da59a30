use crate::optimizer::genotype::{Encoding, Genotype};
use crate::optimizer::mutation::repair_balance;
use fastrand::Rng;

/// Random bit string, repaired to balance.
pub fn random_partition(rng: &mut Rng, cells: usize) -> Genotype {
    let mut g = Genotype::from_genes((0..cells).map(|_| rng.u32(0..2)).collect());
    repair_balance(rng, &mut g);
    g
}

/// `cells` distinct slots drawn uniformly from `0..slot_count`.
pub fn random_placement(rng: &mut Rng, cells: usize, slot_count: usize) -> Genotype {
    let mut slots: Vec<u32> = (0..slot_count as u32).collect();
    rng.shuffle(&mut slots);
    slots.truncate(cells);
    Genotype::from_genes(slots)
}

pub fn random_genotype(rng: &mut Rng, encoding: &Encoding, cells: usize) -> Genotype {
    match encoding {
        Encoding::Binary => random_partition(rng, cells),
        Encoding::Permutation { grid } => random_placement(rng, cells, grid.slot_count()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Grid;

    #[test]
    fn test_random_members_satisfy_invariants() {
        let mut rng = Rng::with_seed(42);
        let placement = Encoding::Permutation {
            grid: Grid::new(4, 5),
        };

        for _ in 0..50 {
            let g = random_genotype(&mut rng, &Encoding::Binary, 11);
            assert!(Encoding::Binary.check_invariant(&g, 11).is_ok());

            let g = random_genotype(&mut rng, &placement, 17);
            assert!(placement.check_invariant(&g, 17).is_ok());
        }
    }
}
