use crate::config::ProblemKind;
use crate::error::{CellForgeError, CfResult};
use crate::geometry::{Coord, Grid};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    #[inline]
    pub fn bit(self) -> u32 {
        match self {
            Side::Left => 0,
            Side::Right => 1,
        }
    }
}

/// Decoded (domain) form of a genotype.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Solution {
    /// `sides[i]` is the half cell `i` sits in.
    Partition(Vec<Side>),
    /// `coords[i]` is the grid position of cell `i`.
    Placement(Vec<Coord>),
}

impl Solution {
    pub fn len(&self) -> usize {
        match self {
            Solution::Partition(sides) => sides.len(),
            Solution::Placement(coords) => coords.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Fixed-length gene sequence. Its meaning comes from the `Encoding` it is used with.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Genotype {
    genes: Vec<u32>,
}

impl Genotype {
    pub fn from_genes(genes: Vec<u32>) -> Self {
        Self { genes }
    }

    /// Builds a binary genotype from a string such as `"0110"`.
    pub fn from_bits(bits: &str) -> CfResult<Self> {
        bits.chars()
            .map(|c| match c {
                '0' => Ok(0),
                '1' => Ok(1),
                other => Err(CellForgeError::InvalidGenotype(format!(
                    "'{}' is not a bit",
                    other
                ))),
            })
            .collect::<CfResult<Vec<u32>>>()
            .map(Self::from_genes)
    }

    #[inline]
    pub fn genes(&self) -> &[u32] {
        &self.genes
    }

    #[inline]
    pub fn genes_mut(&mut self) -> &mut [u32] {
        &mut self.genes
    }

    pub fn into_genes(self) -> Vec<u32> {
        self.genes
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.genes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.genes.is_empty()
    }

    /// Number of zero and one genes.
    pub fn bit_counts(&self) -> (usize, usize) {
        let ones = self.genes.iter().filter(|&&g| g == 1).count();
        (self.genes.len() - ones, ones)
    }
}

impl fmt::Display for Genotype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, g) in self.genes.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{}", g)?;
        }
        Ok(())
    }
}

/// Selects the genotype layout and, through it, which operator variants apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Encoding {
    /// One bit per cell: the side of the bipartition.
    Binary,
    /// One distinct grid slot per cell.
    Permutation { grid: Grid },
}

impl Encoding {
    pub fn problem(&self) -> ProblemKind {
        match self {
            Encoding::Binary => ProblemKind::Partition,
            Encoding::Permutation { .. } => ProblemKind::Placement,
        }
    }

    /// Log form of a genotype: bit strings packed ("0110"), slot lists comma separated.
    pub fn render(&self, genotype: &Genotype) -> String {
        match self {
            Encoding::Binary => genotype.genes().iter().map(|g| g.to_string()).collect(),
            Encoding::Permutation { .. } => genotype.to_string(),
        }
    }

    pub fn decode(&self, genotype: &Genotype) -> CfResult<Solution> {
        match self {
            Encoding::Binary => genotype
                .genes()
                .iter()
                .map(|&g| match g {
                    0 => Ok(Side::Left),
                    1 => Ok(Side::Right),
                    other => Err(CellForgeError::InvalidGenotype(format!(
                        "binary gene has value {}",
                        other
                    ))),
                })
                .collect::<CfResult<Vec<Side>>>()
                .map(Solution::Partition),
            Encoding::Permutation { grid } => {
                check_permutation(genotype, grid)?;
                Ok(Solution::Placement(
                    genotype.genes().iter().map(|&s| grid.coord_of(s)).collect(),
                ))
            }
        }
    }

    pub fn encode(&self, solution: &Solution) -> CfResult<Genotype> {
        match (self, solution) {
            (Encoding::Binary, Solution::Partition(sides)) => Ok(Genotype::from_genes(
                sides.iter().map(|s| s.bit()).collect(),
            )),
            (Encoding::Permutation { grid }, Solution::Placement(coords)) => {
                let genes = coords
                    .iter()
                    .map(|&c| {
                        grid.slot_of(c).ok_or_else(|| {
                            CellForgeError::InvalidGenotype(format!(
                                "({}, {}) lies outside the {}x{} grid",
                                c.x, c.y, grid.rows, grid.cols
                            ))
                        })
                    })
                    .collect::<CfResult<Vec<u32>>>()?;
                let genotype = Genotype::from_genes(genes);
                check_permutation(&genotype, grid)?;
                Ok(genotype)
            }
            _ => Err(CellForgeError::InvalidGenotype(format!(
                "cannot encode a {} solution with {:?}",
                match solution {
                    Solution::Partition(_) => ProblemKind::Partition,
                    Solution::Placement(_) => ProblemKind::Placement,
                },
                self
            ))),
        }
    }

    /// Full membership check: alphabet and balance for binary, distinct in-range slots for
    /// permutations.
    pub fn check_invariant(&self, genotype: &Genotype, cells: usize) -> CfResult<()> {
        if genotype.len() != cells {
            return Err(CellForgeError::InvalidGenotype(format!(
                "genotype has {} genes for {} cells",
                genotype.len(),
                cells
            )));
        }
        match self {
            Encoding::Binary => {
                if genotype.genes().iter().any(|&g| g > 1) {
                    return Err(CellForgeError::InvalidGenotype(format!(
                        "{} is not a bit string",
                        self.render(genotype)
                    )));
                }
                let (zeros, ones) = genotype.bit_counts();
                if zeros.abs_diff(ones) > 1 {
                    return Err(CellForgeError::InvalidGenotype(format!(
                        "unbalanced partition {} ({} vs {})",
                        self.render(genotype),
                        zeros,
                        ones
                    )));
                }
                Ok(())
            }
            Encoding::Permutation { grid } => check_permutation(genotype, grid),
        }
    }
}

fn check_permutation(genotype: &Genotype, grid: &Grid) -> CfResult<()> {
    let mut used = vec![false; grid.slot_count()];
    for &slot in genotype.genes() {
        let idx = slot as usize;
        if idx >= used.len() {
            return Err(CellForgeError::InvalidGenotype(format!(
                "slot {} outside a grid of {} slots",
                slot,
                used.len()
            )));
        }
        if used[idx] {
            return Err(CellForgeError::InvalidGenotype(format!(
                "slot {} assigned twice",
                slot
            )));
        }
        used[idx] = true;
    }
    Ok(())
}
