use crate::error::{CellForgeError, CfResult};
use crate::optimizer::population::Population;

/// Selection weights for one generation, aligned with `Population::all()`.
#[derive(Debug, Clone, PartialEq)]
pub struct FitnessTable {
    pub weights: Vec<f64>,
    pub total: f64,
    pub best_cost: u64,
    pub worst_cost: u64,
}

impl FitnessTable {
    /// `fitness = (worst - cost) + (worst - best) / 3`, with a zero result bumped to 1 so
    /// every member keeps a chance of being drawn.
    pub fn from_population(population: &Population) -> CfResult<Self> {
        let costs = population.costs()?;
        Self::from_costs(&costs)
    }

    pub fn from_costs(costs: &[u64]) -> CfResult<Self> {
        let worst = *costs.iter().max().ok_or(CellForgeError::EmptyPopulation)?;
        let best = *costs.iter().min().ok_or(CellForgeError::EmptyPopulation)?;
        let spread = (worst - best) as f64 / 3.0;

        let weights: Vec<f64> = costs
            .iter()
            .map(|&c| {
                let fit = (worst - c) as f64 + spread;
                if fit == 0.0 {
                    1.0
                } else {
                    fit
                }
            })
            .collect();
        let total = weights.iter().sum();

        Ok(Self {
            weights,
            total,
            best_cost: best,
            worst_cost: worst,
        })
    }
}
