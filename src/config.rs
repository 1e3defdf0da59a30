use crate::error::CfResult;
use clap::Args;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use strum_macros::{Display, EnumIter, EnumString};

#[derive(
    Debug, Clone, Copy, EnumIter, EnumString, Display, PartialEq, Eq, Hash, Serialize, Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ProblemKind {
    Partition,
    Placement,
}

#[derive(Args, Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[command(flatten)]
    #[serde(default)]
    pub search: SearchParams,
    #[command(flatten)]
    #[serde(default)]
    pub cost: CostFlags,
}

#[derive(Args, Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchParams {
    #[arg(long, default_value_t = 50)]
    pub population_size: usize,
    #[arg(long, default_value_t = 10_000)]
    pub generations: usize,
    /// Mutation divisor: at most `cells / mutation_factor` genes are touched per child.
    #[arg(long, default_value_t = 10)]
    pub mutation_factor: usize,
}

impl Default for SearchParams {
    fn default() -> Self {
        Self {
            population_size: 50,
            generations: 10_000,
            mutation_factor: 10,
        }
    }
}

/// HPWL knobs. Both are off for the plain half-perimeter.
#[derive(Args, Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct CostFlags {
    /// Count occupied grid columns/rows instead of the distance (+1 per axis).
    #[arg(long, default_value_t = false)]
    pub pad_bbox: bool,
    /// Charge the vertical span a second time for the routing track between rows.
    #[arg(long, default_value_t = false)]
    pub vertical_tracks: bool,
}

impl Config {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> CfResult<Self> {
        let content = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;
    use strum::IntoEnumIterator;

    #[test]
    fn test_partial_json_uses_defaults() {
        let cfg: Config =
            serde_json::from_str(r#"{"search": {"population_size": 8}}"#).unwrap();
        assert_eq!(cfg.search.population_size, 8);
        assert_eq!(cfg.search.mutation_factor, 10);
        assert_eq!(cfg.cost, CostFlags::default());
    }

    #[test]
    fn test_problem_kind_names() {
        assert_eq!(ProblemKind::Placement.to_string(), "placement");
        assert_eq!(
            ProblemKind::from_str("partition").unwrap(),
            ProblemKind::Partition
        );
        for kind in ProblemKind::iter() {
            assert_eq!(ProblemKind::from_str(&kind.to_string()).unwrap(), kind);
        }
    }
}
