pub mod costs;

use crate::config::CostFlags;
use crate::netlist::Net;
use crate::optimizer::genotype::Solution;

/// Cost model shared by both problems: cut-size for partitions, summed HPWL for placements.
///
/// Pure: the same solution always yields the same cost, so callers are free to cache it.
#[derive(Debug, Clone)]
pub struct Scorer {
    pub nets: Vec<Net>,
    pub flags: CostFlags,
}

impl Scorer {
    pub fn new(nets: Vec<Net>, flags: CostFlags) -> Self {
        Self { nets, flags }
    }

    pub fn cost(&self, solution: &Solution) -> u64 {
        match solution {
            Solution::Partition(sides) => costs::cut_size(&self.nets, sides),
            Solution::Placement(coords) => {
                costs::total_wirelength(&self.nets, coords, self.flags)
            }
        }
    }

    /// Per-net contribution to `cost`, in net order.
    pub fn net_costs(&self, solution: &Solution) -> Vec<u64> {
        match solution {
            Solution::Partition(sides) => self
                .nets
                .iter()
                .map(|net| costs::is_cut(net, sides) as u64)
                .collect(),
            Solution::Placement(coords) => self
                .nets
                .iter()
                .map(|net| costs::half_perimeter(net, coords, self.flags))
                .collect(),
        }
    }
}
