use crate::config::ProblemKind;
use crate::error::{CellForgeError, CfResult};
use crate::geometry::Grid;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use tracing::{debug, info};

/// Cells a net connects. Order is kept but has no meaning for cost.
pub type Net = Vec<usize>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Circuit {
    pub cells: usize,
    pub nets: Vec<Net>,
    pub grid: Option<Grid>,
}

impl Circuit {
    pub fn new(cells: usize, nets: Vec<Net>, grid: Option<Grid>) -> Self {
        Self { cells, nets, grid }
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> CfResult<Self> {
        let path = path.as_ref();
        info!("📂 Loading netlist: {}", path.display());
        let file = File::open(path)?;
        Self::parse(BufReader::new(file))
    }

    /// Reads the benchmark format:
    ///
    /// ```text
    /// cells nets [rows cols]
    /// k c1 c2 ... ck      (one line per net)
    /// ```
    pub fn parse<R: BufRead>(reader: R) -> CfResult<Self> {
        let mut header: Option<(usize, Vec<usize>)> = None;
        let mut nets = Vec::new();

        for (idx, line) in reader.lines().enumerate() {
            let line_no = idx + 1;
            let line = line?;
            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }

            let values = parse_integers(trimmed, line_no)?;

            if header.is_none() {
                if values.len() != 2 && values.len() != 4 {
                    return Err(CellForgeError::Parse {
                        line: line_no,
                        msg: format!(
                            "header needs `cells nets [rows cols]`, found {} values",
                            values.len()
                        ),
                    });
                }
                header = Some((line_no, values));
                continue;
            }

            let count = values[0];
            if values.len() - 1 != count {
                return Err(CellForgeError::Parse {
                    line: line_no,
                    msg: format!(
                        "net declares {} cells but lists {}",
                        count,
                        values.len() - 1
                    ),
                });
            }
            nets.push(values[1..].to_vec());
        }

        let (header_line, values) = header.ok_or(CellForgeError::Parse {
            line: 0,
            msg: "empty netlist".into(),
        })?;

        let cells = values[0];
        let declared_nets = values[1];
        if declared_nets != nets.len() {
            return Err(CellForgeError::Parse {
                line: header_line,
                msg: format!(
                    "header declares {} nets but file has {}",
                    declared_nets,
                    nets.len()
                ),
            });
        }

        let grid = if values.len() == 4 {
            let rows = to_u32(values[2], header_line)?;
            let cols = to_u32(values[3], header_line)?;
            Some(Grid::new(rows, cols))
        } else {
            None
        };

        debug!(
            "Parsed netlist: {} cells, {} nets, grid {:?}",
            cells,
            nets.len(),
            grid
        );

        Ok(Self { cells, nets, grid })
    }

    /// Checks everything the engine relies on for `problem`.
    pub fn validate(&self, problem: ProblemKind) -> CfResult<()> {
        if self.cells < 2 {
            return Err(CellForgeError::Configuration(format!(
                "circuit needs at least 2 cells, found {}",
                self.cells
            )));
        }
        if self.nets.is_empty() {
            return Err(CellForgeError::Configuration("net list is empty".into()));
        }

        for (i, net) in self.nets.iter().enumerate() {
            if net.is_empty() {
                return Err(CellForgeError::Configuration(format!("net {} is empty", i)));
            }
            if let Some(&bad) = net.iter().find(|&&c| c >= self.cells) {
                return Err(CellForgeError::Configuration(format!(
                    "net {} references cell {} but the circuit has {} cells",
                    i, bad, self.cells
                )));
            }
        }

        if problem == ProblemKind::Placement {
            let grid = self.grid.ok_or_else(|| {
                CellForgeError::Configuration("placement needs grid dimensions".into())
            })?;
            // Slots are stored as u32 genes.
            if u32::try_from(grid.slot_count()).is_err() {
                return Err(CellForgeError::Configuration(format!(
                    "{}x{} grid has more slots than a placement can index",
                    grid.rows, grid.cols
                )));
            }
            if grid.slot_count() < self.cells {
                return Err(CellForgeError::Configuration(format!(
                    "{}x{} grid has {} slots for {} cells",
                    grid.rows,
                    grid.cols,
                    grid.slot_count(),
                    self.cells
                )));
            }
        }

        Ok(())
    }
}

fn parse_integers(line: &str, line_no: usize) -> CfResult<Vec<usize>> {
    line.split_whitespace()
        .map(|tok| {
            tok.parse::<usize>().map_err(|_| CellForgeError::Parse {
                line: line_no,
                msg: format!("'{}' is not a non-negative integer", tok),
            })
        })
        .collect()
}

fn to_u32(value: usize, line_no: usize) -> CfResult<u32> {
    u32::try_from(value).map_err(|_| CellForgeError::Parse {
        line: line_no,
        msg: format!("grid dimension {} is too large", value),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_parse_placement_header() {
        let src = "4 2 2 3\n2 0 1\n3 1 2 3\n";
        let circuit = Circuit::parse(Cursor::new(src)).unwrap();
        assert_eq!(circuit.cells, 4);
        assert_eq!(circuit.nets, vec![vec![0, 1], vec![1, 2, 3]]);
        assert_eq!(circuit.grid, Some(Grid::new(2, 3)));
    }

    #[test]
    fn test_parse_partition_header_skips_blank_lines() {
        let src = "\n3 1\n\n2 0 2\n\n";
        let circuit = Circuit::parse(Cursor::new(src)).unwrap();
        assert_eq!(circuit.grid, None);
        assert_eq!(circuit.nets.len(), 1);
    }

    #[test]
    fn test_net_count_mismatch_reports_line() {
        let src = "4 1\n3 0 1\n";
        match Circuit::parse(Cursor::new(src)) {
            Err(CellForgeError::Parse { line, .. }) => assert_eq!(line, 2),
            other => panic!("expected parse error, got {:?}", other),
        }
    }
}
