use cellforge::config::{Config, ProblemKind};
use cellforge::error::CfResult;
use cellforge::netlist::Circuit;
use cellforge::optimizer::{BestSolution, Side, Solution};
use cellforge::scorer::Scorer;
use comfy_table::presets::ASCII_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use serde::Serialize;
use std::fs;
use std::path::Path;

#[derive(Debug, Serialize)]
pub struct RunSummary {
    pub problem: ProblemKind,
    pub netlist: String,
    pub seed: Option<u64>,
    pub config: Config,
    pub initial_cost: u64,
    pub final_cost: u64,
    pub rounds: usize,
    pub generations: u64,
    pub elapsed_secs: f64,
    pub best: BestSolution,
}

/// One row per circuit of the run.
pub fn print_summary(summaries: &[RunSummary]) {
    let mut table = Table::new();
    table
        .load_preset(ASCII_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);

    table.add_row(vec![
        Cell::new("Circuit").add_attribute(Attribute::Bold),
        Cell::new("Problem"),
        Cell::new("Initial"),
        Cell::new("Final").fg(Color::Cyan),
        Cell::new("Gain").fg(Color::Green),
        Cell::new("Rounds"),
        Cell::new("Generations"),
        Cell::new("Time (s)"),
    ]);

    for i in 2..=7 {
        if let Some(col) = table.column_mut(i) {
            col.set_cell_alignment(CellAlignment::Right);
        }
    }

    for s in summaries {
        let gain = if s.initial_cost > 0 {
            100.0 * (s.initial_cost as f64 - s.final_cost as f64) / s.initial_cost as f64
        } else {
            0.0
        };

        table.add_row(vec![
            Cell::new(&s.netlist).add_attribute(Attribute::Bold),
            Cell::new(s.problem),
            Cell::new(s.initial_cost),
            Cell::new(s.final_cost).fg(Color::Cyan),
            Cell::new(format!("{:.1}%", gain)).fg(Color::Green),
            Cell::new(s.rounds),
            Cell::new(s.generations),
            Cell::new(format!("{:.2}", s.elapsed_secs)),
        ]);
    }
    println!("\n{}", table);
}

pub fn print_solution(circuit: &Circuit, solution: &Solution) {
    match solution {
        Solution::Partition(sides) => print_partition(sides),
        Solution::Placement(coords) => {
            if let Some(grid) = circuit.grid {
                print_placement_grid(grid.rows, grid.cols, coords);
            }
        }
    }
}

/// Grid view: one table cell per slot, showing the cell id placed there.
pub fn print_placement_grid(rows: u32, cols: u32, coords: &[cellforge::geometry::Coord]) {
    let mut slots = vec![None; rows as usize * cols as usize];
    for (cell, c) in coords.iter().enumerate() {
        slots[c.y as usize * cols as usize + c.x as usize] = Some(cell);
    }

    let mut table = Table::new();
    table.load_preset(ASCII_FULL);

    for row in slots.chunks(cols as usize) {
        let cells: Vec<Cell> = row
            .iter()
            .map(|slot| {
                let s = slot.map(|c| c.to_string()).unwrap_or_default();
                Cell::new(s).set_alignment(CellAlignment::Center)
            })
            .collect();
        table.add_row(cells);
    }
    println!("\nPlacement ({}x{}):", rows, cols);
    println!("{}", table);
}

pub fn print_partition(sides: &[Side]) {
    let list = |side: Side| {
        sides
            .iter()
            .enumerate()
            .filter(|(_, &s)| s == side)
            .map(|(i, _)| i.to_string())
            .collect::<Vec<_>>()
    };
    let left = list(Side::Left);
    let right = list(Side::Right);

    let mut table = Table::new();
    table
        .load_preset(ASCII_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table.add_row(vec![
        Cell::new(format!("Left ({})", left.len())).add_attribute(Attribute::Bold),
        Cell::new(format!("Right ({})", right.len())).add_attribute(Attribute::Bold),
    ]);
    table.add_row(vec![Cell::new(left.join(" ")), Cell::new(right.join(" "))]);
    println!("\n{}", table);
}

pub fn print_costliest_nets(scorer: &Scorer, solution: &Solution, limit: usize) {
    let mut ranked: Vec<(usize, u64)> = scorer
        .net_costs(solution)
        .into_iter()
        .enumerate()
        .filter(|&(_, c)| c > 0)
        .collect();
    if ranked.is_empty() {
        return;
    }
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));

    let mut table = Table::new();
    table
        .load_preset(ASCII_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table.add_row(vec![
        Cell::new("Net").add_attribute(Attribute::Bold),
        Cell::new("Cells"),
        Cell::new("Cost").fg(Color::Red),
    ]);

    for &(idx, cost) in ranked.iter().take(limit) {
        let cells = scorer.nets[idx]
            .iter()
            .map(|c| c.to_string())
            .collect::<Vec<_>>()
            .join(" ");
        table.add_row(vec![
            Cell::new(idx),
            Cell::new(cells),
            Cell::new(cost)
                .fg(Color::Red)
                .set_alignment(CellAlignment::Right),
        ]);
    }
    println!("\nCostliest nets:");
    println!("{}", table);
}

pub fn write_json<P: AsRef<Path>>(path: P, summaries: &[RunSummary]) -> CfResult<()> {
    let json = serde_json::to_string_pretty(summaries)?;
    fs::write(path, json)?;
    Ok(())
}
