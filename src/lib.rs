pub mod config;
pub mod error;
pub mod geometry;
pub mod netlist;
pub mod optimizer;
pub mod scorer;
// cmd and reports belong to the binary (main.rs).
