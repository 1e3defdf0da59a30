pub mod crossover;
pub mod fitness;
pub mod genotype;
pub mod initialization;
pub mod mutation;
pub mod population;
pub mod runner;
pub mod selection;

pub use self::genotype::{Encoding, Genotype, Side, Solution};
pub use self::population::Population;
pub use self::runner::{BestSolution, EngineOptions, EngineState, GeneticEngine};
