use crate::config::{Config, ProblemKind};
use crate::error::{CellForgeError, CfResult};
use crate::netlist::Circuit;
use crate::optimizer::crossover::{crossover_partition, crossover_placement};
use crate::optimizer::fitness::FitnessTable;
use crate::optimizer::genotype::{Encoding, Genotype, Solution};
use crate::optimizer::initialization::random_genotype;
use crate::optimizer::mutation::{draw_mutation_count, mutate_partition, mutate_placement};
use crate::optimizer::population::Population;
use crate::optimizer::selection::select_parents;
use crate::scorer::Scorer;
use rayon::prelude::*;
use serde::Serialize;
use strum_macros::Display;
use tracing::{debug, info};

pub struct EngineOptions {
    pub population_size: usize,
    pub mutation_factor: usize,
}

impl From<&Config> for EngineOptions {
    fn from(cfg: &Config) -> Self {
        Self {
            population_size: cfg.search.population_size,
            mutation_factor: cfg.search.mutation_factor,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum EngineState {
    Uninitialized,
    Initialized,
    Running,
    Converged,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BestSolution {
    pub genotype: Genotype,
    pub solution: Solution,
    pub cost: u64,
}

/// Steady-state GA shared by partitioning and placement.
///
/// `initialize` builds a random population; each `run_generations` call then evolves that
/// same population further and reports the best member at the end of the call.
pub struct GeneticEngine {
    circuit: Circuit,
    encoding: Encoding,
    scorer: Scorer,
    options: EngineOptions,
    rng: fastrand::Rng,
    population: Population,
    state: EngineState,
    best: Option<BestSolution>,
    generation: u64,
}

impl GeneticEngine {
    pub fn new(
        circuit: Circuit,
        problem: ProblemKind,
        config: &Config,
        seed: Option<u64>,
    ) -> CfResult<Self> {
        let options = EngineOptions::from(config);
        if options.population_size == 0 {
            return Err(CellForgeError::Configuration(
                "population size must be at least 1".into(),
            ));
        }
        if options.mutation_factor == 0 {
            return Err(CellForgeError::Configuration(
                "mutation factor must be at least 1".into(),
            ));
        }

        let encoding = encoding_for(&circuit, problem)?;
        let scorer = Scorer::new(circuit.nets.clone(), config.cost);

        let rng = if let Some(s) = seed {
            fastrand::Rng::with_seed(s)
        } else {
            fastrand::Rng::new()
        };

        Ok(Self {
            circuit,
            encoding,
            scorer,
            options,
            rng,
            population: Population::default(),
            state: EngineState::Uninitialized,
            best: None,
            generation: 0,
        })
    }

    /// Swaps in a new circuit for the same problem. The engine must be initialized again.
    pub fn load_circuit(&mut self, circuit: Circuit) -> CfResult<()> {
        self.encoding = encoding_for(&circuit, self.encoding.problem())?;
        self.scorer = Scorer::new(circuit.nets.clone(), self.scorer.flags);
        self.circuit = circuit;
        self.population = Population::default();
        self.best = None;
        self.generation = 0;
        self.state = EngineState::Uninitialized;
        Ok(())
    }

    pub fn initialize(&mut self) -> CfResult<BestSolution> {
        let cells = self.circuit.cells;
        let size = self.options.population_size;

        // Generation consumes the RNG and stays sequential; only scoring fans out.
        let genotypes: Vec<Genotype> = (0..size)
            .map(|_| random_genotype(&mut self.rng, &self.encoding, cells))
            .collect();

        let encoding = &self.encoding;
        let scorer = &self.scorer;
        let costs: Vec<u64> = genotypes
            .par_iter()
            .map(|g| score_genotype(encoding, scorer, g))
            .collect::<CfResult<Vec<u64>>>()?;

        let mut population = Population::with_capacity(size);
        for (g, cost) in genotypes.into_iter().zip(costs) {
            debug!("{}: {}", self.encoding.render(&g), cost);
            population.insert(g, cost);
        }
        self.population = population;
        self.generation = 0;

        let best = self.record_best()?;
        self.state = EngineState::Initialized;

        info!(
            "🧬 Initial {} population of {} (best cost {})",
            self.encoding.problem(),
            size,
            best.cost
        );
        Ok(best)
    }

    /// Runs `count` generations on the current population and returns the new best.
    pub fn run_generations(&mut self, count: usize) -> CfResult<BestSolution> {
        if self.state == EngineState::Uninitialized {
            return Err(CellForgeError::EngineState(
                "run_generations called before initialize".into(),
            ));
        }

        self.state = EngineState::Running;
        for _ in 0..count {
            self.step()?;
        }

        let best = self.record_best()?;
        self.state = EngineState::Converged;

        info!(
            "✅ {} generations done (total {}), best cost {}",
            count, self.generation, best.cost
        );
        Ok(best)
    }

    /// One generation: scale fitness, select, recombine, mutate, replace.
    pub fn step(&mut self) -> CfResult<()> {
        if self.state == EngineState::Uninitialized {
            return Err(CellForgeError::EngineState(
                "step called before initialize".into(),
            ));
        }
        self.state = EngineState::Running;

        let fitness = FitnessTable::from_population(&self.population)?;
        debug!(
            "Fitness: best {}, worst {}, total {:.2}",
            fitness.best_cost, fitness.worst_cost, fitness.total
        );

        let (p1, p2) = {
            let (a, b) = select_parents(&mut self.rng, &self.population, &fitness);
            (a.clone(), b.clone())
        };
        debug!(
            "Parents: {} x {}",
            self.encoding.render(&p1),
            self.encoding.render(&p2)
        );

        let mut children = match self.encoding {
            Encoding::Binary => {
                let (c1, c2) = crossover_partition(&mut self.rng, &p1, &p2);
                vec![c1, c2]
            }
            Encoding::Permutation { grid } => {
                vec![crossover_placement(
                    &mut self.rng,
                    &p1,
                    &p2,
                    grid.slot_count(),
                )]
            }
        };

        let m = draw_mutation_count(
            &mut self.rng,
            self.circuit.cells,
            self.options.mutation_factor,
        );
        debug!("{} mutations", m);
        for child in children.iter_mut() {
            match self.encoding {
                Encoding::Binary => mutate_partition(&mut self.rng, child, m),
                Encoding::Permutation { grid } => {
                    mutate_placement(&mut self.rng, child, m, grid.slot_count())
                }
            }
        }

        let encoding = &self.encoding;
        let scorer = &self.scorer;
        for child in children {
            encoding.check_invariant(&child, self.circuit.cells)?;
            let (evicted, cost) = self
                .population
                .replace_worst(child, |g| score_genotype(encoding, scorer, g))?;
            debug!(
                "Evicted {}, child cost {}",
                encoding.render(&evicted),
                cost
            );
        }

        self.generation += 1;
        Ok(())
    }

    /// Decoded members with their cached costs, in population order.
    pub fn snapshot(&self) -> CfResult<Vec<(Solution, u64)>> {
        if self.state == EngineState::Uninitialized {
            return Err(CellForgeError::EngineState(
                "snapshot requested before initialize".into(),
            ));
        }
        self.population
            .all()
            .iter()
            .map(|g| Ok((self.encoding.decode(g)?, self.population.cost_of(g)?)))
            .collect()
    }

    fn record_best(&mut self) -> CfResult<BestSolution> {
        let (genotype, cost) = self.population.best()?;
        let best = BestSolution {
            genotype: genotype.clone(),
            solution: self.encoding.decode(genotype)?,
            cost,
        };
        self.best = Some(best.clone());
        Ok(best)
    }

    pub fn state(&self) -> EngineState {
        self.state
    }

    pub fn best(&self) -> Option<&BestSolution> {
        self.best.as_ref()
    }

    pub fn population(&self) -> &Population {
        &self.population
    }

    pub fn encoding(&self) -> &Encoding {
        &self.encoding
    }

    pub fn scorer(&self) -> &Scorer {
        &self.scorer
    }

    pub fn circuit(&self) -> &Circuit {
        &self.circuit
    }

    pub fn options(&self) -> &EngineOptions {
        &self.options
    }

    /// Generations run since the last `initialize`.
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

fn encoding_for(circuit: &Circuit, problem: ProblemKind) -> CfResult<Encoding> {
    circuit.validate(problem)?;
    Ok(match problem {
        ProblemKind::Partition => Encoding::Binary,
        ProblemKind::Placement => Encoding::Permutation {
            grid: circuit.grid.ok_or_else(|| {
                CellForgeError::Configuration("placement needs grid dimensions".into())
            })?,
        },
    })
}

fn score_genotype(encoding: &Encoding, scorer: &Scorer, genotype: &Genotype) -> CfResult<u64> {
    let solution = encoding.decode(genotype)?;
    Ok(scorer.cost(&solution))
}
