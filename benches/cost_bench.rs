use cellforge::config::{Config, CostFlags, ProblemKind};
use cellforge::geometry::Grid;
use cellforge::netlist::Circuit;
use cellforge::optimizer::initialization::random_placement;
use cellforge::optimizer::{Encoding, GeneticEngine};
use cellforge::scorer::Scorer;
use criterion::{criterion_group, criterion_main, Criterion};
use std::hint::black_box;

fn setup_circuit() -> Circuit {
    // 200 cells on a 15x15 grid, a mix of 2- to 5-pin nets
    let cells = 200;
    let mut rng = fastrand::Rng::with_seed(1);
    let nets = (0..400)
        .map(|_| {
            let pins = rng.usize(2..6);
            (0..pins).map(|_| rng.usize(0..cells)).collect()
        })
        .collect();
    Circuit::new(cells, nets, Some(Grid::new(15, 15)))
}

fn criterion_benchmark(c: &mut Criterion) {
    let circuit = setup_circuit();
    let grid = circuit.grid.expect("bench circuit has a grid");
    let encoding = Encoding::Permutation { grid };
    let scorer = Scorer::new(circuit.nets.clone(), CostFlags::default());

    let mut rng = fastrand::Rng::with_seed(7);
    let genotype = random_placement(&mut rng, circuit.cells, grid.slot_count());
    let solution = encoding.decode(&genotype).expect("valid placement");

    c.bench_function("hpwl (400 nets)", |b| {
        b.iter(|| scorer.cost(black_box(&solution)))
    });

    let mut engine = GeneticEngine::new(
        circuit,
        ProblemKind::Placement,
        &Config::default(),
        Some(42),
    )
    .expect("valid bench circuit");
    engine.initialize().expect("initialize");

    c.bench_function("placement generation (P=50)", |b| {
        b.iter(|| engine.step().expect("step"))
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
