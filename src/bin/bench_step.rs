use std::time::Instant;

use life_loader::life::{EdgePolicy, EngineConfig, LifeEngine, NotifyMode};
use life_loader::presets;

const DENSITY: f64 = 0.42;
const SEED: u64 = 0x5EED_1234_ABCD_EF01;

fn bench(size: usize, edges: EdgePolicy, notify: NotifyMode, iterations: u64) -> (f64, u64, usize) {
    let board = presets::random(size, size, DENSITY, SEED);
    let config = EngineConfig::default().edges(edges).notify(notify);
    let mut engine = match LifeEngine::with_config(size, size, Some(&board[..]), config) {
        Ok(engine) => engine,
        Err(err) => panic!("random board rejected: {err}"),
    };

    let mut reported = engine.init().count();
    let start = Instant::now();
    for _ in 0..iterations {
        reported += engine.step().count();
    }
    let total_ms = start.elapsed().as_secs_f64() * 1000.0;
    (total_ms, engine.population(), reported)
}

fn main() {
    let scales: &[(usize, u64)] = &[(16, 2000), (32, 1000), (64, 500), (128, 100)];

    println!(
        "{:<10} {:<8} {:<8} {:>8} {:>12} {:>10} {:>12}",
        "Grid", "Edges", "Notify", "Iters", "Total(ms)", "Avg(ms)", "Reported"
    );
    println!("{}", "-".repeat(74));

    for &(size, iters) in scales {
        for edges in [EdgePolicy::Wrap, EdgePolicy::Bounded] {
            for notify in [NotifyMode::Full, NotifyMode::Changed] {
                let (total_ms, _pop, reported) = bench(size, edges, notify, iters);
                println!(
                    "{:<10} {:<8} {:<8} {:>8} {:>12.2} {:>10.4} {:>12}",
                    format!("{size}x{size}"),
                    format!("{edges:?}"),
                    format!("{notify:?}"),
                    iters,
                    total_ms,
                    total_ms / iters as f64,
                    reported
                );
            }
        }
    }
}
