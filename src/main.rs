use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result, bail};
use life_loader::loader::{Animation, Loader, LoaderConfig, StopHandle};

const DEFAULT_GENERATIONS: u64 = 20;
const DEFAULT_PRESET: &str = "glider";
const USAGE: &str = "usage: life-loader [--config PATH] [--preset NAME] [--generations N] \
                     [--delay-ms MS] [--seed N] [--svg PATH]";

struct MainArgs {
    config: Option<PathBuf>,
    preset: Option<String>,
    generations: u64,
    delay_ms: Option<f64>,
    seed: Option<u64>,
    svg: Option<PathBuf>,
}

fn parse_args() -> Result<MainArgs> {
    let args: Vec<String> = std::env::args().collect();
    let mut parsed = MainArgs {
        config: None,
        preset: None,
        generations: DEFAULT_GENERATIONS,
        delay_ms: None,
        seed: None,
        svg: None,
    };
    let next_arg = |i: usize, flag: &str| -> Result<&str> {
        args.get(i)
            .map(String::as_str)
            .with_context(|| format!("{flag} requires a value\n{USAGE}"))
    };
    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--config" => {
                i += 1;
                parsed.config = Some(next_arg(i, "--config")?.into());
            }
            "--preset" => {
                i += 1;
                parsed.preset = Some(next_arg(i, "--preset")?.to_string());
            }
            "--generations" => {
                i += 1;
                parsed.generations = next_arg(i, "--generations")?
                    .parse()
                    .context("--generations requires a non-negative integer")?;
            }
            "--delay-ms" => {
                i += 1;
                parsed.delay_ms = Some(
                    next_arg(i, "--delay-ms")?
                        .parse()
                        .context("--delay-ms requires a number")?,
                );
            }
            "--seed" => {
                i += 1;
                parsed.seed = Some(
                    next_arg(i, "--seed")?
                        .parse()
                        .context("--seed requires a non-negative integer")?,
                );
            }
            "--svg" => {
                i += 1;
                parsed.svg = Some(next_arg(i, "--svg")?.into());
            }
            "-h" | "--help" => {
                println!("{USAGE}");
                std::process::exit(0);
            }
            other => bail!("unknown argument: {other}\n{USAGE}"),
        }
        i += 1;
    }
    Ok(parsed)
}

fn load_config(args: &MainArgs) -> Result<LoaderConfig> {
    let mut config = match &args.config {
        Some(path) => LoaderConfig::from_path(path)
            .with_context(|| format!("loading {}", path.display()))?,
        None => LoaderConfig::default(),
    };
    if let Some(preset) = &args.preset {
        config.preset = Some(preset.clone());
        config.initial_board = None;
    }
    if config.initial_board.is_none() && config.preset.is_none() {
        config.preset = Some(DEFAULT_PRESET.to_string());
    }
    if let Some(delay_ms) = args.delay_ms {
        config.animation_delay_ms = delay_ms;
    }
    if args.seed.is_some() {
        config.color_seed = args.seed;
    }
    Ok(config)
}

fn print_frame(loader: &Loader) {
    let engine = loader.engine();
    let mut frame = format!(
        "generation {} population {}\n",
        engine.generation(),
        engine.population()
    );
    for row in engine.snapshot() {
        frame.extend(row.iter().map(|&v| if v == 1 { '#' } else { '.' }));
        frame.push('\n');
    }
    println!("{frame}");
}

fn main() -> Result<()> {
    // RUST_LOG overrides the default filter.
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = parse_args()?;
    let config = load_config(&args)?;
    let mut loader = Loader::new(config).context("building loader")?;

    loader.render();
    loader.start()?;
    print_frame(&loader);

    let animation = Animation::new(loader.animation_delay().max(Duration::from_millis(1)))
        .max_ticks(args.generations);
    animation.run(&mut loader, &StopHandle::new(), print_frame)?;

    if let Some(path) = &args.svg {
        std::fs::write(path, loader.render())
            .with_context(|| format!("writing {}", path.display()))?;
    }
    Ok(())
}
