mod config;

use std::error::Error;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};

use clap::Parser;
use tilegen_chunk::{Chunk, generate_chunk};
use tilegen_runtime::{ChunkCache, ChunkJob, ChunkRect, Runtime, generate_region};
use tilegen_tiles::{Biome, Structure};
use tilegen_world::{ChunkCoord, Generator};

use crate::config::{RunConfig, load_run_config};

#[derive(Parser, Debug)]
#[command(name = "tilegen", about = "Deterministic tile chunk generator")]
struct Args {
    /// TOML run config (`[world]`, `[region]`, `[runtime]` sections).
    #[arg(long)]
    config: Option<PathBuf>,
    /// Overrides `world.seed`.
    #[arg(long, allow_hyphen_values = true)]
    seed: Option<i32>,
    #[arg(long, allow_hyphen_values = true)]
    min_x: Option<i32>,
    #[arg(long, allow_hyphen_values = true)]
    min_y: Option<i32>,
    #[arg(long, allow_hyphen_values = true)]
    max_x: Option<i32>,
    #[arg(long, allow_hyphen_values = true)]
    max_y: Option<i32>,
    /// Print the tile grid of one chunk, e.g. `--print 16,65422`.
    #[arg(long, value_parser = parse_chunk_pos, allow_hyphen_values = true)]
    print: Option<(i32, i32)>,
    /// Use the job runtime with this many workers (0 = one per core).
    #[arg(long)]
    workers: Option<usize>,
}

fn parse_chunk_pos(s: &str) -> Result<(i32, i32), String> {
    let (x, y) = s
        .split_once(',')
        .ok_or_else(|| format!("expected X,Y, got {s:?}"))?;
    let x = x.trim().parse().map_err(|e| format!("bad x {x:?}: {e}"))?;
    let y = y.trim().parse().map_err(|e| format!("bad y {y:?}: {e}"))?;
    Ok((x, y))
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    if let Err(e) = run(Args::parse()) {
        log::error!("{e}");
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<(), Box<dyn Error>> {
    let mut cfg = match args.config.as_deref() {
        Some(path) => {
            let cfg = load_run_config(path)?;
            log::info!("loaded config from {}", path.display());
            cfg
        }
        None => RunConfig::default(),
    };
    apply_overrides(&mut cfg, &args);

    let generator = Arc::new(cfg.world.build_generator());

    if let Some((x, y)) = args.print {
        print_chunk(&generate_chunk(&generator, x, y));
        return Ok(());
    }

    let rect = cfg.region.rect();
    log::info!(
        "seed={} region ({}, {})..=({}, {}) = {} chunks",
        generator.seed(),
        rect.min.cx,
        rect.min.cy,
        rect.max.cx,
        rect.max.cy,
        rect.len()
    );

    let t0 = Instant::now();
    let chunks = if cfg.runtime.enable {
        generate_with_runtime(&generator, rect, &cfg)?
    } else {
        generate_region(&generator, rect)
    };
    log::info!("generated {} chunks in {:?}", chunks.len(), t0.elapsed());
    summarize(&chunks);
    Ok(())
}

fn apply_overrides(cfg: &mut RunConfig, args: &Args) {
    if let Some(seed) = args.seed {
        cfg.world.seed = seed;
    }
    if let Some(v) = args.min_x {
        cfg.region.min_x = v;
    }
    if let Some(v) = args.min_y {
        cfg.region.min_y = v;
    }
    if let Some(v) = args.max_x {
        cfg.region.max_x = v;
    }
    if let Some(v) = args.max_y {
        cfg.region.max_y = v;
    }
    if let Some(w) = args.workers {
        cfg.runtime.enable = true;
        cfg.runtime.workers = w;
    }
}

fn generate_with_runtime(
    generator: &Arc<Generator>,
    rect: ChunkRect,
    cfg: &RunConfig,
) -> Result<Vec<Chunk>, Box<dyn Error>> {
    let cache = Arc::new(ChunkCache::new(cfg.runtime.cache_capacity));
    let rt = Runtime::new(Arc::clone(generator), cfg.runtime.workers, Some(Arc::clone(&cache)))?;
    let coords: Vec<ChunkCoord> = rect.coords().collect();
    for (i, coord) in coords.iter().enumerate() {
        rt.submit(ChunkJob::generate(*coord, i as u64));
    }

    let mut slots: Vec<Option<Chunk>> = vec![None; coords.len()];
    let mut received = 0;
    while received < coords.len() {
        let out = rt
            .recv_result_timeout(Duration::from_secs(60))
            .ok_or("runtime stalled waiting for chunk results")?;
        let chunk = out.result?;
        slots[out.job_id as usize] = Some((*chunk).clone());
        received += 1;
    }
    let stats = cache.stats();
    log::debug!(
        "cache: hits={} misses={} evictions={} entries={}",
        stats.hits,
        stats.misses,
        stats.evictions,
        stats.entries
    );
    Ok(slots.into_iter().flatten().collect())
}

fn summarize(chunks: &[Chunk]) {
    let mut biomes = [0u64; Biome::COUNT];
    let mut structures = [0u64; Structure::COUNT];
    for chunk in chunks {
        for (i, n) in chunk.biome_histogram().iter().enumerate() {
            biomes[i] += u64::from(*n);
        }
        for t in chunk.tiles() {
            structures[t.structure().nibble() as usize] += 1;
        }
    }
    let total: u64 = biomes.iter().sum();
    for b in Biome::ALL {
        let n = biomes[b.nibble() as usize];
        if n > 0 {
            log::info!("{:>22} {:>8} ({:.1}%)", b.name(), n, 100.0 * n as f64 / total as f64);
        }
    }
    for s in Structure::ALL.iter().filter(|s| !s.is_none()) {
        log::info!("{:>22} {:>8}", s.name(), structures[s.nibble() as usize]);
    }
}

fn print_chunk(chunk: &Chunk) {
    println!("Pos: ({:x}, {:x})", chunk.x, chunk.y);
    for column in &chunk.data {
        let row: Vec<String> = column.iter().map(|t| t.bits().to_string()).collect();
        println!("[{}]", row.join(" "));
    }
}
