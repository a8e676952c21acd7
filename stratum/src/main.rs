//! Demo driver: builds one layered generator from a JSON5 config and prints
//! the frames it produces to stdout, one row per line.
//!
//! Usage: `stratum [config.json5]`. Without a config the reference generator
//! is used: 9 point octaves, distances from 2048 halving, amplitudes from 1
//! shrinking by 1/1.8.

mod logging;

use std::env;
use std::io::{self, BufWriter, Write};

use anyhow::{Context, Result};
use stratum_core::{GeneratorConfig, GeneratorKind};

#[cfg(feature = "mimalloc")]
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

fn main() -> Result<()> {
    logging::init();

    let mut config = match env::args().nth(1) {
        Some(path) => GeneratorConfig::load(&path)
            .with_context(|| format!("Failed to load generator config from {path}"))?,
        None => {
            log::info!("No config given, using the reference configuration");
            GeneratorConfig::default()
        }
    };
    let seed = *config.seed.get_or_insert_with(rand::random);
    log::info!(
        "Generating {} {:?} frames from {} layers with seed {seed}",
        config.count,
        config.kind,
        config.layers
    );

    let builder = config.builder().context("Failed to set up the generator")?;
    let mut out = BufWriter::new(io::stdout().lock());
    match config.kind {
        GeneratorKind::Point => {
            let mut noise = builder.build_point()?;
            log::info!("Built {} layers", noise.layer_count());
            for value in noise.next_values(config.count)? {
                writeln!(out, "{value:.6}")?;
            }
        }
        GeneratorKind::Line => {
            let mut noise = builder.build_line(config.width)?;
            log::info!(
                "Built {} layers, {} wide, circular: {}",
                noise.layer_count(),
                noise.width(),
                noise.is_circular()
            );
            for row in noise.next_lines(config.count)? {
                write_row(&mut out, &row)?;
            }
        }
        GeneratorKind::Slice => {
            let mut noise = builder.build_slice(config.width, config.height)?;
            log::info!(
                "Built {} layers, {}x{}, circular: {}",
                noise.layer_count(),
                noise.width(),
                noise.height(),
                noise.is_circular()
            );
            for plane in noise.next_slices(config.count)? {
                for row in plane.rows() {
                    write_row(&mut out, row)?;
                }
                writeln!(out)?;
            }
        }
    }
    out.flush()?;
    Ok(())
}

fn write_row(out: &mut impl Write, row: &[f64]) -> io::Result<()> {
    for (i, value) in row.iter().enumerate() {
        if i > 0 {
            out.write_all(b" ")?;
        }
        write!(out, "{value:.6}")?;
    }
    writeln!(out)
}
