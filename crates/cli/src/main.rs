//! prim cycle-level harness CLI.
//!
//! This binary runs the reference prim core against a memory image. It performs:
//! 1. **Image load:** Reads the file given with `-i` into memory at address `0x0000`.
//! 2. **Simulation:** Resets the core and clocks it until it finishes or the cycle budget runs out.
//! 3. **Trace:** Writes every step to `trace.vcd` in the working directory.
//!
//! The harness configuration is the built-in default; there are no other flags.

use std::path::{Path, PathBuf};
use std::process;

use clap::Parser;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use primsim_core::common::{BusAddr, HarnessError};
use primsim_core::core::PrimCore;
use primsim_core::sim::{StopReason, loader};
use primsim_core::trace::VcdRecorder;
use primsim_core::{Harness, HarnessConfig, Memory};

#[derive(Parser, Debug)]
#[command(
    name = "primsim",
    author,
    version,
    about = "Cycle-level test harness for the prim core",
    long_about = "Load a raw binary image at address 0x0000, reset the prim core and clock it until it \
                  signals completion or the cycle budget is spent. Every step is written to trace.vcd.\n\n\
                  Example:\n  primsim -i program.bin"
)]
struct Cli {
    /// Binary image to load at address 0x0000.
    #[arg(short = 'i', value_name = "IMAGE")]
    image: Option<PathBuf>,
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn main() {
    init_logging();
    let cli = Cli::parse();

    println!("prim simulator\n");

    let Some(image) = cli.image else {
        eprintln!("Error: no image specified");
        eprintln!();
        eprintln!("  primsim -i <image.bin>");
        eprintln!();
        eprintln!("  primsim --help  for full options");
        process::exit(1);
    };

    if let Err(e) = cmd_run(&image) {
        eprintln!("\n[!] FATAL: {e}");
        process::exit(1);
    }
}

/// Loads `image`, runs the harness to completion and prints the statistics report.
fn cmd_run(image: &Path) -> Result<(), HarnessError> {
    let config = HarnessConfig::default();
    debug!(?config, "harness configuration");

    let mut memory = Memory::new();
    let len = loader::load_image(&mut memory, image, BusAddr::new(0))?;
    println!("[*] Image: {} ({} bytes)", image.display(), len);
    println!(
        "    Clock: {} ps  Budget: {} cycles  Ack: {:?}",
        config.clock_period_ps, config.max_cycles, config.ack_policy
    );

    let mut harness = Harness::new(PrimCore::new(), memory, &config)?;
    if let Some(path) = &config.trace_path {
        harness = harness.with_recorder(Box::new(VcdRecorder::create(path)?));
        println!("    Trace: {}", path.display());
    }
    println!();

    let outcome = harness.run()?;
    match outcome.reason {
        StopReason::CoreFinished => println!("Simulation finished"),
        StopReason::BudgetExhausted => println!(
            "Cycle budget exhausted after {} cycles ({} ps)",
            outcome.cycles, outcome.time_ps
        ),
    }
    harness.stats().print();
    Ok(())
}
