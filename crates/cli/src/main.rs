//! RV32IM pipelined emulator CLI.
//!
//! This binary provides the single entry point for the simulator:
//! 1. **Load:** Parse a statically linked 32-bit RISC-V ELF executable.
//! 2. **Run:** Drive the pipeline until architectural termination or fault.
//! 3. **Report:** Print the final register state and exit 0 on normal
//!    termination, 1 on any fault, loader failure, or usage error.
//!
//! Log verbosity is selected through the `RUST_LOG` environment variable
//! (debug, info, warn, error).

use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;

use rv32_core::config::Config;
use rv32_core::sim::loader;
use rv32_core::Simulator;

#[derive(Parser, Debug)]
#[command(
    name = "emulator",
    author,
    version,
    about = "RV32IM pipelined instruction-set simulator",
    long_about = "Execute a statically linked 32-bit little-endian RISC-V (RV32IM) ELF \
                  binary and report the final architectural state.\n\n\
                  Set RUST_LOG=debug for a per-stage pipeline trace.\n\n\
                  Examples:\n  \
                  emulator program.elf\n  \
                  emulator --max-instructions 1000000 program.elf\n  \
                  RUST_LOG=debug emulator program.elf"
)]
struct Cli {
    /// Path to the RISC-V ELF executable.
    elf: PathBuf,

    /// JSON configuration file (memory size, stack region, limits).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Abort with a timeout fault after this many retired instructions.
    #[arg(long)]
    max_instructions: Option<u64>,
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    let mut config = match load_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("error: {}", e);
            return ExitCode::FAILURE;
        }
    };
    if cli.max_instructions.is_some() {
        config.general.max_instructions = cli.max_instructions;
    }

    let image = match loader::load_file(&cli.elf) {
        Ok(image) => image,
        Err(e) => {
            eprintln!("error: {}: {}", cli.elf.display(), e);
            return ExitCode::FAILURE;
        }
    };

    let mut sim = match Simulator::new(&image, &config) {
        Ok(sim) => sim,
        Err(e) => {
            eprintln!("error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    match sim.run() {
        Ok(()) => {
            sim.dump_state();
            sim.cpu.stats.print();
            ExitCode::SUCCESS
        }
        Err(trap) => {
            eprintln!("fault: {}", trap);
            sim.dump_state();
            sim.cpu.stats.print();
            ExitCode::FAILURE
        }
    }
}

/// Reads the JSON configuration file, or returns defaults when none is
/// given.
fn load_config(path: Option<&std::path::Path>) -> Result<Config, String> {
    let Some(path) = path else {
        return Ok(Config::default());
    };
    let text = std::fs::read_to_string(path).map_err(|e| format!("{}: {}", path.display(), e))?;
    serde_json::from_str(&text).map_err(|e| format!("{}: {}", path.display(), e))
}
