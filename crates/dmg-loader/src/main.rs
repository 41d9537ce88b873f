//! CLI entry point for the `dmg-run` driver binary.

use std::env;
use std::ffi::OsString;
use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use dmg_core::{Machine, StepOutcome};
use dmg_loader::Cartridge;
use log::{error, info};
#[cfg(test)]
use tempfile as _;
use thiserror as _;

const USAGE_TEXT: &str = "\
Usage: dmg-run <rom> [options]

Options:
  --max-steps <n>  Stop after n instructions (default: run until an
                   undefined opcode)
  -h, --help       Show this help message

Examples:
  dmg-run game.gb
  dmg-run game.gb --max-steps 1000000
";

#[derive(Debug, PartialEq, Eq)]
struct RunArgs {
    rom: PathBuf,
    max_steps: Option<u64>,
}

#[derive(Debug)]
enum ParseResult {
    Run(RunArgs),
    Help,
}

#[allow(clippy::while_let_on_iterator)]
fn parse_args(mut args: impl Iterator<Item = OsString>) -> Result<ParseResult, String> {
    let mut rom: Option<PathBuf> = None;
    let mut max_steps: Option<u64> = None;

    while let Some(arg) = args.next() {
        if arg == "--help" || arg == "-h" {
            return Ok(ParseResult::Help);
        }

        if arg == "--max-steps" {
            let value = args.next().ok_or_else(|| "missing value for --max-steps".to_string())?;
            let value = value
                .to_str()
                .and_then(|text| text.parse::<u64>().ok())
                .ok_or_else(|| "invalid value for --max-steps".to_string())?;
            max_steps = Some(value);
            continue;
        }

        if rom.is_some() {
            return Err(format!("unexpected argument: {}", arg.to_string_lossy()));
        }
        rom = Some(PathBuf::from(arg));
    }

    let rom = rom.ok_or_else(|| "missing rom path".to_string())?;
    Ok(ParseResult::Run(RunArgs { rom, max_steps }))
}

fn run(args: &RunArgs) -> Result<(), String> {
    let image = fs::read(&args.rom)
        .map_err(|err| format!("cannot read {}: {err}", args.rom.display()))?;

    let cartridge = Cartridge::parse(&image).map_err(|err| err.to_string())?;
    info!("title: {}", cartridge.title());
    info!("cartridge: {}", cartridge.cartridge_type().name());

    let mut machine = Machine::new();
    cartridge
        .load_into(&mut machine)
        .map_err(|err| err.to_string())?;

    let mut steps: u64 = 0;
    let mut total_cycles: u64 = 0;
    loop {
        if let Some(max) = args.max_steps {
            if steps >= max {
                println!("step bound reached after {steps} instructions, {total_cycles} cycles");
                return Ok(());
            }
        }

        match machine.step() {
            StepOutcome::Retired { cycles } => {
                steps += 1;
                total_cycles += u64::from(cycles);
            }
            StepOutcome::Undefined(fault) => {
                info!("stopped after {steps} instructions, {total_cycles} cycles");
                println!("{fault}");
                return Ok(());
            }
        }
    }
}

fn main() -> ExitCode {
    env_logger::init();

    match parse_args(env::args_os().skip(1)) {
        Ok(ParseResult::Help) => {
            print!("{USAGE_TEXT}");
            ExitCode::SUCCESS
        }
        Ok(ParseResult::Run(args)) => match run(&args) {
            Ok(()) => ExitCode::SUCCESS,
            Err(message) => {
                error!("{message}");
                eprintln!("dmg-run: {message}");
                ExitCode::FAILURE
            }
        },
        Err(message) => {
            eprintln!("dmg-run: {message}");
            eprint!("{USAGE_TEXT}");
            ExitCode::FAILURE
        }
    }
}
