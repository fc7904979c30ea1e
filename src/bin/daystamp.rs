use anyhow::{anyhow, Result};
use clap::{Parser, Subcommand};
use log::{info, warn};

use daystamp::configure::load_config;
use daystamp::logger::setup_logger;
use daystamp::{decode, Generator, Options};

#[derive(Parser, Debug)]
#[command(name = "daystamp", version, about = "Date-prefixed, machine-tagged numeric ids")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print new ids, one per line
    Generate {
        #[arg(short, long, default_value_t = 1)]
        count: usize,
    },
    /// Print the date, machine id and elapsed time of an id
    Decode { id: u64 },
    /// Print the machine id this host resolves to
    MachineId,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = load_config()?;
    setup_logger(&config).map_err(|e| anyhow!("failed to set up logging: {}", e))?;

    match cli.command {
        Command::Generate { count } => {
            let generator = Generator::try_new(Options::from_config(&config)?)?;
            info!(
                "Generating {} ids with machine id {}",
                count,
                generator.machine_id()
            );
            for _ in 0..count {
                println!("{}", generator.id()?);
            }
        }
        Command::Decode { id } => {
            let layout = config.layout()?;
            match decode(id, layout) {
                Ok(decoded) => println!(
                    "date={} machine_id={} elapsed_ms={} time_utc={}",
                    decoded.date, decoded.machine_id, decoded.elapsed_ms, decoded.time_of_day
                ),
                Err(e) => {
                    warn!("{}, falling back to raw extraction", e);
                    let (machine_id, elapsed_ms) = layout.extract(id);
                    println!("machine_id={} elapsed_ms={}", machine_id, elapsed_ms);
                }
            }
        }
        Command::MachineId => {
            let generator = Generator::try_new(Options::from_config(&config)?)?;
            println!("{}", generator.machine_id());
        }
    }

    Ok(())
}
