use clap::{Parser, Subcommand};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rota::candidate::parse_names;
use rota::ipc::{self, Command};
use rota::scheduler::TokioScheduler;
use rota::{Palette, Selector, SpinError, SpinOutcome, SpinPolicy, Spinner};
use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;
use tokio::sync::Notify;

#[derive(Parser, Debug)]
#[command(name = "rota", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug, Clone)]
enum Commands {
    /// Spin the wheel in the running caretaker window
    Spin,
    /// Re-read the caretaker config file
    Reload,
    /// Show the caretaker window
    Show,
    /// Hide the caretaker window
    Hide,
    /// Replace the names on the wheel
    Names {
        #[arg(required = true)]
        names: Vec<String>,
    },
    /// Spin a wheel offline and print how often each name won
    Simulate {
        /// Names on the wheel
        #[arg(required = true)]
        names: Vec<String>,

        /// Number of spins to run
        #[arg(short = 'n', long, default_value_t = 1000)]
        spins: u32,

        /// Seed for a reproducible run
        #[arg(short, long)]
        seed: Option<u64>,
    },
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Spin => send(Command::Spin),
        Commands::Reload => send(Command::Reload),
        Commands::Show => send(Command::Show),
        Commands::Hide => send(Command::Hide),
        Commands::Names { names } => {
            if let Some(bad) = names.iter().find(|n| !ipc::is_sendable_name(n)) {
                anyhow::bail!("Name '{}' contains a comma or newline", bad);
            }
            send(Command::Names(parse_names(&names)))
        }
        Commands::Simulate { names, spins, seed } => simulate(&names, spins, seed),
    }
}

fn send(command: Command) -> anyhow::Result<()> {
    ipc::send(&command)?;
    log::debug!("Sent '{}'", command);
    Ok(())
}

fn simulate(names: &[String], spins: u32, seed: Option<u64>) -> anyhow::Result<()> {
    let names = parse_names(names);
    if names.is_empty() {
        anyhow::bail!("No names given");
    }

    let policy = SpinPolicy {
        duration: Duration::ZERO,
        ..SpinPolicy::default()
    };
    let rng = seed.map_or_else(StdRng::from_entropy, StdRng::seed_from_u64);
    let spinner = Spinner::with_rng(Selector::new(policy, Palette::default())?, TokioScheduler, rng);
    spinner.set_candidates(names.iter().cloned());

    let counts = Rc::new(RefCell::new(vec![0u32; names.len()]));
    let done = Rc::new(Notify::new());
    let sink = counts.clone();
    let signal = done.clone();
    spinner.on_complete(move |winner| {
        sink.borrow_mut()[winner.index] += 1;
        signal.notify_one();
    });

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()?;
    let local = tokio::task::LocalSet::new();
    local.block_on(&runtime, run_spins(&spinner, &done, spins))?;

    let counts = counts.borrow();
    let width = names.iter().map(|n| n.len()).max().unwrap_or(0);
    for (name, count) in names.iter().zip(counts.iter()) {
        let share = f64::from(*count) * 100.0 / f64::from(spins.max(1));
        println!("{:<width$}  {:>8}  {:>6.2}%", name.as_str(), count, share);
    }
    println!(
        "final rotation: {:.1} degrees",
        spinner.selector().accumulated_rotation()
    );
    Ok(())
}

/// Spins back to back. `done` must be notified by the completion callback.
async fn run_spins<R: Rng>(
    spinner: &Spinner<TokioScheduler, R>,
    done: &Notify,
    spins: u32,
) -> Result<(), SpinError> {
    for _ in 0..spins {
        if let SpinOutcome::Started(_) = spinner.request_spin()? {
            done.notified().await;
        }
    }
    Ok(())
}
