use std::path::PathBuf;

use clap::{Parser, Subcommand};
use jiff::civil::Date;
use wealthcast::commands::{self, ProjectOptions};
use wealthcast::{DataDirectory, init_logging};
use wealthcast_core::model::Strategy;

#[derive(Parser, Debug)]
#[command(name = "wealthcast")]
#[command(about = "Month-by-month wealth projection and investment planning")]
struct Args {
    /// Path to the data directory (default: ~/.wealthcast/)
    #[arg(short, long, global = true)]
    data_dir: Option<PathBuf>,

    /// Log level (debug, info, warn, error)
    #[arg(short, long, default_value = "info", global = true)]
    log_level: String,

    /// Reference date for projections (default: today, or the scenario's asOf)
    #[arg(long, global = true)]
    as_of: Option<Date>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Write a sample scenario to start from
    Init {
        name: String,
        /// Overwrite an existing scenario
        #[arg(long)]
        force: bool,
    },
    /// List stored scenarios
    List,
    /// Project net worth month by month
    Project {
        /// Scenario name or path to a YAML file
        scenario: String,
        #[arg(short, long)]
        months: Option<usize>,
        #[arg(short, long)]
        strategy: Option<Strategy>,
        /// Show one row every N months
        #[arg(long)]
        every: Option<usize>,
        #[arg(long)]
        json: bool,
    },
    /// Recommended monthly investment plan
    Plan {
        scenario: String,
        #[arg(long)]
        json: bool,
    },
    /// Debt overview, or one debt's amortization table
    Debts {
        scenario: String,
        /// Debt name or id to print the schedule for
        #[arg(long)]
        schedule: Option<String>,
        #[arg(long)]
        json: bool,
    },
    /// Month-by-month impact of one-off and recurring events
    Events {
        scenario: String,
        #[arg(short, long)]
        months: Option<usize>,
        #[arg(long)]
        json: bool,
    },
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let args = Args::parse();
    let data_dir = DataDirectory::new(args.data_dir.unwrap_or_else(DataDirectory::default_path));

    init_logging(data_dir.root(), &args.log_level)?;

    let today = args.as_of.unwrap_or_else(|| jiff::Zoned::now().date());

    let output = match args.command {
        Command::Init { name, force } => commands::init(&data_dir, &name, force)?,
        Command::List => commands::list(&data_dir)?,
        Command::Project {
            scenario,
            months,
            strategy,
            every,
            json,
        } => {
            let options = ProjectOptions {
                months,
                strategy,
                every,
                json,
            };
            commands::project(&data_dir, &scenario, &options, today)?
        }
        Command::Plan { scenario, json } => commands::plan(&data_dir, &scenario, json)?,
        Command::Debts {
            scenario,
            schedule,
            json,
        } => commands::debts(&data_dir, &scenario, schedule.as_deref(), json, today)?,
        Command::Events {
            scenario,
            months,
            json,
        } => commands::events(&data_dir, &scenario, months, json, today)?,
    };

    println!("{output}");
    Ok(())
}
