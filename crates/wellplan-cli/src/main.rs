use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "wellplan", version, about = "Wellplan CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Record today's check-in and re-plan the day
    Checkin(commands::checkin::CheckinArgs),
    /// Create the profile and the first plan
    Onboard(commands::onboard::OnboardArgs),
    /// Show or rebuild plans
    Plan {
        #[command(subcommand)]
        action: commands::plan::PlanAction,
    },
    /// Task status and slot changes
    Task {
        #[command(subcommand)]
        action: commands::task::TaskAction,
    },
    /// Streak and weekly scorecard
    Report(commands::report::ReportArgs),
    /// Grocery list from meal presets
    Grocery(commands::grocery::GroceryArgs),
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_env("WELLPLAN_LOG")
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    init_tracing();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Checkin(args) => commands::checkin::run(args),
        Commands::Onboard(args) => commands::onboard::run(args),
        Commands::Plan { action } => commands::plan::run(action),
        Commands::Task { action } => commands::task::run(action),
        Commands::Report(args) => commands::report::run(args),
        Commands::Grocery(args) => commands::grocery::run(args),
        Commands::Config { action } => commands::config::run(action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
