use clap::{CommandFactory, Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "momentum-cli", version, about = "Momentum habit tracker CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Log and manage actions
    Action {
        #[command(subcommand)]
        action: commands::action::ActionAction,
    },
    /// Manage goals and their progress
    Goal {
        #[command(subcommand)]
        action: commands::goal::GoalAction,
    },
    /// Manage categories
    Category {
        #[command(subcommand)]
        action: commands::category::CategoryAction,
    },
    /// Manage rewards
    Reward {
        #[command(subcommand)]
        action: commands::reward::RewardAction,
    },
    /// Show activity streaks
    Streak {
        #[command(subcommand)]
        action: commands::streak::StreakAction,
    },
    /// Check for overdue actions and goals
    Status {
        /// Re-check on the configured interval and notify on new overdue
        /// items
        #[arg(long)]
        watch: bool,
        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },
    /// Generate task suggestions
    Suggest {
        /// Prefer goal suggestions over action suggestions
        #[arg(long)]
        goals: bool,
        /// Print suggestions as JSON
        #[arg(long)]
        json: bool,
    },
    /// Account management
    Auth {
        #[command(subcommand)]
        action: commands::auth::AuthAction,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
    /// Generate shell completions
    Completions {
        /// Target shell
        shell: clap_complete::Shell,
    },
}

fn main() {
    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Action { action } => commands::action::run(action),
        Commands::Goal { action } => commands::goal::run(action),
        Commands::Category { action } => commands::category::run(action),
        Commands::Reward { action } => commands::reward::run(action),
        Commands::Streak { action } => commands::streak::run(action),
        Commands::Status { watch, json } => commands::status::run(watch, json),
        Commands::Suggest { goals, json } => commands::suggest::run(goals, json),
        Commands::Auth { action } => commands::auth::run(action),
        Commands::Config { action } => commands::config::run(action),
        Commands::Completions { shell } => {
            clap_complete::generate(
                shell,
                &mut Cli::command(),
                "momentum-cli",
                &mut std::io::stdout(),
            );
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
