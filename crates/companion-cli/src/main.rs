use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod commands;

#[derive(Parser)]
#[command(name = "companion")]
#[command(about = "CourseCompanion - terminal host for the course companion widget", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the widget interactively
    Repl {
        /// Configuration file (defaults to the user config directory)
        #[arg(long)]
        file: Option<PathBuf>,
    },
    /// List catalog courses
    Catalog {
        /// Text matched against title, description and tags
        #[arg(short, long)]
        query: Option<String>,
        /// Category id, e.g. data-science
        #[arg(short, long, default_value = "all")]
        category: String,
        /// Only courses the user owns
        #[arg(long)]
        purchased: bool,
    },
    /// Inspect or edit the widget configuration file
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Print the resolved configuration
    Show {
        #[arg(long)]
        file: Option<PathBuf>,
    },
    /// Set one key, e.g. `theme dark`
    Set {
        key: String,
        value: String,
        #[arg(long)]
        file: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Repl { file } => commands::repl::run(file).await?,
        Commands::Catalog {
            query,
            category,
            purchased,
        } => {
            commands::init_logging()?;
            commands::catalog::run(query.as_deref(), &category, purchased)
        }
        Commands::Config { action } => {
            commands::init_logging()?;
            match action {
                ConfigAction::Show { file } => commands::config::show(file)?,
                ConfigAction::Set { key, value, file } => commands::config::set(file, &key, &value)?,
            }
        }
    }

    Ok(())
}
