use clap::{ArgAction, Parser, Subcommand};
use commands::{browse, config, list, movie, show};

mod commands;
mod logging;
mod output;

#[derive(Parser)]
#[command(name = "marquee")]
#[command(about = "Marquee - Your movie catalog and watchlist in the terminal")]
#[command(version)]
struct Cli {
    /// Enable verbose output (use multiple times for more verbosity: -v, -vv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Output format
    #[arg(long, global = true, default_value = "human", value_enum)]
    output: output::OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Browse the movie catalog
    #[command(long_about = "List every title in the catalog. Use --series or --films to narrow the listing to episodic or feature-length titles.")]
    Browse {
        /// Only episodic titles
        #[arg(long, action = ArgAction::SetTrue, conflicts_with = "films")]
        series: bool,

        /// Only feature-length titles
        #[arg(long, action = ArgAction::SetTrue)]
        films: bool,
    },
    /// Show the detail view for one title
    Show {
        /// Catalog id of the title
        id: u64,
    },
    /// Manage your list
    #[command(long_about = "Show and edit your personal list. Running without a subcommand prints the list with watched state and the date each title was added.")]
    List {
        #[command(subcommand)]
        cmd: Option<ListCommands>,
    },
    /// Add, edit, or delete catalog entries
    Movie {
        #[command(subcommand)]
        cmd: MovieCommands,
    },
    /// Inspect or create the config file
    Config {
        #[command(subcommand)]
        cmd: Option<ConfigCommands>,
    },
}

#[derive(Subcommand)]
enum ListCommands {
    /// Print your list
    Show,

    /// Add a title to your list
    Add {
        /// Catalog id of the title
        movie_id: u64,
    },

    /// Remove a title from your list
    Rm {
        /// Catalog id of the title
        movie_id: u64,
    },

    /// Mark a title on your list as watched
    Watched {
        /// Catalog id of the title
        movie_id: u64,

        /// Mark as not watched instead
        #[arg(long = "not", action = ArgAction::SetTrue)]
        not_watched: bool,
    },
}

#[derive(Subcommand)]
enum MovieCommands {
    /// Add a new title to the catalog
    #[command(long_about = "Add a new title to the catalog. A non-empty --title is required; every other field falls back to its form default when the flag is omitted.")]
    Add {
        #[command(flatten)]
        fields: movie::DraftArgs,
    },

    /// Edit an existing catalog entry
    #[command(long_about = "Edit a catalog entry. Text fields start from the current values and flags override them; poster art and the badge reset to their defaults on submit.")]
    Edit {
        /// Catalog id of the title
        id: u64,

        #[command(flatten)]
        fields: movie::DraftArgs,
    },

    /// Delete a title from the catalog
    Rm {
        /// Catalog id of the title
        id: u64,

        /// Skip the confirmation prompt
        #[arg(short = 'y', long, action = ArgAction::SetTrue)]
        yes: bool,
    },
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Show the resolved configuration
    Show,

    /// Write a default config file
    Init,
}

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();

    // Initialize logging with verbose level
    logging::init_logging(cli.verbose, cli.quiet).map_err(|e| color_eyre::eyre::eyre!("{}", e))?;

    // Create output handler
    let output = output::Output::new(cli.output, cli.quiet);

    match cli.command {
        Commands::Browse { series, films } => browse::run_browse(series, films, &output).await,
        Commands::Show { id } => show::run_show(id, &output).await,
        Commands::List { cmd } => {
            let cmd = cmd.unwrap_or(ListCommands::Show);
            list::run_list(cmd, &output).await
        }
        Commands::Movie { cmd } => movie::run_movie(cmd, &output).await,
        Commands::Config { cmd } => {
            let cmd = cmd.unwrap_or(ConfigCommands::Show);
            config::run_config(cmd, &output)
        }
    }
}
