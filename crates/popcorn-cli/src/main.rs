use clap::{ArgAction, Parser, Subcommand};
use commands::{config, interactive, locate, rate, search, show, watched, Session};

mod commands;
mod logging;
mod output;

#[derive(Parser)]
#[command(name = "popcorn")]
#[command(about = "Popcorn - Search movies, rate them and keep track of what you've watched")]
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
    /// Search the catalog by title
    #[command(long_about = "Search OMDb for titles matching the query. Queries shorter than the configured minimum length (3 characters by default) are not sent.")]
    Search {
        /// Title to search for
        query: String,
    },
    /// Show the full record for a title
    Show {
        /// IMDb id, e.g. tt0372784
        id: String,
    },
    /// Rate a title and add it to the watched list
    #[command(long_about = "Fetch the title's details, record your 1-10 rating and add it to the watched list. Rating a title that is already on the list replaces the previous entry.")]
    Rate {
        /// IMDb id, e.g. tt0372784
        id: String,

        /// Rating from 1 to 10 (prompts if omitted)
        rating: Option<u8>,
    },
    /// List watched titles
    Watched {
        /// Only print the summary (count and averages)
        #[arg(long, action = ArgAction::SetTrue)]
        summary: bool,
    },
    /// Remove a title from the watched list
    Remove {
        /// IMDb id of the watched title
        id: String,
    },
    /// Remove every title from the watched list
    Clear {
        /// Do not ask for confirmation
        #[arg(short, long, action = ArgAction::SetTrue)]
        yes: bool,
    },
    /// Look up the current (approximate) position
    Locate {
        /// Number of lookups to perform
        #[arg(long, default_value_t = 1)]
        times: u32,
    },
    /// Interactive session: search, open, rate and manage the watched list
    Interactive,
    /// View or change configuration
    Config {
        #[command(subcommand)]
        cmd: ConfigCommands,
    },
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Show current configuration (masks the API key)
    Show {
        /// Show the API key unmasked
        #[arg(long, action = ArgAction::SetTrue)]
        full: bool,
    },

    /// Store the OMDb API key in the credentials file
    #[command(long_about = "Store the OMDb API key in the credentials file. The POPCORN_OMDB_API_KEY environment variable takes precedence over the stored key.")]
    SetKey {
        /// API key (if not provided, will prompt)
        #[arg(long)]
        key: Option<String>,
    },

    /// Set a single configuration value, e.g. `search.min_query_length 4`
    Set {
        key: String,
        value: String,
    },
}

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    let session = Session::load()?;

    logging::init_logging_with_file(cli.verbose, cli.quiet, session.config.logging.file.clone())
        .map_err(|e| color_eyre::eyre::eyre!("{}", e))?;

    let output = output::Output::new(cli.output, cli.quiet);

    match cli.command {
        Commands::Search { query } => search::run_search(&session, &query, &output).await,
        Commands::Show { id } => show::run_show(&session, &id, &output).await,
        Commands::Rate { id, rating } => rate::run_rate(&session, &id, rating, &output).await,
        Commands::Watched { summary } => watched::run_list(&session, summary, &output),
        Commands::Remove { id } => watched::run_remove(&session, &id, &output),
        Commands::Clear { yes } => watched::run_clear(&session, yes, &output),
        Commands::Locate { times } => locate::run_locate(&session, times, &output).await,
        Commands::Interactive => interactive::run_interactive(&session, &output).await,
        Commands::Config { cmd } => config::run_config(session, cmd, &output),
    }
}
