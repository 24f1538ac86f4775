use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;

#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
    Compact,
}

#[derive(Parser)]
#[command(name = "graphbook")]
#[command(about = "A CLI for the Graphbook student network", version)]
#[command(after_help = "EXAMPLES:
    graphbook home                          List people you are not connected to yet
    graphbook home --email ada@mail.mcgill.ca
    graphbook posts --limit 5               Show the posts feed
    graphbook init                          Configure your session email")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format (table, json, compact)
    #[arg(long, short = 'o', global = true, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Output as JSON (alias for --format json)
    #[arg(long, global = true, hide = true)]
    pub json: bool,

    /// Show debug logs and detailed error information
    #[arg(long, short, global = true)]
    pub verbose: bool,
}

impl Cli {
    /// Get the effective output format, considering --json flag
    pub fn output_format(&self) -> OutputFormat {
        if self.json {
            OutputFormat::Json
        } else {
            self.format
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// List users you are not yet connected to
    #[command(
        aliases = ["h", "non-connections"],
        after_help = "EXAMPLES:
    graphbook home
    graphbook home --email ada@mail.mcgill.ca --format json"
    )]
    Home(HomeArgs),
    /// Show the posts feed
    #[command(after_help = "EXAMPLES:
    graphbook posts
    graphbook posts --limit 5")]
    Posts(PostsArgs),
    /// Generate shell completions
    #[command(after_help = "EXAMPLES:
    graphbook completions bash > ~/.bash_completion.d/graphbook
    graphbook completions zsh > ~/.zfunc/_graphbook")]
    Completions {
        /// Shell to generate completions for
        shell: Shell,
    },
    /// Initialize configuration file interactively
    Init,
}

#[derive(Args, Clone)]
pub struct HomeArgs {
    /// Session email (overrides GRAPHBOOK_EMAIL and the config file)
    #[arg(long, short)]
    pub email: Option<String>,
}

#[derive(Args, Clone)]
pub struct PostsArgs {
    /// Maximum number of posts to show
    #[arg(long, short, default_value = "20")]
    pub limit: usize,

    /// Show all posts
    #[arg(long)]
    pub all: bool,
}
