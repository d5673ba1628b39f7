mod cmd;
mod output;
mod root;

use clap::{Args, Parser, Subcommand};
use cmd::config::ConfigSubcommand;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "lessons",
    about = "Generate interactive tutorial lessons from a topic or a documentation page",
    version,
    propagate_version = true
)]
struct Cli {
    /// Project root (default: auto-detect from lessons.yaml or .git/)
    #[arg(long, global = true, env = "LESSONS_ROOT")]
    root: Option<PathBuf>,

    /// Output as JSON
    #[arg(long, global = true, short = 'j')]
    json: bool,

    #[command(flatten)]
    provider: ProviderArgs,

    #[command(subcommand)]
    command: Commands,
}

/// Completion provider overrides shared by every generating command.
#[derive(Args, Clone, Default)]
pub struct ProviderArgs {
    /// API key for the chat-completions endpoint
    #[arg(long, global = true, env = "OPENAI_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Model name (default: from lessons.yaml, else gpt-4o)
    #[arg(long, global = true)]
    pub model: Option<String>,

    /// Base URL of the chat-completions API
    #[arg(long, global = true)]
    pub api_base: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a tutorial (or add to one) from a topic and/or a source URL
    Create {
        /// Tutorial slug (directory name)
        #[arg(long)]
        name: String,
        /// Topic of the tutorial
        #[arg(long)]
        topic: Option<String>,
        /// Page to ground the lesson on
        #[arg(long)]
        url: Option<String>,
        /// Learning objectives
        #[arg(long)]
        objectives: Option<String>,
        /// Target audience level
        #[arg(long, default_value = lesson_core::pipeline::DEFAULT_LEVEL)]
        level: String,
        /// Also write a Dockerfile that serves only this lesson
        #[arg(long)]
        standalone: bool,
    },

    /// Append generated steps to an existing tutorial
    Add {
        /// Tutorial slug
        #[arg(long)]
        tutorial: String,
        /// Topic of the new steps
        #[arg(long)]
        topic: String,
        /// Learning objectives
        #[arg(long)]
        objectives: String,
        /// Target audience level
        #[arg(long, default_value = lesson_core::pipeline::DEFAULT_LEVEL)]
        level: String,
        /// Page to ground the lesson on
        #[arg(long)]
        url: Option<String>,
    },

    /// Create an empty tutorial with a generated environment Dockerfile
    Scaffold {
        /// Tutorial slug
        #[arg(long)]
        name: String,
        /// What the tutorial environment needs
        #[arg(long)]
        description: String,
    },

    /// Rewrite a file according to an instruction
    Update {
        /// File to rewrite in place
        #[arg(long)]
        file: PathBuf,
        /// What to change
        #[arg(long)]
        instruction: String,
    },

    /// Print the next release version from the package index
    NextVersion {
        /// major, minor, or patch (anything else bumps patch)
        #[arg(default_value = "patch")]
        bump: String,
        /// Package index user
        #[arg(long, env = "GITHUB_ACTOR")]
        actor: Option<String>,
        /// Package index token
        #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
        token: Option<String>,
    },

    /// Inspect and validate lessons.yaml
    Config {
        #[command(subcommand)]
        subcommand: ConfigSubcommand,
    },
}

fn main() {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let root = root::resolve_root(cli.root.as_deref());
    let provider = &cli.provider;

    let result = match cli.command {
        Commands::Create {
            name,
            topic,
            url,
            objectives,
            level,
            standalone,
        } => cmd::create::run(
            &root,
            provider,
            cmd::create::CreateArgs {
                name: &name,
                topic: topic.as_deref(),
                url: url.as_deref(),
                objectives: objectives.as_deref(),
                level: &level,
                standalone,
            },
            cli.json,
        ),
        Commands::Add {
            tutorial,
            topic,
            objectives,
            level,
            url,
        } => cmd::add::run(
            &root,
            provider,
            cmd::add::AddArgs {
                tutorial: &tutorial,
                topic: &topic,
                objectives: &objectives,
                level: &level,
                url: url.as_deref(),
            },
            cli.json,
        ),
        Commands::Scaffold { name, description } => {
            cmd::scaffold::run(&root, provider, &name, &description, cli.json)
        }
        Commands::Update { file, instruction } => {
            cmd::update::run(&root, provider, &file, &instruction, cli.json)
        }
        Commands::NextVersion { bump, actor, token } => {
            cmd::next_version::run(&root, &bump, actor, token, cli.json)
        }
        Commands::Config { subcommand } => cmd::config::run(&root, subcommand, cli.json),
    };

    if let Err(e) = result {
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}
