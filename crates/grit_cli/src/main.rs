//! grit CLI - command-line interface for the grit version control engine.

use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "grit")]
#[command(about = "Single-user local version control", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize a new grit repository
    Init,
    /// Stage a file for the next commit
    Add {
        /// Path relative to the repository root
        path: String,
    },
    /// Mark a file for removal in the next commit
    Rm {
        /// Path relative to the repository root
        path: String,
    },
    /// Create a commit from the staged changes
    Commit {
        /// Commit message
        #[arg(short, long)]
        message: String,
    },
    /// Show the current branch's history
    Log,
    /// Show every commit ever created
    GlobalLog,
    /// Print the ids of commits with the exact message
    Find {
        /// Commit message to match
        message: String,
    },
    /// Show branches and the staged working set
    Status,
    /// Switch branches, or restore files into the working tree
    Checkout {
        /// Branch name, or commit id when --path is given
        target: Option<String>,
        /// Restore this file instead of switching branches
        #[arg(long)]
        path: Option<String>,
    },
    /// Create a branch at the current head
    Branch {
        /// New branch name
        name: String,
    },
    /// Remove a branch
    RmBranch {
        /// Branch name
        name: String,
    },
    /// Move the current branch's head to an existing commit
    Reset {
        /// Commit id (64 hex characters)
        commit: String,
    },
    /// Merge a branch's head into the working files
    Merge {
        /// Branch to merge from
        branch: String,
    },
    /// Replay this branch's commits on top of another branch
    Rebase {
        /// Branch to rebase onto
        branch: String,
        /// Prompt per commit (keep, reword, or drop)
        #[arg(short, long)]
        interactive: bool,
    },
    /// Manage remotes
    Remote {
        #[command(subcommand)]
        command: RemoteCommands,
    },
    /// Append this branch's new commits to a remote
    Push {
        /// Remote name
        remote: String,
        /// Branch name
        branch: String,
    },
    /// Bring a remote branch's new commits into this repository
    Pull {
        /// Remote name
        remote: String,
        /// Branch name
        branch: String,
    },
    /// Copy a remote repository into a fresh directory
    Clone {
        /// Remote name
        remote: String,
    },
}

#[derive(Subcommand)]
enum RemoteCommands {
    /// Register a remote
    Add {
        /// Remote name
        name: String,
        /// Login string, e.g. user@host
        login: String,
        /// Repository root at the remote side
        location: String,
    },
    /// Remove a remote
    Rm {
        /// Remote name
        name: String,
    },
    /// List registered remotes
    List,
}

fn main() -> Result<()> {
    // Respects RUST_LOG (e.g. RUST_LOG=debug)
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Init => commands::init::run(),
        Commands::Add { path } => commands::add::run(&path),
        Commands::Rm { path } => commands::rm::run(&path),
        Commands::Commit { message } => commands::commit::run(&message),
        Commands::Log => commands::log::run(),
        Commands::GlobalLog => commands::log::global(),
        Commands::Find { message } => commands::log::find(&message),
        Commands::Status => commands::status::run(),
        Commands::Checkout { target, path } => {
            commands::checkout::run(target.as_deref(), path.as_deref())
        }
        Commands::Branch { name } => commands::branch::create(&name),
        Commands::RmBranch { name } => commands::branch::remove(&name),
        Commands::Reset { commit } => commands::checkout::reset(&commit),
        Commands::Merge { branch } => commands::merge::run(&branch),
        Commands::Rebase {
            branch,
            interactive,
        } => commands::rebase::run(&branch, interactive),
        Commands::Remote { command } => match command {
            RemoteCommands::Add {
                name,
                login,
                location,
            } => commands::remote::add(&name, &login, &location),
            RemoteCommands::Rm { name } => commands::remote::remove(&name),
            RemoteCommands::List => commands::remote::list(),
        },
        Commands::Push { remote, branch } => commands::remote::push(&remote, &branch),
        Commands::Pull { remote, branch } => commands::remote::pull(&remote, &branch),
        Commands::Clone { remote } => commands::remote::clone(&remote),
    }
}
