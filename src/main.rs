use anyhow::Result;
use clap::{Parser, Subcommand};
use sit::areas::repository::Repository;
use tracing_subscriber::EnvFilter;

const LOG_ENV: &str = "SIT_LOG";

#[derive(Parser)]
#[command(
    name = "sit",
    version,
    about = "A minimal version control system",
    long_about = "sit keeps content-addressed snapshots of a directory tree. \
    It supports staging, commits, branches, line diffs and fast-forward merges.",
    help_template = r"
{name} {version} - {about}

USAGE:
    {usage}

OPTIONS:
    {all-args}
"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(
        name = "init",
        about = "Initialize a new repository",
        long_about = "This command initializes a new repository in the current directory or at the specified path."
    )]
    Init {
        #[arg(index = 1, help = "The path to the repository")]
        path: Option<String>,
    },
    #[command(name = "status", about = "Show the working tree status")]
    Status {
        #[arg(long, help = "Give the output in a stable, short format")]
        porcelain: bool,
    },
    #[command(
        name = "add",
        about = "Add file contents to the index",
        long_about = "This command stores the given files as blobs and records them in the index. \
        Directories are added recursively."
    )]
    Add {
        #[arg(index = 1, required = true, help = "Files or directories to stage")]
        paths: Vec<String>,
    },
    #[command(
        name = "commit",
        about = "Create a new commit with the specified message",
        long_about = "This command creates a new commit in the repository with the specified commit message."
    )]
    Commit {
        #[arg(short, long, help = "The commit message")]
        message: String,
    },
    #[command(name = "log", about = "Show commit history")]
    Log {
        #[arg(long, help = "Show each commit on a single line")]
        oneline: bool,
    },
    #[command(
        name = "branch",
        about = "List or create branches",
        long_about = "Without a name, lists every branch and marks the current one. \
        With a name, creates a branch pointing at the current commit."
    )]
    Branch {
        #[arg(index = 1, help = "The name of the branch to create")]
        name: Option<String>,
    },
    #[command(name = "checkout", about = "Switch branches")]
    Checkout {
        #[arg(index = 1, help = "The branch to switch to")]
        branch: String,
    },
    #[command(name = "diff", about = "Show changes between the index and the working tree")]
    Diff,
    #[command(
        name = "merge",
        about = "Fast-forward the current branch to another branch",
        long_about = "Only fast-forward merges are supported; diverged branches are refused."
    )]
    Merge {
        #[arg(index = 1, help = "The branch to merge into the current one")]
        branch: String,
    },
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();
}

fn open_repository(path: Option<&str>) -> Result<Repository> {
    let path = match path {
        Some(path) => path.to_string(),
        None => std::env::current_dir()?.to_string_lossy().into_owned(),
    };

    Ok(Repository::new(&path, Box::new(std::io::stdout()))?)
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    let cli = Cli::parse();

    match &cli.command {
        Commands::Init { path } => open_repository(path.as_deref())?.init().await?,
        Commands::Status { porcelain } => open_repository(None)?.status(*porcelain).await?,
        Commands::Add { paths } => open_repository(None)?.add(paths).await?,
        Commands::Commit { message } => open_repository(None)?.commit(message).await?,
        Commands::Log { oneline } => open_repository(None)?.log(*oneline).await?,
        Commands::Branch { name } => {
            let mut repository = open_repository(None)?;

            match name {
                Some(name) => repository.branch(name).await?,
                None => repository.list_branches().await?,
            }
        }
        Commands::Checkout { branch } => open_repository(None)?.checkout(branch).await?,
        Commands::Diff => open_repository(None)?.diff().await?,
        Commands::Merge { branch } => open_repository(None)?.merge(branch).await?,
    }

    Ok(())
}
