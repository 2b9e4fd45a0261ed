use anyhow::Result;
use clap::{Parser, Subcommand};
use jot::areas::repository::Repository;

#[derive(Parser)]
#[command(
    name = "jot",
    version = "0.1.0",
    about = "A minimal version-control system",
    long_about = "jot is a minimal version-control system: it snapshots a working \
    directory over time, branches and switches between snapshots, and merges \
    divergent histories with three-way conflict marking.",
    help_template = r"
{name} {version} - {about}

USAGE:
    {usage}

OPTIONS:
    {all-args}
",
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(
        name = "init",
        about = "Initialize a new repository in the current directory"
    )]
    Init,
    #[command(name = "add", about = "Stage a file for inclusion in the next commit")]
    Add {
        #[arg(index = 1, help = "The file to stage")]
        file: String,
    },
    #[command(name = "commit", about = "Create a new commit from the staged changes")]
    Commit {
        #[arg(short, long, help = "The commit message")]
        message: String,
    },
    #[command(
        name = "rm",
        about = "Stage a tracked file for removal and delete it from the working tree"
    )]
    Rm {
        #[arg(index = 1, help = "The file to remove")]
        file: String,
    },
    #[command(name = "log", about = "Show the current branch's history")]
    Log,
    #[command(name = "global-log", about = "Show every commit ever made")]
    GlobalLog,
    #[command(name = "find", about = "Print the ids of commits with the given message")]
    Find {
        #[arg(index = 1, help = "The exact commit message to search for")]
        message: String,
    },
    #[command(
        name = "status",
        about = "Show branches, staged changes, and untracked files"
    )]
    Status,
    #[command(
        name = "checkout",
        about = "Switch branches or restore a file from a commit",
        long_about = "Switch to a branch (checkout <branch>), restore a file from HEAD \
        (checkout -f <file>), or restore a file from a specific commit \
        (checkout <commit-id> -f <file>)."
    )]
    Checkout {
        #[arg(index = 1, help = "The branch name or commit id to check out from")]
        target: Option<String>,
        #[arg(short, long, help = "The file to restore")]
        file: Option<String>,
    },
    #[command(name = "branch", about = "Create a new branch pointing at HEAD")]
    Branch {
        #[arg(index = 1, help = "The branch name")]
        name: String,
    },
    #[command(name = "rm-branch", about = "Delete a branch pointer")]
    RmBranch {
        #[arg(index = 1, help = "The branch name")]
        name: String,
    },
    #[command(
        name = "reset",
        about = "Sync the working tree to a commit and move the current branch there"
    )]
    Reset {
        #[arg(index = 1, help = "The commit id (or unique prefix)")]
        commit: String,
    },
    #[command(name = "merge", about = "Merge the given branch into the current one")]
    Merge {
        #[arg(index = 1, help = "The branch to merge in")]
        branch: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let pwd = std::env::current_dir()?;
    let mut repository = Repository::new(&pwd.to_string_lossy(), Box::new(std::io::stdout()))?;

    match &cli.command {
        Commands::Init => repository.init()?,
        Commands::Add { file } => repository.add(file)?,
        Commands::Commit { message } => repository.commit(message)?,
        Commands::Rm { file } => repository.rm(file)?,
        Commands::Log => repository.log()?,
        Commands::GlobalLog => repository.global_log()?,
        Commands::Find { message } => repository.find(message)?,
        Commands::Status => repository.status()?,
        Commands::Checkout { target, file } => match (target, file) {
            (Some(branch), None) => repository.checkout_branch(branch)?,
            (None, Some(file)) => repository.checkout_file(file)?,
            (Some(commit), Some(file)) => repository.checkout_commit_file(commit, file)?,
            (None, None) => anyhow::bail!("Incorrect operands."),
        },
        Commands::Branch { name } => repository.branch(name)?,
        Commands::RmBranch { name } => repository.rm_branch(name)?,
        Commands::Reset { commit } => repository.reset(commit)?,
        Commands::Merge { branch } => repository.merge(branch)?,
    }

    Ok(())
}
