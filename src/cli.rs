use clap::Parser;

/// Delete a branch locally and on the remote it tracks.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(flatten)]
    pub remove: RemoveArgs,

    /// Print every git command that runs
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(clap::Args, Default)]
pub struct RemoveArgs {
    /// Branch to delete. Defaults to the current branch.
    pub name: Option<String>,

    /// Ask which remote branch to delete when no upstream is configured
    #[arg(short, long, conflicts_with = "local_only")]
    pub ask_remote: bool,

    /// Only delete the local branch
    #[arg(short, long)]
    pub local_only: bool,
}
