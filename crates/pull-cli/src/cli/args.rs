use super::*;
#[derive(Parser)]
#[command(author, version, about = "Fetch and pull a saved list of git repositories")]
pub(super) struct Cli {
    #[arg(
        long,
        global = true,
        help = "Repository list file (defaults to the per-user config dir)"
    )]
    pub(super) store: Option<PathBuf>,
    #[arg(long, global = true, default_value = "git", help = "Git executable to invoke")]
    pub(super) git: String,
    #[command(subcommand)]
    pub(super) command: Commands,
}

#[derive(clap::Subcommand)]
pub(super) enum Commands {
    #[command(about = "Add a repository directory to the list")]
    Add(AddArgs),
    #[command(about = "Remove repositories by path or row index")]
    Remove(RemoveArgs),
    #[command(about = "Show managed repositories and their branches")]
    List,
    #[command(about = "Fetch and pull all or selected repositories")]
    Pull(PullArgs),
}

#[derive(Parser)]
pub(super) struct AddArgs {
    pub(super) path: PathBuf,
}

#[derive(Parser)]
pub(super) struct RemoveArgs {
    #[arg(conflicts_with = "index", required_unless_present = "index")]
    pub(super) path: Option<String>,
    #[arg(long, value_delimiter = ',')]
    pub(super) index: Vec<usize>,
}

#[derive(Parser)]
pub(super) struct PullArgs {
    #[arg(
        long,
        value_delimiter = ',',
        help = "Row indices from `list` to pull; pulls everything when omitted"
    )]
    pub(super) index: Vec<usize>,
    #[arg(long, help = "Suppress the progress bar")]
    pub(super) quiet: bool,
}
