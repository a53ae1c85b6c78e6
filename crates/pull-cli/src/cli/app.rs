use super::*;
pub fn run() -> anyhow::Result<ExitCode> {
    let filter = EnvFilter::from_default_env();
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let cli = Cli::parse();
    info!(command = command_label(&cli.command), "Running command");

    let store_path = match cli.store {
        Some(path) => path,
        None => default_store_path()?,
    };
    let mut store = RepoListStore::load(&store_path)
        .with_context(|| format!("load repository list {}", store_path.display()))?;
    let runner: Arc<dyn GitRunner> = Arc::new(CommandGitRunner::new(cli.git));

    match cli.command {
        Commands::Add(args) => handle_add(args, &mut store).map(|()| ExitCode::SUCCESS),
        Commands::Remove(args) => handle_remove(args, &mut store).map(|()| ExitCode::SUCCESS),
        Commands::List => handle_list(&store).map(|()| ExitCode::SUCCESS),
        Commands::Pull(args) => handle_pull(args, &store, runner),
    }
}

pub(super) fn command_label(command: &Commands) -> &'static str {
    match command {
        Commands::Add(_) => "add",
        Commands::Remove(_) => "remove",
        Commands::List => "list",
        Commands::Pull(_) => "pull",
    }
}
