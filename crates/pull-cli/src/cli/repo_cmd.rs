use super::shared::{TableRow, render_table};
use super::*;

pub(super) fn handle_add(args: AddArgs, store: &mut RepoListStore) -> anyhow::Result<()> {
    if !args.path.is_dir() {
        anyhow::bail!("not a directory: {}", args.path.display());
    }
    let canonical = std::fs::canonicalize(&args.path)
        .with_context(|| format!("resolve {}", args.path.display()))?;
    let repo = RepositoryPath::new(canonical.display().to_string());
    if current_branch(repo.as_path()).is_none() {
        warn!(path = %repo, "directory has no checked-out branch; adding anyway");
    }
    match store.add(repo.clone()) {
        Ok(()) => {
            println!("Added {repo}");
            Ok(())
        }
        Err(StoreError::Duplicate(_)) => {
            println!("Warning: repository already added: {repo}");
            Ok(())
        }
        Err(err) => Err(err).context("save repository list"),
    }
}

pub(super) fn handle_remove(args: RemoveArgs, store: &mut RepoListStore) -> anyhow::Result<()> {
    if let Some(path) = args.path {
        let repo = resolve_listed_path(&path);
        store.remove(&repo)?;
        println!("Removed {repo}");
        return Ok(());
    }
    let (removed, _) = store.select(&args.index)?;
    store.remove_indices(&args.index)?;
    for repo in removed {
        println!("Removed {repo}");
    }
    Ok(())
}

pub(super) fn handle_list(store: &RepoListStore) -> anyhow::Result<()> {
    if store.paths().is_empty() {
        println!("No repositories configured. Use `add <PATH>` first.");
        return Ok(());
    }
    let rows: Vec<TableRow> = store
        .paths()
        .iter()
        .map(|repo| {
            let status = compute_repo_status(repo.as_path()).unwrap_or_default();
            let tracking = tracking_label(
                status.upstream.as_deref(),
                status.ahead,
                status.behind,
            );
            TableRow {
                path: repo.to_string(),
                branch: status.head_branch.unwrap_or_else(|| "?".to_string()),
                state: tracking,
            }
        })
        .collect();
    print!("{}", render_table(&rows, "Tracking"));
    Ok(())
}

/// Matches the canonical form `add` stores; paths that no longer exist are
/// taken verbatim.
fn resolve_listed_path(path: &str) -> RepositoryPath {
    match std::fs::canonicalize(path) {
        Ok(canonical) => RepositoryPath::new(canonical.display().to_string()),
        Err(_) => RepositoryPath::new(path),
    }
}

pub(super) fn tracking_label(
    upstream: Option<&str>,
    ahead: Option<u32>,
    behind: Option<u32>,
) -> String {
    match (upstream, ahead, behind) {
        (Some(upstream), Some(ahead), Some(behind)) => format!("{upstream} +{ahead}/-{behind}"),
        (Some(upstream), _, _) => upstream.to_string(),
        _ => "-".to_string(),
    }
}
