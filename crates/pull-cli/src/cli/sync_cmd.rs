use super::shared::{StatusBoard, render_progress_line};
use super::*;

pub(super) fn handle_pull(
    args: PullArgs,
    store: &RepoListStore,
    runner: Arc<dyn GitRunner>,
) -> anyhow::Result<ExitCode> {
    let mut stdout = io::stdout().lock();
    let board = run_pull(&args, store, runner, &mut stdout)?;
    drop(stdout);

    let Some(board) = board else {
        println!("No repositories to pull.");
        return Ok(ExitCode::SUCCESS);
    };
    println!();
    print!("{}", board.render());
    if board.count(ItemStatus::Error) > 0 {
        Ok(ExitCode::FAILURE)
    } else {
        Ok(ExitCode::SUCCESS)
    }
}

/// Runs the batch and folds its events into a board covering every stored
/// row. Returns `None` when nothing was selected.
pub(super) fn run_pull(
    args: &PullArgs,
    store: &RepoListStore,
    runner: Arc<dyn GitRunner>,
    out: &mut impl Write,
) -> anyhow::Result<Option<StatusBoard>> {
    let (paths, rows) = if args.index.is_empty() {
        let paths = store.paths().to_vec();
        let rows = (0..paths.len()).collect();
        (paths, rows)
    } else {
        store.select(&args.index)?
    };
    if paths.is_empty() {
        return Ok(None);
    }

    let mut board = StatusBoard::new(store.paths());
    info!(count = paths.len(), "Starting pull");
    let handle = BatchRunner::new(paths, rows, runner)?.start();

    for event in handle.events.iter() {
        match event {
            ProgressEvent::LogAppended(text) => {
                out.write_all(text.as_bytes())?;
                out.flush()?;
            }
            ProgressEvent::StatusChanged { index, status } => board.set_status(index, status),
            ProgressEvent::ProgressChanged(percent) => {
                if !args.quiet {
                    eprintln!("{}", render_progress_line(percent, 30));
                }
            }
        }
    }
    let items = handle.wait()?;
    info!(
        total = items.len(),
        failed = board.count(ItemStatus::Error),
        "Pull finished"
    );
    Ok(Some(board))
}
