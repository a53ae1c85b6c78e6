use super::*;

pub(in crate::cli) fn render_progress_bar(step: usize, total: usize, width: usize) -> String {
    if total == 0 || width == 0 {
        return "[]".to_string();
    }
    let filled = ((step as f32 / total as f32) * width as f32).round() as usize;
    let filled = filled.min(width);
    let empty = width.saturating_sub(filled);
    format!("[{}{}]", "#".repeat(filled), "-".repeat(empty))
}

pub(in crate::cli) fn render_progress_line(percent: u8, width: usize) -> String {
    let percent = percent.min(100);
    format!(
        "{} {percent:>3}%",
        render_progress_bar(percent as usize, 100, width)
    )
}

#[derive(Clone, Debug)]
pub(in crate::cli) struct TableRow {
    pub(in crate::cli) path: String,
    pub(in crate::cli) branch: String,
    pub(in crate::cli) state: String,
}

pub(in crate::cli) fn render_table(rows: &[TableRow], state_header: &str) -> String {
    let path_width = rows
        .iter()
        .map(|row| row.path.len())
        .chain(std::iter::once("Repository".len()))
        .max()
        .unwrap_or(0);
    let branch_width = rows
        .iter()
        .map(|row| row.branch.len())
        .chain(std::iter::once("Branch".len()))
        .max()
        .unwrap_or(0);
    let mut out = format!(
        "{:>3}  {:<path_width$}  {:<branch_width$}  {}\n",
        "#", "Repository", "Branch", state_header
    );
    for (index, row) in rows.iter().enumerate() {
        out.push_str(&format!(
            "{:>3}  {:<path_width$}  {:<branch_width$}  {}\n",
            index, row.path, row.branch, row.state
        ));
    }
    out
}

/// The caller's own copy of per-row results, updated only from events.
#[derive(Debug)]
pub(in crate::cli) struct StatusBoard {
    rows: Vec<TableRow>,
    statuses: Vec<Option<ItemStatus>>,
}

impl StatusBoard {
    pub(in crate::cli) fn new(paths: &[RepositoryPath]) -> Self {
        let rows = paths
            .iter()
            .map(|repo| TableRow {
                path: repo.to_string(),
                branch: current_branch(repo.as_path()).unwrap_or_else(|| "?".to_string()),
                state: "-".to_string(),
            })
            .collect();
        Self {
            rows,
            statuses: vec![None; paths.len()],
        }
    }

    pub(in crate::cli) fn set_status(&mut self, row: usize, status: ItemStatus) {
        let Some(slot) = self.statuses.get_mut(row) else {
            warn!(row, "status for unknown row");
            return;
        };
        *slot = Some(status);
        self.rows[row].state = status.as_str().to_string();
    }

    pub(in crate::cli) fn count(&self, status: ItemStatus) -> usize {
        self.statuses
            .iter()
            .filter(|slot| **slot == Some(status))
            .count()
    }

    pub(in crate::cli) fn render(&self) -> String {
        render_table(&self.rows, "Status")
    }
}
