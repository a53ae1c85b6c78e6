use git2::{BranchType, Repository};
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RepoLocalStatus {
    pub head_branch: Option<String>,
    pub upstream: Option<String>,
    pub ahead: Option<u32>,
    pub behind: Option<u32>,
}

pub fn current_branch(path: &Path) -> Option<String> {
    let repo = Repository::open(path).ok()?;
    let head = repo.head().ok()?;
    if !head.is_branch() {
        return None;
    }
    head.shorthand().map(|name| name.to_string())
}

/// Local-only view of a repository's branch state. Unreadable repos yield an
/// empty status rather than an error.
pub fn compute_repo_status(path: &Path) -> anyhow::Result<RepoLocalStatus> {
    let mut status = RepoLocalStatus::default();
    let Ok(repo) = Repository::open(path) else {
        return Ok(status);
    };
    let Ok(head) = repo.head() else {
        return Ok(status);
    };

    if head.is_branch() {
        status.head_branch = head.shorthand().map(|name| name.to_string());
    }

    if let Some(branch_name) = status.head_branch.as_deref()
        && let Ok(branch) = repo.find_branch(branch_name, BranchType::Local)
        && let Ok(upstream) = branch.upstream()
    {
        if let Some(name) = upstream.get().shorthand() {
            status.upstream = Some(name.to_string());
        }
        if let (Some(local_oid), Some(upstream_oid)) = (head.target(), upstream.get().target()) {
            let (ahead, behind) = repo.graph_ahead_behind(local_oid, upstream_oid)?;
            status.ahead = Some(ahead as u32);
            status.behind = Some(behind as u32);
        }
    }

    Ok(status)
}

#[cfg(test)]
mod tests {
    use super::*;
    use git2::{Commit, Oid, Signature};
    use tempfile::TempDir;

    fn commit_file(repo: &Repository, name: &str, contents: &str, parents: &[&Commit<'_>]) -> Oid {
        let repo_dir = repo.workdir().unwrap();
        std::fs::write(repo_dir.join(name), contents).unwrap();
        let mut index = repo.index().unwrap();
        index.add_path(Path::new(name)).unwrap();
        let tree_id = index.write_tree().unwrap();
        let tree = repo.find_tree(tree_id).unwrap();
        let sig = Signature::now("tester", "tester@example.com").unwrap();
        repo.commit(Some("HEAD"), &sig, &sig, "commit", &tree, parents)
            .unwrap()
    }

    #[test]
    fn branch_is_none_outside_a_repo() {
        let temp = TempDir::new().unwrap();
        assert_eq!(current_branch(temp.path()), None);
        assert_eq!(
            compute_repo_status(temp.path()).unwrap(),
            RepoLocalStatus::default()
        );
    }

    #[test]
    fn reports_branch_and_behind_count() {
        let temp = TempDir::new().unwrap();
        let repo = Repository::init(temp.path()).unwrap();

        let first = commit_file(&repo, "a.txt", "a", &[]);
        let first_commit = repo.find_commit(first).unwrap();
        repo.branch("trunk", &first_commit, true).unwrap();
        repo.set_head("refs/heads/trunk").unwrap();
        assert_eq!(current_branch(temp.path()).as_deref(), Some("trunk"));

        let second = commit_file(&repo, "b.txt", "b", &[&first_commit]);
        repo.remote("origin", "https://example.com/repo.git")
            .unwrap();
        repo.reference("refs/remotes/origin/trunk", second, true, "origin trunk")
            .unwrap();
        repo.reference("refs/heads/trunk", first, true, "rewind trunk")
            .unwrap();
        let mut branch = repo.find_branch("trunk", BranchType::Local).unwrap();
        branch.set_upstream(Some("origin/trunk")).unwrap();

        let status = compute_repo_status(temp.path()).unwrap();
        assert_eq!(status.head_branch.as_deref(), Some("trunk"));
        assert_eq!(status.upstream.as_deref(), Some("origin/trunk"));
        assert_eq!(status.ahead, Some(0));
        assert_eq!(status.behind, Some(1));
    }
}
