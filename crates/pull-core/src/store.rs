use crate::error::StoreError;
use crate::model::RepositoryPath;
use anyhow::Context;
use directories::ProjectDirs;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// Ordered, duplicate-free list of managed repositories backed by a JSON file.
///
/// Every mutation is written through to disk before returning.
#[derive(Debug)]
pub struct RepoListStore {
    path: PathBuf,
    repos: Vec<RepositoryPath>,
}

impl RepoListStore {
    pub fn load(path: &Path) -> Result<Self, StoreError> {
        let repos = if path.exists() {
            let data = fs::read_to_string(path)?;
            serde_json::from_str(&data)?
        } else {
            Vec::new()
        };
        Ok(Self {
            path: path.to_path_buf(),
            repos,
        })
    }

    pub fn save(&self) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }
        let data = serde_json::to_string_pretty(&self.repos)?;
        fs::write(&self.path, data)?;
        Ok(())
    }

    pub fn paths(&self) -> &[RepositoryPath] {
        &self.repos
    }

    pub fn contains(&self, repo: &RepositoryPath) -> bool {
        self.repos.contains(repo)
    }

    pub fn add(&mut self, repo: RepositoryPath) -> Result<(), StoreError> {
        if self.contains(&repo) {
            return Err(StoreError::Duplicate(repo.to_string()));
        }
        info!(path = %repo, "adding repository");
        self.repos.push(repo);
        self.save()
    }

    pub fn remove(&mut self, repo: &RepositoryPath) -> Result<(), StoreError> {
        let index = self
            .repos
            .iter()
            .position(|existing| existing == repo)
            .ok_or_else(|| StoreError::NotFound(repo.to_string()))?;
        info!(path = %repo, "removing repository");
        self.repos.remove(index);
        self.save()
    }

    pub fn remove_indices(&mut self, indices: &[usize]) -> Result<(), StoreError> {
        let rows = self.checked_rows(indices)?;
        for row in rows.into_iter().rev() {
            let repo = self.repos.remove(row);
            info!(path = %repo, "removing repository");
        }
        self.save()
    }

    /// Paths for the given rows plus their row numbers, sorted and
    /// de-duplicated, ready for a partial batch.
    pub fn select(
        &self,
        indices: &[usize],
    ) -> Result<(Vec<RepositoryPath>, Vec<usize>), StoreError> {
        let rows = self.checked_rows(indices)?;
        let paths = rows.iter().map(|&row| self.repos[row].clone()).collect();
        Ok((paths, rows))
    }

    fn checked_rows(&self, indices: &[usize]) -> Result<Vec<usize>, StoreError> {
        let len = self.repos.len();
        if let Some(&index) = indices.iter().find(|&&index| index >= len) {
            return Err(StoreError::IndexOutOfRange { index, len });
        }
        let mut rows = indices.to_vec();
        rows.sort_unstable();
        rows.dedup();
        Ok(rows)
    }
}

pub fn default_store_path() -> anyhow::Result<PathBuf> {
    let project = ProjectDirs::from("com", "git-pull-manager", "git-pull-manager")
        .context("resolve project dirs")?;
    Ok(project.config_dir().join("repos.json"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_file_loads_empty() {
        let tmp = TempDir::new().unwrap();
        let store = RepoListStore::load(&tmp.path().join("repos.json")).unwrap();
        assert!(store.paths().is_empty());
    }

    #[test]
    fn add_persists_and_rejects_duplicates() {
        let tmp = TempDir::new().unwrap();
        let file = tmp.path().join("nested").join("repos.json");
        let mut store = RepoListStore::load(&file).unwrap();
        store.add("/repos/a".into()).unwrap();
        store.add("/repos/b".into()).unwrap();
        assert!(matches!(
            store.add("/repos/a".into()),
            Err(StoreError::Duplicate(_))
        ));

        let reloaded = RepoListStore::load(&file).unwrap();
        assert_eq!(
            reloaded.paths(),
            &[RepositoryPath::new("/repos/a"), RepositoryPath::new("/repos/b")]
        );
    }

    #[test]
    fn file_is_plain_json_array() {
        let tmp = TempDir::new().unwrap();
        let file = tmp.path().join("repos.json");
        let mut store = RepoListStore::load(&file).unwrap();
        store.add("/repos/a".into()).unwrap();
        let value: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&file).unwrap()).unwrap();
        assert_eq!(value, serde_json::json!(["/repos/a"]));
    }

    #[test]
    fn remove_indices_handles_unsorted_rows() {
        let tmp = TempDir::new().unwrap();
        let file = tmp.path().join("repos.json");
        let mut store = RepoListStore::load(&file).unwrap();
        for repo in ["/a", "/b", "/c", "/d"] {
            store.add(repo.into()).unwrap();
        }
        store.remove_indices(&[3, 0, 3]).unwrap();
        assert_eq!(
            store.paths(),
            &[RepositoryPath::new("/b"), RepositoryPath::new("/c")]
        );
        assert!(matches!(
            store.remove_indices(&[5]),
            Err(StoreError::IndexOutOfRange { index: 5, len: 2 })
        ));
    }

    #[test]
    fn remove_unknown_path_fails() {
        let tmp = TempDir::new().unwrap();
        let mut store = RepoListStore::load(&tmp.path().join("repos.json")).unwrap();
        assert!(matches!(
            store.remove(&"/nope".into()),
            Err(StoreError::NotFound(_))
        ));
    }

    #[test]
    fn select_returns_sorted_rows_with_paths() {
        let tmp = TempDir::new().unwrap();
        let mut store = RepoListStore::load(&tmp.path().join("repos.json")).unwrap();
        for repo in ["/a", "/b", "/c"] {
            store.add(repo.into()).unwrap();
        }
        let (paths, rows) = store.select(&[2, 0]).unwrap();
        assert_eq!(rows, vec![0, 2]);
        assert_eq!(paths, vec![RepositoryPath::new("/a"), RepositoryPath::new("/c")]);
    }
}
