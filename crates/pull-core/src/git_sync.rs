use crate::error::LocalInvocationFailure;
use crate::model::SyncResult;
use std::io;
use std::path::Path;
use std::process::{Command, Stdio};
use tracing::{info, warn};

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct GitOutput {
    pub success: bool,
    pub code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

pub trait GitRunner: Send + Sync {
    /// Runs the tool against `repo` and waits for it to exit.
    ///
    /// An `Err` means no process ran; a process that ran and failed is an
    /// `Ok` with `success == false`.
    fn run_git(&self, repo: &Path, args: &[&str]) -> io::Result<GitOutput>;

    fn tool_name(&self) -> &str {
        "git"
    }
}

#[derive(Clone, Debug)]
pub struct CommandGitRunner {
    program: String,
}

impl CommandGitRunner {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl Default for CommandGitRunner {
    fn default() -> Self {
        Self::new("git")
    }
}

impl GitRunner for CommandGitRunner {
    fn run_git(&self, repo: &Path, args: &[&str]) -> io::Result<GitOutput> {
        let output = Command::new(&self.program)
            .arg("-C")
            .arg(repo)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()?;
        Ok(GitOutput {
            success: output.status.success(),
            code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }

    fn tool_name(&self) -> &str {
        &self.program
    }
}

/// Fetches then pulls `repo_path`. Never fails; every problem lands in the
/// returned `SyncResult`.
pub fn sync_repo(runner: &dyn GitRunner, repo_path: &Path) -> SyncResult {
    if !repo_path.is_dir() {
        warn!(path = %repo_path.display(), "repository path missing");
        return SyncResult::local_failure(LocalInvocationFailure::PathMissing(
            repo_path.display().to_string(),
        ));
    }

    let refresh_warning = fetch_best_effort(runner, repo_path);

    info!(path = %repo_path.display(), "pulling");
    match runner.run_git(repo_path, &["pull"]) {
        Ok(output) => {
            if !output.success {
                warn!(path = %repo_path.display(), code = ?output.code, "pull failed");
            }
            SyncResult::completed(output.success, output.stdout, output.stderr)
                .with_refresh_warning(refresh_warning)
        }
        Err(err) => SyncResult::local_failure(classify_spawn_error(runner, repo_path, &err))
            .with_refresh_warning(refresh_warning),
    }
}

fn fetch_best_effort(runner: &dyn GitRunner, repo_path: &Path) -> Option<String> {
    info!(path = %repo_path.display(), "fetching");
    match runner.run_git(repo_path, &["fetch"]) {
        Ok(output) if output.success => None,
        Ok(output) => {
            let reason = match output.stderr.trim() {
                "" => match output.code {
                    Some(code) => format!("exit code {code}"),
                    None => "terminated by signal".to_string(),
                },
                text => text.to_string(),
            };
            warn!(path = %repo_path.display(), reason = %reason, "fetch failed; continuing");
            Some(reason)
        }
        Err(err) => {
            warn!(path = %repo_path.display(), error = %err, "fetch could not start; continuing");
            Some(err.to_string())
        }
    }
}

fn classify_spawn_error(
    runner: &dyn GitRunner,
    repo_path: &Path,
    err: &io::Error,
) -> LocalInvocationFailure {
    warn!(path = %repo_path.display(), error = %err, "pull could not start");
    match err.kind() {
        io::ErrorKind::NotFound => LocalInvocationFailure::ToolNotFound(runner.tool_name().to_string()),
        io::ErrorKind::PermissionDenied => {
            LocalInvocationFailure::PermissionDenied(repo_path.display().to_string())
        }
        _ => LocalInvocationFailure::Spawn(err.to_string()),
    }
}
