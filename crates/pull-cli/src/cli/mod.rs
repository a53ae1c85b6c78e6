use anyhow::Context;
use clap::Parser;
use pull_core::batch::BatchRunner;
use pull_core::error::StoreError;
use pull_core::git_sync::{CommandGitRunner, GitRunner};
use pull_core::model::{ItemStatus, ProgressEvent, RepositoryPath};
use pull_core::repo_status::{compute_repo_status, current_branch};
use pull_core::store::{RepoListStore, default_store_path};
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::prelude::*;

mod app;
mod args;
mod repo_cmd;
mod shared;
mod sync_cmd;

use args::*;

use repo_cmd::{handle_add, handle_list, handle_remove};
use sync_cmd::handle_pull;

pub fn run() -> anyhow::Result<ExitCode> {
    app::run()
}
