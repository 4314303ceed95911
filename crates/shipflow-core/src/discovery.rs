//! プロジェクトルート検出
//!
//! カレントディレクトリから上に向かって ship.kdl を探します。

use crate::error::{Result, ShipError};
use std::path::PathBuf;
use tracing::{debug, info, warn};

/// 設定ファイル名
pub const CONFIG_FILE: &str = "ship.kdl";

/// プロジェクトルートを検出
///
/// 以下の優先順位で検索:
/// 1. 環境変数 SHIPFLOW_PROJECT_ROOT
/// 2. カレントディレクトリから上に向かって ship.kdl を探す
#[tracing::instrument]
pub fn find_project_root() -> Result<PathBuf> {
    // 1. 環境変数
    if let Ok(root) = std::env::var("SHIPFLOW_PROJECT_ROOT") {
        let path = PathBuf::from(&root);
        debug!(env_root = %root, "Checking SHIPFLOW_PROJECT_ROOT");
        if path.join(CONFIG_FILE).exists() {
            info!(project_root = %path.display(), "Found project root from environment variable");
            return Ok(path);
        }
    }

    // 2. カレントディレクトリから上に向かって探す
    let start_dir = std::env::current_dir()?;
    let mut current = start_dir.clone();
    debug!(start_dir = %start_dir.display(), "Searching for project root");

    loop {
        let config = current.join(CONFIG_FILE);
        if config.exists() {
            info!(project_root = %current.display(), "Found project root");
            return Ok(current);
        }

        if !current.pop() {
            break;
        }
    }

    warn!(start_dir = %start_dir.display(), "Project root not found");
    Err(ShipError::ProjectRootNotFound(start_dir))
}
