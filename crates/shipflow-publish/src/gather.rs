//! 公開対象パッケージの集約
//!
//! ローカルビルド分と外部生成分を publish ディレクトリに集めます。
//! こちらは公開済み集合の差し引きをしない（全量を集める）。

use crate::error::{PublishError, PublishResult};
use shipflow_stage::available_packages;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// パッケージを publish_dir に集約し、集めたファイルのパスを返す
///
/// publish_dir は毎回作り直す。同名パッケージはファイル名で重複排除。
pub fn gather_packages(
    packages_root: &Path,
    external_packages: Option<&Path>,
    publish_dir: &Path,
) -> PublishResult<Vec<PathBuf>> {
    let found = available_packages(packages_root, external_packages)
        .map_err(|e| PublishError::Gather(e.to_string()))?;

    if publish_dir.exists() {
        fs::remove_dir_all(publish_dir)?;
    }
    fs::create_dir_all(publish_dir)?;

    let mut gathered = Vec::new();
    for (name, path) in found {
        let to = publish_dir.join(&name);
        fs::copy(&path, &to)?;
        debug!(package = %to.display(), "Gathered package");
        gathered.push(to);
    }

    Ok(gathered)
}
