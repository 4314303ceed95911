//! パッケージステージャー
//!
//! ローカルビルドされたパッケージと外部生成パッケージのうち、
//! まだ公開されていないものをキャッシュディレクトリに集めます。
//! 実体は「利用可能集合 A \ 公開済み集合 P」の差集合。

use crate::error::{StageError, StageResult};
use std::collections::{BTreeMap, HashSet};
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// パッケージアーカイブのサフィックス
pub const PACKAGE_SUFFIX: &str = ".nupkg";

pub struct PackageStager {
    packages_root: PathBuf,
    external_packages: Option<PathBuf>,
    published_root: PathBuf,
}

impl PackageStager {
    pub fn new(
        packages_root: impl Into<PathBuf>,
        external_packages: Option<PathBuf>,
        published_root: impl Into<PathBuf>,
    ) -> Self {
        Self {
            packages_root: packages_root.into(),
            external_packages,
            published_root: published_root.into(),
        }
    }

    /// 公開済みパッケージのファイル名集合（ディレクトリ不在なら空集合）
    fn published_set(&self) -> StageResult<HashSet<OsString>> {
        let mut set = HashSet::new();
        if self.published_root.is_dir() {
            for entry in fs::read_dir(&self.published_root)? {
                set.insert(entry?.file_name());
            }
        }
        Ok(set)
    }

    /// 未公開パッケージを列挙
    ///
    /// ファイル名で重複排除するため、結果の集合はソースディレクトリの
    /// 列挙順に依存しない。返り値はファイル名順。
    pub fn unpublished(&self) -> StageResult<Vec<PathBuf>> {
        let published = self.published_set()?;
        let found = available_packages(&self.packages_root, self.external_packages.as_deref())?;

        Ok(found
            .into_iter()
            .filter(|(name, _)| !published.contains(name))
            .map(|(_, path)| path)
            .collect())
    }

    /// キャッシュディレクトリを作り直して未公開パッケージをコピー
    pub fn stage(&self, cache_dir: &Path) -> StageResult<Vec<String>> {
        if cache_dir.exists() {
            fs::remove_dir_all(cache_dir)?;
        }
        fs::create_dir_all(cache_dir)?;

        let mut staged = Vec::new();
        for path in self.unpublished()? {
            let Some(name) = path.file_name().and_then(|n| n.to_str()).map(String::from) else {
                continue;
            };
            fs::copy(&path, cache_dir.join(&name)).map_err(|e| StageError::StagingDir {
                path: path.clone(),
                message: e.to_string(),
            })?;
            debug!(package = %name, "Staged package");
            staged.push(name);
        }

        Ok(staged)
    }
}

/// packages-root のサブディレクトリと外部ディレクトリから利用可能な
/// パッケージを列挙（ファイル名 → パス、ファイル名で重複排除）
pub fn available_packages(
    packages_root: &Path,
    external_packages: Option<&Path>,
) -> StageResult<BTreeMap<OsString, PathBuf>> {
    let mut found: BTreeMap<OsString, PathBuf> = BTreeMap::new();

    if packages_root.is_dir() {
        for entry in fs::read_dir(packages_root)? {
            let entry = entry?;
            let path = entry.path();
            if path.is_dir() {
                scan_packages(&path, &mut found)?;
            }
        }
    }

    if let Some(external) = external_packages
        && external.is_dir()
    {
        scan_packages(external, &mut found)?;
    }

    Ok(found)
}

fn scan_packages(dir: &Path, found: &mut BTreeMap<OsString, PathBuf>) -> StageResult<()> {
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        let is_package = path.is_file()
            && path
                .file_name()
                .and_then(|n| n.to_str())
                .map(|n| n.ends_with(PACKAGE_SUFFIX))
                .unwrap_or(false);
        if is_package {
            // 同名は後勝ち。名前で重複排除するので集合としては順序不変
            found.insert(entry.file_name(), path);
        }
    }
    Ok(())
}
