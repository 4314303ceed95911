//! 成果物コレクター
//!
//! build-root/{library}/ 配下のビルド成果物をステージングディレクトリに
//! コピーします。対象はバイナリ・実行ファイル・設定・ドキュメントの
//! 固定拡張子セットのみ。

use crate::error::{CopyFailure, MissingReason, StageError, StageResult};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// ステージング対象の成果物サフィックス
pub const ARTIFACT_SUFFIXES: [&str; 4] = [".dll", ".exe", ".config", ".xml"];

/// 成果物サフィックスに一致するか
pub fn is_artifact(name: &str) -> bool {
    ARTIFACT_SUFFIXES.iter().any(|s| name.ends_with(s))
}

pub struct ArtifactCollector {
    build_root: PathBuf,
}

impl ArtifactCollector {
    pub fn new(build_root: impl Into<PathBuf>) -> Self {
        Self {
            build_root: build_root.into(),
        }
    }

    /// ライブラリの規約上の出力ディレクトリ
    pub fn library_dir(&self, library: &str) -> PathBuf {
        self.build_root.join(library)
    }

    /// ライブラリの成果物を dest にコピーし、コピーしたファイル名を返す
    ///
    /// 「ディレクトリ不在」と「対象ファイルなし」は区別してエラーにする。
    /// 個々のコピー失敗は集約して返す。
    pub fn collect(&self, library: &str, dest: &Path) -> StageResult<Vec<String>> {
        let src = self.library_dir(library);
        if !src.is_dir() {
            return Err(StageError::MissingArtifact {
                library: library.to_string(),
                path: src,
                reason: MissingReason::SourceDirAbsent,
            });
        }

        let mut copied = Vec::new();
        let mut failures = Vec::new();

        for entry in fs::read_dir(&src)? {
            let entry = entry?;
            let path = entry.path();
            if !path.is_file() {
                continue;
            }
            let Some(name) = path.file_name().and_then(|n| n.to_str()).map(String::from) else {
                continue;
            };
            if !is_artifact(&name) {
                continue;
            }

            let to = dest.join(&name);
            match fs::copy(&path, &to) {
                Ok(_) => {
                    debug!(from = %path.display(), to = %to.display(), "Copied artifact");
                    copied.push(name);
                }
                Err(e) => failures.push(CopyFailure {
                    from: path,
                    to,
                    message: e.to_string(),
                }),
            }
        }

        if !failures.is_empty() {
            return Err(StageError::CopyFailures { failures });
        }
        if copied.is_empty() {
            return Err(StageError::MissingArtifact {
                library: library.to_string(),
                path: src,
                reason: MissingReason::NothingToCopy,
            });
        }

        copied.sort();
        Ok(copied)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn write_library(root: &Path, library: &str, files: &[&str]) {
        let dir = root.join(library);
        fs::create_dir_all(&dir).unwrap();
        for file in files {
            fs::write(dir.join(file), format!("content of {}", file)).unwrap();
        }
    }

    #[test]
    fn test_collect_exact_extension_set() {
        let root = tempdir().unwrap();
        let dest = tempdir().unwrap();
        write_library(
            root.path(),
            "Acme.Core",
            &[
                "Acme.Core.dll",
                "Acme.Core.exe",
                "Acme.Core.exe.config",
                "Acme.Core.xml",
                "Acme.Core.pdb",
                "readme.txt",
            ],
        );

        let collector = ArtifactCollector::new(root.path());
        let copied = collector.collect("Acme.Core", dest.path()).unwrap();

        // 対象拡張子のみ、それ以外は一切コピーされない
        assert_eq!(
            copied,
            vec![
                "Acme.Core.dll",
                "Acme.Core.exe",
                "Acme.Core.exe.config",
                "Acme.Core.xml",
            ]
        );
        assert!(dest.path().join("Acme.Core.dll").exists());
        assert!(!dest.path().join("Acme.Core.pdb").exists());
        assert!(!dest.path().join("readme.txt").exists());
    }

    #[test]
    fn test_collect_end_to_end_scenario() {
        // libs/Foo/Foo.dll + Foo.exe.config → ちょうどその2つ
        let root = tempdir().unwrap();
        let dest = tempdir().unwrap();
        write_library(root.path(), "Foo", &["Foo.dll", "Foo.exe.config"]);

        let collector = ArtifactCollector::new(root.path());
        let copied = collector.collect("Foo", dest.path()).unwrap();

        assert_eq!(copied, vec!["Foo.dll", "Foo.exe.config"]);
        let entries: Vec<_> = fs::read_dir(dest.path()).unwrap().collect();
        assert_eq!(entries.len(), 2);
    }

    #[test]
    fn test_collect_source_dir_absent() {
        let root = tempdir().unwrap();
        let dest = tempdir().unwrap();

        let collector = ArtifactCollector::new(root.path());
        let err = collector.collect("Missing.Lib", dest.path()).unwrap_err();

        assert!(matches!(
            err,
            StageError::MissingArtifact {
                reason: MissingReason::SourceDirAbsent,
                ..
            }
        ));
    }

    #[test]
    fn test_collect_nothing_to_copy() {
        let root = tempdir().unwrap();
        let dest = tempdir().unwrap();
        write_library(root.path(), "Acme.Docs", &["notes.txt", "diagram.png"]);

        let collector = ArtifactCollector::new(root.path());
        let err = collector.collect("Acme.Docs", dest.path()).unwrap_err();

        assert!(matches!(
            err,
            StageError::MissingArtifact {
                reason: MissingReason::NothingToCopy,
                ..
            }
        ));
    }

    #[test]
    fn test_collect_overwrites_existing() {
        let root = tempdir().unwrap();
        let dest = tempdir().unwrap();
        write_library(root.path(), "Acme.Core", &["Acme.Core.dll"]);
        fs::write(dest.path().join("Acme.Core.dll"), "stale").unwrap();

        let collector = ArtifactCollector::new(root.path());
        collector.collect("Acme.Core", dest.path()).unwrap();

        let content = fs::read_to_string(dest.path().join("Acme.Core.dll")).unwrap();
        assert_eq!(content, "content of Acme.Core.dll");
    }
}
