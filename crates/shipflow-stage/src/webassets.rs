//! Webアセットコレクター
//!
//! 静的コンテンツツリーをステージング配下にミラーします。
//! ディレクトリ構造は保持し、ホワイトリストの拡張子のみコピーします。

use crate::error::{StageError, StageResult};
use std::fs;
use std::path::Path;
use tracing::warn;

/// 静的コンテンツとしてミラーする拡張子（画像・マークアップ・スクリプト・スタイル）
pub const WEB_ASSET_EXTENSIONS: [&str; 16] = [
    "png", "jpg", "jpeg", "gif", "ico", "svg", "html", "htm", "js", "css", "map", "json", "woff",
    "woff2", "ttf", "eot",
];

/// 再帰の深さ上限。循環するディレクトリ構造で無限再帰しないための保険
const MAX_DEPTH: usize = 32;

/// 拡張子がホワイトリストに含まれるか
pub fn is_web_asset(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| WEB_ASSET_EXTENSIONS.contains(&e.to_ascii_lowercase().as_str()))
        .unwrap_or(false)
}

pub struct WebAssetCollector;

impl WebAssetCollector {
    /// src 以下を dest にミラーし、コピーしたファイル数を返す
    ///
    /// マッチするファイルに到達するのに必要なディレクトリだけを作成する。
    /// シンボリックリンクは辿らない。
    pub fn collect(src: &Path, dest: &Path) -> StageResult<usize> {
        if !src.is_dir() {
            return Err(StageError::StagingDir {
                path: src.to_path_buf(),
                message: "web asset source directory not found".to_string(),
            });
        }

        let mut copied = 0;
        Self::collect_dir(src, dest, 0, &mut copied)?;
        Ok(copied)
    }

    fn collect_dir(src: &Path, dest: &Path, depth: usize, copied: &mut usize) -> StageResult<()> {
        if depth > MAX_DEPTH {
            return Err(StageError::StagingDir {
                path: src.to_path_buf(),
                message: format!("directory nesting exceeds {} levels", MAX_DEPTH),
            });
        }

        for entry in fs::read_dir(src)? {
            let entry = entry?;
            let path = entry.path();
            let file_type = entry.file_type()?;

            if file_type.is_symlink() {
                warn!(path = %path.display(), "Skipping symlink in web assets");
                continue;
            }

            if file_type.is_dir() {
                Self::collect_dir(&path, &dest.join(entry.file_name()), depth + 1, copied)?;
            } else if is_web_asset(&path) {
                fs::create_dir_all(dest)?;
                fs::copy(&path, dest.join(entry.file_name()))?;
                *copied += 1;
            }
            // マッチしないファイルはエラーなしでスキップ
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_collect_filters_by_extension() {
        // web/index.html + app.js + notes.txt → index.html と app.js のみ
        let src = tempdir().unwrap();
        let dest = tempdir().unwrap();
        fs::write(src.path().join("index.html"), "<html></html>").unwrap();
        fs::write(src.path().join("app.js"), "void 0;").unwrap();
        fs::write(src.path().join("notes.txt"), "private").unwrap();

        let dest_dir = dest.path().join("web");
        let copied = WebAssetCollector::collect(src.path(), &dest_dir).unwrap();

        assert_eq!(copied, 2);
        assert!(dest_dir.join("index.html").exists());
        assert!(dest_dir.join("app.js").exists());
        assert!(!dest_dir.join("notes.txt").exists());
    }

    #[test]
    fn test_collect_mirrors_structure() {
        let src = tempdir().unwrap();
        let dest = tempdir().unwrap();
        fs::create_dir_all(src.path().join("css")).unwrap();
        fs::create_dir_all(src.path().join("img/icons")).unwrap();
        fs::write(src.path().join("css/site.css"), "body {}").unwrap();
        fs::write(src.path().join("img/icons/logo.png"), [0u8; 4]).unwrap();
        fs::write(src.path().join("index.html"), "<html></html>").unwrap();

        let dest_dir = dest.path().join("web");
        let copied = WebAssetCollector::collect(src.path(), &dest_dir).unwrap();

        assert_eq!(copied, 3);
        assert!(dest_dir.join("css/site.css").exists());
        assert!(dest_dir.join("img/icons/logo.png").exists());
        assert!(dest_dir.join("index.html").exists());
    }

    #[test]
    fn test_collect_skips_unneeded_directories() {
        // マッチするファイルのないサブディレクトリはミラー先に作られない
        let src = tempdir().unwrap();
        let dest = tempdir().unwrap();
        fs::create_dir_all(src.path().join("docs")).unwrap();
        fs::write(src.path().join("docs/manual.pdf"), [0u8; 4]).unwrap();
        fs::write(src.path().join("index.html"), "<html></html>").unwrap();

        let dest_dir = dest.path().join("web");
        let copied = WebAssetCollector::collect(src.path(), &dest_dir).unwrap();

        assert_eq!(copied, 1);
        assert!(!dest_dir.join("docs").exists());
    }

    #[test]
    fn test_collect_missing_source_is_error() {
        let dest = tempdir().unwrap();
        let result = WebAssetCollector::collect(Path::new("/nonexistent/web"), dest.path());
        assert!(result.is_err());
    }

    #[test]
    fn test_collect_idempotent_destination() {
        // 既存の出力先ディレクトリは許容される
        let src = tempdir().unwrap();
        let dest = tempdir().unwrap();
        fs::write(src.path().join("index.html"), "<html></html>").unwrap();

        let dest_dir = dest.path().join("web");
        fs::create_dir_all(&dest_dir).unwrap();

        WebAssetCollector::collect(src.path(), &dest_dir).unwrap();
        let copied = WebAssetCollector::collect(src.path(), &dest_dir).unwrap();
        assert_eq!(copied, 1);
    }

    #[cfg(unix)]
    #[test]
    fn test_collect_skips_symlinks() {
        let src = tempdir().unwrap();
        let dest = tempdir().unwrap();
        fs::write(src.path().join("index.html"), "<html></html>").unwrap();
        std::os::unix::fs::symlink(src.path().join("index.html"), src.path().join("link.html"))
            .unwrap();

        let dest_dir = dest.path().join("web");
        let copied = WebAssetCollector::collect(src.path(), &dest_dir).unwrap();

        assert_eq!(copied, 1);
        assert!(!dest_dir.join("link.html").exists());
    }
}
