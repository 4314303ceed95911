//! ステージングパイプライン
//!
//! ターゲットごとに Clean → Create → Collect-Artifacts [→ Web-Assets]
//! [→ Correct-Versions] [→ Stage-Packages] を順に実行します。
//! 各ステップは次のステップの前提条件で、失敗したらそのターゲットは
//! 即座に中断します（部分的にステージングされたままビルドに進まない）。

use crate::artifacts::ArtifactCollector;
use crate::error::{CopyFailure, StageError, StageResult};
use crate::packages::PackageStager;
use crate::versions::VersionCorrector;
use crate::webassets::WebAssetCollector;
use colored::Colorize;
use shipflow_core::{Ship, Target};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// 1ターゲット分のステージング結果
#[derive(Debug)]
pub struct StagingSummary {
    pub staging_dir: PathBuf,
    pub artifacts: Vec<String>,
    pub web_assets: usize,
    pub packages: Vec<String>,
}

pub struct StagePipeline<'a> {
    project_root: &'a Path,
    ship: &'a Ship,
}

impl<'a> StagePipeline<'a> {
    pub fn new(project_root: &'a Path, ship: &'a Ship) -> Self {
        Self { project_root, ship }
    }

    /// ターゲットのステージングディレクトリ
    pub fn staging_dir(&self, target_name: &str) -> PathBuf {
        self.project_root
            .join(&self.ship.layout.staging_root)
            .join(target_name)
    }

    /// ステージングディレクトリを削除
    pub fn clean(&self, target_name: &str) -> StageResult<()> {
        let dir = self.staging_dir(target_name);
        if dir.exists() {
            fs::remove_dir_all(&dir)?;
        }
        Ok(())
    }

    /// ステージング一式を実行
    pub async fn run(&self, target_name: &str, target: &Target) -> StageResult<StagingSummary> {
        let staging_dir = self.staging_dir(target_name);
        info!(name = target_name, dir = %staging_dir.display(), "Staging target");

        // 毎回作り直す。前回の残骸はコンテキストに持ち込まない
        self.clean(target_name)?;
        fs::create_dir_all(&staging_dir)?;

        // 成果物の収集
        let collector =
            ArtifactCollector::new(self.project_root.join(&self.ship.layout.build_root));
        let mut artifacts = Vec::new();
        for library in &target.libraries {
            let mut copied = collector.collect(library, &staging_dir)?;
            println!(
                "  {} {} ({} files)",
                "✓".green(),
                library.cyan(),
                copied.len()
            );
            artifacts.append(&mut copied);
        }

        // 追加設定ファイル
        for config in &target.config_files {
            let src = self.project_root.join(config);
            let name = src.file_name().ok_or_else(|| StageError::StagingDir {
                path: src.clone(),
                message: "config-file has no file name".to_string(),
            })?;
            let to = staging_dir.join(name);
            fs::copy(&src, &to).map_err(|e| StageError::CopyFailures {
                failures: vec![CopyFailure {
                    from: src.clone(),
                    to,
                    message: e.to_string(),
                }],
            })?;
        }

        // Webアセット
        let mut web_assets = 0;
        if let Some(web_src) = &target.web_assets {
            web_assets = WebAssetCollector::collect(
                &self.project_root.join(web_src),
                &staging_dir.join("web"),
            )?;
            println!("  {} web assets ({} files)", "✓".green(), web_assets);
        }

        // バージョン補正（ビルド前の最後の書き換え）
        if let Some(fix) = &target.fix_versions {
            let tool = self
                .ship
                .tools
                .version_fixer
                .as_ref()
                .ok_or(StageError::VersionFixerNotConfigured)?;
            VersionCorrector::new(self.project_root.join(tool))
                .correct(&staging_dir, &fix.config_file)
                .await?;
            println!("  {} versions corrected", "✓".green());
        }

        // パッケージキャッシュ
        let mut packages = Vec::new();
        if target.stage_packages {
            let stager = PackageStager::new(
                self.project_root.join(&self.ship.layout.packages_root),
                self.ship
                    .layout
                    .external_packages
                    .as_ref()
                    .map(|p| self.project_root.join(p)),
                self.project_root.join(&self.ship.layout.published_root),
            );
            packages = stager.stage(&staging_dir.join("packages"))?;
            println!("  {} packages staged ({})", "✓".green(), packages.len());
        }

        Ok(StagingSummary {
            staging_dir,
            artifacts,
            web_assets,
            packages,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shipflow_core::parse_kdl_string;
    use tempfile::tempdir;

    fn write(path: &Path, content: &str) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    fn load(kdl: &str) -> Ship {
        parse_kdl_string(kdl, "test".to_string()).unwrap()
    }

    #[tokio::test]
    async fn test_run_full_staging() {
        let root = tempdir().unwrap();
        write(&root.path().join("build/Foo/Foo.dll"), "dll");
        write(&root.path().join("build/Foo/Foo.exe.config"), "config");
        write(&root.path().join("build/Foo/Foo.pdb"), "pdb");
        write(&root.path().join("web/index.html"), "<html></html>");
        write(&root.path().join("web/notes.txt"), "private");
        write(&root.path().join("akka.hocon"), "akka {}");

        let ship = load(
            r#"
project "acme"
target "worker" {
    library "Foo"
    web-assets "web"
    config-file "akka.hocon"
}
"#,
        );
        let target = ship.target("worker").unwrap();
        let pipeline = StagePipeline::new(root.path(), &ship);
        let summary = pipeline.run("worker", target).await.unwrap();

        assert_eq!(summary.artifacts, vec!["Foo.dll", "Foo.exe.config"]);
        assert_eq!(summary.web_assets, 1);
        assert!(summary.staging_dir.join("Foo.dll").exists());
        assert!(summary.staging_dir.join("Foo.exe.config").exists());
        assert!(!summary.staging_dir.join("Foo.pdb").exists());
        assert!(summary.staging_dir.join("web/index.html").exists());
        assert!(!summary.staging_dir.join("web/notes.txt").exists());
        assert!(summary.staging_dir.join("akka.hocon").exists());
    }

    #[tokio::test]
    async fn test_run_fails_fast_on_missing_library() {
        let root = tempdir().unwrap();

        let ship = load(
            r#"
project "acme"
target "worker" {
    library "DoesNotExist"
}
"#,
        );
        let target = ship.target("worker").unwrap();
        let pipeline = StagePipeline::new(root.path(), &ship);

        let err = pipeline.run("worker", target).await.unwrap_err();
        assert!(matches!(err, StageError::MissingArtifact { .. }));
    }

    #[tokio::test]
    async fn test_run_recreates_staging_dir() {
        let root = tempdir().unwrap();
        write(&root.path().join("build/Foo/Foo.dll"), "dll");

        let ship = load(
            r#"
project "acme"
target "worker" {
    library "Foo"
}
"#,
        );
        let target = ship.target("worker").unwrap();
        let pipeline = StagePipeline::new(root.path(), &ship);

        // 残骸を仕込んでから実行
        let stale = pipeline.staging_dir("worker").join("stale.bin");
        write(&stale, "stale");
        pipeline.run("worker", target).await.unwrap();

        assert!(!stale.exists());
        assert!(pipeline.staging_dir("worker").join("Foo.dll").exists());
    }

    #[tokio::test]
    async fn test_run_stages_packages() {
        let root = tempdir().unwrap();
        write(&root.path().join("build/Foo/Foo.dll"), "dll");
        write(
            &root.path().join("packages/core/Acme.Core.1.0.0.nupkg"),
            "pkg",
        );
        write(
            &root.path().join("packages-published/Acme.Old.1.0.0.nupkg"),
            "pkg",
        );
        write(
            &root.path().join("packages/old/Acme.Old.1.0.0.nupkg"),
            "pkg",
        );

        let ship = load(
            r#"
project "acme"
target "worker" {
    library "Foo"
    stage-packages
}
"#,
        );
        let target = ship.target("worker").unwrap();
        let pipeline = StagePipeline::new(root.path(), &ship);
        let summary = pipeline.run("worker", target).await.unwrap();

        assert_eq!(summary.packages, vec!["Acme.Core.1.0.0.nupkg"]);
        assert!(
            summary
                .staging_dir
                .join("packages/Acme.Core.1.0.0.nupkg")
                .exists()
        );
        assert!(
            !summary
                .staging_dir
                .join("packages/Acme.Old.1.0.0.nupkg")
                .exists()
        );
    }
}
