//! danglingイメージの掃除
//!
//! `<none>` リポジトリのイメージを列挙してIDで削除します。
//! ステージング状態には依存せず、いつ実行してもよい保守操作です。

use crate::error::{BuildError, BuildResult};
use bollard::Docker;
use bollard::models::ImageSummary;
use std::collections::HashMap;
use tracing::{info, warn};

/// 削除結果
#[derive(Debug, Default)]
pub struct CleanupReport {
    pub removed: Vec<String>,
    /// 削除に失敗したイメージ（ID, 理由）。致命的ではない
    pub failures: Vec<(String, String)>,
}

/// 一覧から削除対象（`<none>` リポジトリ）のイメージIDを選ぶ
pub fn select_dangling(images: &[ImageSummary]) -> Vec<String> {
    images
        .iter()
        .filter(|image| {
            image.repo_tags.is_empty()
                || image.repo_tags.iter().all(|tag| tag.starts_with("<none>"))
        })
        .map(|image| image.id.clone())
        .collect()
}

pub struct ImageCleaner {
    docker: Docker,
}

impl ImageCleaner {
    pub fn new(docker: Docker) -> Self {
        Self { docker }
    }

    /// danglingイメージを列挙して1つずつ削除
    ///
    /// 個々の削除失敗（すでに消えている等）は記録して続行する。
    pub async fn remove_dangling(&self) -> BuildResult<CleanupReport> {
        let mut filters = HashMap::new();
        filters.insert("dangling".to_string(), vec!["true".to_string()]);

        let options = bollard::query_parameters::ListImagesOptions {
            all: true,
            filters: Some(filters),
            ..Default::default()
        };

        let images = self
            .docker
            .list_images(Some(options))
            .await
            .map_err(BuildError::DockerConnection)?;
        let candidates = select_dangling(&images);

        let mut report = CleanupReport::default();
        for id in candidates {
            let remove_opts = bollard::query_parameters::RemoveImageOptions {
                force: false,
                noprune: false,
                ..Default::default()
            };
            match self.docker.remove_image(&id, Some(remove_opts), None).await {
                Ok(_) => {
                    info!(image = %id, "Removed dangling image");
                    report.removed.push(id);
                }
                Err(e) => {
                    warn!(image = %id, error = %e, "Failed to remove image");
                    report.failures.push((id, e.to_string()));
                }
            }
        }

        Ok(report)
    }
}
