//! ビルドコンテキストの作成
//!
//! ステージングディレクトリを tar.gz アーカイブにまとめ、Dockerfile を
//! "Dockerfile" として注入します。アーカイブの SHA-256 ダイジェストが
//! そのままイメージの内容タグになります。

use crate::error::{BuildError, BuildResult};
use flate2::Compression;
use flate2::write::GzEncoder;
use sha2::{Digest, Sha256};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tar::Builder;

/// 内容タグの桁数（sha256 の先頭12桁）
const CONTENT_TAG_LEN: usize = 12;

/// コンテキストアーカイブから内容タグを計算
///
/// 同一のステージング内容は同一のタグになる。`latest` はビルド成功後に
/// このタグへ張り替える。
pub fn content_tag(archive: &[u8]) -> String {
    let digest = Sha256::digest(archive);
    let mut tag = hex::encode(digest);
    tag.truncate(CONTENT_TAG_LEN);
    tag
}

pub struct ContextBuilder;

impl ContextBuilder {
    /// ビルドコンテキストをtar.gzアーカイブとして作成
    pub fn create_context(context_path: &Path, dockerfile_path: &Path) -> BuildResult<Vec<u8>> {
        tracing::debug!("Creating build context from: {}", context_path.display());

        if !context_path.is_dir() {
            return Err(BuildError::ContextNotFound(context_path.to_path_buf()));
        }
        if !dockerfile_path.is_file() {
            return Err(BuildError::DockerfileNotFound(dockerfile_path.to_path_buf()));
        }

        let mut archive_data = Vec::new();
        {
            let encoder = GzEncoder::new(&mut archive_data, Compression::default());
            let mut tar = Builder::new(encoder);

            // ステージングディレクトリを再帰的に追加
            tar.append_dir_all(".", context_path)
                .map_err(BuildError::Io)?;

            // Dockerfileを "Dockerfile" として追加
            let mut dockerfile_file = File::open(dockerfile_path)?;
            let mut dockerfile_content = Vec::new();
            dockerfile_file.read_to_end(&mut dockerfile_content)?;

            let mut header = tar::Header::new_gnu();
            header.set_path("Dockerfile").map_err(|e| {
                BuildError::InvalidConfig(format!("Failed to set Dockerfile path: {}", e))
            })?;
            header.set_size(dockerfile_content.len() as u64);
            header.set_mode(0o644);
            header.set_cksum();

            tar.append(&header, &dockerfile_content[..])
                .map_err(BuildError::Io)?;

            tar.finish().map_err(BuildError::Io)?;
        }

        tracing::debug!("Build context created: {} bytes", archive_data.len());
        Self::check_context_size(archive_data.len());

        Ok(archive_data)
    }

    /// コンテキストサイズのチェックと警告
    fn check_context_size(size: usize) {
        const MAX_CONTEXT_SIZE: usize = 500 * 1024 * 1024; // 500MB

        if size > MAX_CONTEXT_SIZE {
            tracing::warn!(
                "ビルドコンテキストが大きすぎます（{}MB）。ステージング対象を見直してください。",
                size / 1024 / 1024
            );
        }
    }
}
