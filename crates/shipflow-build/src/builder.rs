//! イメージビルド
//!
//! ステージング済みコンテキストを内容タグ付きでビルドし、成功が確認
//! できた場合のみ `latest` エイリアスを張り替えます。失敗・中断した
//! ビルドが直前の正常な `latest` を上書きすることはありません。

use crate::context::content_tag;
use crate::error::{BuildError, BuildResult};
use bollard::Docker;
use bollard::image::BuildImageOptions;
use colored::Colorize;
use futures_util::stream::StreamExt;
use std::time::Duration;

/// ビルドタイムアウトのデフォルト（秒）
pub const DEFAULT_BUILD_TIMEOUT_SECS: u64 = 1800;

pub struct ImageBuilder {
    docker: Docker,
}

impl ImageBuilder {
    pub fn new(docker: Docker) -> Self {
        Self { docker }
    }

    /// コンテキストを内容タグでビルドし、成功後に latest を張り替える
    ///
    /// 完全なイメージ名（`image:content-tag`）を返す。
    pub async fn build_and_tag(
        &self,
        context_data: Vec<u8>,
        image: &str,
        move_latest: bool,
        timeout_secs: u64,
    ) -> BuildResult<String> {
        let tag = content_tag(&context_data);
        self.build_image(context_data, image, &tag, timeout_secs)
            .await?;

        if move_latest {
            self.tag_latest(image, &tag).await?;
        }

        Ok(format!("{}:{}", image, tag))
    }

    /// イメージをビルド
    pub async fn build_image(
        &self,
        context_data: Vec<u8>,
        image: &str,
        tag: &str,
        timeout_secs: u64,
    ) -> BuildResult<()> {
        validate_tag(tag)?;
        let full_image = format!("{}:{}", image, tag);
        tracing::info!("Building image: {}", full_image);

        #[allow(deprecated)]
        let options = BuildImageOptions {
            dockerfile: "Dockerfile",
            t: full_image.as_str(),
            rm: true,      // 中間コンテナを削除
            forcerm: true, // ビルド失敗時も中間コンテナを削除
            pull: true,    // ベースイメージを常にpull
            ..Default::default()
        };

        // ビルドストリームの開始
        use bytes::Bytes;
        use http_body_util::{Either, Full};
        let context_bytes = Bytes::from(context_data);
        let body = Full::new(context_bytes);
        let mut stream = self
            .docker
            .build_image(options, None, Some(Either::Left(body)));

        // ストリームを最後まで消費する。途中で打ち切らない
        let consume = async {
            while let Some(msg) = stream.next().await {
                match msg {
                    Ok(output) => {
                        Self::handle_build_output(output)?;
                    }
                    Err(e) => {
                        return Err(BuildError::DockerConnection(e));
                    }
                }
            }
            Ok(())
        };

        match tokio::time::timeout(Duration::from_secs(timeout_secs), consume).await {
            Ok(result) => result?,
            Err(_) => return Err(BuildError::BuildTimeout { secs: timeout_secs }),
        }

        tracing::info!("Successfully built: {}", full_image);
        Ok(())
    }

    /// `latest` エイリアスを内容タグへ張り替える
    pub async fn tag_latest(&self, image: &str, tag: &str) -> BuildResult<()> {
        let source = format!("{}:{}", image, tag);
        let options = bollard::query_parameters::TagImageOptions {
            repo: Some(image.to_string()),
            tag: Some("latest".to_string()),
            ..Default::default()
        };

        self.docker
            .tag_image(&source, Some(options))
            .await
            .map_err(BuildError::DockerConnection)?;

        tracing::info!("Tagged {} as {}:latest", source, image);
        Ok(())
    }

    /// ビルド出力の処理
    fn handle_build_output(output: bollard::models::BuildInfo) -> BuildResult<()> {
        if let Some(stream) = output.stream {
            print!("{}", stream);
        }

        if let Some(error) = output.error {
            return Err(BuildError::BuildFailed(error));
        }

        if let Some(error_detail) = output.error_detail {
            let error_msg = error_detail
                .message
                .unwrap_or_else(|| "Unknown build error".to_string());
            return Err(BuildError::BuildFailed(error_msg));
        }

        if let Some(status) = output.status {
            // ステータスメッセージ（pull等）
            println!("{}", status.cyan());
        }

        Ok(())
    }

    /// イメージの存在確認
    pub async fn image_exists(&self, image_tag: &str) -> BuildResult<bool> {
        match self.docker.inspect_image(image_tag).await {
            Ok(_) => Ok(true),
            Err(bollard::errors::Error::DockerResponseServerError {
                status_code: 404, ..
            }) => Ok(false),
            Err(e) => Err(BuildError::DockerConnection(e)),
        }
    }
}

/// タグのバリデーション
///
/// Docker タグの制約: 128文字以下、英数字・ピリオド・ハイフン・
/// アンダースコアのみ、先頭はピリオド・ハイフン不可。
pub fn validate_tag(tag: &str) -> BuildResult<()> {
    if tag.is_empty() {
        return Err(BuildError::InvalidTag {
            tag: "(empty)".to_string(),
        });
    }

    if tag.len() > 128 {
        return Err(BuildError::InvalidTag {
            tag: format!("Tag too long ({} characters, max 128)", tag.len()),
        });
    }

    if tag.starts_with('.') || tag.starts_with('-') {
        return Err(BuildError::InvalidTag {
            tag: tag.to_string(),
        });
    }

    for c in tag.chars() {
        if !c.is_ascii_alphanumeric() && c != '.' && c != '-' && c != '_' {
            return Err(BuildError::InvalidTag {
                tag: format!("Invalid character '{}' in tag: {}", c, tag),
            });
        }
    }

    Ok(())
}
