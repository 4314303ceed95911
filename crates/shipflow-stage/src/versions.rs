//! アセンブリバージョン補正
//!
//! ステージングディレクトリ内の設定ファイルのバージョンバインディングを
//! 書き換える外部ツールを呼び出します。ツールの中身はこちらからは不透明で、
//! 入力はディレクトリパス、出力はその場で書き換えられたファイル。

use crate::error::{StageError, StageResult};
use std::path::{Path, PathBuf};
use tokio::process::Command;
use tracing::{debug, info};

pub struct VersionCorrector {
    tool: PathBuf,
}

impl VersionCorrector {
    pub fn new(tool: impl Into<PathBuf>) -> Self {
        Self { tool: tool.into() }
    }

    /// `{tool} <staged-dir> <config-file>` を実行し、終了コードを検証する
    ///
    /// 壊れたバインディングのままイメージを焼かないよう、非0は必ずエラー。
    pub async fn correct(&self, staged_dir: &Path, config_file: &str) -> StageResult<()> {
        info!(
            tool = %self.tool.display(),
            dir = %staged_dir.display(),
            config = config_file,
            "Running version fixer"
        );

        let output = Command::new(&self.tool)
            .arg(staged_dir)
            .arg(config_file)
            .output()
            .await
            .map_err(|e| match e.kind() {
                std::io::ErrorKind::NotFound => StageError::ToolNotFound {
                    tool: self.tool.clone(),
                    source: e,
                },
                _ => StageError::Io(e),
            })?;

        if !output.stdout.is_empty() {
            debug!(stdout = %String::from_utf8_lossy(&output.stdout), "Version fixer output");
        }

        if !output.status.success() {
            return Err(StageError::VersionCorrectionFailed {
                code: output.status.code().unwrap_or(-1),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(())
    }
}
