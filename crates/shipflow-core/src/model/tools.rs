//! 外部ツール設定

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// デフォルトのパッケージpushコマンド
pub const DEFAULT_PUSH_TOOL: &str = "nuget";

/// 外部ツールのパス設定
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tools {
    /// アセンブリバージョン補正ツールの実行ファイル
    pub version_fixer: Option<PathBuf>,
    /// パッケージpushコマンド（`{tool} push <file> --source <url> --api-key <key>`）
    pub package_push: String,
}

impl Default for Tools {
    fn default() -> Self {
        Self {
            version_fixer: None,
            package_push: DEFAULT_PUSH_TOOL.to_string(),
        }
    }
}
