//! パッケージフィード設定

use serde::{Deserialize, Serialize};

/// APIキーを読む環境変数のデフォルト名
pub const DEFAULT_API_KEY_ENV: &str = "SHIPFLOW_FEED_KEY";

/// push先のパッケージフィード
///
/// エンドポイントは設定ファイル、資格情報は環境変数から取る。
///
/// KDL形式：
/// ```kdl
/// feed {
///     url "http://feed.local:81/"
///     api-key-env "SHIPFLOW_FEED_KEY"
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Feed {
    pub url: String,
    /// APIキーを格納する環境変数名
    pub api_key_env: String,
}

impl Feed {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            api_key_env: DEFAULT_API_KEY_ENV.to_string(),
        }
    }
}
