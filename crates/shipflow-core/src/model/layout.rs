//! ディレクトリ規約

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// ビルド出力・パッケージ・ステージングのディレクトリ規約
///
/// いずれもプロジェクトルートからの相対パス。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Layout {
    /// ライブラリごとのビルド成果物ツリー（build/{library}/ 規約）
    pub build_root: PathBuf,
    /// ローカルビルドされたパッケージのルート（packages/{module}/ 規約）
    pub packages_root: PathBuf,
    /// 外部生成パッケージのディレクトリ
    pub external_packages: Option<PathBuf>,
    /// 公開済みパッケージの置き場（ステージングから除外する集合）
    pub published_root: PathBuf,
    /// ターゲットごとのステージングディレクトリの親
    pub staging_root: PathBuf,
    /// publish 前にパッケージを集約するディレクトリ
    pub publish_dir: PathBuf,
}

impl Default for Layout {
    fn default() -> Self {
        Self {
            build_root: PathBuf::from("build"),
            packages_root: PathBuf::from("packages"),
            external_packages: None,
            published_root: PathBuf::from("packages-published"),
            staging_root: PathBuf::from(".shipflow/staging"),
            publish_dir: PathBuf::from(".shipflow/publish"),
        }
    }
}
