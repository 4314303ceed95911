//! イメージターゲット定義

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// 1つのDockerイメージに何を詰めるかの宣言
///
/// (イメージ名, ライブラリ集合, Webアセット, 設定ファイル) のタプル。
///
/// KDL形式：
/// ```kdl
/// target "worker" {
///     image "acme/worker"
///     library "Acme.Core.Service"
///     library "Acme.NodeManager"
///     config-file "akka.hocon"
///     fix-versions config-file="Acme.Core.Service.exe.config"
///     stage-packages
/// }
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Target {
    /// イメージ名（未指定なら {project}/{target}）
    pub image: Option<String>,
    /// Dockerfileパス（未指定なら docker/{target}/Dockerfile）
    pub dockerfile: Option<PathBuf>,
    /// ステージングするライブラリ名（build-root 配下のディレクトリ名）
    #[serde(default)]
    pub libraries: Vec<String>,
    /// 静的Webアセットのソースディレクトリ
    pub web_assets: Option<PathBuf>,
    /// ステージング直下にコピーする追加設定ファイル
    #[serde(default)]
    pub config_files: Vec<PathBuf>,
    /// アセンブリバージョン補正の設定
    pub fix_versions: Option<FixVersions>,
    /// パッケージキャッシュをコンテキストに含めるか
    #[serde(default)]
    pub stage_packages: bool,
}

/// バージョン補正ツールに渡す設定
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FixVersions {
    /// ステージングディレクトリ内の書き換え対象設定ファイル名
    pub config_file: String,
}

impl Target {
    /// 実効イメージ名を解決
    pub fn image_name(&self, project: &str, target_name: &str) -> String {
        self.image
            .clone()
            .unwrap_or_else(|| format!("{}/{}", project, target_name))
    }
}
