//! プロジェクト全体の定義

use super::{Feed, Layout, Target, Tools};
use crate::error::{Result, ShipError};
use serde::{Deserialize, Serialize};

/// ship.kdl 全体
///
/// KDL形式：
/// ```kdl
/// project "acme-platform"
///
/// target "worker" {
///     image "acme/worker"
///     library "Acme.Core.Service"
/// }
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Ship {
    pub name: String,
    pub layout: Layout,
    pub tools: Tools,
    pub feed: Option<Feed>,
    /// ターゲット定義。宣言順 = ビルド順
    pub targets: Vec<(String, Target)>,
}

impl Ship {
    /// 名前でターゲットを検索
    pub fn target(&self, name: &str) -> Option<&Target> {
        self.targets
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, t)| t)
    }

    /// 宣言順のターゲット名一覧
    pub fn target_names(&self) -> Vec<&str> {
        self.targets.iter().map(|(n, _)| n.as_str()).collect()
    }

    /// 設定の整合性チェック
    ///
    /// - ターゲットはライブラリかWebアセットの少なくとも一方を持つこと
    /// - fix-versions を使うターゲットには tools.version-fixer が必要
    pub fn validate(&self) -> Result<()> {
        for (name, target) in &self.targets {
            if target.libraries.is_empty()
                && target.web_assets.is_none()
                && target.config_files.is_empty()
            {
                return Err(ShipError::InvalidConfig(format!(
                    "ターゲット '{}' にステージング対象がありません（library / web-assets / config-file のいずれかが必要です）",
                    name
                )));
            }
            if target.fix_versions.is_some() && self.tools.version_fixer.is_none() {
                return Err(ShipError::InvalidConfig(format!(
                    "ターゲット '{}' は fix-versions を使用しますが、tools.version-fixer が未設定です",
                    name
                )));
            }
        }
        Ok(())
    }
}
