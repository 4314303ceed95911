//! targetノードのパース

use super::{first_string, string_prop};
use crate::error::{Result, ShipError};
use crate::model::{FixVersions, Target};
use std::path::PathBuf;

/// target ノードをパース
pub fn parse_target(node: &kdl::KdlNode) -> Result<(String, Target)> {
    let name = first_string(node)
        .ok_or_else(|| ShipError::InvalidConfig("target requires a name".to_string()))?
        .to_string();

    let mut target = Target::default();

    if let Some(children) = node.children() {
        for child in children.nodes() {
            match child.name().value() {
                "image" => {
                    target.image = first_string(child).map(|s| s.to_string());
                }
                "dockerfile" => {
                    target.dockerfile = first_string(child).map(PathBuf::from);
                }
                "library" => {
                    if let Some(lib) = first_string(child) {
                        target.libraries.push(lib.to_string());
                    }
                }
                // 1ノードに複数並べる記法もサポート: libraries "A" "B"
                "libraries" => {
                    for entry in child.entries() {
                        if entry.name().is_none()
                            && let Some(lib) = entry.value().as_string()
                        {
                            target.libraries.push(lib.to_string());
                        }
                    }
                }
                "web-assets" => {
                    target.web_assets = first_string(child).map(PathBuf::from);
                }
                "config-file" => {
                    if let Some(file) = first_string(child) {
                        target.config_files.push(PathBuf::from(file));
                    }
                }
                "fix-versions" => {
                    let config_file = string_prop(child, "config-file").ok_or_else(|| {
                        ShipError::InvalidConfig(format!(
                            "target '{}': fix-versions には config-file プロパティが必要です",
                            name
                        ))
                    })?;
                    target.fix_versions = Some(FixVersions {
                        config_file: config_file.to_string(),
                    });
                }
                // ノードの存在で有効化（値は不要）
                "stage-packages" => {
                    target.stage_packages = true;
                }
                _ => {}
            }
        }
    }

    Ok((name, target))
}
