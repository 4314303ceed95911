//! 統合ローダー
//!
//! プロジェクトルート検出・パース・検証を統合

use crate::discovery::{CONFIG_FILE, find_project_root};
use crate::error::Result;
use crate::model::Ship;
use crate::parser::parse_kdl_string;
use std::path::Path;
use tracing::{debug, info, instrument};

/// プロジェクト全体をロードしてShipを生成
#[instrument]
pub fn load_ship() -> Result<Ship> {
    info!("Starting project load");
    let project_root = find_project_root()?;
    load_ship_from_root(&project_root)
}

/// 指定されたルートディレクトリからプロジェクトをロード
#[instrument(skip(project_root), fields(project_root = %project_root.display()))]
pub fn load_ship_from_root(project_root: &Path) -> Result<Ship> {
    let config_path = project_root.join(CONFIG_FILE);
    debug!(config = %config_path.display(), "Reading config file");
    let content = std::fs::read_to_string(&config_path)?;

    let default_name = project_root
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("unnamed")
        .to_string();

    let ship = parse_kdl_string(&content, default_name)?;
    ship.validate()?;

    info!(targets = ship.targets.len(), "Project loaded");
    Ok(ship)
}
