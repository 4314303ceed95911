//! KDLパーサー
//!
//! ship.kdl をパースします。ノードタイプごとのパース処理はモジュールに
//! 分離されています。

mod feed;
mod layout;
mod target;

use feed::{parse_feed, parse_tools};
use layout::parse_layout;
use target::parse_target;

use crate::error::{Result, ShipError};
use crate::model::Ship;
use kdl::{KdlDocument, KdlNode};
use std::fs;
use std::path::Path;

/// KDLファイルをパースしてShipを生成
pub fn parse_kdl_file<P: AsRef<Path>>(path: P) -> Result<Ship> {
    let content = fs::read_to_string(path.as_ref())?;
    let name = path
        .as_ref()
        .parent()
        .and_then(|p| p.file_name())
        .and_then(|n| n.to_str())
        .unwrap_or("unnamed")
        .to_string();
    parse_kdl_string(&content, name)
}

/// KDL文字列をパース
pub fn parse_kdl_string(content: &str, default_name: String) -> Result<Ship> {
    let doc: KdlDocument = content.parse()?;

    let mut ship = Ship {
        name: default_name,
        ..Ship::default()
    };

    for node in doc.nodes() {
        match node.name().value() {
            "project" => {
                if let Some(project_name) = first_string(node) {
                    ship.name = project_name.to_string();
                }
            }
            "layout" => {
                if let Some(children) = node.children() {
                    ship.layout = parse_layout(children);
                }
            }
            "tools" => {
                if let Some(children) = node.children() {
                    ship.tools = parse_tools(children);
                }
            }
            "feed" => {
                if let Some(children) = node.children() {
                    ship.feed = Some(parse_feed(children)?);
                }
            }
            "target" => {
                let (target_name, target) = parse_target(node)?;
                if ship.target(&target_name).is_some() {
                    return Err(ShipError::DuplicateTarget(target_name));
                }
                ship.targets.push((target_name, target));
            }
            _ => {
                // 不明なノードはスキップ
            }
        }
    }

    Ok(ship)
}

/// 最初の位置引数を文字列として取得
pub(crate) fn first_string(node: &KdlNode) -> Option<&str> {
    node.entries()
        .iter()
        .find(|e| e.name().is_none())
        .and_then(|e| e.value().as_string())
}

/// 名前付きプロパティを文字列として取得
pub(crate) fn string_prop<'a>(node: &'a KdlNode, key: &str) -> Option<&'a str> {
    node.entries()
        .iter()
        .find(|e| e.name().map(|n| n.value()) == Some(key))
        .and_then(|e| e.value().as_string())
}
