//! feed / toolsブロックのパース

use super::first_string;
use crate::error::{Result, ShipError};
use crate::model::{DEFAULT_API_KEY_ENV, Feed, Tools};
use kdl::KdlDocument;
use std::path::PathBuf;

/// feed ブロックをパース（url は必須）
pub fn parse_feed(doc: &KdlDocument) -> Result<Feed> {
    let mut url: Option<String> = None;
    let mut api_key_env = DEFAULT_API_KEY_ENV.to_string();

    for node in doc.nodes() {
        match node.name().value() {
            "url" => {
                url = first_string(node).map(|s| s.to_string());
            }
            "api-key-env" => {
                if let Some(env) = first_string(node) {
                    api_key_env = env.to_string();
                }
            }
            _ => {}
        }
    }

    let url =
        url.ok_or_else(|| ShipError::InvalidConfig("feed には url が必要です".to_string()))?;

    Ok(Feed { url, api_key_env })
}

/// tools ブロックをパース
pub fn parse_tools(doc: &KdlDocument) -> Tools {
    let mut tools = Tools::default();

    for node in doc.nodes() {
        match node.name().value() {
            "version-fixer" => {
                tools.version_fixer = first_string(node).map(PathBuf::from);
            }
            "package-push" => {
                if let Some(tool) = first_string(node) {
                    tools.package_push = tool.to_string();
                }
            }
            _ => {}
        }
    }

    tools
}
