//! layoutブロックのパース

use super::first_string;
use crate::model::Layout;
use kdl::KdlDocument;
use std::path::PathBuf;

/// layout ブロックをパース（未指定フィールドは規約のデフォルト）
pub fn parse_layout(doc: &KdlDocument) -> Layout {
    let mut layout = Layout::default();

    for node in doc.nodes() {
        match node.name().value() {
            "build-root" => {
                if let Some(path) = first_string(node) {
                    layout.build_root = PathBuf::from(path);
                }
            }
            "packages-root" => {
                if let Some(path) = first_string(node) {
                    layout.packages_root = PathBuf::from(path);
                }
            }
            "external-packages" => {
                layout.external_packages = first_string(node).map(PathBuf::from);
            }
            "published-root" => {
                if let Some(path) = first_string(node) {
                    layout.published_root = PathBuf::from(path);
                }
            }
            "staging-root" => {
                if let Some(path) = first_string(node) {
                    layout.staging_root = PathBuf::from(path);
                }
            }
            "publish-dir" => {
                if let Some(path) = first_string(node) {
                    layout.publish_dir = PathBuf::from(path);
                }
            }
            _ => {}
        }
    }

    layout
}
