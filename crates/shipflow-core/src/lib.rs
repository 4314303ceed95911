//! ShipFlow core
//!
//! ship.kdl 設定ファイルのモデル・パーサー・ローダーを提供します。
//! イメージターゲット（どのライブラリ・Webアセット・設定ファイルを
//! どのDockerイメージに詰めるか）を宣言的に定義するのがこのクレートの役割です。

pub mod discovery;
pub mod error;
pub mod loader;
pub mod model;
pub mod parser;

pub use discovery::{CONFIG_FILE, find_project_root};
pub use error::{Result, ShipError};
pub use loader::{load_ship, load_ship_from_root};
pub use model::{Feed, FixVersions, Layout, Ship, Target, Tools};
pub use parser::{parse_kdl_file, parse_kdl_string};
