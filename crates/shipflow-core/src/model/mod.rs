//! 設定モデル

mod feed;
mod layout;
mod ship;
mod target;
mod tools;

pub use feed::{DEFAULT_API_KEY_ENV, Feed};
pub use layout::Layout;
pub use ship::Ship;
pub use target::{FixVersions, Target};
pub use tools::{DEFAULT_PUSH_TOOL, Tools};
