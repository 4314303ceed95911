//! パッケージ公開処理
//!
//! ローカルビルドされたパッケージと外部生成パッケージを1つの
//! ディレクトリに集約し、フィードへ1つずつpushします。
//! 1件の失敗は残りを止めず、結果は件ごとに記録して最後に集約します。

pub mod error;
pub mod gather;
pub mod pusher;

pub use error::{PublishError, PublishResult};
pub use gather::gather_packages;
pub use pusher::{FeedPusher, PublishReport, PushFailure};
