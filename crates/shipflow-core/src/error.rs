use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ShipError {
    #[error("KDLパースエラー: {0}")]
    KdlParse(#[from] kdl::KdlError),

    #[error("ファイル読み込みエラー: {0}")]
    Io(#[from] std::io::Error),

    #[error("無効な設定: {0}")]
    InvalidConfig(String),

    #[error(
        "プロジェクトルートが見つかりません\n探索開始位置: {0}\nヒント: ship.kdl ファイルを含むディレクトリで実行してください"
    )]
    ProjectRootNotFound(PathBuf),

    #[error("ターゲットが見つかりません: {0}")]
    TargetNotFound(String),

    #[error("ターゲットが重複定義されています: {0}")]
    DuplicateTarget(String),

    #[error("フィードが設定されていません（ship.kdl に feed ブロックが必要です）")]
    FeedNotConfigured,
}

pub type Result<T> = std::result::Result<T, ShipError>;
