pub mod build;
pub mod clean;
pub mod publish;
pub mod stage;
pub mod validate;

use colored::Colorize;
use shipflow_stage::StageError;

/// 終了コード: ステージング失敗（設定エラー含む）
pub const EXIT_STAGING: u8 = 1;
/// 終了コード: 外部ツール失敗（バージョン補正・Docker・タイムアウト）
pub const EXIT_EXTERNAL: u8 = 2;
/// 終了コード: 一部パッケージのpush失敗
pub const EXIT_PUBLISH_PARTIAL: u8 = 3;

/// ステージングエラーを終了コードに割り当てる
pub fn stage_exit_code(err: &StageError) -> u8 {
    match err {
        StageError::VersionCorrectionFailed { .. } | StageError::ToolNotFound { .. } => {
            EXIT_EXTERNAL
        }
        _ => EXIT_STAGING,
    }
}

/// 集約されたコピー失敗を1件ずつ表示
pub fn print_copy_failures(err: &StageError) {
    if let StageError::CopyFailures { failures } = err {
        for failure in failures {
            eprintln!("  {} {}", "•".red(), failure);
        }
    }
}
