use crate::commands::EXIT_EXTERNAL;
use crate::docker;
use colored::Colorize;
use shipflow_build::ImageCleaner;
use std::process::ExitCode;

pub async fn handle() -> anyhow::Result<ExitCode> {
    println!("{}", "danglingイメージを削除中...".yellow());

    let docker_conn = match docker::init_docker_with_error_handling().await {
        Ok(conn) => conn,
        Err(_) => return Ok(ExitCode::from(EXIT_EXTERNAL)),
    };

    let cleaner = ImageCleaner::new(docker_conn);
    match cleaner.remove_dangling().await {
        Ok(report) => {
            if report.removed.is_empty() && report.failures.is_empty() {
                println!("  {} 削除対象のイメージはありません", "✓".green());
            } else {
                println!(
                    "  {} {} 個のイメージを削除",
                    "✓".green(),
                    report.removed.len()
                );
                // 個別の削除失敗（すでに消えている等）は致命的ではない
                for (id, reason) in &report.failures {
                    println!("  {} 削除できませんでした: {} ({})", "⚠".yellow(), id, reason);
                }
            }
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => {
            eprintln!("{} イメージ一覧の取得に失敗: {}", "✗".red().bold(), e);
            Ok(ExitCode::from(EXIT_EXTERNAL))
        }
    }
}
