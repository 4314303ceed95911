use crate::commands::{EXIT_EXTERNAL, EXIT_PUBLISH_PARTIAL};
use colored::Colorize;
use shipflow_core::{Ship, ShipError};
use shipflow_publish::{FeedPusher, gather_packages};
use std::path::Path;
use std::process::ExitCode;

pub async fn handle(ship: &Ship, project_root: &Path, dry_run: bool) -> anyhow::Result<ExitCode> {
    let feed = ship.feed.as_ref().ok_or(ShipError::FeedNotConfigured)?;

    // 1. パッケージの集約
    println!("{}", "パッケージを集約中...".blue());
    let external = ship
        .layout
        .external_packages
        .as_ref()
        .map(|p| project_root.join(p));
    let packages = gather_packages(
        &project_root.join(&ship.layout.packages_root),
        external.as_deref(),
        &project_root.join(&ship.layout.publish_dir),
    )?;

    if packages.is_empty() {
        println!("{}", "push対象のパッケージがありません".yellow());
        return Ok(ExitCode::SUCCESS);
    }

    println!(
        "{}",
        format!("対象パッケージ ({} 個):", packages.len()).bold()
    );
    for package in &packages {
        let name = package
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("(unnamed)");
        println!("  • {}", name.cyan());
    }

    if dry_run {
        println!();
        println!("{}", "--dry-run のためpushしません".yellow());
        return Ok(ExitCode::SUCCESS);
    }

    // 2. pusher構築（APIキーは環境変数から）
    // パス指定のツールはプロジェクトルート基準で解決する（PATH上のコマンドはそのまま）
    let push_tool = if std::path::Path::new(&ship.tools.package_push)
        .components()
        .count()
        > 1
    {
        project_root
            .join(&ship.tools.package_push)
            .to_string_lossy()
            .into_owned()
    } else {
        ship.tools.package_push.clone()
    };
    let pusher = match FeedPusher::from_feed(feed, &push_tool) {
        Ok(pusher) => pusher,
        Err(e) => {
            eprintln!("{} {}", "✗".red().bold(), e);
            return Ok(ExitCode::from(EXIT_EXTERNAL));
        }
    };

    // 3. 1件ずつpush（失敗しても続行）
    println!();
    println!("{}", format!("📤 {} にpush中...", feed.url).blue().bold());
    let report = pusher.push_all(&packages).await;

    // 4. 集約レポート
    println!();
    if report.is_clean() {
        println!(
            "{}",
            format!("✓ {} 個のパッケージをpushしました", report.pushed.len())
                .green()
                .bold()
        );
        Ok(ExitCode::SUCCESS)
    } else {
        eprintln!(
            "{}",
            format!(
                "✗ {} / {} 個のpushに失敗しました",
                report.failures.len(),
                report.total()
            )
            .red()
            .bold()
        );
        for failure in &report.failures {
            eprintln!("  • {}: {}", failure.package, failure.message);
        }
        Ok(ExitCode::from(EXIT_PUBLISH_PARTIAL))
    }
}
