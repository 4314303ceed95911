use crate::commands::{print_copy_failures, stage_exit_code};
use colored::Colorize;
use shipflow_core::{Ship, ShipError};
use shipflow_stage::StagePipeline;
use std::path::Path;
use std::process::ExitCode;

pub async fn handle(ship: &Ship, project_root: &Path, target_name: &str) -> anyhow::Result<ExitCode> {
    let Some(target) = ship.target(target_name) else {
        return Err(ShipError::TargetNotFound(target_name.to_string()).into());
    };

    println!(
        "{}",
        format!("📦 {} をステージング中...", target_name).green().bold()
    );

    let pipeline = StagePipeline::new(project_root, ship);
    match pipeline.run(target_name, target).await {
        Ok(summary) => {
            println!();
            println!("{}", "✓ ステージング完了".green().bold());
            println!(
                "  → {}",
                summary.staging_dir.display().to_string().cyan()
            );
            println!(
                "  成果物: {} / Webアセット: {} / パッケージ: {}",
                summary.artifacts.len(),
                summary.web_assets,
                summary.packages.len()
            );
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => {
            eprintln!();
            eprintln!("{} ステージング失敗: {}", "✗".red().bold(), e);
            print_copy_failures(&e);
            Ok(ExitCode::from(stage_exit_code(&e)))
        }
    }
}
