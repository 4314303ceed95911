use colored::Colorize;
use shipflow_core::Ship;
use std::path::Path;
use std::process::ExitCode;

pub fn handle(project_root: &Path, ship: &Ship) -> anyhow::Result<ExitCode> {
    println!("{}", "設定を検証中...".blue());
    println!(
        "プロジェクトルート: {}",
        project_root.display().to_string().cyan()
    );
    println!("{}", "✓ 設定ファイルは正常です！".green().bold());
    println!();
    println!("サマリー:");
    println!("  プロジェクト: {}", ship.name.cyan());
    println!("  ターゲット: {}個", ship.targets.len());
    for (name, target) in &ship.targets {
        let image = target.image_name(&ship.name, name);
        let mut parts = vec![format!("{}個のライブラリ", target.libraries.len())];
        if target.web_assets.is_some() {
            parts.push("Webアセット".to_string());
        }
        if target.fix_versions.is_some() {
            parts.push("バージョン補正".to_string());
        }
        if target.stage_packages {
            parts.push("パッケージ".to_string());
        }
        println!("    - {} ({}) [{}]", name.cyan(), image, parts.join(", "));
    }
    if let Some(feed) = &ship.feed {
        println!(
            "  フィード: {} (キー: ${})",
            feed.url.cyan(),
            feed.api_key_env
        );
    }

    Ok(ExitCode::SUCCESS)
}
