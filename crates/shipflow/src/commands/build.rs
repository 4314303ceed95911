use crate::commands::{EXIT_EXTERNAL, EXIT_STAGING, print_copy_failures, stage_exit_code};
use crate::docker;
use colored::Colorize;
use shipflow_build::{BuildResolver, ContextBuilder, ImageBuilder};
use shipflow_core::{Ship, ShipError, Target};
use shipflow_stage::StagePipeline;
use std::path::Path;
use std::process::ExitCode;

/// ビルドコマンドを処理
///
/// ターゲットごとに ステージング → コンテキスト作成 → ビルド → 後片付け を
/// 順に実行する。ステージングに失敗したターゲットのビルドは呼ばれず、
/// その時点で中断する。
pub async fn handle(
    ship: &Ship,
    project_root: &Path,
    target_filter: Option<&str>,
    keep_staging: bool,
    no_latest: bool,
    timeout_secs: u64,
) -> anyhow::Result<ExitCode> {
    // ビルド対象のターゲットを決定（宣言順）
    let targets: Vec<(&String, &Target)> = match target_filter {
        Some(name) => match ship.targets.iter().find(|(n, _)| n == name) {
            Some((n, t)) => vec![(n, t)],
            None => return Err(ShipError::TargetNotFound(name.to_string()).into()),
        },
        None => ship.targets.iter().map(|(n, t)| (n, t)).collect(),
    };

    println!("{}", "Dockerイメージをビルド中...".green());
    println!(
        "{}",
        format!("対象ターゲット ({} 個):", targets.len()).bold()
    );
    for (name, _) in &targets {
        println!("  • {}", name.cyan());
    }

    let pipeline = StagePipeline::new(project_root, ship);
    let resolver = BuildResolver::new(project_root.to_path_buf());

    // Docker接続はステージングが通ってから初めて張る
    let mut docker_conn: Option<bollard::Docker> = None;
    let mut build_results: Vec<(String, String)> = Vec::new();

    for (name, target) in targets {
        println!();
        println!("{}", format!("🔨 {} をビルド中...", name).green().bold());

        // 1. ステージング（失敗したらビルドには進まない）
        let summary = match pipeline.run(name, target).await {
            Ok(summary) => summary,
            Err(e) => {
                eprintln!("  {} ステージング失敗: {}", "✗".red().bold(), e);
                print_copy_failures(&e);
                return Ok(ExitCode::from(stage_exit_code(&e)));
            }
        };

        // 2. Dockerfile解決
        let dockerfile_path = match resolver.resolve_dockerfile(name, target) {
            Ok(path) => path,
            Err(e) => {
                eprintln!("  {} Dockerfile解決エラー: {}", "✗".red().bold(), e);
                return Ok(ExitCode::from(EXIT_STAGING));
            }
        };

        // 3. コンテキスト作成
        let context_data = match ContextBuilder::create_context(&summary.staging_dir, &dockerfile_path)
        {
            Ok(data) => data,
            Err(e) => {
                eprintln!("  {} コンテキスト作成エラー: {}", "✗".red().bold(), e);
                return Ok(ExitCode::from(EXIT_STAGING));
            }
        };

        println!(
            "  → Dockerfile: {}",
            dockerfile_path.display().to_string().cyan()
        );
        println!(
            "  → Context: {} ({} bytes)",
            summary.staging_dir.display().to_string().cyan(),
            context_data.len()
        );

        // 4. Docker接続（初回のみ）
        let conn = match docker_conn.as_ref() {
            Some(conn) => conn.clone(),
            None => match docker::init_docker_with_error_handling().await {
                Ok(conn) => {
                    docker_conn = Some(conn.clone());
                    conn
                }
                Err(_) => return Ok(ExitCode::from(EXIT_EXTERNAL)),
            },
        };
        let builder = ImageBuilder::new(conn);

        // 5. ビルド + タグ付け（latestは成功後のみ動く）
        let image = target.image_name(&ship.name, name);
        match builder
            .build_and_tag(context_data, &image, !no_latest, timeout_secs)
            .await
        {
            Ok(full_image) => {
                println!("  {} ビルド完了: {}", "✓".green(), full_image.cyan());
                build_results.push((name.clone(), full_image));
            }
            Err(e) => {
                eprintln!("  {} ビルドエラー: {}", "✗".red().bold(), e);
                return Ok(ExitCode::from(EXIT_EXTERNAL));
            }
        }

        // 6. 後片付け
        if keep_staging {
            println!(
                "  → ステージングを残します: {}",
                summary.staging_dir.display().to_string().cyan()
            );
        } else if let Err(e) = pipeline.clean(name) {
            // 掃除の失敗は致命的ではない
            tracing::warn!(name = name.as_str(), error = %e, "Failed to remove staging directory");
        }
    }

    // 結果サマリー
    println!();
    println!(
        "{}",
        "✓ すべてのイメージがビルドされました！".green().bold()
    );
    println!();
    println!("{}", "結果サマリー:".bold());
    for (name, full_image) in &build_results {
        println!("  {} {}: {}", "✓".green(), name, full_image.cyan());
    }

    Ok(ExitCode::SUCCESS)
}
