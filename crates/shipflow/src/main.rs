mod commands;
mod docker;

use clap::{Parser, Subcommand};
use colored::Colorize;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "ship")]
#[command(about = "ビルド成果物を束ね、Dockerイメージに仕立てて送り出す。", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// ターゲットのステージングを実行（ビルドはしない）
    Stage {
        /// ターゲット名
        target: String,
    },
    /// ステージングしてDockerイメージをビルド
    Build {
        /// ターゲット名（省略時は全ターゲットを宣言順に）
        target: Option<String>,
        /// ビルド後もステージングディレクトリを残す（デバッグ用）
        #[arg(long)]
        keep_staging: bool,
        /// ビルド成功後も latest タグを張り替えない
        #[arg(long)]
        no_latest: bool,
        /// コンテナビルドのタイムアウト（秒）
        #[arg(long, default_value_t = shipflow_build::DEFAULT_BUILD_TIMEOUT_SECS)]
        timeout_secs: u64,
    },
    /// パッケージをフィードにpush
    Publish {
        /// pushせずに対象だけ表示
        #[arg(long)]
        dry_run: bool,
    },
    /// danglingイメージ（<none> リポジトリ）を削除
    #[command(name = "clean-images")]
    CleanImages,
    /// 設定を検証
    Validate,
    /// バージョン情報を表示
    Version,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    tracing_subscriber::fmt::init();

    // Versionコマンドは設定ファイル不要
    if matches!(cli.command, Commands::Version) {
        println!("shipflow {}", env!("CARGO_PKG_VERSION"));
        return ExitCode::SUCCESS;
    }

    match run(cli.command).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{} {:#}", "✗".red().bold(), e);
            ExitCode::from(commands::EXIT_STAGING)
        }
    }
}

async fn run(command: Commands) -> anyhow::Result<ExitCode> {
    // CleanImagesはステージング状態に依存せず、設定ファイルも不要
    if matches!(command, Commands::CleanImages) {
        return commands::clean::handle().await;
    }

    let project_root = shipflow_core::find_project_root()?;
    let ship = shipflow_core::load_ship_from_root(&project_root)?;

    match command {
        Commands::Stage { target } => {
            commands::stage::handle(&ship, &project_root, &target).await
        }
        Commands::Build {
            target,
            keep_staging,
            no_latest,
            timeout_secs,
        } => {
            commands::build::handle(
                &ship,
                &project_root,
                target.as_deref(),
                keep_staging,
                no_latest,
                timeout_secs,
            )
            .await
        }
        Commands::Publish { dry_run } => {
            commands::publish::handle(&ship, &project_root, dry_run).await
        }
        Commands::Validate => commands::validate::handle(&project_root, &ship),
        Commands::CleanImages => {
            unreachable!("CleanImages is handled before config loading");
        }
        Commands::Version => {
            unreachable!("Version is handled before config loading");
        }
    }
}
