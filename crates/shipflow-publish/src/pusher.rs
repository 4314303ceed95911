//! フィードへのpush
//!
//! `{tool} push <file> --source <url> --api-key <key>` を1件ずつ実行します。
//! 1件の失敗で残りは止めず、結果を集約して返します。

use crate::error::{PublishError, PublishResult};
use colored::Colorize;
use shipflow_core::Feed;
use std::path::{Path, PathBuf};
use tokio::process::Command;
use tracing::{debug, info};

/// 1件分のpush失敗
#[derive(Debug)]
pub struct PushFailure {
    pub package: String,
    pub message: String,
}

/// push結果の集約
#[derive(Debug, Default)]
pub struct PublishReport {
    pub pushed: Vec<String>,
    pub failures: Vec<PushFailure>,
}

impl PublishReport {
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn total(&self) -> usize {
        self.pushed.len() + self.failures.len()
    }
}

pub struct FeedPusher {
    tool: String,
    url: String,
    api_key: String,
}

impl FeedPusher {
    pub fn new(
        tool: impl Into<String>,
        url: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Self {
        Self {
            tool: tool.into(),
            url: url.into(),
            api_key: api_key.into(),
        }
    }

    /// フィード設定からpusherを構築
    ///
    /// APIキーは設定ファイルではなく環境変数から読む。
    pub fn from_feed(feed: &Feed, tool: &str) -> PublishResult<Self> {
        let api_key =
            std::env::var(&feed.api_key_env).map_err(|_| PublishError::MissingApiKey {
                var: feed.api_key_env.clone(),
            })?;
        Ok(Self::new(tool, &feed.url, api_key))
    }

    /// 全パッケージを順にpush。1件の失敗は残りを止めない
    pub async fn push_all(&self, packages: &[PathBuf]) -> PublishReport {
        let mut report = PublishReport::default();

        for package in packages {
            let name = package
                .file_name()
                .and_then(|n| n.to_str())
                .unwrap_or("(unnamed)")
                .to_string();

            match self.push_one(package).await {
                Ok(()) => {
                    println!("  {} {}", "✓".green(), name.cyan());
                    report.pushed.push(name);
                }
                Err(message) => {
                    eprintln!("  {} {}: {}", "✗".red(), name, message);
                    report.failures.push(PushFailure {
                        package: name,
                        message,
                    });
                }
            }
        }

        info!(
            pushed = report.pushed.len(),
            failed = report.failures.len(),
            "Publish finished"
        );
        report
    }

    async fn push_one(&self, package: &Path) -> Result<(), String> {
        debug!(package = %package.display(), url = %self.url, "Pushing package");

        let output = Command::new(&self.tool)
            .arg("push")
            .arg(package)
            .arg("--source")
            .arg(&self.url)
            .arg("--api-key")
            .arg(&self.api_key)
            .output()
            .await
            .map_err(|e| format!("failed to run '{}': {}", self.tool, e))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(format!(
                "exit code {}: {}",
                output.status.code().unwrap_or(-1),
                stderr.trim()
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[cfg(unix)]
    fn write_tool(dir: &Path, script: &str) -> PathBuf {
        use std::os::unix::fs::PermissionsExt;
        let path = dir.join("push-tool");
        fs::write(&path, script).unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
        path
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_push_all_continues_after_failure() {
        let dir = tempdir().unwrap();
        // ファイル名に "bad" を含むパッケージだけ失敗する
        let tool = write_tool(
            dir.path(),
            "#!/bin/sh\ncase \"$2\" in *Bad*) echo rejected >&2; exit 1;; esac\nexit 0\n",
        );

        let packages = vec![
            dir.path().join("Acme.Good.1.0.0.nupkg"),
            dir.path().join("Acme.Bad.1.0.0.nupkg"),
            dir.path().join("Acme.Other.1.0.0.nupkg"),
        ];
        for package in &packages {
            fs::write(package, "pkg").unwrap();
        }

        let pusher = FeedPusher::new(tool.to_str().unwrap(), "http://feed.local/", "key");
        let report = pusher.push_all(&packages).await;

        // 2件目が失敗しても3件目はpushされる
        assert_eq!(report.pushed, vec!["Acme.Good.1.0.0.nupkg", "Acme.Other.1.0.0.nupkg"]);
        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].package, "Acme.Bad.1.0.0.nupkg");
        assert!(report.failures[0].message.contains("rejected"));
        assert!(!report.is_clean());
        assert_eq!(report.total(), 3);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_push_invocation_shape() {
        let dir = tempdir().unwrap();
        let args_file = dir.path().join("args.txt");
        let tool = write_tool(
            dir.path(),
            &format!("#!/bin/sh\nprintf '%s\\n' \"$@\" > {}\nexit 0\n", args_file.display()),
        );

        let package = dir.path().join("Acme.Core.1.0.0.nupkg");
        fs::write(&package, "pkg").unwrap();

        let pusher = FeedPusher::new(
            tool.to_str().unwrap(),
            "http://feed.local:81/",
            "secret-key",
        );
        let report = pusher.push_all(std::slice::from_ref(&package)).await;
        assert!(report.is_clean());

        let args = fs::read_to_string(&args_file).unwrap();
        let lines: Vec<&str> = args.lines().collect();
        assert_eq!(lines[0], "push");
        assert!(lines[1].ends_with("Acme.Core.1.0.0.nupkg"));
        assert_eq!(lines[2], "--source");
        assert_eq!(lines[3], "http://feed.local:81/");
        assert_eq!(lines[4], "--api-key");
        assert_eq!(lines[5], "secret-key");
    }

    #[tokio::test]
    async fn test_push_missing_tool_records_failure() {
        let dir = tempdir().unwrap();
        let package = dir.path().join("Acme.Core.1.0.0.nupkg");
        fs::write(&package, "pkg").unwrap();

        let pusher = FeedPusher::new("/nonexistent/push-tool", "http://feed.local/", "key");
        let report = pusher.push_all(std::slice::from_ref(&package)).await;

        assert!(report.pushed.is_empty());
        assert_eq!(report.failures.len(), 1);
    }

    #[test]
    fn test_from_feed_requires_api_key_env() {
        let feed = Feed {
            url: "http://feed.local/".to_string(),
            api_key_env: "SHIPFLOW_TEST_KEY_THAT_DOES_NOT_EXIST".to_string(),
        };
        let result = FeedPusher::from_feed(&feed, "nuget");
        assert!(matches!(result, Err(PublishError::MissingApiKey { .. })));
    }
}
