use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// 1ファイル分のコピー失敗
#[derive(Debug)]
pub struct CopyFailure {
    pub from: PathBuf,
    pub to: PathBuf,
    pub message: String,
}

impl fmt::Display for CopyFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} -> {}: {}",
            self.from.display(),
            self.to.display(),
            self.message
        )
    }
}

/// 成果物が見つからなかった理由
///
/// 「ディレクトリ自体がない」と「あるが対象ファイルがない」は
/// 原因が違うので区別して報告する。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissingReason {
    SourceDirAbsent,
    NothingToCopy,
}

impl fmt::Display for MissingReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SourceDirAbsent => write!(f, "source directory absent"),
            Self::NothingToCopy => write!(f, "nothing to copy"),
        }
    }
}

#[derive(Debug, Error)]
pub enum StageError {
    #[error("missing artifacts for library '{library}': {reason}: {path}")]
    MissingArtifact {
        library: String,
        path: PathBuf,
        reason: MissingReason,
    },

    #[error("{} file copy failure(s) during staging", .failures.len())]
    CopyFailures { failures: Vec<CopyFailure> },

    #[error("version correction failed with exit code {code}: {stderr}")]
    VersionCorrectionFailed { code: i32, stderr: String },

    #[error("external tool not found: {tool}")]
    ToolNotFound {
        tool: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("version fixer tool is not configured")]
    VersionFixerNotConfigured,

    #[error("staging directory error at {path}: {message}")]
    StagingDir { path: PathBuf, message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type StageResult<T> = std::result::Result<T, StageError>;
