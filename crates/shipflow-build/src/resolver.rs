//! Dockerfileの解決

use crate::error::{BuildError, BuildResult};
use shipflow_core::Target;
use std::path::PathBuf;

pub struct BuildResolver {
    project_root: PathBuf,
}

impl BuildResolver {
    pub fn new(project_root: PathBuf) -> Self {
        Self { project_root }
    }

    /// Dockerfileのパスを解決
    ///
    /// 検索順序:
    /// 1. 明示的な指定（dockerfileフィールド）
    /// 2. 規約ベース:
    ///    - ./docker/{target-name}/Dockerfile
    ///    - ./Dockerfile.{target-name}
    pub fn resolve_dockerfile(&self, target_name: &str, target: &Target) -> BuildResult<PathBuf> {
        // 明示的な指定がある場合
        if let Some(dockerfile) = &target.dockerfile {
            let path = self.project_root.join(dockerfile);
            if path.exists() {
                return Ok(path);
            }
            return Err(BuildError::DockerfileNotFound(path));
        }

        // 規約ベースの検索
        let candidates = [
            format!("docker/{}/Dockerfile", target_name),
            format!("Dockerfile.{}", target_name),
        ];

        for candidate in &candidates {
            let path = self.project_root.join(candidate);
            if path.exists() {
                tracing::debug!(
                    "Found Dockerfile for target '{}' at: {}",
                    target_name,
                    path.display()
                );
                return Ok(path);
            }
        }

        Err(BuildError::DockerfileNotFound(
            self.project_root.join(&candidates[0]),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_resolve_explicit_dockerfile() {
        let root = tempdir().unwrap();
        fs::create_dir_all(root.path().join("custom")).unwrap();
        fs::write(root.path().join("custom/Dockerfile.prod"), "FROM alpine").unwrap();

        let target = Target {
            dockerfile: Some(PathBuf::from("custom/Dockerfile.prod")),
            ..Target::default()
        };

        let resolver = BuildResolver::new(root.path().to_path_buf());
        let path = resolver.resolve_dockerfile("worker", &target).unwrap();
        assert_eq!(path, root.path().join("custom/Dockerfile.prod"));
    }

    #[test]
    fn test_resolve_explicit_missing_is_error() {
        let root = tempdir().unwrap();
        let target = Target {
            dockerfile: Some(PathBuf::from("missing/Dockerfile")),
            ..Target::default()
        };

        let resolver = BuildResolver::new(root.path().to_path_buf());
        let result = resolver.resolve_dockerfile("worker", &target);
        assert!(matches!(result, Err(BuildError::DockerfileNotFound(_))));
    }

    #[test]
    fn test_resolve_by_convention() {
        let root = tempdir().unwrap();
        fs::create_dir_all(root.path().join("docker/worker")).unwrap();
        fs::write(root.path().join("docker/worker/Dockerfile"), "FROM alpine").unwrap();

        let resolver = BuildResolver::new(root.path().to_path_buf());
        let path = resolver
            .resolve_dockerfile("worker", &Target::default())
            .unwrap();
        assert_eq!(path, root.path().join("docker/worker/Dockerfile"));
    }

    #[test]
    fn test_resolve_dotted_convention() {
        let root = tempdir().unwrap();
        fs::write(root.path().join("Dockerfile.worker"), "FROM alpine").unwrap();

        let resolver = BuildResolver::new(root.path().to_path_buf());
        let path = resolver
            .resolve_dockerfile("worker", &Target::default())
            .unwrap();
        assert_eq!(path, root.path().join("Dockerfile.worker"));
    }

    #[test]
    fn test_resolve_nothing_found() {
        let root = tempdir().unwrap();
        let resolver = BuildResolver::new(root.path().to_path_buf());
        let result = resolver.resolve_dockerfile("worker", &Target::default());
        assert!(matches!(result, Err(BuildError::DockerfileNotFound(_))));
    }
}
