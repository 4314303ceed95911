use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub struct TestProject {
    pub root: TempDir,
}

impl TestProject {
    pub fn new() -> Self {
        let root = tempfile::tempdir().unwrap();
        Self { root }
    }

    pub fn write_ship_kdl(&self, content: &str) {
        let path = self.root.path().join("ship.kdl");
        fs::write(path, content).unwrap();
    }

    /// 相対パスでファイルを作成（親ディレクトリも作る）
    pub fn write_file(&self, relative: &str, content: &str) {
        let path = self.root.path().join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    /// 実行可能なツールスクリプトを作成
    #[cfg(unix)]
    #[allow(dead_code)]
    pub fn write_tool(&self, relative: &str, script: &str) {
        use std::os::unix::fs::PermissionsExt;
        self.write_file(relative, script);
        let path = self.root.path().join(relative);
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
    }

    pub fn path(&self) -> PathBuf {
        self.root.path().to_path_buf()
    }

    /// ターゲットのステージングディレクトリ（デフォルトレイアウト）
    #[allow(dead_code)]
    pub fn staging_dir(&self, target: &str) -> PathBuf {
        self.root.path().join(".shipflow/staging").join(target)
    }

    /// ディレクトリ直下のファイル名一覧（ソート済み）
    #[allow(dead_code)]
    pub fn list_files(&self, dir: &Path) -> Vec<String> {
        let mut names: Vec<String> = fs::read_dir(dir)
            .unwrap()
            .map(|e| e.unwrap().file_name().to_str().unwrap().to_string())
            .collect();
        names.sort();
        names
    }
}
