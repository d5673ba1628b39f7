use lesson_core::paths::CONFIG_FILE;
use std::path::{Path, PathBuf};

/// Resolve the project root.
///
/// Priority:
/// 1. `--root` flag / `LESSONS_ROOT` env var (passed in as `explicit`)
/// 2. Walk upward from `cwd` looking for `lessons.yaml`
/// 3. Walk upward from `cwd` looking for `.git/`
/// 4. Fall back to `cwd`
pub fn resolve_root(explicit: Option<&Path>) -> PathBuf {
    if let Some(p) = explicit {
        return p.to_path_buf();
    }
    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    find_root(&cwd)
}

fn find_root(start: &Path) -> PathBuf {
    let marker = move |name: &str, want_dir: bool| {
        start.ancestors().find(|dir| {
            let candidate = dir.join(name);
            if want_dir {
                candidate.is_dir()
            } else {
                candidate.is_file()
            }
        })
    };

    marker(CONFIG_FILE, false)
        .or_else(|| marker(".git", true))
        .unwrap_or(start)
        .to_path_buf()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn explicit_root_wins() {
        let dir = TempDir::new().unwrap();
        let result = resolve_root(Some(dir.path()));
        assert_eq!(result, dir.path());
    }

    #[test]
    fn finds_config_above_git() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join(CONFIG_FILE), "model: gpt-4o\n").unwrap();
        let repo = dir.path().join("repo");
        std::fs::create_dir_all(repo.join(".git")).unwrap();
        let deep = repo.join("src/deep");
        std::fs::create_dir_all(&deep).unwrap();

        assert_eq!(find_root(&deep), dir.path());
    }

    #[test]
    fn falls_back_to_git_then_start() {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir_all(dir.path().join(".git")).unwrap();
        let deep = dir.path().join("a/b");
        std::fs::create_dir_all(&deep).unwrap();
        assert_eq!(find_root(&deep), dir.path());

        let bare = TempDir::new().unwrap();
        assert_eq!(find_root(bare.path()), bare.path());
    }
}
