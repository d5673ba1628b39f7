use crate::error::{LessonError, Result};
use crate::paths;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

// ---------------------------------------------------------------------------
// LessonMeta
// ---------------------------------------------------------------------------

/// Contents of `lesson.yml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LessonMeta {
    pub title: String,
    #[serde(default)]
    pub description: String,
}

// ---------------------------------------------------------------------------
// LessonDirectory
// ---------------------------------------------------------------------------

/// One tutorial on disk: `{lessons_root}/{slug}/`.
///
/// The directory listing is the only ordering state. [`next_order`] re-scans
/// it on every call, and nothing locks the directory between that scan and
/// the writes that follow, so two processes appending to the same lesson at
/// once can pick the same numbers.
///
/// [`next_order`]: LessonDirectory::next_order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LessonDirectory {
    slug: String,
    path: PathBuf,
}

impl LessonDirectory {
    /// Create the directory tree if absent. Safe to call repeatedly.
    pub fn ensure_exists(lessons_root: &Path, slug: &str) -> Result<Self> {
        paths::validate_slug(slug)?;
        let path = paths::lesson_dir(lessons_root, slug);
        crate::io::ensure_dir(&path)?;
        Ok(Self {
            slug: slug.to_string(),
            path,
        })
    }

    /// Open an existing tutorial; a missing directory is fatal to the caller.
    pub fn require_exists(lessons_root: &Path, slug: &str) -> Result<Self> {
        paths::validate_slug(slug)?;
        let path = paths::lesson_dir(lessons_root, slug);
        if !path.is_dir() {
            return Err(LessonError::LessonNotFound(path));
        }
        Ok(Self {
            slug: slug.to_string(),
            path,
        })
    }

    pub fn slug(&self) -> &str {
        &self.slug
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    // -----------------------------------------------------------------------
    // Metadata
    // -----------------------------------------------------------------------

    pub fn write_metadata(&self, title: &str, description: &str) -> Result<()> {
        let meta = LessonMeta {
            title: title.to_string(),
            description: description.to_string(),
        };
        let data = serde_yaml::to_string(&meta)?;
        crate::io::atomic_write(&paths::lesson_meta_path(&self.path), data.as_bytes())
    }

    pub fn read_metadata(&self) -> Result<Option<LessonMeta>> {
        let path = paths::lesson_meta_path(&self.path);
        if !path.exists() {
            return Ok(None);
        }
        let data = std::fs::read_to_string(&path)?;
        Ok(Some(serde_yaml::from_str(&data)?))
    }

    // -----------------------------------------------------------------------
    // Steps
    // -----------------------------------------------------------------------

    /// Names of the step files currently in the directory, sorted.
    pub fn step_files(&self) -> Result<Vec<String>> {
        let mut names = Vec::new();
        for entry in std::fs::read_dir(&self.path)? {
            let entry = entry?;
            if !entry.file_type()?.is_file() {
                continue;
            }
            let name = entry.file_name().to_string_lossy().into_owned();
            if paths::is_step_file(&name) {
                names.push(name);
            }
        }
        names.sort();
        Ok(names)
    }

    /// Order number the next written step receives: one past the number of
    /// step files present right now.
    pub fn next_order(&self) -> Result<u32> {
        let count = self.step_files()?.len();
        Ok(u32::try_from(count).unwrap_or(u32::MAX).saturating_add(1))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn ensure_exists_is_idempotent() {
        let root = TempDir::new().unwrap();
        let first = LessonDirectory::ensure_exists(root.path(), "docker").unwrap();
        std::fs::write(first.path().join("01-intro.mdx"), "x").unwrap();

        let second = LessonDirectory::ensure_exists(root.path(), "docker").unwrap();
        assert_eq!(first, second);
        assert_eq!(second.step_files().unwrap(), vec!["01-intro.mdx"]);
    }

    #[test]
    fn ensure_exists_rejects_bad_slug() {
        let root = TempDir::new().unwrap();
        let err = LessonDirectory::ensure_exists(root.path(), "Bad Slug").unwrap_err();
        assert!(matches!(err, LessonError::InvalidSlug(_)));
        assert!(std::fs::read_dir(root.path()).unwrap().next().is_none());
    }

    #[test]
    fn require_exists_missing_is_not_found() {
        let root = TempDir::new().unwrap();
        let err = LessonDirectory::require_exists(root.path(), "ghost").unwrap_err();
        assert!(matches!(err, LessonError::LessonNotFound(_)));
    }

    #[test]
    fn require_exists_finds_created() {
        let root = TempDir::new().unwrap();
        LessonDirectory::ensure_exists(root.path(), "docker").unwrap();
        let dir = LessonDirectory::require_exists(root.path(), "docker").unwrap();
        assert_eq!(dir.slug(), "docker");
    }

    #[test]
    fn metadata_roundtrip_and_overwrite() {
        let root = TempDir::new().unwrap();
        let dir = LessonDirectory::ensure_exists(root.path(), "docker").unwrap();
        assert_eq!(dir.read_metadata().unwrap(), None);

        dir.write_metadata("Docker", "First pass").unwrap();
        dir.write_metadata("Docker Basics", "Containers from zero").unwrap();

        let meta = dir.read_metadata().unwrap().unwrap();
        assert_eq!(meta.title, "Docker Basics");
        assert_eq!(meta.description, "Containers from zero");
    }

    #[test]
    fn next_order_counts_only_step_files() {
        let root = TempDir::new().unwrap();
        let dir = LessonDirectory::ensure_exists(root.path(), "docker").unwrap();
        assert_eq!(dir.next_order().unwrap(), 1);

        std::fs::write(dir.path().join("01-intro.mdx"), "a").unwrap();
        std::fs::write(dir.path().join("02-notes.md"), "b").unwrap();
        std::fs::write(dir.path().join("lesson.yml"), "title: x").unwrap();
        std::fs::write(dir.path().join("Dockerfile"), "FROM x").unwrap();
        std::fs::create_dir(dir.path().join("assets.mdx")).unwrap();

        assert_eq!(dir.step_files().unwrap(), vec!["01-intro.mdx", "02-notes.md"]);
        assert_eq!(dir.next_order().unwrap(), 3);
    }
}
