//! Source Documents
//!
//! Discovery of HTML pages and passthrough assets under an input directory,
//! plus the read/write plumbing that runs before and after the core.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use walkdir::WalkDir;

/// A file found under the input root
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    /// Path as discovered (input root joined with `relative`)
    pub path: PathBuf,
    /// Path relative to the input root, reused for the output tree
    pub relative: PathBuf,
}

impl SourceFile {
    /// Key used for diagnostics and reports
    pub fn display_path(&self) -> String {
        self.path.display().to_string()
    }
}

/// Everything under an input root, split into pages and assets
#[derive(Debug, Clone, Default)]
pub struct SourceTree {
    pub root: PathBuf,
    pub pages: Vec<SourceFile>,
    pub assets: Vec<SourceFile>,
}

impl SourceTree {
    /// Walk `root` recursively. Pages are `*.html` / `*.htm` (any case),
    /// everything else is an asset. Both lists are sorted by path.
    pub fn discover(root: &Path) -> Result<Self> {
        if !root.is_dir() {
            bail!("Input directory does not exist: {}", root.display());
        }

        let mut tree = SourceTree {
            root: root.to_path_buf(),
            ..Default::default()
        };

        for entry in WalkDir::new(root).sort_by_file_name() {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    log::warn!("Skipping unreadable entry under {}: {}", root.display(), e);
                    continue;
                }
            };
            if !entry.file_type().is_file() {
                continue;
            }

            let path = entry.path().to_path_buf();
            let relative = path
                .strip_prefix(root)
                .map(Path::to_path_buf)
                .unwrap_or_else(|_| path.clone());
            let file = SourceFile { path, relative };

            if is_html_path(&file.path) {
                tree.pages.push(file);
            } else {
                tree.assets.push(file);
            }
        }

        log::debug!(
            "Discovered {} page(s) and {} asset(s) under {}",
            tree.pages.len(),
            tree.assets.len(),
            root.display()
        );
        Ok(tree)
    }
}

/// `.html` or `.htm`, case-insensitive
pub fn is_html_path(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case("html") || ext.eq_ignore_ascii_case("htm"))
        .unwrap_or(false)
}

/// Read a page as text. Invalid UTF-8 is replaced rather than rejected.
pub async fn read_page(file: &SourceFile) -> Result<String> {
    let bytes = tokio::fs::read(&file.path)
        .await
        .with_context(|| format!("Failed to read page: {}", file.path.display()))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Write `contents` at `output_root/relative`, creating parent directories
pub async fn write_output(output_root: &Path, relative: &Path, contents: &str) -> Result<PathBuf> {
    let target = output_root.join(relative);
    if let Some(parent) = target.parent() {
        tokio::fs::create_dir_all(parent)
            .await
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }
    tokio::fs::write(&target, contents)
        .await
        .with_context(|| format!("Failed to write output: {}", target.display()))?;
    Ok(target)
}

/// Copy an asset unchanged into the output tree
pub async fn copy_asset(file: &SourceFile, output_root: &Path) -> Result<u64> {
    let target = output_root.join(&file.relative);
    if let Some(parent) = target.parent() {
        tokio::fs::create_dir_all(parent)
            .await
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }
    tokio::fs::copy(&file.path, &target)
        .await
        .with_context(|| {
            format!(
                "Failed to copy asset {} to {}",
                file.path.display(),
                target.display()
            )
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_is_html_path() {
        assert!(is_html_path(Path::new("a/b/page.html")));
        assert!(is_html_path(Path::new("PAGE.HTM")));
        assert!(!is_html_path(Path::new("style.css")));
        assert!(!is_html_path(Path::new("README")));
    }

    #[test]
    fn test_discover_splits_pages_and_assets() {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("unit1/img")).unwrap();
        fs::write(dir.path().join("index.html"), "<p>x</p>").unwrap();
        fs::write(dir.path().join("unit1/lesson.htm"), "<p>y</p>").unwrap();
        fs::write(dir.path().join("unit1/img/logo.png"), [0u8, 1, 2]).unwrap();

        let tree = SourceTree::discover(dir.path()).unwrap();
        let pages: Vec<_> = tree.pages.iter().map(|p| p.relative.clone()).collect();
        assert_eq!(
            pages,
            vec![PathBuf::from("index.html"), PathBuf::from("unit1/lesson.htm")]
        );
        assert_eq!(tree.assets.len(), 1);
        assert_eq!(tree.assets[0].relative, PathBuf::from("unit1/img/logo.png"));
    }

    #[test]
    fn test_discover_missing_root() {
        let dir = TempDir::new().unwrap();
        assert!(SourceTree::discover(&dir.path().join("nope")).is_err());
    }

    #[tokio::test]
    async fn test_write_and_copy_create_directories() {
        let input = TempDir::new().unwrap();
        let output = TempDir::new().unwrap();
        fs::create_dir_all(input.path().join("css")).unwrap();
        fs::write(input.path().join("css/site.css"), "p{}").unwrap();

        let written = write_output(output.path(), Path::new("deep/dir/page.html"), "<p>x</p>")
            .await
            .unwrap();
        assert_eq!(fs::read_to_string(written).unwrap(), "<p>x</p>");

        let asset = SourceFile {
            path: input.path().join("css/site.css"),
            relative: PathBuf::from("css/site.css"),
        };
        copy_asset(&asset, output.path()).await.unwrap();
        assert_eq!(
            fs::read_to_string(output.path().join("css/site.css")).unwrap(),
            "p{}"
        );
    }
}
