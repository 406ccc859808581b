//! Source tree walking.
//!
//! Recursively enumerates every file under the source directory and keeps
//! the [candidates](crate::filter::is_candidate). Directories themselves are
//! never candidates; files inside skip directories are filtered by path, so
//! the walk still descends into them. A symlink to a file counts as a file;
//! symlinked directories are not descended into.
//!
//! Entries the walker cannot read (permission errors, broken symlinks) are
//! logged and skipped rather than aborting the walk.

use crate::config::WebpConfig;
use crate::filter::is_candidate;
use std::path::PathBuf;
use walkdir::WalkDir;

/// Iterate candidate files under `config.source_dir`, in walk order.
///
/// Yields nothing if the source directory does not exist.
pub fn candidates(config: &WebpConfig) -> impl Iterator<Item = PathBuf> + '_ {
    WalkDir::new(&config.source_dir)
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(e) => {
                if config.source_dir.exists() {
                    tracing::warn!("Skipping unreadable entry under {:?}: {}", config.source_dir, e);
                }
                None
            }
        })
        .filter(|entry| entry.path().is_file())
        .map(|entry| entry.into_path())
        .filter(|path| is_candidate(path, config))
}

/// Collect all candidates, sorted by path.
pub fn find_candidates(config: &WebpConfig) -> Vec<PathBuf> {
    let mut found: Vec<PathBuf> = candidates(config).collect();
    found.sort();
    found
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::touch;
    use tempfile::TempDir;

    fn config_for(source: &std::path::Path) -> WebpConfig {
        WebpConfig {
            source_dir: source.to_path_buf(),
            ..WebpConfig::default()
        }
    }

    #[test]
    fn finds_supported_files_recursively() {
        let tmp = TempDir::new().unwrap();
        touch(&tmp.path().join("a.jpg"));
        touch(&tmp.path().join("albums/japan/b.PNG"));
        touch(&tmp.path().join("albums/c.webp"));
        touch(&tmp.path().join("notes.txt"));

        let found = find_candidates(&config_for(tmp.path()));
        assert_eq!(
            found,
            vec![
                tmp.path().join("a.jpg"),
                tmp.path().join("albums/c.webp"),
                tmp.path().join("albums/japan/b.PNG"),
            ]
        );
    }

    #[test]
    fn excludes_skip_dirs_and_variants() {
        let tmp = TempDir::new().unwrap();
        touch(&tmp.path().join("a.jpg"));
        touch(&tmp.path().join("a-300.jpg"));
        touch(&tmp.path().join("thumbnails/c.jpg"));

        let found = find_candidates(&config_for(tmp.path()));
        assert_eq!(found, vec![tmp.path().join("a.jpg")]);
    }

    #[test]
    fn directory_named_like_image_is_not_candidate() {
        let tmp = TempDir::new().unwrap();
        std::fs::create_dir_all(tmp.path().join("folder.jpg")).unwrap();

        assert!(find_candidates(&config_for(tmp.path())).is_empty());
    }

    #[cfg(unix)]
    #[test]
    fn symlinked_file_is_candidate() {
        let tmp = TempDir::new().unwrap();
        let real = tmp.path().join("library/dawn.jpg");
        touch(&real);
        let source = tmp.path().join("source");
        std::fs::create_dir_all(&source).unwrap();
        std::os::unix::fs::symlink(&real, source.join("dawn.jpg")).unwrap();
        std::os::unix::fs::symlink(tmp.path().join("gone.jpg"), source.join("broken.jpg"))
            .unwrap();

        let found = find_candidates(&config_for(&source));
        assert_eq!(found, vec![source.join("dawn.jpg")]);
    }

    #[test]
    fn missing_source_yields_nothing() {
        let tmp = TempDir::new().unwrap();
        let config = config_for(&tmp.path().join("missing"));
        assert!(find_candidates(&config).is_empty());
    }
}
