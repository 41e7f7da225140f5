use anyhow::{Result, Context, anyhow};
use std::io::Write;
use std::path::{Path, PathBuf};
use log::{debug, warn};
use tempfile::NamedTempFile;
use tokio::task::JoinSet;

use crate::language_utils;

// @module: File and directory utilities

// @const: Extension of subtitle files picked up in directory mode
const SUBTITLE_EXTENSION: &str = "srt";

// @struct: Contents of one directory, split by kind
#[derive(Debug, Default)]
struct DirListing {
    files: Vec<PathBuf>,
    subdirs: Vec<PathBuf>,
}

// @struct: File operations utility
pub struct FileManager;

impl FileManager {
    // @checks: File existence
    pub fn file_exists<P: AsRef<Path>>(path: P) -> bool {
        path.as_ref().is_file()
    }

    // @checks: Directory existence
    pub fn dir_exists<P: AsRef<Path>>(path: P) -> bool {
        path.as_ref().is_dir()
    }

    // @generates: Output path for a translated subtitle, next to the input
    // @params: input_file, target_language
    pub fn output_path_for<P: AsRef<Path>>(input_file: P, target_language: &str) -> PathBuf {
        let input_file = input_file.as_ref();

        // Get the file stem (filename without extension)
        let stem = input_file.file_stem().unwrap_or_default();

        let mut output_filename = stem.to_string_lossy().to_string();
        output_filename.push_str(&language_utils::output_marker(target_language));
        output_filename.push('.');
        output_filename.push_str(SUBTITLE_EXTENSION);

        input_file.with_file_name(output_filename)
    }

    /// Whether a path is an untranslated subtitle for the target language
    ///
    /// Only `.srt` files (any case) qualify, and files already carrying the
    /// `[<lang>]` marker are skipped so outputs are never translated again.
    pub fn is_candidate<P: AsRef<Path>>(path: P, target_language: &str) -> bool {
        let path = path.as_ref();

        let is_subtitle = path.extension()
            .is_some_and(|ext| ext.to_string_lossy().eq_ignore_ascii_case(SUBTITLE_EXTENSION));
        if !is_subtitle {
            return false;
        }

        let marker = language_utils::output_marker(target_language);
        path.file_name()
            .is_some_and(|name| !name.to_string_lossy().contains(&marker))
    }

    /// Find every candidate subtitle below a directory
    ///
    /// Each directory is listed by its own task; subdirectories are spawned into
    /// the same task set and the walk ends when the set drains. The order of the
    /// returned paths is unspecified.
    pub async fn discover_subtitles<P: AsRef<Path>>(dir: P, target_language: &str) -> Result<Vec<PathBuf>> {
        let root = dir.as_ref().to_path_buf();
        if !Self::dir_exists(&root) {
            return Err(anyhow!("Directory does not exist: {:?}", root));
        }

        let mut walkers = JoinSet::new();
        walkers.spawn(Self::list_directory(root));

        let mut found = Vec::new();
        while let Some(joined) = walkers.join_next().await {
            let listing = match joined.context("Directory walker task failed")? {
                Ok(listing) => listing,
                Err(e) => {
                    warn!("Skipping unreadable directory: {:#}", e);
                    continue;
                }
            };

            for subdir in listing.subdirs {
                walkers.spawn(Self::list_directory(subdir));
            }

            found.extend(
                listing.files.into_iter()
                    .filter(|path| Self::is_candidate(path, target_language))
            );
        }

        debug!("Discovered {} subtitle files", found.len());
        Ok(found)
    }

    // @lists: Files and subdirectories of one directory, symlinked dirs are not followed
    async fn list_directory(dir: PathBuf) -> Result<DirListing> {
        let mut listing = DirListing::default();
        let mut entries = tokio::fs::read_dir(&dir).await
            .with_context(|| format!("Failed to read directory: {:?}", dir))?;

        while let Some(entry) = entries.next_entry().await
            .with_context(|| format!("Failed to read directory entry in {:?}", dir))? {
            let path = entry.path();
            let file_type = entry.file_type().await
                .with_context(|| format!("Failed to stat {:?}", path))?;

            if file_type.is_dir() {
                listing.subdirs.push(path);
            } else if file_type.is_file() {
                listing.files.push(path);
            } else if file_type.is_symlink() {
                let is_file = tokio::fs::metadata(&path).await
                    .map(|meta| meta.is_file())
                    .unwrap_or(false);
                if is_file {
                    listing.files.push(path);
                }
            }
        }

        Ok(listing)
    }

    /// Read a whole file as raw bytes
    pub async fn read_bytes<P: AsRef<Path>>(path: P) -> Result<Vec<u8>> {
        tokio::fs::read(&path).await
            .with_context(|| format!("Failed to read file: {:?}", path.as_ref()))
    }

    /// Atomic write run on the blocking thread pool, for use from async code
    pub async fn write_to_file_async(path: PathBuf, content: String) -> Result<()> {
        tokio::task::spawn_blocking(move || Self::write_to_file(&path, &content))
            .await
            .map_err(|e| anyhow!("Write task failed: {}", e))?
    }

    /// Write a string to a file atomically
    ///
    /// The content goes to a temporary file in the target directory which is
    /// then renamed over the destination, so readers never see a partial file.
    pub fn write_to_file<P: AsRef<Path>>(path: P, content: &str) -> Result<()> {
        let path = path.as_ref();
        let parent = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };

        let mut temp = NamedTempFile::new_in(parent)
            .with_context(|| format!("Failed to create temporary file in {:?}", parent))?;
        temp.write_all(content.as_bytes())
            .with_context(|| format!("Failed to write to file: {:?}", path))?;
        temp.persist(path)
            .with_context(|| format!("Failed to move output into place: {:?}", path))?;

        Ok(())
    }
}
