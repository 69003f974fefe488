// Playlist packaging - zips a download folder next to itself

use anyhow::{anyhow, Context, Result};
use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

/// `<dir>.zip` in the directory's parent
pub fn archive_path(dir: &Path) -> Result<PathBuf> {
    let name = dir
        .file_name()
        .ok_or_else(|| anyhow!("Cannot archive {}: no directory name", dir.display()))?;
    let mut zip_name = name.to_os_string();
    zip_name.push(".zip");
    Ok(dir.with_file_name(zip_name))
}

/// Archive the folder holding the first downloaded file.
pub fn zip_download_folder(files: &[PathBuf]) -> Result<PathBuf> {
    let first = files.first().ok_or_else(|| anyhow!("Nothing to archive"))?;
    let dir = first
        .parent()
        .ok_or_else(|| anyhow!("{} has no parent folder", first.display()))?;
    zip_directory(dir)
}

/// Write every file under `dir` into `<dir>.zip`, with paths relative to `dir`.
pub fn zip_directory(dir: &Path) -> Result<PathBuf> {
    let zip_path = archive_path(dir)?;
    let mut files = Vec::new();
    walk_files(dir, &mut files).with_context(|| format!("Failed to list {}", dir.display()))?;
    files.sort();

    let file = File::create(&zip_path)
        .with_context(|| format!("Failed to create {}", zip_path.display()))?;
    let mut zip = ZipWriter::new(file);
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

    for src in &files {
        let relative = src.strip_prefix(dir).unwrap_or(src);
        let entry = relative.to_string_lossy().replace('\\', "/");
        zip.start_file(entry.as_str(), options)
            .with_context(|| format!("zip start file failed ({entry})"))?;
        let mut f = File::open(src).with_context(|| format!("Failed to open {}", src.display()))?;
        io::copy(&mut f, &mut zip)?;
    }
    zip.finish().context("Failed to finish archive")?;

    tracing::info!(zip = %zip_path.display(), entries = files.len(), "playlist archived");
    Ok(zip_path)
}

fn walk_files(dir: &Path, out: &mut Vec<PathBuf>) -> io::Result<()> {
    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        let file_type = entry.file_type()?;
        if file_type.is_dir() {
            walk_files(&entry.path(), out)?;
        } else if file_type.is_file() {
            out.push(entry.path());
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Read;

    #[test]
    fn test_archive_path_sits_beside_dir() {
        assert_eq!(
            archive_path(Path::new("/music/Mix")).unwrap(),
            PathBuf::from("/music/Mix.zip")
        );
        assert!(archive_path(Path::new("/")).is_err());
    }

    #[test]
    fn test_zip_directory_relative_entries() {
        let root = tempfile::tempdir().unwrap();
        let dir = root.path().join("Mix");
        std::fs::create_dir_all(dir.join("extras")).unwrap();
        std::fs::write(dir.join("01 - One.mp3"), b"one").unwrap();
        std::fs::write(dir.join("extras/cover.jpg"), b"jpg").unwrap();

        let zip_path = zip_download_folder(&[dir.join("01 - One.mp3")]).unwrap();
        assert_eq!(zip_path, root.path().join("Mix.zip"));

        let mut archive = zip::ZipArchive::new(File::open(&zip_path).unwrap()).unwrap();
        let mut names: Vec<String> = archive.file_names().map(String::from).collect();
        names.sort();
        assert_eq!(names, vec!["01 - One.mp3", "extras/cover.jpg"]);

        let mut body = String::new();
        archive
            .by_name("01 - One.mp3")
            .unwrap()
            .read_to_string(&mut body)
            .unwrap();
        assert_eq!(body, "one");
    }

    #[cfg(unix)]
    #[test]
    fn test_symlinked_dirs_are_not_followed() {
        let root = tempfile::tempdir().unwrap();
        let dir = root.path().join("Mix");
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("01 - One.mp3"), b"one").unwrap();
        std::os::unix::fs::symlink(&dir, dir.join("loop")).unwrap();

        let zip_path = zip_directory(&dir).unwrap();
        let archive = zip::ZipArchive::new(File::open(&zip_path).unwrap()).unwrap();
        let names: Vec<&str> = archive.file_names().collect();
        assert_eq!(names, vec!["01 - One.mp3"]);
    }

    #[test]
    fn test_nothing_to_archive() {
        assert!(zip_download_folder(&[]).is_err());
    }
}
