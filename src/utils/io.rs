//! IO Utilities for atomic output and verbatim copies

use std::{
    fs::{self, File},
    io::{self, Write},
    path::Path,
};

use filetime::FileTime;
use tempfile::NamedTempFile;
use tracing::{debug, instrument};

use crate::error::{Error, Result};

/// Writes a file through a temporary sibling that is renamed into place,
/// so the destination is either fully written or left untouched.
/// An existing destination is replaced.
pub fn write_atomic<F>(path: &Path, write: F) -> Result<()>
where
    F: FnOnce(&mut File) -> Result<()>,
{
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut staged = NamedTempFile::new_in(dir)?;
    write(staged.as_file_mut())?;
    staged.as_file_mut().flush()?;
    staged.persist(path)?;
    Ok(())
}

/// Writes a byte slice atomically.
pub fn write_bytes_atomic(path: &Path, data: &[u8]) -> Result<()> {
    write_atomic(path, |file| Ok(file.write_all(data)?))
}

/// Copies a file byte-for-byte, optionally carrying over permissions and
/// access/modification times.
#[instrument]
pub fn copy_file(from: &Path, to: &Path, preserve_metadata: bool) -> Result<u64> {
    let mut source = File::open(from)?;
    let mut copied = 0;
    write_atomic(to, |file| {
        copied = io::copy(&mut source, file)?;
        Ok(())
    })?;

    if preserve_metadata {
        copy_metadata(from, to)?;
    }
    debug!("Copied {} bytes", copied);
    Ok(copied)
}

/// Carries permissions and timestamps from one file to another.
pub fn copy_metadata(from: &Path, to: &Path) -> Result<()> {
    let metadata = fs::metadata(from)?;
    fs::set_permissions(to, metadata.permissions())?;
    filetime::set_file_times(
        to,
        FileTime::from_last_access_time(&metadata),
        FileTime::from_last_modification_time(&metadata),
    )?;
    Ok(())
}

/// Ensures parent directory exists for a file path.
pub fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|e| Error::output(parent, e))?;
        }
    }
    Ok(())
}

/// Returns true if path has one of the allowed extensions.
pub fn has_allowed_extension<S: AsRef<str>>(path: &Path, allowed: &[S]) -> bool {
    match path.extension() {
        Some(ext) => allowed.iter().any(|e| ext.eq_ignore_ascii_case(e.as_ref())),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{Duration, SystemTime};

    #[test]
    fn test_write_atomic_replaces_existing() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("out.bin");
        fs::write(&target, b"old contents").unwrap();

        write_bytes_atomic(&target, b"new").unwrap();
        assert_eq!(fs::read(&target).unwrap(), b"new");
    }

    #[test]
    fn test_failed_write_leaves_nothing_behind() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("out.bin");

        let result = write_atomic(&target, |file| {
            file.write_all(b"partial")?;
            Err(Error::ReportError("boom".into()))
        });

        assert!(result.is_err());
        assert!(!target.exists());
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_copy_preserves_mtime() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("manual.txt");
        let target = dir.path().join("copy.txt");
        fs::write(&source, b"hello").unwrap();

        let past = FileTime::from_system_time(SystemTime::now() - Duration::from_secs(86_400));
        filetime::set_file_mtime(&source, past).unwrap();

        let copied = copy_file(&source, &target, true).unwrap();
        assert_eq!(copied, 5);
        assert_eq!(fs::read(&target).unwrap(), b"hello");

        let copied_meta = fs::metadata(&target).unwrap();
        assert_eq!(FileTime::from_last_modification_time(&copied_meta), past);
    }

    #[test]
    fn test_has_allowed_extension_ignores_case() {
        assert!(has_allowed_extension(Path::new("a/B.PDF"), &["pdf"]));
        assert!(has_allowed_extension(Path::new("c.pdf"), &["fdf", "pdf"]));
        assert!(!has_allowed_extension(Path::new("d.pdf.txt"), &["pdf"]));
        assert!(!has_allowed_extension(Path::new("noext"), &["pdf"]));
    }
}
