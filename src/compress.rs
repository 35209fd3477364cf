//! Gzip output for purged stylesheets.
//!
//! `<out>/main-purged.css` is streamed into `<out>/main-purged.css.gz`. The
//! uncompressed file is left in place so servers can pick either.

use flate2::Compression;
use flate2::write::GzEncoder;
use std::ffi::OsString;
use std::fs::File;
use std::io::{self, BufReader, BufWriter};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CompressError {
    #[error("Cannot read {path}: {source}")]
    Read { path: PathBuf, source: io::Error },
    #[error("Cannot write {path}: {source}")]
    Write { path: PathBuf, source: io::Error },
}

/// Path of the gzip companion for `path` (`.gz` appended, not substituted).
pub fn gz_path(path: &Path) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(".gz");
    PathBuf::from(name)
}

/// Gzip `output_dir/purged_file` next to itself, overwriting any existing
/// `.gz`.
///
/// Returns the path of the uncompressed purged file; use [`gz_path`] for the
/// compressed one. Both handles are dropped on every return path.
pub fn compress_purged_file(
    output_dir: &Path,
    purged_file: &str,
) -> Result<PathBuf, CompressError> {
    let source = output_dir.join(purged_file);
    let target = gz_path(&source);

    let read_err = |e: io::Error| CompressError::Read {
        path: source.clone(),
        source: e,
    };
    let write_err = |e: io::Error| CompressError::Write {
        path: target.clone(),
        source: e,
    };

    let mut reader = BufReader::new(File::open(&source).map_err(read_err)?);
    let out = File::create(&target).map_err(write_err)?;
    let mut encoder = GzEncoder::new(BufWriter::new(out), Compression::default());

    io::copy(&mut reader, &mut encoder).map_err(write_err)?;
    let writer = encoder.finish().map_err(write_err)?;
    writer.into_inner().map_err(|e| write_err(e.into_error()))?;

    Ok(source)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::gunzip;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn roundtrip_reproduces_bytes() {
        let tmp = TempDir::new().unwrap();
        let css = ".btn{color:red}\n.nav > li{margin:0 auto}\n".repeat(200);
        fs::write(tmp.path().join("main-purged.css"), &css).unwrap();

        compress_purged_file(tmp.path(), "main-purged.css").unwrap();

        let restored = gunzip(&tmp.path().join("main-purged.css.gz"));
        assert_eq!(restored, css.as_bytes());
    }

    #[test]
    fn returns_uncompressed_path() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("a-purged.css"), "a{}").unwrap();

        let returned = compress_purged_file(tmp.path(), "a-purged.css").unwrap();
        assert_eq!(returned, tmp.path().join("a-purged.css"));
        assert!(returned.exists());
    }

    #[test]
    fn empty_file_compresses() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("empty-purged.css"), "").unwrap();

        compress_purged_file(tmp.path(), "empty-purged.css").unwrap();
        assert!(gunzip(&tmp.path().join("empty-purged.css.gz")).is_empty());
    }

    #[test]
    fn overwrites_existing_gz() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("a-purged.css"), "body{}").unwrap();
        fs::write(tmp.path().join("a-purged.css.gz"), "stale, not gzip").unwrap();

        compress_purged_file(tmp.path(), "a-purged.css").unwrap();
        assert_eq!(gunzip(&tmp.path().join("a-purged.css.gz")), b"body{}");
    }

    #[test]
    fn missing_source_is_read_error() {
        let tmp = TempDir::new().unwrap();
        let result = compress_purged_file(tmp.path(), "missing-purged.css");
        assert!(matches!(result, Err(CompressError::Read { .. })));
        assert!(!tmp.path().join("missing-purged.css.gz").exists());
    }

    #[test]
    fn gz_path_appends_suffix() {
        assert_eq!(
            gz_path(Path::new("out/a-purged.css")),
            PathBuf::from("out/a-purged.css.gz")
        );
    }
}
