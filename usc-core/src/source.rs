//! Reading required input files.
//!
//! Every raw input is mandatory: a missing file is reported as
//! [`ClimateError::MissingFile`] so callers can abort before producing
//! partial output.

use crate::error::{ClimateError, Result};
use flate2::read::GzDecoder;
use std::fs::{self, File};
use std::io::Read;
use std::path::{Path, PathBuf};

/// Read a required text file.
pub fn read_required(path: &Path) -> Result<String> {
    if !path.exists() {
        return Err(ClimateError::MissingFile {
            path: path.to_path_buf(),
        });
    }
    Ok(fs::read_to_string(path)?)
}

/// `path` with `.gz` appended (`2013_tp.csv` -> `2013_tp.csv.gz`).
pub fn gzip_path(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_os_string();
    name.push(".gz");
    PathBuf::from(name)
}

/// Read a required text file, falling back to a gzip-compressed sibling
/// when only the `.gz` file is present.
pub fn read_required_or_gzip(path: &Path) -> Result<String> {
    if path.exists() {
        return Ok(fs::read_to_string(path)?);
    }
    let compressed = gzip_path(path);
    if !compressed.exists() {
        return Err(ClimateError::MissingFile {
            path: path.to_path_buf(),
        });
    }
    log::info!("source: Reading compressed {}", compressed.display());
    let mut decoder = GzDecoder::new(File::open(&compressed)?);
    let mut text = String::new();
    decoder.read_to_string(&mut text)?;
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::write::GzEncoder;
    use flate2::Compression;
    use std::io::Write;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("usc-core-{}-{}", name, std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn missing_file_is_reported_with_path() {
        let dir = scratch_dir("missing");
        let path = dir.join("states.csv");
        match read_required(&path) {
            Err(ClimateError::MissingFile { path: reported }) => assert_eq!(reported, path),
            other => panic!("expected MissingFile, got {:?}", other),
        }
        assert!(read_required_or_gzip(&path).is_err());
    }

    #[test]
    fn gzip_sibling_is_read_transparently() {
        let dir = scratch_dir("gzip");
        let path = dir.join("2013_tp.csv");
        let mut encoder = GzEncoder::new(
            File::create(gzip_path(&path)).unwrap(),
            Compression::default(),
        );
        encoder.write_all(b"USC00040693,20130101,TMAX,156\n").unwrap();
        encoder.finish().unwrap();

        let text = read_required_or_gzip(&path).unwrap();
        assert_eq!(text, "USC00040693,20130101,TMAX,156\n");
    }

    #[test]
    fn plain_file_wins_over_gzip() {
        let dir = scratch_dir("plain");
        let path = dir.join("2014_tp.csv");
        fs::write(&path, "plain").unwrap();
        fs::write(gzip_path(&path), "not really gzip").unwrap();
        assert_eq!(read_required_or_gzip(&path).unwrap(), "plain");
    }
}
