use std::collections::HashSet;
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

pub fn default_path(home: &Path) -> PathBuf {
    home.join(".ssh").join("authorized_keys")
}

/// Reads the key file line by line. A missing file is an empty key list.
///
/// Lines are kept as raw bytes: nothing about their content is checked.
pub fn read(path: &Path) -> Result<Vec<Vec<u8>>> {
    let contents = match fs::read(path) {
        Ok(contents) => contents,
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            log::debug!("{} does not exist yet", path.display());
            return Ok(Vec::new());
        }
        Err(source) => {
            return Err(Error::Read {
                path: path.to_path_buf(),
                source,
            })
        }
    };
    Ok(split_lines(&contents))
}

/// Splits on `\n`, dropping one trailing `\r` per line. A final newline does
/// not start another line.
fn split_lines(contents: &[u8]) -> Vec<Vec<u8>> {
    if contents.is_empty() {
        return Vec::new();
    }
    let contents = contents.strip_suffix(b"\n").unwrap_or(contents);
    contents
        .split(|&b| b == b'\n')
        .map(|line| line.strip_suffix(b"\r").unwrap_or(line).to_vec())
        .collect()
}

/// Concatenates `remote` and `local` and drops repeated lines, keeping the
/// first occurrence of each. Lines are compared byte for byte, so the same
/// key with a different comment is kept twice.
pub fn merge(remote: Vec<Vec<u8>>, local: Vec<Vec<u8>>) -> Vec<Vec<u8>> {
    let mut seen = HashSet::new();
    remote
        .into_iter()
        .chain(local)
        .filter(|key| seen.insert(key.clone()))
        .collect()
}

/// Replaces the contents of the key file with `keys`, one per line.
pub fn write(path: &Path, keys: &[Vec<u8>]) -> Result<()> {
    log::info!("Writing {} keys to {}", keys.len(), path.display());

    let write_err = |source: io::Error| Error::Write {
        path: path.to_path_buf(),
        source,
    };

    if let Some(dir) = path.parent() {
        if !dir.as_os_str().is_empty() && !dir.exists() {
            fs::create_dir_all(dir).map_err(write_err)?;
        }
    }

    let file = File::create(path).map_err(write_err)?;
    write_lines(BufWriter::new(file), keys).map_err(write_err)?;

    log::info!("Keys written successfully.");
    Ok(())
}

fn write_lines(mut out: impl Write, keys: &[Vec<u8>]) -> io::Result<()> {
    for key in keys {
        out.write_all(key)?;
        out.write_all(b"\n")?;
    }
    out.flush()
}
