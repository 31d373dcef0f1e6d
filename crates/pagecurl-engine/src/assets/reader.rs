use std::fs::File;
use std::io::{self, Read};
use std::path::{Component, Path};

use super::error::AssetError;

/// Reads the whole asset `name` from `dir`.
///
/// `name` must be a single path component. The read must yield exactly as many
/// bytes as the file reports; anything short is [`AssetError::Truncated`].
pub fn read_asset(dir: impl AsRef<Path>, name: &str) -> Result<Vec<u8>, AssetError> {
    if !is_plain_name(name) {
        return Err(AssetError::InvalidName(name.to_owned()));
    }

    let path = dir.as_ref().join(name);
    let file = File::open(&path).map_err(|source| AssetError::Open {
        path: path.clone(),
        source,
    })?;
    let expected = file
        .metadata()
        .map_err(|source| AssetError::Read {
            path: path.clone(),
            source,
        })?
        .len();

    let bytes = read_checked(file, expected, &path, name)?;

    log::debug!("loaded asset {} ({} bytes)", path.display(), bytes.len());
    Ok(bytes)
}

/// Reads exactly `expected` bytes of asset `name`; fewer is
/// [`AssetError::Truncated`].
fn read_checked<R: Read>(
    reader: R,
    expected: u64,
    path: &Path,
    name: &str,
) -> Result<Vec<u8>, AssetError> {
    let bytes = read_exact_len(reader, expected).map_err(|source| AssetError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let read = bytes.len() as u64;
    if read < expected {
        return Err(AssetError::Truncated {
            name: name.to_owned(),
            expected,
            read,
        });
    }
    Ok(bytes)
}

/// Like [`read_asset`], but logs and returns `None` on any failure.
pub fn read_optional_asset(dir: impl AsRef<Path>, name: &str) -> Option<Vec<u8>> {
    match read_asset(dir, name) {
        Ok(bytes) => Some(bytes),
        Err(e) => {
            log::log!(skip_level(&e), "skipping asset {name}: {e}");
            None
        }
    }
}

/// Log level for a skipped optional asset: debug when absent, warn otherwise.
fn skip_level(err: &AssetError) -> log::Level {
    if err.is_not_found() {
        log::Level::Debug
    } else {
        log::Level::Warn
    }
}

/// Reads at most `expected` bytes. Stops early at end of input.
fn read_exact_len<R: Read>(reader: R, expected: u64) -> io::Result<Vec<u8>> {
    let mut buf = Vec::with_capacity(usize::try_from(expected).unwrap_or(0));
    reader.take(expected).read_to_end(&mut buf)?;
    Ok(buf)
}

fn is_plain_name(name: &str) -> bool {
    let mut components = Path::new(name).components();
    matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    )
}
