//! Cover image persistence.
//!
//! Writes go to a `.part` file that is renamed into place only after the
//! full body has been written and the handle closed, so a failed transfer
//! never leaves a truncated cover at the destination.

use std::path::{Path, PathBuf};

use tokio::io::AsyncWriteExt;

use crate::client::CoverSource;
use crate::error::ItemError;

/// Output extension for downloaded covers. The catalog does not report a
/// content type, so the format is assumed rather than inferred.
pub const COVER_EXTENSION: &str = "png";

/// Destination path for a cover named after its ROM.
pub fn cover_path(output_dir: &Path, rom_name: &str) -> PathBuf {
    output_dir.join(format!("{}.{}", rom_name, COVER_EXTENSION))
}

/// Fetch `url` and persist it at `dest`.
///
/// The scratch file is created before any network traffic, so an unwritable
/// destination is reported without touching the catalog's CDN. On every
/// failure path the scratch file is removed; `dest` only ever appears fully
/// written.
pub async fn download_cover(
    source: &dyn CoverSource,
    url: &str,
    dest: &Path,
) -> Result<(), ItemError> {
    let part = scratch_path(dest);

    let mut file = tokio::fs::File::create(&part)
        .await
        .map_err(ItemError::OutputCreate)?;

    let bytes = match source.fetch_image(url).await {
        Ok(b) => b,
        Err(e) => {
            discard(&part).await;
            return Err(ItemError::Fetch(e));
        }
    };

    if let Err(e) = write_all_and_close(&mut file, &bytes).await {
        drop(file);
        discard(&part).await;
        return Err(ItemError::Copy(e));
    }
    drop(file);

    if let Err(e) = tokio::fs::rename(&part, dest).await {
        discard(&part).await;
        return Err(ItemError::OutputCreate(e));
    }

    Ok(())
}

/// Remove any scratch file left behind for `dest`. Used when a transfer is
/// abandoned partway (the future dropped before its own cleanup could run).
pub(crate) async fn remove_scratch(dest: &Path) {
    discard(&scratch_path(dest)).await;
}

fn scratch_path(dest: &Path) -> PathBuf {
    let mut name = dest.file_name().unwrap_or_default().to_os_string();
    name.push(".part");
    dest.with_file_name(name)
}

async fn write_all_and_close(
    file: &mut tokio::fs::File,
    bytes: &[u8],
) -> Result<(), std::io::Error> {
    file.write_all(bytes).await?;
    file.flush().await?;
    Ok(())
}

async fn discard(part: &Path) {
    if let Err(e) = tokio::fs::remove_file(part).await {
        log::debug!("could not remove scratch file {}: {}", part.display(), e);
    }
}

#[cfg(test)]
#[path = "tests/download_tests.rs"]
mod tests;
