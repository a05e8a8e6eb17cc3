use crate::prelude::*;
use flate2::read::GzDecoder;
use std::fs::File;
use std::path::Path;
use tar::Archive;

/// Extract a `.tar.gz` archive into `dest`, creating it if needed.
///
/// Failures are returned to the caller, which decides whether they are
/// recoverable. The engine treats extraction errors as recoverable and keeps
/// going without the artifact.
pub fn extract_tar_gz(archive_path: &Path, dest: &Path) -> Result<()> {
    std::fs::create_dir_all(dest)
        .with_context(|| format!("Failed to create extraction directory {}", dest.display()))?;

    let file = File::open(archive_path)
        .with_context(|| format!("Failed to open archive {}", archive_path.display()))?;
    let mut archive = Archive::new(GzDecoder::new(file));
    archive
        .unpack(dest)
        .with_context(|| format!("Failed to extract {}", archive_path.display()))?;

    debug!(
        "Extracted {:?} into {}",
        archive_path.file_name().unwrap_or_default(),
        dest.display()
    );
    Ok(())
}
