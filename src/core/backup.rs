use crate::errors::{AppError, AppResult};
use crate::ui::input::confirm;
use crate::ui::messages::{info, success, warning};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::debug;
use zip::ZipWriter;
use zip::write::FileOptions;

pub struct BackupLogic;

impl BackupLogic {
    /// Copy the database file to `dest`, optionally replacing the copy with
    /// a `.zip` archive. Returns the final path, or `None` when the user
    /// declined to overwrite an existing file.
    pub fn backup(db_path: &Path, dest: &Path, compress: bool) -> AppResult<Option<PathBuf>> {
        if !db_path.exists() {
            return Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("Database not found: {}", db_path.display()),
            )
            .into());
        }

        if let Some(parent) = dest.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }

        let target = if compress {
            dest.with_extension("zip")
        } else {
            dest.to_path_buf()
        };

        if target.exists() {
            warning(format!("The file '{}' already exists.", target.display()));
            if !confirm("Do you want to overwrite it?")? {
                info("Backup cancelled.");
                return Ok(None);
            }
        }

        if compress {
            compress_into(db_path, &target)?;
        } else {
            fs::copy(db_path, &target)?;
        }

        debug!(src = %db_path.display(), dest = %target.display(), compress, "backup written");
        success(format!("Backup created: {}", target.display()));
        Ok(Some(target))
    }
}

/// Write `src` as the single entry of a deflated zip archive.
fn compress_into(src: &Path, zip_path: &Path) -> AppResult<()> {
    let name = src
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .ok_or_else(|| AppError::Other(format!("not a file: {}", src.display())))?;

    let file = fs::File::create(zip_path)?;
    let mut zip = ZipWriter::new(file);
    let options: FileOptions<'_, ()> =
        FileOptions::default().compression_method(zip::CompressionMethod::Deflated);

    zip.start_file(name, options).map_err(io::Error::other)?;
    let mut f = fs::File::open(src)?;
    io::copy(&mut f, &mut zip)?;
    zip.finish().map_err(io::Error::other)?;
    Ok(())
}
