//! Path-based entry points: the read → grayscale → write pipeline over files.

use std::fs;
use std::io::Write as _;
use std::path::Path;

use enough::Unstoppable;
use tempfile::NamedTempFile;

use crate::error::BmpError;
use crate::gray::{self, LumaRounding};
use crate::image::Image;

/// Read and decode a 24-bit BMP file.
///
/// The file is read fully and its handle closed before decoding starts.
pub fn read_bmp(path: impl AsRef<Path>) -> Result<Image, BmpError> {
    let path = path.as_ref();
    let data = fs::read(path)?;
    log::debug!("read {} bytes from {}", data.len(), path.display());
    crate::bmp::decode(&data, None, &Unstoppable)
}

/// Encode the image's grayscale plane and write it to `path`.
///
/// The whole file is encoded in memory first, so an image without a grayscale plane
/// fails before anything touches the filesystem. The bytes go to a uniquely named
/// temporary file in the same directory, which is renamed over `path` once fully
/// written; on failure it is removed and `path` is left as it was.
pub fn write_gray_bmp(path: impl AsRef<Path>, image: &Image) -> Result<(), BmpError> {
    let bytes = crate::bmp::encode(image, &Unstoppable)?;
    write_atomic(path.as_ref(), &bytes)
}

/// Encode the image's grayscale plane as binary PGM and write it to `path`.
///
/// Same write discipline as [`write_gray_bmp`].
pub fn write_gray_pgm(path: impl AsRef<Path>, image: &Image) -> Result<(), BmpError> {
    let bytes = crate::pgm::encode_gray_pgm(image, &Unstoppable)?;
    write_atomic(path.as_ref(), &bytes)
}

/// Decode `src`, convert it to grayscale, and write an 8-bit BMP to `dst`.
pub fn convert_file(src: impl AsRef<Path>, dst: impl AsRef<Path>) -> Result<(), BmpError> {
    let mut image = read_bmp(src)?;
    gray::convert(&mut image, LumaRounding::default())?;
    write_gray_bmp(dst, &image)
}

fn write_atomic(path: &Path, bytes: &[u8]) -> Result<(), BmpError> {
    let mut tmp = NamedTempFile::new_in(parent_dir(path))?;
    tmp.write_all(bytes)?;
    tmp.as_file().sync_all()?;
    // An unpersisted temp file deletes itself on drop.
    tmp.persist(path).map_err(|e| e.error)?;
    log::debug!("wrote {} bytes to {}", bytes.len(), path.display());
    Ok(())
}

/// Directory that will hold `path`; `.` for a bare file name.
fn parent_dir(path: &Path) -> &Path {
    match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    }
}
