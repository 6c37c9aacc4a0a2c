//! Turning `--proof` arguments into values the API accepts.

use std::path::Path;

use anyhow::{Context, Result, bail};
use habits_core::data_uri::DataUri;

/// Guess an image media type from a file extension.
fn mime_for(path: &Path) -> Option<&'static str> {
  let ext = path.extension()?.to_str()?.to_ascii_lowercase();
  Some(match ext.as_str() {
    "png" => "image/png",
    "jpg" | "jpeg" => "image/jpeg",
    "gif" => "image/gif",
    "webp" => "image/webp",
    _ => return None,
  })
}

/// Read an image file into a `data:` URI.
pub fn load_image(path: &Path) -> Result<DataUri> {
  let Some(mime) = mime_for(path) else {
    bail!("{} is not a png, jpeg, gif or webp image", path.display());
  };
  let bytes = std::fs::read(path).with_context(|| format!("reading {}", path.display()))?;
  Ok(DataUri::from_bytes(mime, &bytes))
}

/// URLs and `data:` URIs pass through untouched; anything else is read as a
/// local image file.
pub fn resolve(arg: &str) -> Result<String> {
  if ["http://", "https://", "data:"].iter().any(|p| arg.starts_with(p)) {
    return Ok(arg.to_string());
  }
  Ok(load_image(Path::new(arg))?.to_string())
}

/// Write a decoded image next to `original`, e.g. `run.jpg` → `run.edited.png`.
pub fn save_edited(original: &Path, image: &DataUri) -> Result<std::path::PathBuf> {
  let ext = image.mime_type.strip_prefix("image/").unwrap_or("bin");
  let ext = if ext == "jpeg" { "jpg" } else { ext };
  let stem = original
    .file_stem()
    .and_then(|s| s.to_str())
    .unwrap_or("proof");
  let target = original.with_file_name(format!("{stem}.edited.{ext}"));
  std::fs::write(&target, image.decode_bytes()?)
    .with_context(|| format!("writing {}", target.display()))?;
  Ok(target)
}
