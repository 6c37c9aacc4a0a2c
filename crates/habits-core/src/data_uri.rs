//! `data:` URIs carrying base64-encoded proof images.

use std::{fmt, str::FromStr};

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as B64;

use crate::Error;

/// An inline image in `data:<mime>;base64,<payload>` form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataUri {
  pub mime_type: String,
  /// Base64 payload, still encoded.
  pub data:      String,
}

impl DataUri {
  pub fn new(mime_type: impl Into<String>, data: impl Into<String>) -> Self {
    Self { mime_type: mime_type.into(), data: data.into() }
  }

  /// Encode raw bytes.
  pub fn from_bytes(mime_type: impl Into<String>, bytes: &[u8]) -> Self {
    Self::new(mime_type, B64.encode(bytes))
  }

  pub fn decode_bytes(&self) -> Result<Vec<u8>, Error> {
    B64
      .decode(&self.data)
      .map_err(|e| Error::InvalidDataUri(e.to_string()))
  }
}

impl FromStr for DataUri {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    let rest = s
      .strip_prefix("data:")
      .ok_or_else(|| Error::InvalidDataUri("missing `data:` scheme".into()))?;
    let (header, data) = rest
      .split_once(',')
      .ok_or_else(|| Error::InvalidDataUri("missing `,` separator".into()))?;
    let mime_type = header
      .strip_suffix(";base64")
      .ok_or_else(|| Error::InvalidDataUri("only base64 payloads are supported".into()))?;

    if mime_type.is_empty() {
      return Err(Error::InvalidDataUri("missing media type".into()));
    }
    if !mime_type.starts_with("image/") {
      return Err(Error::InvalidDataUri(format!("{mime_type} is not an image type")));
    }

    let uri = Self::new(mime_type, data);
    uri.decode_bytes()?;
    Ok(uri)
  }
}

impl fmt::Display for DataUri {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "data:{};base64,{}", self.mime_type, self.data)
  }
}
