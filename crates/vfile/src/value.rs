//! File contents and the encodings used to move between text and bytes

use std::borrow::Cow;
use std::fmt;
use std::io;
use std::str::FromStr;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use serde::Deserialize;

/// In-memory contents of a virtual file
///
/// Reads without an encoding yield `Bytes`; reads with one yield `Text`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Text(String),
    Bytes(Vec<u8>),
}

impl Value {
    /// Decode raw bytes, keeping them as-is when no encoding is given
    pub fn decode(bytes: Vec<u8>, encoding: Option<Encoding>) -> Self {
        match encoding {
            Some(encoding) => Self::Text(encoding.decode(&bytes)),
            None => Self::Bytes(bytes),
        }
    }

    /// Bytes to put on disk for this value
    ///
    /// The encoding only applies to `Text`; `Bytes` are written verbatim.
    pub fn encode(&self, encoding: Option<Encoding>) -> io::Result<Cow<'_, [u8]>> {
        match self {
            Self::Bytes(bytes) => Ok(Cow::Borrowed(bytes)),
            Self::Text(text) => encoding.unwrap_or_default().encode(text),
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Self::Text(text) => text.len(),
            Self::Bytes(bytes) => bytes.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            Self::Bytes(_) => None,
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        match self {
            Self::Text(text) => text.as_bytes(),
            Self::Bytes(bytes) => bytes,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(text) => f.write_str(text),
            Self::Bytes(bytes) => f.write_str(&String::from_utf8_lossy(bytes)),
        }
    }
}

impl From<String> for Value {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<&str> for Value {
    fn from(text: &str) -> Self {
        Self::Text(text.to_owned())
    }
}

impl From<Vec<u8>> for Value {
    fn from(bytes: Vec<u8>) -> Self {
        Self::Bytes(bytes)
    }
}

impl From<&[u8]> for Value {
    fn from(bytes: &[u8]) -> Self {
        Self::Bytes(bytes.to_vec())
    }
}

/// Character encodings accepted by read and write options
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(try_from = "String")]
pub enum Encoding {
    #[default]
    Utf8,
    Ascii,
    /// Also known as `binary`
    Latin1,
    Base64,
    Hex,
}

impl Encoding {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Utf8 => "utf8",
            Self::Ascii => "ascii",
            Self::Latin1 => "latin1",
            Self::Base64 => "base64",
            Self::Hex => "hex",
        }
    }

    /// Turn bytes read from disk into text
    pub fn decode(self, bytes: &[u8]) -> String {
        match self {
            Self::Utf8 => String::from_utf8_lossy(bytes).into_owned(),
            Self::Ascii => bytes.iter().map(|&b| char::from(b & 0x7f)).collect(),
            Self::Latin1 => bytes.iter().map(|&b| char::from(b)).collect(),
            Self::Base64 => BASE64.encode(bytes),
            Self::Hex => hex::encode(bytes),
        }
    }

    /// Turn text into the bytes to write
    ///
    /// Single-byte encodings keep the low byte of every code point.
    #[allow(clippy::cast_possible_truncation)]
    pub fn encode(self, text: &str) -> io::Result<Cow<'_, [u8]>> {
        let bytes = match self {
            Self::Utf8 => return Ok(Cow::Borrowed(text.as_bytes())),
            Self::Ascii | Self::Latin1 => text.chars().map(|c| u32::from(c) as u8).collect(),
            Self::Base64 => BASE64
                .decode(text.trim())
                .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?,
            Self::Hex => {
                hex::decode(text.trim()).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?
            }
        };
        Ok(Cow::Owned(bytes))
    }
}

impl fmt::Display for Encoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown encoding `{0}`")]
pub struct UnknownEncoding(pub String);

impl FromStr for Encoding {
    type Err = UnknownEncoding;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "utf8" | "utf-8" => Ok(Self::Utf8),
            "ascii" => Ok(Self::Ascii),
            "latin1" | "binary" => Ok(Self::Latin1),
            "base64" => Ok(Self::Base64),
            "hex" => Ok(Self::Hex),
            _ => Err(UnknownEncoding(s.to_owned())),
        }
    }
}

impl TryFrom<String> for Encoding {
    type Error = UnknownEncoding;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}
