//! Options handed through to the read and write primitives
//!
//! Both option types accept either a bare encoding name or an object,
//! from Rust (`From<Encoding>`) and from config (`"utf8"` or `{ ... }`).

use std::fmt;
use std::fs::OpenOptions;
use std::str::FromStr;

use serde::{Deserialize, Deserializer};

use crate::value::Encoding;

/// Default permission bits for newly created files
pub const DEFAULT_MODE: u32 = 0o666;

/// How a file is opened, named the way `fopen`-style flags are
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(try_from = "String")]
pub enum OpenFlag {
    /// `r`
    Read,
    /// `r+`
    ReadWrite,
    /// `w`
    Write,
    /// `wx`
    WriteNew,
    /// `w+`
    WriteRead,
    /// `wx+`
    WriteReadNew,
    /// `a`
    Append,
    /// `ax`
    AppendNew,
    /// `a+`
    AppendRead,
    /// `ax+`
    AppendReadNew,
}

impl OpenFlag {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Read => "r",
            Self::ReadWrite => "r+",
            Self::Write => "w",
            Self::WriteNew => "wx",
            Self::WriteRead => "w+",
            Self::WriteReadNew => "wx+",
            Self::Append => "a",
            Self::AppendNew => "ax",
            Self::AppendRead => "a+",
            Self::AppendReadNew => "ax+",
        }
    }

    pub const fn reads(self) -> bool {
        matches!(
            self,
            Self::Read
                | Self::ReadWrite
                | Self::WriteRead
                | Self::WriteReadNew
                | Self::AppendRead
                | Self::AppendReadNew
        )
    }

    pub const fn writes(self) -> bool {
        !matches!(self, Self::Read)
    }

    pub const fn appends(self) -> bool {
        matches!(
            self,
            Self::Append | Self::AppendNew | Self::AppendRead | Self::AppendReadNew
        )
    }

    /// Missing files are created
    pub const fn creates(self) -> bool {
        !matches!(self, Self::Read | Self::ReadWrite)
    }

    /// Fails with `AlreadyExists` if the file is there
    pub const fn exclusive(self) -> bool {
        matches!(
            self,
            Self::WriteNew | Self::WriteReadNew | Self::AppendNew | Self::AppendReadNew
        )
    }

    pub const fn truncates(self) -> bool {
        matches!(self, Self::Write | Self::WriteRead)
    }

    /// Build the `OpenOptions` for this flag, applying `mode` on unix
    pub fn open_options(self, mode: Option<u32>) -> OpenOptions {
        let mut opts = OpenOptions::new();
        opts.read(self.reads())
            .write(self.writes() && !self.appends())
            .append(self.appends())
            .truncate(self.truncates());
        if self.exclusive() {
            opts.create_new(true);
        } else {
            opts.create(self.creates());
        }

        #[cfg(unix)]
        if let Some(mode) = mode {
            use std::os::unix::fs::OpenOptionsExt;
            opts.mode(mode);
        }
        #[cfg(not(unix))]
        let _ = mode;

        opts
    }
}

impl fmt::Display for OpenFlag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown open flag `{0}`")]
pub struct UnknownFlag(pub String);

impl FromStr for OpenFlag {
    type Err = UnknownFlag;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "r" | "rs" | "sr" => Self::Read,
            "r+" | "rs+" | "sr+" => Self::ReadWrite,
            "w" => Self::Write,
            "wx" | "xw" => Self::WriteNew,
            "w+" => Self::WriteRead,
            "wx+" | "xw+" => Self::WriteReadNew,
            "a" => Self::Append,
            "ax" | "xa" => Self::AppendNew,
            "a+" => Self::AppendRead,
            "ax+" | "xa+" => Self::AppendReadNew,
            _ => return Err(UnknownFlag(s.to_owned())),
        })
    }
}

impl TryFrom<String> for OpenFlag {
    type Error = UnknownFlag;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

/// Options for reading a file
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReadOptions {
    /// Decode the contents into text; raw bytes when absent
    pub encoding: Option<Encoding>,
    /// Defaults to `r`
    pub flag: Option<OpenFlag>,
}

impl ReadOptions {
    pub const fn new() -> Self {
        Self {
            encoding: None,
            flag: None,
        }
    }

    #[must_use]
    pub const fn encoding(mut self, encoding: Encoding) -> Self {
        self.encoding = Some(encoding);
        self
    }

    #[must_use]
    pub const fn flag(mut self, flag: OpenFlag) -> Self {
        self.flag = Some(flag);
        self
    }

    /// Flag in effect, `r` unless overridden
    pub fn open_flag(self) -> OpenFlag {
        self.flag.unwrap_or(OpenFlag::Read)
    }

    pub fn open_options(self) -> OpenOptions {
        self.open_flag().open_options(None)
    }
}

/// Options for writing a file
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WriteOptions {
    /// How text values become bytes; defaults to utf8
    pub encoding: Option<Encoding>,
    /// Permission bits for a newly created file; defaults to `0o666`
    pub mode: Option<u32>,
    /// Defaults to `w`
    pub flag: Option<OpenFlag>,
}

impl WriteOptions {
    pub const fn new() -> Self {
        Self {
            encoding: None,
            mode: None,
            flag: None,
        }
    }

    #[must_use]
    pub const fn encoding(mut self, encoding: Encoding) -> Self {
        self.encoding = Some(encoding);
        self
    }

    #[must_use]
    pub const fn mode(mut self, mode: u32) -> Self {
        self.mode = Some(mode);
        self
    }

    #[must_use]
    pub const fn flag(mut self, flag: OpenFlag) -> Self {
        self.flag = Some(flag);
        self
    }

    /// Flag in effect, `w` unless overridden
    pub fn open_flag(self) -> OpenFlag {
        self.flag.unwrap_or(OpenFlag::Write)
    }

    pub fn open_options(self) -> OpenOptions {
        self.open_flag()
            .open_options(Some(self.mode.unwrap_or(DEFAULT_MODE)))
    }
}

impl From<Encoding> for ReadOptions {
    fn from(encoding: Encoding) -> Self {
        Self::new().encoding(encoding)
    }
}

impl From<Option<Encoding>> for ReadOptions {
    fn from(encoding: Option<Encoding>) -> Self {
        Self {
            encoding,
            flag: None,
        }
    }
}

impl From<()> for ReadOptions {
    fn from((): ()) -> Self {
        Self::default()
    }
}

impl From<Encoding> for WriteOptions {
    fn from(encoding: Encoding) -> Self {
        Self::new().encoding(encoding)
    }
}

impl From<Option<Encoding>> for WriteOptions {
    fn from(encoding: Option<Encoding>) -> Self {
        Self {
            encoding,
            ..Self::default()
        }
    }
}

impl From<()> for WriteOptions {
    fn from((): ()) -> Self {
        Self::default()
    }
}

// Accepts `"utf8"` as well as `{ "encoding": "utf8", ... }`
#[derive(Deserialize)]
#[serde(untagged)]
enum OptionsRepr<T> {
    Name(Encoding),
    Fields(T),
}

#[derive(Default, Deserialize)]
#[serde(default)]
struct ReadFields {
    encoding: Option<Encoding>,
    flag: Option<OpenFlag>,
}

#[derive(Default, Deserialize)]
#[serde(default)]
struct WriteFields {
    encoding: Option<Encoding>,
    mode: Option<u32>,
    flag: Option<OpenFlag>,
}

impl<'de> Deserialize<'de> for ReadOptions {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match OptionsRepr::<ReadFields>::deserialize(deserializer)? {
            OptionsRepr::Name(encoding) => encoding.into(),
            OptionsRepr::Fields(ReadFields { encoding, flag }) => Self { encoding, flag },
        })
    }
}

impl<'de> Deserialize<'de> for WriteOptions {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match OptionsRepr::<WriteFields>::deserialize(deserializer)? {
            OptionsRepr::Name(encoding) => encoding.into(),
            OptionsRepr::Fields(WriteFields {
                encoding,
                mode,
                flag,
            }) => Self {
                encoding,
                mode,
                flag,
            },
        })
    }
}
