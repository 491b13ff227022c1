use smallvec::SmallVec;
use std::fmt;
use std::path::{Path, PathBuf};
use thiserror::Error;

//
// ---------------- Error Generation ----------------
//

// Functionality related to producing the basic `Error` objects used throughout this crate.

#[derive(Debug, Error)]
pub enum RawError {
    #[error("while reading or writing a file: {0}")]
    Io(#[from] std::io::Error),
    #[error("while parsing toml: {0}")]
    TomlParsing(#[from] toml::de::Error),
    #[error("This key is not supported by notepad++, please change it")]
    UnknownKey(String),
    #[error(
        "This key is currently not supported by file2macro, please change it\n\
         > Or, if you are a developer, you can help to support it by contributing \
         to the key table in `src/key.rs`"
    )]
    UnsupportedKey(String),
    #[error("Input file '{}' doesn't exist", .0.display())]
    MissingInput(PathBuf),
    #[error("{0}")]
    Dynamic(String),
}

#[macro_export]
macro_rules! err {
    ( $($x:tt)* ) => {
        $crate::error::RawError::Dynamic(format!($($x)*))
    };
}

#[derive(Debug, Error)]
pub struct Error {
    #[source]
    pub(crate) error: RawError,
    pub(crate) contexts: SmallVec<[Context; 4]>,
}

#[derive(Debug, Clone)]
pub enum Context {
    Dynamic(&'static str), // additional message content to include
    Path(PathBuf),         // the file an error relates to
}

impl Error {
    pub fn raw(&self) -> &RawError {
        return &self.error;
    }
}

/// An object implementing `ErrorContext` can store additional context
/// about the error being returned.
pub trait ErrorContext<T>
where
    Self: Sized,
{
    /// `with_context` accepts a `Context` which the object should store
    fn with_context(self, context: Context) -> Result<T>;
    fn with_message(self, context: &'static str) -> Result<T> {
        return self.with_context(Context::Dynamic(context));
    }
    fn with_path(self, path: impl AsRef<Path>) -> Result<T> {
        return self.with_context(Context::Path(path.as_ref().to_path_buf()));
    }
}

impl<T> ErrorContext<T> for Result<T> {
    fn with_context(self, context: Context) -> Result<T> {
        return match self {
            Ok(x) => Ok(x),
            Err(mut e) => {
                e.contexts.push(context);
                Err(e)
            }
        };
    }
}

impl<T, E: Into<RawError>> ErrorContext<T> for std::result::Result<T, E> {
    fn with_context(self, context: Context) -> Result<T> {
        return match self {
            Ok(x) => Ok(x),
            Err(e) => {
                let mut contexts = SmallVec::new();
                contexts.push(context);
                Err(Error {
                    error: e.into(),
                    contexts,
                })
            }
        };
    }
}

pub type Result<T> = std::result::Result<T, Error>;

impl<E: Into<RawError>> From<E> for Error {
    fn from(error: E) -> Self {
        return Error {
            error: error.into(),
            contexts: SmallVec::new(),
        };
    }
}

//
// ---------------- Error Reporting ----------------
//

// contexts are pushed innermost first, so they are printed outermost first
impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> std::result::Result<(), fmt::Error> {
        for context in self.contexts.iter().rev() {
            match context {
                Context::Dynamic(str) => {
                    write!(f, "{}\n", str)?;
                }
                Context::Path(path) => {
                    write!(f, "in file '{}'\n", path.display())?;
                }
            }
        }
        self.error.fmt(f)?;
        return Ok(());
    }
}
