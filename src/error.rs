use std::fmt::{self, Display, Formatter};

use crate::codec::DigestError;

#[derive(Debug)]
pub struct WireError(String);

impl From<&'static str> for WireError {
    fn from(val: &'static str) -> Self {
        Self(val.to_string())
    }
}

impl From<String> for WireError {
    fn from(val: String) -> Self {
        Self(val)
    }
}

impl From<DigestError> for WireError {
    fn from(error: DigestError) -> Self {
        Self(error.to_string())
    }
}

impl Display for WireError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for WireError {}

pub type WireResult<T> = Result<T, WireError>;
