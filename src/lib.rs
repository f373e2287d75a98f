pub mod codec;
pub mod error;

pub mod prelude {
    pub use crate::error::*;

    pub use crate::codec::{Digest, DigestError, DIGEST_SIZE, MAX_DIGEST_STRING_SIZE};
}
