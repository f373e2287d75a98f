//! # Codec
//!
//! Value types that are embedded directly into the binary messages of the wire protocol. Each
//! type knows how to write its own bytes out to an [`AsyncWrite`](futures::AsyncWrite) and how to
//! read itself back off the front of a byte stream. Message framing lives with the callers, these
//! types only cover their own fields.

mod digest;

pub use digest::{Digest, DigestError, DIGEST_SIZE, MAX_DIGEST_STRING_SIZE};

pub type Stream<'a> = &'a [u8];

pub type ParserResult<'a, T> = winnow::IResult<Stream<'a>, T>;
