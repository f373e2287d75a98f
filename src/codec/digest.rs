use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use futures::{AsyncWrite, AsyncWriteExt};
use winnow::token::take;
use winnow::Parser;

use crate::codec::{ParserResult, Stream};

/// Number of bytes in a [`Digest`].
pub const DIGEST_SIZE: usize = 32;

/// Longest hex string accepted by [`Digest::from_hex_str`].
pub const MAX_DIGEST_STRING_SIZE: usize = DIGEST_SIZE * 2;

/// Identifies messages and blocks on the wire by their hash. The bytes are held in protocol
/// order, exactly as they are placed into a binary message. The hex string form used in logs,
/// configuration, and command lines lists the same bytes in reverse (display order).
///
/// The digest is opaque: nothing here computes or checks a hash, any 32 bytes are accepted.
#[derive(Clone, Copy, Default, Eq, Hash, PartialEq)]
pub struct Digest([u8; DIGEST_SIZE]);

impl Digest {
    pub const ZERO: Digest = Digest([0u8; DIGEST_SIZE]);

    /// Read-only view of the bytes in protocol order.
    pub fn as_bytes(&self) -> &[u8; DIGEST_SIZE] {
        &self.0
    }

    pub async fn encode<W: AsyncWrite + Unpin + Send>(
        &self,
        writer: &mut W,
    ) -> std::io::Result<usize> {
        writer.write_all(&self.0).await?;
        Ok(self.0.len())
    }

    /// Parses a display order hex string.
    ///
    /// An empty string is the all-zero digest. An odd number of characters is treated as if a
    /// single `0` were prepended, so `"1"` yields a digest whose first protocol byte is `0x01`.
    /// Strings shorter than [`MAX_DIGEST_STRING_SIZE`] fill the digest from protocol index zero,
    /// leaving the remaining bytes zeroed.
    pub fn from_hex_str(hex_str: &str) -> Result<Self, DigestError> {
        let padding = hex_str.len() % 2;
        let padded_length = hex_str.len() + padding;

        if padded_length > MAX_DIGEST_STRING_SIZE {
            tracing::trace!(
                length = hex_str.len(),
                max_length = MAX_DIGEST_STRING_SIZE,
                "digest string too long"
            );
            return Err(DigestError::StringTooLong {
                length: hex_str.len(),
                max: MAX_DIGEST_STRING_SIZE,
            });
        }

        let mut padded = String::with_capacity(padded_length);
        if padding == 1 {
            padded.push('0');
        }
        padded.push_str(hex_str);

        let decoded_length = padded_length / 2;
        let mut decoded = [0u8; DIGEST_SIZE];

        if let Err(err) = hex::decode_to_slice(&padded, &mut decoded[..decoded_length]) {
            tracing::trace!("failed to decode digest string: {err}");
            return Err(DigestError::from_hex_error(err, hex_str, padding));
        }

        let mut bytes = [0u8; DIGEST_SIZE];
        for (dst, src) in bytes.iter_mut().zip(decoded[..decoded_length].iter().rev()) {
            *dst = *src;
        }

        Ok(Self(bytes))
    }

    /// Copies the provided bytes into a new digest. The slice must be exactly [`DIGEST_SIZE`]
    /// bytes long.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, DigestError> {
        let mut digest = Self::ZERO;
        digest.set_bytes(bytes)?;
        Ok(digest)
    }

    /// Compares against a digest that may not be present. A missing digest never matches.
    pub fn is_equal(&self, other: Option<&Digest>) -> bool {
        other.is_some_and(|other| self == other)
    }

    pub fn parse(input: Stream) -> ParserResult<Self> {
        let taken: ParserResult<Stream> = take(DIGEST_SIZE).parse_peek(input);
        let (remaining, digest_bytes) = taken?;

        let mut bytes = [0u8; DIGEST_SIZE];
        bytes.copy_from_slice(digest_bytes);

        Ok((remaining, Self(bytes)))
    }

    /// Replaces the contents of the digest with the provided bytes. When the length is wrong
    /// the error is returned and the current contents are kept as they were.
    pub fn set_bytes(&mut self, bytes: &[u8]) -> Result<(), DigestError> {
        if bytes.len() != DIGEST_SIZE {
            tracing::trace!(
                actual = bytes.len(),
                expected = DIGEST_SIZE,
                "rejected digest bytes"
            );
            return Err(DigestError::SizeMismatch {
                actual: bytes.len(),
                expected: DIGEST_SIZE,
            });
        }

        self.0.copy_from_slice(bytes);
        Ok(())
    }

    pub const fn size() -> usize {
        DIGEST_SIZE
    }

    /// Owned copy of the bytes in protocol order.
    pub fn to_bytes(&self) -> [u8; DIGEST_SIZE] {
        self.0
    }

    /// Canonical display form: all 32 bytes reversed, as 64 lowercase hex characters.
    pub fn to_hex_string(&self) -> String {
        let mut reversed = self.0;
        reversed.reverse();
        hex::encode(reversed)
    }
}

impl AsRef<[u8]> for Digest {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl std::fmt::Debug for Digest {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", self.to_hex_string())
    }
}

impl Display for Digest {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex_string())
    }
}

impl From<[u8; DIGEST_SIZE]> for Digest {
    fn from(bytes: [u8; DIGEST_SIZE]) -> Self {
        Self(bytes)
    }
}

impl From<Digest> for [u8; DIGEST_SIZE] {
    fn from(digest: Digest) -> Self {
        digest.0
    }
}

impl FromStr for Digest {
    type Err = DigestError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex_str(s)
    }
}

impl TryFrom<&[u8]> for Digest {
    type Error = DigestError;

    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        Self::from_slice(bytes)
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Digest {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex_string())
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Digest {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let hex_str = <String as serde::Deserialize>::deserialize(deserializer)?;
        Self::from_hex_str(&hex_str).map_err(serde::de::Error::custom)
    }
}

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum DigestError {
    #[error("invalid character {character:?} at position {index} in digest string")]
    MalformedHex { character: char, index: usize },

    #[error("received {actual} bytes for digest, expected {expected} bytes")]
    SizeMismatch { actual: usize, expected: usize },

    #[error("digest string is {length} characters long, at most {max} are allowed")]
    StringTooLong { length: usize, max: usize },
}

impl DigestError {
    /// Maps a decoding failure on the padded string back to the character the caller supplied.
    fn from_hex_error(err: hex::FromHexError, hex_str: &str, padding: usize) -> Self {
        match err {
            hex::FromHexError::InvalidHexCharacter { c, index } => {
                let index = index - padding;
                let character = hex_str
                    .get(index..)
                    .and_then(|rest| rest.chars().next())
                    .unwrap_or(c);

                DigestError::MalformedHex { character, index }
            }
            // Not produced for the padded input, it is always even and sized to the buffer
            hex::FromHexError::OddLength | hex::FromHexError::InvalidStringLength => {
                DigestError::StringTooLong {
                    length: hex_str.len(),
                    max: MAX_DIGEST_STRING_SIZE,
                }
            }
        }
    }
}
