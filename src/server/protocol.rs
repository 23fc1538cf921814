//! Wire protocol — one unframed ASCII request, one unframed ASCII response.
//!
//! Request: `"<v1> <v2>"` with no terminator, at most [`MAX_MESSAGE_LEN`]
//! bytes. Response: the path `"<v1> ... <v2>"`, [`NO_PATH_RESPONSE`], or
//! [`INVALID_QUERY_RESPONSE`]. The server closes the connection after
//! writing.

use crate::error::{PathError, Result};
use crate::graph::Vertex;

pub use crate::graph::NO_PATH_RESPONSE;

/// Upper bound on the bytes read from a request.
pub const MAX_MESSAGE_LEN: usize = 256;

/// Response to a request that is not two integers.
pub const INVALID_QUERY_RESPONSE: &str = "Invalid query.";

/// A parsed shortest-path request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Query {
    pub src: Vertex,
    pub dst: Vertex,
}

impl Query {
    pub fn new(src: Vertex, dst: Vertex) -> Self {
        Self { src, dst }
    }

    /// Parse exactly two whitespace-separated decimal integers.
    ///
    /// Leading and trailing whitespace (e.g. a newline from `nc`) is accepted.
    pub fn parse(raw: &str) -> Result<Self> {
        let mut parts = raw.split_whitespace();
        let (src, dst) = match (parts.next(), parts.next(), parts.next()) {
            (Some(src), Some(dst), None) => (src, dst),
            _ => return Err(PathError::InvalidQuery(raw.to_string())),
        };
        let src = src
            .parse()
            .map_err(|_| PathError::InvalidQuery(raw.to_string()))?;
        let dst = dst
            .parse()
            .map_err(|_| PathError::InvalidQuery(raw.to_string()))?;
        Ok(Self { src, dst })
    }

    /// Request text as the client sends it.
    pub fn to_wire(&self) -> String {
        format!("{} {}", self.src, self.dst)
    }
}

/// Turn the bytes of a single read into the query string used as cache key.
///
/// The request is cut at the first NUL byte. Returns `None` if what remains
/// is not UTF-8.
pub fn decode_request(bytes: &[u8]) -> Option<&str> {
    let end = bytes.iter().position(|&b| b == 0).unwrap_or(bytes.len());
    std::str::from_utf8(&bytes[..end]).ok()
}
