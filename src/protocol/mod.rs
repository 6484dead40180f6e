//! Wire Protocol Module
//!
//! A deliberately narrow slice of RESP: one request shape in, bulk string
//! or error replies out.
//!
//! # Request
//! ```text
//! *2\r\n$3\r\nGET\r\n$<len>\r\n<key>\r\n
//! ```
//!
//! # Replies
//! ```text
//! $<len>\r\n<value>\r\n
//! -Error <message>\r\n
//! ```

mod encode;
mod error;
mod parse;


pub use encode::{encode_bulk, encode_error};
pub use error::ParseError;
pub use parse::parse_request;

// == Public Constants ==
/// The only command the proxy understands
pub const GET_COMMAND: &str = "GET";

/// Number of elements in a valid request array
pub const REQUEST_ARITY: i64 = 2;

/// Largest bulk string accepted in a request
pub const MAX_BULK_LENGTH: usize = 1024 * 1024; // 1 MB

/// Longest integer line (digits plus terminator) accepted in a request
pub const MAX_INTEGER_LINE: usize = 32;
