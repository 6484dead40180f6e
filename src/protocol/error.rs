//! Wire protocol parse errors.

use thiserror::Error;

// == Parse Error ==
/// Why a request could not be accepted.
///
/// The `Display` text is sent back to the client inside an error reply.
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("invalid command, expected an array")]
    ExpectedArray,

    #[error("invalid command, malformed integer {0:?}")]
    InvalidInteger(String),

    #[error("invalid command, expected 2 arguments")]
    WrongArgumentCount(i64),

    #[error("invalid command")]
    ExpectedBulkString,

    #[error("invalid command, bulk length {0} out of range")]
    InvalidBulkLength(i64),

    #[error("invalid command, unexpected end of input")]
    Truncated,

    #[error("invalid command, arguments must be valid UTF-8")]
    InvalidUtf8,

    #[error("invalid command, only GET is supported")]
    UnsupportedCommand(String),

    #[error("timed out reading request")]
    Timeout,

    #[error("read error: {0}")]
    Io(#[from] std::io::Error),
}

impl ParseError {
    /// Short stable code naming the failure, for logs.
    pub fn reason(&self) -> &'static str {
        match self {
            ParseError::ExpectedArray => "expected_array",
            ParseError::InvalidInteger(_) => "invalid_integer",
            ParseError::WrongArgumentCount(_) => "wrong_argument_count",
            ParseError::ExpectedBulkString => "expected_bulk_string",
            ParseError::InvalidBulkLength(_) => "invalid_bulk_length",
            ParseError::Truncated => "truncated",
            ParseError::InvalidUtf8 => "invalid_utf8",
            ParseError::UnsupportedCommand(_) => "unsupported_command",
            ParseError::Timeout => "timeout",
            ParseError::Io(_) => "io",
        }
    }
}
