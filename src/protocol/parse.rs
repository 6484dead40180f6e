//! Request parser.
//!
//! Reads exactly one request off a buffered byte stream in a single pass.
//! Any malformed, truncated or unsupported input is a hard failure; nothing
//! is skipped or resynchronised.

use std::io::ErrorKind;

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncReadExt};

use super::{ParseError, GET_COMMAND, MAX_BULK_LENGTH, MAX_INTEGER_LINE, REQUEST_ARITY};

// == Parse Request ==
/// Reads one `GET` request and returns its key.
///
/// Bytes following the request are left unread.
pub async fn parse_request<R>(reader: &mut R) -> Result<String, ParseError>
where
    R: AsyncBufRead + Unpin,
{
    let [command, key] = read_arguments(reader).await?;

    if command != GET_COMMAND {
        return Err(ParseError::UnsupportedCommand(command));
    }
    Ok(key)
}

/// `*2\r\n` followed by two bulk strings.
async fn read_arguments<R>(reader: &mut R) -> Result<[String; 2], ParseError>
where
    R: AsyncBufRead + Unpin,
{
    if read_marker(reader).await? != Some(b'*') {
        return Err(ParseError::ExpectedArray);
    }

    let count = read_integer(reader).await?;
    if count != REQUEST_ARITY {
        return Err(ParseError::WrongArgumentCount(count));
    }

    let command = read_bulk_string(reader).await?;
    let key = read_bulk_string(reader).await?;
    Ok([command, key])
}

/// `$<len>\r\n<payload>\r\n`. The two bytes after the payload are consumed
/// but not checked.
async fn read_bulk_string<R>(reader: &mut R) -> Result<String, ParseError>
where
    R: AsyncBufRead + Unpin,
{
    match read_marker(reader).await? {
        Some(b'$') => {}
        Some(_) => return Err(ParseError::ExpectedBulkString),
        None => return Err(ParseError::Truncated),
    }

    let declared = read_integer(reader).await?;
    let len = usize::try_from(declared)
        .ok()
        .filter(|len| *len <= MAX_BULK_LENGTH)
        .ok_or(ParseError::InvalidBulkLength(declared))?;

    let mut payload = vec![0u8; len + 2];
    reader
        .read_exact(&mut payload)
        .await
        .map_err(truncated_on_eof)?;
    payload.truncate(len);

    String::from_utf8(payload).map_err(|_| ParseError::InvalidUtf8)
}

/// Reads a single type marker byte, `None` at end of stream.
async fn read_marker<R>(reader: &mut R) -> Result<Option<u8>, ParseError>
where
    R: AsyncBufRead + Unpin,
{
    let mut byte = [0u8; 1];
    match reader.read_exact(&mut byte).await {
        Ok(_) => Ok(Some(byte[0])),
        Err(err) if err.kind() == ErrorKind::UnexpectedEof => Ok(None),
        Err(err) => Err(err.into()),
    }
}

/// Reads a base-10 integer terminated by `\n` or `\r\n`.
async fn read_integer<R>(reader: &mut R) -> Result<i64, ParseError>
where
    R: AsyncBufRead + Unpin,
{
    let mut line = Vec::with_capacity(MAX_INTEGER_LINE);
    (&mut *reader)
        .take(MAX_INTEGER_LINE as u64)
        .read_until(b'\n', &mut line)
        .await?;

    if line.pop() != Some(b'\n') {
        return Err(if line.len() + 1 >= MAX_INTEGER_LINE {
            ParseError::InvalidInteger(String::from_utf8_lossy(&line).into_owned())
        } else {
            ParseError::Truncated
        });
    }
    if line.last() == Some(&b'\r') {
        line.pop();
    }

    std::str::from_utf8(&line)
        .ok()
        .and_then(|digits| digits.parse().ok())
        .ok_or_else(|| ParseError::InvalidInteger(String::from_utf8_lossy(&line).into_owned()))
}

fn truncated_on_eof(err: std::io::Error) -> ParseError {
    if err.kind() == ErrorKind::UnexpectedEof {
        ParseError::Truncated
    } else {
        ParseError::Io(err)
    }
}
