//! Reply encoders.

/// Frames `value` as a bulk string reply: `$<len>\r\n<value>\r\n`.
///
/// The length is the value's size in bytes.
pub fn encode_bulk(value: &str) -> Vec<u8> {
    let header = format!("${}\r\n", value.len());
    let mut reply = Vec::with_capacity(header.len() + value.len() + 2);
    reply.extend_from_slice(header.as_bytes());
    reply.extend_from_slice(value.as_bytes());
    reply.extend_from_slice(b"\r\n");
    reply
}

/// Frames `message` as an error reply: `-Error <message>\r\n`.
///
/// Line breaks inside the message become spaces so the reply stays a single
/// line.
pub fn encode_error(message: &str) -> Vec<u8> {
    let flattened: String = message
        .chars()
        .map(|c| if c == '\r' || c == '\n' { ' ' } else { c })
        .collect();
    format!("-Error {}\r\n", flattened).into_bytes()
}
