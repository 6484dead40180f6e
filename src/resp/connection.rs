//! RESP Connection Handler
//!
//! One request, one reply, then the connection is closed.

use tokio::io::{AsyncRead, AsyncWrite, AsyncWriteExt, BufReader};
use tokio::time::Instant;
use tracing::{debug, warn};

use crate::protocol::{encode_bulk, encode_error, parse_request, ParseError};
use crate::state::AppState;

/// Serves a single request on `stream` and closes it.
///
/// Parse failures and resolution failures are both answered with an error
/// reply. The configured deadline starts when the connection is handed over
/// and bounds reading the request and the store lookup together. Returns the
/// reply that was written; the stream is shut down in every case, including
/// when the write itself fails.
pub async fn handle_connection<S>(stream: S, state: AppState) -> std::io::Result<Vec<u8>>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    let deadline = state.deadline();
    let mut stream = BufReader::new(stream);

    let reply = match read_request(&mut stream, deadline).await {
        Err(err) => {
            warn!(reason = err.reason(), error = %err, "rejecting RESP request");
            encode_error(&err.to_string())
        }
        Ok(key) => match state.resolver.get(&key, deadline).await {
            Ok(value) => {
                debug!(key = %key, bytes = value.len(), "RESP lookup served");
                encode_bulk(&value)
            }
            Err(err) => {
                debug!(key = %key, error = %err, "RESP lookup failed");
                encode_error(&err.to_string())
            }
        },
    };

    let written = stream.write_all(&reply).await;
    let closed = stream.shutdown().await;
    written?;
    closed?;
    Ok(reply)
}

async fn read_request<S>(
    stream: &mut BufReader<S>,
    deadline: Option<Instant>,
) -> Result<String, ParseError>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    match deadline {
        Some(deadline) => tokio::time::timeout_at(deadline, parse_request(stream))
            .await
            .unwrap_or(Err(ParseError::Timeout)),
        None => parse_request(stream).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::time::Duration;

    use tokio::io::{duplex, AsyncReadExt};

    use crate::cache::SharedCache;
    use crate::resolver::Resolver;
    use crate::store::MemoryStore;

    fn state_with(cache: SharedCache, store: MemoryStore) -> AppState {
        AppState::new(Resolver::new(cache, Arc::new(store)))
    }

    /// Writes `request` from the client side and collects everything the
    /// handler sends back before closing.
    async fn exchange(state: AppState, request: &[u8]) -> (Vec<u8>, Vec<u8>) {
        let (mut client, server) = duplex(1024);
        client.write_all(request).await.unwrap();

        let reply = handle_connection(server, state).await.unwrap();

        let mut received = Vec::new();
        client.read_to_end(&mut received).await.unwrap();
        (reply, received)
    }

    #[tokio::test]
    async fn test_cached_value_is_served() {
        let cache = SharedCache::new(10, None);
        cache.insert("testkey", "testvalue").await;
        let store = MemoryStore::new();
        let state = state_with(cache, store.clone());

        let (reply, received) =
            exchange(state, b"*2\r\n$3\r\nGET\r\n$7\r\ntestkey\r\n").await;

        assert_eq!(reply, b"$9\r\ntestvalue\r\n");
        assert_eq!(received, reply);
        assert_eq!(store.calls(), 0);
    }

    #[tokio::test]
    async fn test_missing_key_reply() {
        let state = state_with(SharedCache::new(10, None), MemoryStore::new());

        let (_, received) = exchange(state, b"*2\r\n$3\r\nGET\r\n$5\r\nhello\r\n").await;

        assert_eq!(received, b"-Error key not found\r\n");
    }

    #[tokio::test]
    async fn test_store_failure_reply() {
        let store = MemoryStore::new();
        store.fail_with(Some("connection refused")).await;
        let state = state_with(SharedCache::new(10, None), store);

        let (_, received) = exchange(state, b"*2\r\n$3\r\nGET\r\n$3\r\nkey\r\n").await;

        assert_eq!(received, b"-Error connection refused\r\n");
    }

    #[tokio::test]
    async fn test_parse_error_reply() {
        let state = state_with(SharedCache::new(10, None), MemoryStore::new());

        let (_, received) = exchange(state, b"*2\r\n$3\r\nSET\r\n$3\r\nkey\r\n").await;

        assert_eq!(received, b"-Error invalid command, only GET is supported\r\n");
    }

    #[tokio::test]
    async fn test_stalled_request_times_out() {
        let state = state_with(SharedCache::new(10, None), MemoryStore::new())
            .with_store_timeout(Some(Duration::from_millis(50)));
        let (mut client, server) = duplex(1024);
        // Declares ten bytes, sends five, then keeps the connection open
        client
            .write_all(b"*2\r\n$3\r\nGET\r\n$10\r\nshort")
            .await
            .unwrap();

        let reply = tokio::time::timeout(Duration::from_secs(2), handle_connection(server, state))
            .await
            .expect("handler outlived its deadline")
            .unwrap();

        assert_eq!(reply, b"-Error timed out reading request\r\n");
        let mut received = Vec::new();
        client.read_to_end(&mut received).await.unwrap();
        assert_eq!(received, reply);
    }

    #[tokio::test]
    async fn test_slow_lookup_times_out() {
        let store = MemoryStore::with_entries([("key", "value")])
            .with_latency(Duration::from_millis(300));
        let state = state_with(SharedCache::new(10, None), store)
            .with_store_timeout(Some(Duration::from_millis(50)));

        let (_, received) = exchange(state, b"*2\r\n$3\r\nGET\r\n$3\r\nkey\r\n").await;

        assert!(received.starts_with(b"-Error store lookup timed out"));
    }

    #[tokio::test]
    async fn test_only_first_request_is_served() {
        let store = MemoryStore::with_entries([("a", "1"), ("b", "2")]);
        let state = state_with(SharedCache::new(10, None), store.clone());

        let (_, received) = exchange(
            state,
            b"*2\r\n$3\r\nGET\r\n$1\r\na\r\n*2\r\n$3\r\nGET\r\n$1\r\nb\r\n",
        )
        .await;

        assert_eq!(received, b"$1\r\n1\r\n");
        assert_eq!(store.calls(), 1);
    }
}
