//! RESP Module
//!
//! Raw TCP front end speaking the single-command wire protocol.

mod connection;
mod server;

pub use connection::handle_connection;
pub use server::serve;
