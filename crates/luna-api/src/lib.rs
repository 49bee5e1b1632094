// luna-api: Async Rust client for the hosted table backend behind Luna Store.
//
// The backend speaks the PostgREST dialect used by Supabase: every table is
// exposed under `/rest/v1/{table}` and authenticated with an anon key sent
// both as `apikey` and as a bearer token.

pub mod error;
pub mod rest;
pub mod transport;

pub use error::Error;
pub use rest::RestClient;
pub use transport::{TlsMode, TransportConfig};
