//! HTTP surface of the match coordinator.
//!
//! ## Starting the Server
//!
//! ```text
//! # Defaults: 127.0.0.1:5007, services on localhost
//! round-pairing serve
//!
//! # Config file, then bind to all interfaces
//! round-pairing serve --config round-pairing.toml --address 0.0.0.0
//! ```
//!
//! ## API Endpoints
//!
//! - `POST /make-match` (also `/make_matches`) - pair a round and create its matches
//! - `POST /finalize-outcome` - record a match result and update standings
//! - `POST /dispute/new` - open a dispute on a match
//! - `GET /health` - liveness check
//!
//! Failures return `{error, kind, details?}`: 400 for invalid input or an
//! unpairable round, 404 for an unknown tournament, schedule or match, 502 when
//! a downstream service fails.

pub mod server;
