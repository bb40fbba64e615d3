//! # pubscout
//!
//! A streaming client for a remote article search and summarization
//! service. The user submits a topic/filter query; the service answers
//! with a progressive NDJSON stream of progress records and result items
//! (or, on the fallback path, a single JSON array), and results render
//! incrementally while the transfer is still in flight.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────┐   ┌────────────┐   ┌───────────────┐   ┌─────────────┐
//! │  bytes   │──▶│ LineFramer │──▶│ decode_record │──▶│ Accumulator │
//! │ (chunks) │   │ (framing)  │   │  (per line)   │   │ items+prog  │
//! └──────────┘   └────────────┘   └───────────────┘   └──────┬──────┘
//!                                                            │ on_change
//!                                                            ▼
//!                                                    ┌───────────────┐
//!                                                    │ SearchObserver│
//!                                                    │ (stderr view) │
//!                                                    └───────────────┘
//! ```
//!
//! The streaming and whole-response paths implement one
//! [`transport::SearchTransport`] trait and produce the same accumulator
//! transitions, so everything downstream is path-agnostic.
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`config`] | TOML configuration parsing |
//! | [`models`] | Query, record, and result item types |
//! | [`framer`] | Byte-chunk to line framing |
//! | [`record`] | Per-line NDJSON record decoding |
//! | [`accumulator`] | Shared result/progress state |
//! | [`progress`] | Observer trait and stderr reporters |
//! | [`transport`] | Transport seam (strategy selection) |
//! | [`stream`] | Progressive NDJSON request path |
//! | [`fallback`] | Whole-response request path |
//! | [`search`] | CLI search orchestration |
//! | [`db`] | Local article cache |
//! | [`get`] | Cached article retrieval |

pub mod accumulator;
pub mod config;
pub mod db;
pub mod error;
pub mod fallback;
pub mod framer;
pub mod get;
pub mod models;
pub mod progress;
pub mod record;
pub mod search;
pub mod stream;
pub mod transport;
