//! Mock implementations for testing.
//!
//! Lets the chat client be exercised without a network.
//!
//! # Available Mocks
//!
//! - [`MockHttpClient`] - HTTP transport with scripted chunk sequences

pub mod http;

pub use http::{MockHttpClient, MockResponse, RecordedRequest};
