//! Integration tests for lingo-api
//!
//! Uses wiremock to simulate the content API and verifies end-to-end
//! behavior of HttpRemoteApi for downloads and sync pushes.

mod common;

mod test_content;
mod test_sync;
