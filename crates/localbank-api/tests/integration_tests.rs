//! Integration test suite for the LocalBank ONE HTTP server.
//!
//! Drives the full router with in-memory backends: public pages, the
//! inquiry form, the admin guard and login flow, content management, and
//! the white-label settings editor with remote load/save.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

mod common;
mod integration;
