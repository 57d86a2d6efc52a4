//! Shared fixtures for the end-to-end tests
//!
//! Each test binary uses a different subset.

#![allow(dead_code)]

pub mod config;
pub mod mock_elevenlabs;
pub mod mock_gemini;
pub mod server;
pub mod tools;
