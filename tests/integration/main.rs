//! Integration tests for the harvester
//!
//! These tests use wiremock to serve a miniature copy of the catalogue site
//! and exercise discovery, pagination, extraction and output end-to-end.

mod fixtures;

mod extract_tests;
mod harvest_tests;
