//! Integration tests for Brewery Atlas
//!
//! These tests use wiremock to stand up a mock directory site and exercise
//! fetching, pagination, extraction and output end-to-end.

mod common;
mod crawl_tests;
mod fetcher_tests;
