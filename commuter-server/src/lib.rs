//! Commuter rail departure board server.
//!
//! Fetches live departure predictions for Boston's North and South Station
//! terminals from the MBTA v3 API, normalizes them into ordered departure
//! boards, and serves them to a polling web page.

pub mod clock;
pub mod config;
pub mod domain;
pub mod mbta;
pub mod schedule;
pub mod web;
