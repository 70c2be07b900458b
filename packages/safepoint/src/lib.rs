#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Safe-point certification scoring and proximity search.
//!
//! Scoring turns the 12-item weighted checklist into a 0-100 score and a
//! certification tier; the geo module answers "which certified points sit
//! within N km of this position". Everything here is a total, deterministic
//! function over in-memory data — persistence belongs to the caller.

pub mod geo;
pub mod scoring;
