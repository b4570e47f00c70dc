// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Stride Tracker: GPS run-tracking engine.
//!
//! This crate turns a stream of raw location samples into live
//! distance/pace/calorie statistics with pause/resume time accounting,
//! and hands finished runs to a persistence store. It owns no UI, wire
//! protocol, or backend: the location source and the store are
//! capabilities supplied by the embedding application.

pub mod clock;
pub mod config;
pub mod error;
pub mod format;
pub mod models;
pub mod services;
pub mod store;
