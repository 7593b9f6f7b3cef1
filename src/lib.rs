// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Desktop client for shipment manifests (romaneios).
//!
//! Access-key entry with live sanitizing, plus verify and delete actions
//! against the manifest API, structured as Model-View-Update components.

pub mod api;
pub mod app;
pub mod config;
pub mod models;
pub mod mvu;
pub mod ui;
