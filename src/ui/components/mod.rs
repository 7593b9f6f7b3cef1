// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Reusable egui components structured for MVU-style updates.

pub mod access_key;
pub mod manifest_action;
pub mod manifest_form;
pub mod manifests;
