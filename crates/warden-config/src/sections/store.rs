// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Repository configuration.

use std::path::PathBuf;

use serde::Deserialize;

/// Repository configuration (runtime, fully resolved).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StoreConfig {
	/// TOML fixture loaded into the in-memory store.
	pub fixture: Option<PathBuf>,
}

/// Repository configuration layer (partial, for merging).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StoreConfigLayer {
	#[serde(default)]
	pub fixture: Option<PathBuf>,
}

impl StoreConfigLayer {
	pub fn merge(&mut self, other: StoreConfigLayer) {
		if other.fixture.is_some() {
			self.fixture = other.fixture;
		}
	}

	pub fn finalize(self) -> StoreConfig {
		StoreConfig {
			fixture: self.fixture,
		}
	}
}
