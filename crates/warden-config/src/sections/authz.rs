// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Authorization configuration.

use serde::Deserialize;

/// Authorization configuration (runtime, fully resolved).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthzConfig {
	/// External identifiers treated as administrators.
	pub admins: Vec<String>,
}

impl AuthzConfig {
	pub fn is_admin(&self, identifier: &str) -> bool {
		self.admins.iter().any(|admin| admin == identifier)
	}
}

/// Authorization configuration layer (partial, for merging).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AuthzConfigLayer {
	#[serde(default)]
	pub admins: Option<Vec<String>>,
}

impl AuthzConfigLayer {
	pub fn merge(&mut self, other: AuthzConfigLayer) {
		if other.admins.is_some() {
			self.admins = other.admins;
		}
	}

	pub fn finalize(self) -> AuthzConfig {
		AuthzConfig {
			admins: self.admins.unwrap_or_default(),
		}
	}
}
