// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Operation log configuration.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use serde::Deserialize;

/// Where authorization decisions are recorded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuditSinkKind {
	/// Emit a `tracing` event per decision.
	#[default]
	Tracing,
	/// Append JSON lines to `path`.
	File,
}

impl FromStr for AuditSinkKind {
	type Err = String;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s.to_ascii_lowercase().as_str() {
			"tracing" => Ok(AuditSinkKind::Tracing),
			"file" => Ok(AuditSinkKind::File),
			other => Err(format!("unknown audit sink '{other}', expected tracing or file")),
		}
	}
}

impl fmt::Display for AuditSinkKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			AuditSinkKind::Tracing => write!(f, "tracing"),
			AuditSinkKind::File => write!(f, "file"),
		}
	}
}

/// Operation log configuration (runtime, fully resolved).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditConfig {
	pub enabled: bool,
	pub sink: AuditSinkKind,
	pub path: Option<PathBuf>,
}

impl Default for AuditConfig {
	fn default() -> Self {
		Self {
			enabled: true,
			sink: AuditSinkKind::Tracing,
			path: None,
		}
	}
}

/// Operation log configuration layer (partial, for merging).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AuditConfigLayer {
	#[serde(default)]
	pub enabled: Option<bool>,
	#[serde(default)]
	pub sink: Option<AuditSinkKind>,
	#[serde(default)]
	pub path: Option<PathBuf>,
}

impl AuditConfigLayer {
	pub fn merge(&mut self, other: AuditConfigLayer) {
		if other.enabled.is_some() {
			self.enabled = other.enabled;
		}
		if other.sink.is_some() {
			self.sink = other.sink;
		}
		if other.path.is_some() {
			self.path = other.path;
		}
	}

	pub fn finalize(self) -> AuditConfig {
		AuditConfig {
			enabled: self.enabled.unwrap_or(true),
			sink: self.sink.unwrap_or_default(),
			path: self.path,
		}
	}
}
