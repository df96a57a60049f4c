// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! URN construction and pattern coverage.
//!
//! Resources are addressed by hierarchical URNs of the form
//! `urn:iws:iam:{org}:{kind}{path}{name}`. A URN that ends in the wildcard
//! marker (`*`) is a **prefix pattern** and denotes its literal prefix and
//! everything beneath it; a URN without any wildcard is a **full URN**.
//!
//! Every coverage decision in the crate goes through [`covers`], so the
//! restriction algorithm can be audited against a single predicate.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The trailing wildcard marker.
pub const WILDCARD: char = '*';

/// Leading segments shared by every IAM URN.
pub const URN_PREFIX: &str = "urn:iws:iam";

/// Kinds of resources the IAM layer addresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceKind {
	User,
	Group,
	Policy,
	Proxy,
}

impl ResourceKind {
	pub fn as_str(&self) -> &'static str {
		match self {
			ResourceKind::User => "user",
			ResourceKind::Group => "group",
			ResourceKind::Policy => "policy",
			ResourceKind::Proxy => "proxy",
		}
	}
}

impl fmt::Display for ResourceKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// Builds the URN of a concrete resource.
///
/// Users are not scoped to an organization; pass an empty `org` for them.
pub fn resource_urn(org: &str, kind: ResourceKind, path: &str, name: &str) -> String {
	format!("{URN_PREFIX}:{org}:{kind}{path}{name}")
}

/// Builds the prefix pattern covering every resource of `kind` under `path`.
pub fn prefix_urn(org: &str, kind: ResourceKind, path: &str) -> String {
	format!("{URN_PREFIX}:{org}:{kind}{path}{WILDCARD}")
}

/// Returns true if `s` contains no wildcard marker.
pub fn is_full_urn(s: &str) -> bool {
	!s.contains(WILDCARD)
}

/// Strips a single trailing wildcard marker.
pub fn literal(s: &str) -> &str {
	s.strip_suffix(WILDCARD).unwrap_or(s)
}

/// Returns true if `pattern` covers `urn`.
///
/// `urn` may itself be a prefix pattern, so the same predicate answers "does
/// this prefix cover this full URN", "does this prefix cover that narrower
/// prefix" and, applied in both directions, "are these patterns equal".
pub fn covers(pattern: &str, urn: &str) -> bool {
	let prefix = literal(pattern);
	prefix.is_empty() || literal(urn).starts_with(prefix)
}

/// Returns true if either pattern covers the other.
pub fn overlaps(a: &str, b: &str) -> bool {
	covers(a, b) || covers(b, a)
}

/// A URN or prefix pattern as it appears in a statement.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UrnPattern(String);

impl UrnPattern {
	pub fn new(pattern: impl Into<String>) -> Self {
		Self(pattern.into())
	}

	pub fn as_str(&self) -> &str {
		&self.0
	}

	pub fn into_inner(self) -> String {
		self.0
	}

	/// True if the pattern names exactly one resource.
	pub fn is_full(&self) -> bool {
		is_full_urn(&self.0)
	}

	/// True if the pattern ends in the wildcard marker.
	pub fn is_prefix(&self) -> bool {
		self.0.ends_with(WILDCARD)
	}

	/// The pattern with its trailing wildcard removed.
	pub fn literal(&self) -> &str {
		literal(&self.0)
	}

	pub fn covers(&self, urn: &str) -> bool {
		covers(&self.0, urn)
	}

	pub fn overlaps(&self, other: &str) -> bool {
		overlaps(&self.0, other)
	}
}

impl fmt::Display for UrnPattern {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.0)
	}
}

impl From<&str> for UrnPattern {
	fn from(s: &str) -> Self {
		Self(s.to_string())
	}
}

impl From<String> for UrnPattern {
	fn from(s: String) -> Self {
		Self(s)
	}
}

impl AsRef<str> for UrnPattern {
	fn as_ref(&self) -> &str {
		&self.0
	}
}
