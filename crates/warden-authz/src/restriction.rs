// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! The restriction aggregate: accumulated allow/deny decisions for one request.
//!
//! A [`Restrictions`] value holds four sets of URN patterns:
//!
//! | Set              | Holds                                  |
//! |------------------|----------------------------------------|
//! | `allowed_full`   | full URNs granted by an allow          |
//! | `allowed_prefix` | prefix patterns granted by an allow    |
//! | `denied_full`    | full URNs withheld by a deny           |
//! | `denied_prefix`  | prefix patterns withheld by a deny     |
//!
//! Every [`Restrictions::insert`] keeps the sets minimal:
//!
//! - no entry is covered by another entry of the same effect;
//! - no allow entry is covered by a deny entry.
//!
//! Deny always wins when the aggregate is consumed ([`Restrictions::permits`]),
//! so a deny is recorded as a carve-out even beneath a broader allow prefix.

use serde::Serialize;
use std::collections::BTreeSet;
use tracing::trace;

use crate::types::Effect;
use crate::urn::covers;

/// Minimized allow/deny record computed for a single authorization request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Restrictions {
	allowed_full: BTreeSet<String>,
	allowed_prefix: BTreeSet<String>,
	denied_full: BTreeSet<String>,
	denied_prefix: BTreeSet<String>,
}

impl Restrictions {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn allowed_full(&self) -> &BTreeSet<String> {
		&self.allowed_full
	}

	pub fn allowed_prefix(&self) -> &BTreeSet<String> {
		&self.allowed_prefix
	}

	pub fn denied_full(&self) -> &BTreeSet<String> {
		&self.denied_full
	}

	pub fn denied_prefix(&self) -> &BTreeSet<String> {
		&self.denied_prefix
	}

	/// True if at least one allow entry survived minimization.
	pub fn has_allows(&self) -> bool {
		!self.allowed_full.is_empty() || !self.allowed_prefix.is_empty()
	}

	pub fn is_empty(&self) -> bool {
		!self.has_allows() && self.denied_full.is_empty() && self.denied_prefix.is_empty()
	}

	/// True if `urn` is withheld by any deny entry.
	pub fn is_denied(&self, urn: &str) -> bool {
		self.denied_full.contains(urn) || self.denied_prefix.iter().any(|p| covers(p, urn))
	}

	/// True if `urn` is granted by any allow entry, ignoring denies.
	pub(crate) fn matches_allow(&self, urn: &str) -> bool {
		self.allowed_full.contains(urn) || self.allowed_prefix.iter().any(|p| covers(p, urn))
	}

	/// True if `urn` is allowed and not denied. Deny is checked first.
	pub fn permits(&self, urn: &str) -> bool {
		!self.is_denied(urn) && self.matches_allow(urn)
	}

	/// Records one statement resource, preserving minimality.
	///
	/// `full` states whether `urn` is a full URN (no wildcard) or a prefix
	/// pattern.
	pub fn insert(&mut self, effect: Effect, full: bool, urn: &str) {
		if full {
			self.insert_full(effect, urn);
		} else {
			match effect {
				Effect::Deny => self.insert_denied_prefix(urn),
				Effect::Allow => self.insert_allowed_prefix(urn),
			}
		}
	}

	fn insert_full(&mut self, effect: Effect, urn: &str) {
		if self.is_denied(urn) {
			trace!(%effect, urn, "full urn already denied");
			return;
		}

		match effect {
			Effect::Allow => {
				if self.matches_allow(urn) {
					trace!(urn, "full urn already allowed");
					return;
				}
				self.allowed_full.insert(urn.to_string());
			}
			Effect::Deny => {
				self.allowed_full.remove(urn);
				self.denied_full.insert(urn.to_string());
			}
		}
	}

	fn insert_denied_prefix(&mut self, prefix: &str) {
		if self.denied_prefix.iter().any(|p| covers(p, prefix)) {
			trace!(prefix, "prefix already denied");
			return;
		}

		self.allowed_full.retain(|u| !covers(prefix, u));
		self.denied_full.retain(|u| !covers(prefix, u));
		self.allowed_prefix.retain(|p| !covers(prefix, p));
		self.denied_prefix.retain(|p| !covers(prefix, p));
		self.denied_prefix.insert(prefix.to_string());
	}

	fn insert_allowed_prefix(&mut self, prefix: &str) {
		if self.denied_prefix.iter().any(|p| covers(p, prefix)) {
			trace!(prefix, "allow prefix shadowed by deny");
			return;
		}
		if self.allowed_prefix.iter().any(|p| covers(p, prefix)) {
			trace!(prefix, "prefix already allowed");
			return;
		}

		self.allowed_full.retain(|u| !covers(prefix, u));
		self.allowed_prefix.retain(|p| !covers(prefix, p));
		self.allowed_prefix.insert(prefix.to_string());
	}
}
