// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Builds a [`Restrictions`] aggregate from a principal's statements.

use tracing::debug;

use crate::action::action_matches;
use crate::restriction::Restrictions;
use crate::types::{Policy, Statement};
use crate::urn::{covers, is_full_urn, overlaps};

/// Flattens policies into the statements whose actions cover `action`,
/// preserving policy and statement order.
pub fn applicable_statements<'a, I>(policies: I, action: &str) -> Vec<Statement>
where
	I: IntoIterator<Item = &'a Policy>,
{
	policies
		.into_iter()
		.flat_map(|policy| policy.statements.iter())
		.filter(|statement| action_matches(action, &statement.actions))
		.cloned()
		.collect()
}

/// Returns true if a statement resource can affect decisions within `scope`.
///
/// A full URN names one resource, so it applies only when the scope contains
/// it: equal to a full scope, or covered by a prefix scope. A prefix pattern
/// applies to a full scope it covers, and to a prefix scope when either
/// literal prefixes the other.
fn applies_to_scope(resource: &str, scope: &str) -> bool {
	match (is_full_urn(resource), is_full_urn(scope)) {
		(true, true) => resource == scope,
		(true, false) => covers(scope, resource),
		(false, true) => covers(resource, scope),
		(false, false) => overlaps(resource, scope),
	}
}

/// Folds every statement resource that applies to `scope` into a fresh
/// aggregate.
///
/// `statements` must already be filtered to the requested action. Resources
/// outside the scope cannot affect the decision and are skipped.
pub fn build_restrictions<'a, I>(statements: I, scope: &str) -> Restrictions
where
	I: IntoIterator<Item = &'a Statement>,
{
	let mut restrictions = Restrictions::new();

	for statement in statements {
		for resource in &statement.resources {
			if applies_to_scope(resource, scope) {
				restrictions.insert(statement.effect, is_full_urn(resource), resource);
			}
		}
	}

	debug!(
		scope,
		allowed_full = restrictions.allowed_full().len(),
		allowed_prefix = restrictions.allowed_prefix().len(),
		denied_full = restrictions.denied_full().len(),
		denied_prefix = restrictions.denied_prefix().len(),
		"restrictions built"
	);

	restrictions
}
