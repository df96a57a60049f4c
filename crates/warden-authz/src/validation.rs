// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Request parameter checks run before any repository access.

use crate::error::{AuthzError, Result};
use crate::urn::{is_full_urn, WILDCARD};

fn is_action_char(c: char) -> bool {
	c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | ':' | WILDCARD)
}

/// Accepts a single concrete action such as `iam:GetUser`.
pub fn validate_action(action: &str) -> Result<()> {
	if action.is_empty() || !action.chars().all(is_action_char) {
		return Err(AuthzError::InvalidParameter(format!(
			"invalid action {action:?}"
		)));
	}
	if action.contains(WILDCARD) {
		return Err(AuthzError::InvalidParameter(format!(
			"action {action:?} must not contain a wildcard"
		)));
	}
	Ok(())
}

/// Accepts a non-empty list of full URNs.
pub fn validate_external_resources(resources: &[String]) -> Result<()> {
	if resources.is_empty() {
		return Err(AuthzError::InvalidParameter(
			"resource list must not be empty".to_string(),
		));
	}

	for resource in resources {
		if resource.is_empty() || resource.chars().any(|c| c.is_whitespace() || c.is_control()) {
			return Err(AuthzError::InvalidParameter(format!(
				"invalid resource {resource:?}"
			)));
		}
		if !is_full_urn(resource) {
			return Err(AuthzError::InvalidParameter(format!(
				"resource {resource:?} must be a full urn, not a prefix"
			)));
		}
	}

	Ok(())
}
