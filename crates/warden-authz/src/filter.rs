// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Applies a finished [`Restrictions`] aggregate to candidate resources.

use tracing::trace;

use crate::restriction::Restrictions;
use crate::types::Addressable;

/// Returns the candidates the aggregate permits, in their original order.
///
/// Deny is checked first and is absolute: a resource matching any deny entry
/// is dropped whatever allow entries also match it.
pub fn filter_resources<R: Addressable>(resources: Vec<R>, restrictions: &Restrictions) -> Vec<R> {
	resources
		.into_iter()
		.filter(|resource| {
			let urn = resource.urn();
			if restrictions.is_denied(urn) {
				trace!(urn, "resource denied");
				return false;
			}
			restrictions.matches_allow(urn)
		})
		.collect()
}
