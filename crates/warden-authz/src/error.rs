// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use thiserror::Error;

/// Failures reported by the backing repositories.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StoreError {
	#[error("Not found: {0}")]
	NotFound(String),

	#[error("Internal: {0}")]
	Internal(String),
}

/// Errors returned by the authorization facade.
#[derive(Debug, Error)]
pub enum AuthzError {
	/// Malformed request, rejected before any repository or restriction work.
	#[error("invalid parameter: {0}")]
	InvalidParameter(String),

	/// The principal may not act on the requested resources.
	#[error("unauthorized: {0}")]
	Unauthorized(String),

	/// A repository failed while resolving the principal's permissions.
	#[error("internal error: {0}")]
	Internal(#[source] StoreError),
}

impl AuthzError {
	/// Stable error code exposed to API clients.
	pub fn code(&self) -> &'static str {
		match self {
			AuthzError::InvalidParameter(_) => "InvalidParameterError",
			AuthzError::Unauthorized(_) => "UnauthorizedResourcesError",
			AuthzError::Internal(_) => "UnknownApiError",
		}
	}

	pub fn is_unauthorized(&self) -> bool {
		matches!(self, AuthzError::Unauthorized(_))
	}

	pub fn is_invalid_parameter(&self) -> bool {
		matches!(self, AuthzError::InvalidParameter(_))
	}
}

pub type Result<T> = std::result::Result<T, AuthzError>;
