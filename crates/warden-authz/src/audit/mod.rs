// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Operation log for authorization decisions.
//!
//! The facade is handed an [`AuditSink`] at construction and records one
//! [`AuditLogEntry`] per decision. Sinks are append-only: nothing in the
//! engine reads entries back.

mod sink;

pub use sink::{
	AuditSink, AuditSinkError, FileAuditSink, MemoryAuditSink, NoopAuditSink, TracingAuditSink,
};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::types::Principal;

/// Types of events the authorization facade records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditEventType {
	/// At least one requested resource was authorized.
	AccessGranted,
	/// The principal was refused access.
	AccessDenied,
	/// The request was malformed or a repository failed.
	AuthorizationFailed,
}

impl std::fmt::Display for AuditEventType {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		let s = match self {
			AuditEventType::AccessGranted => "access_granted",
			AuditEventType::AccessDenied => "access_denied",
			AuditEventType::AuthorizationFailed => "authorization_failed",
		};
		write!(f, "{s}")
	}
}

/// An entry in the operation log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditLogEntry {
	pub id: Uuid,
	pub timestamp: DateTime<Utc>,
	pub event_type: AuditEventType,
	/// External identifier of the acting principal.
	pub principal: Option<String>,
	pub admin: bool,
	pub request_id: Option<String>,
	pub action: Option<String>,
	/// Requested resource scope (URN or prefix).
	pub scope: Option<String>,
	/// Additional event-specific details.
	pub details: serde_json::Value,
}

impl AuditLogEntry {
	pub fn builder(event_type: AuditEventType) -> AuditLogBuilder {
		AuditLogBuilder::new(event_type)
	}
}

/// Builder for constructing audit log entries with a fluent API.
#[derive(Debug, Clone)]
pub struct AuditLogBuilder {
	event_type: AuditEventType,
	principal: Option<String>,
	admin: bool,
	request_id: Option<String>,
	action: Option<String>,
	scope: Option<String>,
	details: serde_json::Value,
}

impl AuditLogBuilder {
	pub fn new(event_type: AuditEventType) -> Self {
		Self {
			event_type,
			principal: None,
			admin: false,
			request_id: None,
			action: None,
			scope: None,
			details: serde_json::Value::Null,
		}
	}

	/// Set the acting principal and its request id.
	pub fn principal(mut self, principal: &Principal) -> Self {
		self.principal = Some(principal.identifier.clone());
		self.admin = principal.admin;
		self.request_id = Some(principal.request_id.clone());
		self
	}

	pub fn action(mut self, action: impl Into<String>) -> Self {
		self.action = Some(action.into());
		self
	}

	pub fn scope(mut self, scope: impl Into<String>) -> Self {
		self.scope = Some(scope.into());
		self
	}

	pub fn details(mut self, details: serde_json::Value) -> Self {
		self.details = details;
		self
	}

	pub fn build(self) -> AuditLogEntry {
		AuditLogEntry {
			id: Uuid::new_v4(),
			timestamp: Utc::now(),
			event_type: self.event_type,
			principal: self.principal,
			admin: self.admin,
			request_id: self.request_id,
			action: self.action,
			scope: self.scope,
			details: self.details,
		}
	}
}
