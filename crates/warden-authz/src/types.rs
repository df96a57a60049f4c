// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Core type definitions for the IAM authorization engine.
//!
//! - **ID newtypes**: Type-safe wrappers around UUIDs ([`UserId`], [`GroupId`],
//!   [`PolicyId`], [`ProxyResourceId`])
//! - **Principal**: the authenticated caller of a request ([`Principal`])
//! - **Policy model**: [`Effect`], [`Statement`], [`Policy`]
//! - **Addressable resources**: [`User`], [`Group`], [`Policy`],
//!   [`ProxyResource`] and plain URN strings, unified by [`Addressable`]

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::urn::{resource_urn, ResourceKind};

// =============================================================================
// ID Newtypes
// =============================================================================

macro_rules! define_id_type {
	($name:ident, $doc:expr) => {
		#[doc = $doc]
		#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
		#[serde(transparent)]
		pub struct $name(Uuid);

		impl $name {
			/// Create a new ID from a UUID.
			pub fn new(id: Uuid) -> Self {
				Self(id)
			}

			/// Generate a new random ID.
			pub fn generate() -> Self {
				Self(Uuid::new_v4())
			}

			/// Get the inner UUID value.
			pub fn into_inner(self) -> Uuid {
				self.0
			}
		}

		impl fmt::Display for $name {
			fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
				write!(f, "{}", self.0)
			}
		}

		impl From<Uuid> for $name {
			fn from(id: Uuid) -> Self {
				Self(id)
			}
		}

		impl From<$name> for Uuid {
			fn from(id: $name) -> Self {
				id.0
			}
		}
	};
}

define_id_type!(UserId, "Unique identifier for a user.");
define_id_type!(GroupId, "Unique identifier for a group.");
define_id_type!(PolicyId, "Unique identifier for a policy.");
define_id_type!(ProxyResourceId, "Unique identifier for a proxy resource.");

// =============================================================================
// Principal
// =============================================================================

/// The authenticated caller of an authorization request.
///
/// Admins bypass restriction computation entirely.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principal {
	/// External identifier assigned by the authentication connector.
	pub identifier: String,
	pub admin: bool,
	/// Correlates log and audit records for a single request.
	pub request_id: String,
}

impl Principal {
	pub fn user(identifier: impl Into<String>) -> Self {
		Self {
			identifier: identifier.into(),
			admin: false,
			request_id: Uuid::new_v4().to_string(),
		}
	}

	pub fn admin(identifier: impl Into<String>) -> Self {
		Self {
			admin: true,
			..Self::user(identifier)
		}
	}

	/// Builder: set the request id.
	pub fn with_request_id(mut self, request_id: impl Into<String>) -> Self {
		self.request_id = request_id.into();
		self
	}
}

// =============================================================================
// Policy model
// =============================================================================

/// Whether a statement grants or withholds access.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Effect {
	Allow,
	Deny,
}

impl fmt::Display for Effect {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Effect::Allow => write!(f, "allow"),
			Effect::Deny => write!(f, "deny"),
		}
	}
}

/// A single allow/deny rule over action and resource patterns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Statement {
	pub effect: Effect,
	pub actions: Vec<String>,
	pub resources: Vec<String>,
}

impl Statement {
	pub fn allow<A, R>(actions: A, resources: R) -> Self
	where
		A: IntoIterator,
		A::Item: Into<String>,
		R: IntoIterator,
		R::Item: Into<String>,
	{
		Self::new(Effect::Allow, actions, resources)
	}

	pub fn deny<A, R>(actions: A, resources: R) -> Self
	where
		A: IntoIterator,
		A::Item: Into<String>,
		R: IntoIterator,
		R::Item: Into<String>,
	{
		Self::new(Effect::Deny, actions, resources)
	}

	fn new<A, R>(effect: Effect, actions: A, resources: R) -> Self
	where
		A: IntoIterator,
		A::Item: Into<String>,
		R: IntoIterator,
		R::Item: Into<String>,
	{
		Self {
			effect,
			actions: actions.into_iter().map(Into::into).collect(),
			resources: resources.into_iter().map(Into::into).collect(),
		}
	}
}

/// A named, organization-scoped, ordered collection of statements.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Policy {
	pub id: PolicyId,
	pub name: String,
	pub path: String,
	pub org: String,
	pub urn: String,
	pub statements: Vec<Statement>,
}

impl Policy {
	pub fn new(
		org: impl Into<String>,
		path: impl Into<String>,
		name: impl Into<String>,
		statements: Vec<Statement>,
	) -> Self {
		let (org, path, name) = (org.into(), path.into(), name.into());
		Self {
			id: PolicyId::generate(),
			urn: resource_urn(&org, ResourceKind::Policy, &path, &name),
			name,
			path,
			org,
			statements,
		}
	}
}

// =============================================================================
// Addressable resources
// =============================================================================

/// A user known to the IAM layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
	pub id: UserId,
	pub external_id: String,
	pub path: String,
	pub urn: String,
}

impl User {
	pub fn new(external_id: impl Into<String>, path: impl Into<String>) -> Self {
		let (external_id, path) = (external_id.into(), path.into());
		Self {
			id: UserId::generate(),
			urn: resource_urn("", ResourceKind::User, &path, &external_id),
			external_id,
			path,
		}
	}
}

/// A group of users; policies are attached to groups.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
	pub id: GroupId,
	pub name: String,
	pub path: String,
	pub org: String,
	pub urn: String,
}

impl Group {
	pub fn new(org: impl Into<String>, path: impl Into<String>, name: impl Into<String>) -> Self {
		let (org, path, name) = (org.into(), path.into(), name.into());
		Self {
			id: GroupId::generate(),
			urn: resource_urn(&org, ResourceKind::Group, &path, &name),
			name,
			path,
			org,
		}
	}
}

/// The upstream endpoint a proxy resource guards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProxyTarget {
	pub host: String,
	pub url: String,
	pub method: String,
	/// URN checked when a request hits this endpoint.
	pub urn: String,
	/// Action checked when a request hits this endpoint.
	pub action: String,
}

/// An external endpoint whose access is governed by IAM policies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProxyResource {
	pub id: ProxyResourceId,
	pub name: String,
	pub path: String,
	pub org: String,
	pub urn: String,
	pub resource: ProxyTarget,
}

impl ProxyResource {
	pub fn new(
		org: impl Into<String>,
		path: impl Into<String>,
		name: impl Into<String>,
		resource: ProxyTarget,
	) -> Self {
		let (org, path, name) = (org.into(), path.into(), name.into());
		Self {
			id: ProxyResourceId::generate(),
			urn: resource_urn(&org, ResourceKind::Proxy, &path, &name),
			name,
			path,
			org,
			resource,
		}
	}
}

/// Anything the resource filter can decide on: it only needs the URN.
pub trait Addressable {
	fn urn(&self) -> &str;
}

impl Addressable for User {
	fn urn(&self) -> &str {
		&self.urn
	}
}

impl Addressable for Group {
	fn urn(&self) -> &str {
		&self.urn
	}
}

impl Addressable for Policy {
	fn urn(&self) -> &str {
		&self.urn
	}
}

impl Addressable for ProxyResource {
	fn urn(&self) -> &str {
		&self.urn
	}
}

/// External resources are caller-declared URNs.
impl Addressable for String {
	fn urn(&self) -> &str {
		self
	}
}
