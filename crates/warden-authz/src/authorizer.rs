// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Authorization facade.
//!
//! [`Authorizer`] turns "principal + action + resource scope" into the subset
//! of candidate resources the principal may act upon:
//!
//! ```text
//! validate params → admin? ──yes──────────────────────────────→ all candidates
//!                     │
//!                     no
//!                     ↓
//! resolve principal → groups → attached policies → statements matching action
//!                     ↓
//! build restrictions for scope → no allows? → Unauthorized
//!                     ↓
//! filter candidates → nothing survives? → Unauthorized
//!                     ↓
//! authorized subset
//! ```
//!
//! Repository lookups happen before the pure computation; the restriction
//! aggregate is built fresh for every call and never shared. Every decision
//! is recorded on the injected [`AuditSink`].

use serde_json::json;
use std::sync::Arc;
use tracing::{debug, instrument, warn};

use crate::audit::{AuditEventType, AuditLogEntry, AuditSink};
use crate::builder::{applicable_statements, build_restrictions};
use crate::error::{AuthzError, Result, StoreError};
use crate::filter::filter_resources;
use crate::restriction::Restrictions;
use crate::store::AuthzStore;
use crate::types::{Addressable, Group, Policy, Principal, ProxyResource, User};
use crate::validation::{validate_action, validate_external_resources};

/// Scope used for caller-declared resources: every statement resource is
/// considered and the filter decides per URN.
const ANY_SCOPE: &str = "*";

pub struct Authorizer {
	store: Arc<dyn AuthzStore>,
	audit: Arc<dyn AuditSink>,
}

impl Authorizer {
	pub fn new(store: Arc<dyn AuthzStore>, audit: Arc<dyn AuditSink>) -> Self {
		Self { store, audit }
	}

	#[instrument(
		skip_all,
		fields(
			principal = %principal.identifier,
			request_id = %principal.request_id,
			action = %action,
			scope = %scope,
		)
	)]
	pub async fn authorized_users(
		&self,
		principal: &Principal,
		scope: &str,
		action: &str,
		users: Vec<User>,
	) -> Result<Vec<User>> {
		self.authorize_list(principal, scope, action, users).await
	}

	#[instrument(
		skip_all,
		fields(
			principal = %principal.identifier,
			request_id = %principal.request_id,
			action = %action,
			scope = %scope,
		)
	)]
	pub async fn authorized_groups(
		&self,
		principal: &Principal,
		scope: &str,
		action: &str,
		groups: Vec<Group>,
	) -> Result<Vec<Group>> {
		self.authorize_list(principal, scope, action, groups).await
	}

	#[instrument(
		skip_all,
		fields(
			principal = %principal.identifier,
			request_id = %principal.request_id,
			action = %action,
			scope = %scope,
		)
	)]
	pub async fn authorized_policies(
		&self,
		principal: &Principal,
		scope: &str,
		action: &str,
		policies: Vec<Policy>,
	) -> Result<Vec<Policy>> {
		self.authorize_list(principal, scope, action, policies).await
	}

	#[instrument(
		skip_all,
		fields(
			principal = %principal.identifier,
			request_id = %principal.request_id,
			action = %action,
			scope = %scope,
		)
	)]
	pub async fn authorized_proxy_resources(
		&self,
		principal: &Principal,
		scope: &str,
		action: &str,
		resources: Vec<ProxyResource>,
	) -> Result<Vec<ProxyResource>> {
		self.authorize_list(principal, scope, action, resources).await
	}

	/// Authorizes caller-declared URNs.
	///
	/// `action` must be concrete and every resource a full URN. Fails with
	/// `Unauthorized` when none of the resources survive.
	#[instrument(
		skip_all,
		fields(
			principal = %principal.identifier,
			request_id = %principal.request_id,
			action = %action,
			resources = resources.len(),
		)
	)]
	pub async fn authorized_external_resources(
		&self,
		principal: &Principal,
		action: &str,
		resources: Vec<String>,
	) -> Result<Vec<String>> {
		let outcome = match validate_action(action)
			.and_then(|()| validate_external_resources(&resources))
		{
			Ok(()) => self.evaluate(principal, ANY_SCOPE, action, resources).await,
			Err(e) => Err(e),
		};

		self
			.record(principal, ANY_SCOPE, action, outcome.as_ref().map(Vec::len))
			.await;
		outcome
	}

	/// Single-resource form used by create/update/delete flows: the whole
	/// operation fails unless `resource` is authorized.
	#[instrument(
		skip_all,
		fields(
			principal = %principal.identifier,
			request_id = %principal.request_id,
			action = %action,
			urn = %resource.urn(),
		)
	)]
	pub async fn authorize_resource<R>(
		&self,
		principal: &Principal,
		action: &str,
		resource: R,
	) -> Result<R>
	where
		R: Addressable + Send,
	{
		let scope = resource.urn().to_string();
		let outcome = match validate_action(action) {
			Ok(()) => self
				.evaluate(principal, &scope, action, vec![resource])
				.await
				.and_then(|mut authorized| {
					authorized.pop().ok_or_else(|| {
						AuthzError::Unauthorized(format!(
							"principal {} is not allowed to perform {action} on {scope}",
							principal.identifier
						))
					})
				}),
			Err(e) => Err(e),
		};

		self
			.record(principal, &scope, action, outcome.as_ref().map(|_| 1))
			.await;
		outcome
	}

	/// Computes the restriction aggregate without filtering anything.
	///
	/// Returns `None` for admins, for whom no restrictions are computed.
	pub async fn restrictions(
		&self,
		principal: &Principal,
		scope: &str,
		action: &str,
	) -> Result<Option<Restrictions>> {
		validate_action(action)?;
		if principal.admin {
			return Ok(None);
		}
		self
			.resolve_restrictions(principal, scope, action)
			.await
			.map(Some)
	}

	async fn authorize_list<R>(
		&self,
		principal: &Principal,
		scope: &str,
		action: &str,
		candidates: Vec<R>,
	) -> Result<Vec<R>>
	where
		R: Addressable + Send,
	{
		let outcome = match validate_action(action) {
			Ok(()) => self.evaluate(principal, scope, action, candidates).await,
			Err(e) => Err(e),
		};

		self
			.record(principal, scope, action, outcome.as_ref().map(Vec::len))
			.await;
		outcome
	}

	async fn evaluate<R>(
		&self,
		principal: &Principal,
		scope: &str,
		action: &str,
		candidates: Vec<R>,
	) -> Result<Vec<R>>
	where
		R: Addressable + Send,
	{
		if principal.admin {
			debug!("admin principal bypasses restrictions");
			return Ok(candidates);
		}

		let restrictions = self.resolve_restrictions(principal, scope, action).await?;
		if !restrictions.has_allows() {
			return Err(AuthzError::Unauthorized(format!(
				"principal {} is not allowed to perform {action} on {scope}",
				principal.identifier
			)));
		}

		let total = candidates.len();
		let authorized = filter_resources(candidates, &restrictions);
		debug!(total, authorized = authorized.len(), "candidates filtered");
		if total > 0 && authorized.is_empty() {
			return Err(AuthzError::Unauthorized(format!(
				"principal {} is not allowed to perform {action} on any requested resource",
				principal.identifier
			)));
		}
		Ok(authorized)
	}

	async fn resolve_restrictions(
		&self,
		principal: &Principal,
		scope: &str,
		action: &str,
	) -> Result<Restrictions> {
		let user = match self.store.user_by_external_id(&principal.identifier).await {
			Ok(user) => user,
			Err(StoreError::NotFound(_)) => {
				return Err(AuthzError::Unauthorized(format!(
					"no permissions could be retrieved for principal {}",
					principal.identifier
				)));
			}
			Err(e) => return Err(AuthzError::Internal(e)),
		};

		let groups = self
			.store
			.groups_for_user(&user.id)
			.await
			.map_err(AuthzError::Internal)?;

		let mut policies = Vec::new();
		for group in &groups {
			let attached = self
				.store
				.policies_for_group(&group.id)
				.await
				.map_err(AuthzError::Internal)?;
			policies.extend(attached);
		}

		let statements = applicable_statements(&policies, action);
		debug!(
			groups = groups.len(),
			policies = policies.len(),
			statements = statements.len(),
			"statements resolved"
		);

		Ok(build_restrictions(&statements, scope))
	}

	async fn record(
		&self,
		principal: &Principal,
		scope: &str,
		action: &str,
		outcome: std::result::Result<usize, &AuthzError>,
	) {
		let (event_type, details) = match outcome {
			Ok(0) => (AuditEventType::AccessDenied, json!({ "authorized": 0 })),
			Ok(authorized) => (
				AuditEventType::AccessGranted,
				json!({ "authorized": authorized }),
			),
			Err(e) if e.is_unauthorized() => (
				AuditEventType::AccessDenied,
				json!({ "code": e.code(), "reason": e.to_string() }),
			),
			Err(e) => (
				AuditEventType::AuthorizationFailed,
				json!({ "code": e.code(), "reason": e.to_string() }),
			),
		};

		let mut builder = AuditLogEntry::builder(event_type)
			.principal(principal)
			.action(action)
			.details(details);
		if scope != ANY_SCOPE {
			builder = builder.scope(scope);
		}

		if let Err(e) = self.audit.publish(Arc::new(builder.build())).await {
			warn!(sink = self.audit.name(), error = %e, "audit sink publish failed");
		}
	}
}
