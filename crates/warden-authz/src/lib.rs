// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! IAM-style authorization engine for Warden.
//!
//! Given a principal, a requested action and a resource scope, this crate
//! decides which candidate resources the principal may act upon:
//!
//! - [`action`] matches requested actions against statement action patterns
//! - [`urn`] answers prefix coverage between URN patterns
//! - [`restriction`] holds the minimized allow/deny aggregate
//! - [`builder`] folds statements into an aggregate for one scope
//! - [`filter`] applies an aggregate to candidate resources
//! - [`authorizer`] is the facade: it resolves statements through the
//!   repository port and records every decision on the operation log
//!
//! Deny always beats allow, and absence of any allow means no access.

pub mod action;
pub mod audit;
pub mod authorizer;
pub mod builder;
pub mod error;
pub mod filter;
pub mod restriction;
pub mod store;
pub mod types;
pub mod urn;
pub mod validation;

pub use audit::{
	AuditEventType, AuditLogEntry, AuditSink, AuditSinkError, FileAuditSink, MemoryAuditSink,
	NoopAuditSink, TracingAuditSink,
};
pub use authorizer::Authorizer;
pub use builder::{applicable_statements, build_restrictions};
pub use error::{AuthzError, Result, StoreError};
pub use filter::filter_resources;
pub use restriction::Restrictions;
pub use store::{AuthzStore, MemoryStore};
pub use types::{
	Addressable, Effect, Group, GroupId, Policy, PolicyId, Principal, ProxyResource,
	ProxyResourceId, ProxyTarget, Statement, User, UserId,
};
pub use urn::{ResourceKind, UrnPattern};
