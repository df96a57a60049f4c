// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Authorization tests for user resources.

use warden_authz::action::iam;
use warden_authz::{AuditEventType, Principal};

use super::support::{run_user_cases, AuthzCase, Expected, TestWorld, ALL_USERS};

// ============================================================================
// List Form
// ============================================================================

#[tokio::test]
async fn user_list_cases() {
	let world = TestWorld::new().await;

	let cases = [
		AuthzCase {
			name: "engineer reads engineering users",
			principal: Principal::user("alice"),
			scope: ALL_USERS,
			action: iam::GET_USER,
			expected: Expected::Authorized(&["alice", "bob", "carol"]),
		},
		AuthzCase {
			name: "engineer lists engineering users",
			principal: Principal::user("bob"),
			scope: ALL_USERS,
			action: iam::LIST_USERS,
			expected: Expected::Authorized(&["alice", "bob", "carol"]),
		},
		AuthzCase {
			name: "engineer has no delete statement",
			principal: Principal::user("alice"),
			scope: ALL_USERS,
			action: iam::DELETE_USER,
			expected: Expected::Unauthorized,
		},
		AuthzCase {
			name: "manager lists everyone",
			principal: Principal::user("carol"),
			scope: ALL_USERS,
			action: iam::LIST_USERS,
			expected: Expected::Authorized(&["alice", "bob", "carol", "dave", "erin", "mallory"]),
		},
		AuthzCase {
			name: "manager delete is carved out of engineering",
			principal: Principal::user("erin"),
			scope: ALL_USERS,
			action: iam::DELETE_USER,
			expected: Expected::Authorized(&["dave", "erin", "mallory"]),
		},
		AuthzCase {
			name: "contractor allow is shadowed by broader deny",
			principal: Principal::user("mallory"),
			scope: ALL_USERS,
			action: iam::GET_USER,
			expected: Expected::Unauthorized,
		},
		AuthzCase {
			name: "user without groups",
			principal: Principal::user("dave"),
			scope: ALL_USERS,
			action: iam::GET_USER,
			expected: Expected::Unauthorized,
		},
		AuthzCase {
			name: "unknown principal",
			principal: Principal::user("ghost"),
			scope: ALL_USERS,
			action: iam::GET_USER,
			expected: Expected::Unauthorized,
		},
		AuthzCase {
			name: "scope outside every statement",
			principal: Principal::user("alice"),
			scope: "urn:iws:iam::user/sales/*",
			action: iam::GET_USER,
			expected: Expected::Unauthorized,
		},
		AuthzCase {
			name: "admin bypasses restrictions",
			principal: Principal::admin("root"),
			scope: ALL_USERS,
			action: iam::DELETE_USER,
			expected: Expected::Authorized(&["alice", "bob", "carol", "dave", "erin", "mallory"]),
		},
		AuthzCase {
			name: "wildcard action",
			principal: Principal::user("alice"),
			scope: ALL_USERS,
			action: "iam:*",
			expected: Expected::InvalidParameter,
		},
		AuthzCase {
			name: "empty action",
			principal: Principal::admin("root"),
			scope: ALL_USERS,
			action: "",
			expected: Expected::InvalidParameter,
		},
	];

	run_user_cases(&world, &cases).await;
}

#[tokio::test]
async fn deny_equal_to_scope_keeps_broader_allow() {
	let world = TestWorld::new().await;
	let cases = [AuthzCase {
		name: "deny prefix equal to the requested scope",
		principal: Principal::user("carol"),
		scope: "urn:iws:iam::user/eng/*",
		action: iam::DELETE_USER,
		expected: Expected::Authorized(&["dave", "erin", "mallory"]),
	}];

	run_user_cases(&world, &cases).await;
}

#[tokio::test]
async fn engineer_listing_only_sales_users_is_unauthorized() {
	let world = TestWorld::new().await;
	let sales = vec![world.user("dave").clone(), world.user("erin").clone()];

	let err = world
		.authorizer
		.authorized_users(&Principal::user("alice"), ALL_USERS, iam::LIST_USERS, sales)
		.await
		.unwrap_err();

	assert!(err.is_unauthorized(), "got {err}");

	let entries = world.audit.entries().await;
	assert_eq!(entries.len(), 1);
	assert_eq!(entries[0].event_type, AuditEventType::AccessDenied);
	assert_eq!(entries[0].details["code"], "UnauthorizedResourcesError");
}

// ============================================================================
// Single-Resource Form
// ============================================================================

#[tokio::test]
async fn manager_can_update_engineer() {
	let world = TestWorld::new().await;
	let alice = world.user("alice").clone();

	let authorized = world
		.authorizer
		.authorize_resource(&Principal::user("carol"), iam::UPDATE_USER, alice.clone())
		.await
		.unwrap();

	assert_eq!(authorized, alice);
}

#[tokio::test]
async fn manager_cannot_delete_engineer() {
	let world = TestWorld::new().await;

	let err = world
		.authorizer
		.authorize_resource(
			&Principal::user("carol"),
			iam::DELETE_USER,
			world.user("alice").clone(),
		)
		.await
		.unwrap_err();

	assert!(err.is_unauthorized(), "got {err}");
	assert_eq!(err.code(), "UnauthorizedResourcesError");
}

#[tokio::test]
async fn manager_can_delete_outside_engineering() {
	let world = TestWorld::new().await;
	let dave = world.user("dave").clone();

	let authorized = world
		.authorizer
		.authorize_resource(&Principal::user("carol"), iam::DELETE_USER, dave.clone())
		.await
		.unwrap();

	assert_eq!(authorized, dave);
}

#[tokio::test]
async fn engineer_cannot_read_sales_user() {
	let world = TestWorld::new().await;

	let err = world
		.authorizer
		.authorize_resource(&Principal::user("bob"), iam::GET_USER, world.user("dave").clone())
		.await
		.unwrap_err();

	assert!(err.is_unauthorized());
}

// ============================================================================
// Concurrency And Audit
// ============================================================================

#[tokio::test]
async fn concurrent_checks_do_not_share_restrictions() {
	let world = TestWorld::new().await;

	let (alice, carol, mallory) = (
		Principal::user("alice"),
		Principal::user("carol"),
		Principal::user("mallory"),
	);

	let (engineer, manager, contractor) = tokio::join!(
		world
			.authorizer
			.authorized_users(&alice, ALL_USERS, iam::GET_USER, world.users.clone()),
		world
			.authorizer
			.authorized_users(&carol, ALL_USERS, iam::DELETE_USER, world.users.clone()),
		world
			.authorizer
			.authorized_users(&mallory, ALL_USERS, iam::GET_USER, world.users.clone()),
	);

	assert_eq!(engineer.unwrap().len(), 3);
	assert_eq!(manager.unwrap().len(), 3);
	assert!(contractor.unwrap_err().is_unauthorized());
}

#[tokio::test]
async fn every_decision_is_recorded_with_request_id() {
	let world = TestWorld::new().await;

	let _ = world
		.authorizer
		.authorized_users(
			&Principal::user("alice").with_request_id("req-1"),
			ALL_USERS,
			iam::GET_USER,
			world.users.clone(),
		)
		.await;
	let _ = world
		.authorizer
		.authorized_users(
			&Principal::user("ghost").with_request_id("req-2"),
			ALL_USERS,
			iam::GET_USER,
			world.users.clone(),
		)
		.await;

	let entries = world.audit.entries().await;
	assert_eq!(entries.len(), 2);

	assert_eq!(entries[0].event_type, AuditEventType::AccessGranted);
	assert_eq!(entries[0].principal.as_deref(), Some("alice"));
	assert_eq!(entries[0].request_id.as_deref(), Some("req-1"));
	assert_eq!(entries[0].details["authorized"], 3);

	assert_eq!(entries[1].event_type, AuditEventType::AccessDenied);
	assert_eq!(entries[1].request_id.as_deref(), Some("req-2"));
	assert_eq!(entries[1].details["code"], "UnauthorizedResourcesError");
}
