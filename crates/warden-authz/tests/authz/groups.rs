// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Authorization tests for group resources.

use warden_authz::action::iam;
use warden_authz::{Group, Principal};

use super::support::{assert_outcome, AuthzCase, Expected, TestWorld, ALL_GROUPS};

fn by_name(world: &TestWorld, name: &str) -> Group {
	world
		.groups
		.iter()
		.find(|g| g.name == name)
		.cloned()
		.unwrap()
}

#[tokio::test]
async fn group_list_cases() {
	let world = TestWorld::new().await;

	let cases = [
		AuthzCase {
			name: "engineer lists groups except external ones",
			principal: Principal::user("alice"),
			scope: ALL_GROUPS,
			action: iam::LIST_GROUPS,
			expected: Expected::Authorized(&["engineering", "managers"]),
		},
		AuthzCase {
			name: "manager has only user statements",
			principal: Principal::user("carol"),
			scope: ALL_GROUPS,
			action: iam::LIST_GROUPS,
			expected: Expected::Unauthorized,
		},
		AuthzCase {
			name: "other organization is out of scope",
			principal: Principal::user("alice"),
			scope: "urn:iws:iam:globex:group/*",
			action: iam::LIST_GROUPS,
			expected: Expected::Unauthorized,
		},
		AuthzCase {
			name: "admin sees every group",
			principal: Principal::admin("root"),
			scope: ALL_GROUPS,
			action: iam::DELETE_GROUP,
			expected: Expected::Authorized(&["engineering", "managers", "contractors"]),
		},
	];

	for case in &cases {
		let outcome = world
			.authorizer
			.authorized_groups(&case.principal, case.scope, case.action, world.groups.clone())
			.await;
		assert_outcome(case, outcome, |g: &Group| g.name.clone());
	}
}

#[tokio::test]
async fn external_group_is_denied_as_single_resource() {
	let world = TestWorld::new().await;

	let err = world
		.authorizer
		.authorize_resource(
			&Principal::user("bob"),
			iam::GET_GROUP,
			by_name(&world, "contractors"),
		)
		.await
		.unwrap_err();
	assert!(err.is_unauthorized());

	let engineering = by_name(&world, "engineering");
	let authorized = world
		.authorizer
		.authorize_resource(&Principal::user("bob"), iam::GET_GROUP, engineering.clone())
		.await
		.unwrap();
	assert_eq!(authorized, engineering);
}

#[tokio::test]
async fn explained_restrictions_show_carve_out() {
	let world = TestWorld::new().await;

	let restrictions = world
		.authorizer
		.restrictions(&Principal::user("alice"), ALL_GROUPS, iam::GET_GROUP)
		.await
		.unwrap()
		.unwrap();

	assert!(restrictions.allowed_prefix().contains(ALL_GROUPS));
	assert!(restrictions
		.denied_prefix()
		.contains("urn:iws:iam:acme:group/ext/*"));
	assert!(restrictions.allowed_full().is_empty());
	assert!(restrictions.denied_full().is_empty());
}
