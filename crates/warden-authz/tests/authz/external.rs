// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Authorization tests for caller-declared external resources.

use warden_authz::{AuditEventType, Principal};

use super::support::TestWorld;

const README: &str = "urn:ews:storage:acme:bucket/public/readme";
const REPORT: &str = "urn:ews:storage:acme:bucket/public/private-report";
const KEYS: &str = "urn:ews:storage:acme:bucket/private/keys";

fn urns(items: &[&str]) -> Vec<String> {
	items.iter().map(|s| s.to_string()).collect()
}

#[tokio::test]
async fn declared_urns_are_filtered() {
	let world = TestWorld::new().await;

	let authorized = world
		.authorizer
		.authorized_external_resources(
			&Principal::user("alice"),
			"storage:GetObject",
			urns(&[README, REPORT, KEYS]),
		)
		.await
		.unwrap();

	assert_eq!(authorized, urns(&[README]));
}

#[tokio::test]
async fn deny_only_applies_to_its_action() {
	let world = TestWorld::new().await;

	let authorized = world
		.authorizer
		.authorized_external_resources(
			&Principal::user("bob"),
			"storage:GetObjectAcl",
			urns(&[REPORT]),
		)
		.await
		.unwrap();

	assert_eq!(authorized, urns(&[REPORT]));
}

#[tokio::test]
async fn nothing_surviving_is_unauthorized() {
	let world = TestWorld::new().await;
	let alice = Principal::user("alice");

	for (action, resources) in [
		("storage:GetObject", urns(&[KEYS])),
		("storage:GetObject", urns(&[REPORT])),
		("storage:PutObject", urns(&[README])),
	] {
		let err = world
			.authorizer
			.authorized_external_resources(&alice, action, resources)
			.await
			.unwrap_err();
		assert!(err.is_unauthorized(), "{action}: {err}");
	}
}

#[tokio::test]
async fn iam_statements_do_not_grant_storage_actions() {
	let world = TestWorld::new().await;

	let err = world
		.authorizer
		.authorized_external_resources(&Principal::user("carol"), "storage:GetObject", urns(&[README]))
		.await
		.unwrap_err();

	assert!(err.is_unauthorized());
}

#[tokio::test]
async fn malformed_requests_are_invalid_for_everyone() {
	let world = TestWorld::new().await;

	for principal in [Principal::user("ghost"), Principal::admin("root")] {
		for (action, resources) in [
			("storage:*", urns(&[README])),
			("storage:GetObject", Vec::new()),
			("storage:GetObject", urns(&[README, "urn:ews:storage:acme:bucket/*"])),
			("storage:GetObject", urns(&["urn:ews:storage:acme:bucket/with space"])),
		] {
			let err = world
				.authorizer
				.authorized_external_resources(&principal, action, resources)
				.await
				.unwrap_err();
			assert!(err.is_invalid_parameter(), "{action}: {err}");
			assert_eq!(err.code(), "InvalidParameterError");
		}
	}

	let entries = world.audit.entries().await;
	assert_eq!(entries.len(), 8);
	assert!(entries
		.iter()
		.all(|e| e.event_type == AuditEventType::AuthorizationFailed));
}

#[tokio::test]
async fn admin_gets_every_declared_urn() {
	let world = TestWorld::new().await;
	let all = urns(&[README, REPORT, KEYS]);

	let authorized = world
		.authorizer
		.authorized_external_resources(&Principal::admin("root"), "storage:DeleteObject", all.clone())
		.await
		.unwrap();

	assert_eq!(authorized, all);
}
