// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Shared fixtures for authorization integration tests.
//!
//! The seeded organization `acme` looks like this:
//!
//! | user    | path               | groups      |
//! |---------|--------------------|-------------|
//! | alice   | /eng/backend/      | engineering |
//! | bob     | /eng/frontend/     | engineering |
//! | carol   | /eng/              | managers    |
//! | dave    | /sales/            | (none)      |
//! | erin    | /sales/emea/       | managers    |
//! | mallory | /contractors/      | contractors |

use std::sync::Arc;

use warden_authz::action::iam;
use warden_authz::{
	Addressable, Authorizer, AuthzError, Group, MemoryAuditSink, MemoryStore, Policy, Principal,
	ProxyResource, ProxyTarget, Statement, User,
};

pub const ALL_USERS: &str = "urn:iws:iam::user/*";
pub const ALL_GROUPS: &str = "urn:iws:iam:acme:group/*";
pub const ALL_POLICIES: &str = "urn:iws:iam:acme:policy/*";
pub const ALL_PROXIES: &str = "urn:iws:iam:acme:proxy/*";

pub struct TestWorld {
	pub authorizer: Authorizer,
	pub audit: Arc<MemoryAuditSink>,
	pub users: Vec<User>,
	pub groups: Vec<Group>,
	pub policies: Vec<Policy>,
	pub proxies: Vec<ProxyResource>,
}

impl TestWorld {
	pub async fn new() -> Self {
		let store = Arc::new(MemoryStore::new());

		let users = vec![
			User::new("alice", "/eng/backend/"),
			User::new("bob", "/eng/frontend/"),
			User::new("carol", "/eng/"),
			User::new("dave", "/sales/"),
			User::new("erin", "/sales/emea/"),
			User::new("mallory", "/contractors/"),
		];
		for user in &users {
			store.add_user(user.clone()).await;
		}

		let engineering = Group::new("acme", "/", "engineering");
		let managers = Group::new("acme", "/", "managers");
		let contractors = Group::new("acme", "/ext/", "contractors");
		let groups = vec![engineering.clone(), managers.clone(), contractors.clone()];
		for group in &groups {
			store.add_group(group.clone()).await;
		}

		let eng_read = Policy::new(
			"acme",
			"/eng/",
			"eng-read",
			vec![
				Statement::allow([iam::GET_USER, iam::LIST_USERS], ["urn:iws:iam::user/eng/*"]),
				Statement::allow([iam::GET_GROUP, iam::LIST_GROUPS], [ALL_GROUPS]),
				Statement::deny([iam::GET_GROUP, iam::LIST_GROUPS], ["urn:iws:iam:acme:group/ext/*"]),
				Statement::allow(
					[iam::GET_POLICY, iam::LIST_POLICIES],
					["urn:iws:iam:acme:policy/eng/*"],
				),
				Statement::allow(
					[iam::GET_PROXY_RESOURCE, iam::LIST_PROXY_RESOURCES],
					["urn:iws:iam:acme:proxy/internal/*"],
				),
			],
		);
		let eng_storage = Policy::new(
			"acme",
			"/eng/",
			"eng-storage",
			vec![
				Statement::allow(["storage:Get*"], ["urn:ews:storage:acme:bucket/public/*"]),
				Statement::deny(
					["storage:GetObject"],
					["urn:ews:storage:acme:bucket/public/private-report"],
				),
			],
		);
		let manage_users = Policy::new(
			"acme",
			"/",
			"manage-users",
			vec![
				Statement::allow(["iam:*"], [ALL_USERS]),
				Statement::deny([iam::DELETE_USER], ["urn:iws:iam::user/eng/*"]),
			],
		);
		let lockdown = Policy::new(
			"acme",
			"/",
			"contractor-lockdown",
			vec![
				Statement::deny(["iam:*"], [ALL_USERS]),
				Statement::allow([iam::GET_USER], ["urn:iws:iam::user/contractors/mallory"]),
			],
		);
		let policies = vec![
			eng_read.clone(),
			eng_storage.clone(),
			manage_users.clone(),
			lockdown.clone(),
		];
		for policy in &policies {
			store.add_policy(policy.clone()).await;
		}

		for (group, members) in [
			(&engineering, ["alice", "bob"].as_slice()),
			(&managers, ["carol", "erin"].as_slice()),
			(&contractors, ["mallory"].as_slice()),
		] {
			for member in members {
				let user = users
					.iter()
					.find(|u| u.external_id == *member)
					.unwrap();
				store.add_member(group.id, user.id).await.unwrap();
			}
		}

		for (group, policy) in [
			(&engineering, &eng_read),
			(&engineering, &eng_storage),
			(&managers, &manage_users),
			(&contractors, &lockdown),
		] {
			store.attach_policy(group.id, policy.id).await.unwrap();
		}

		let proxies = vec![
			proxy("/internal/", "grafana", "https://grafana.internal"),
			proxy("/internal/", "jaeger", "https://jaeger.internal"),
			proxy("/partner/", "billing", "https://billing.partner"),
		];
		for resource in &proxies {
			store.add_proxy_resource(resource.clone()).await;
		}

		let audit = Arc::new(MemoryAuditSink::new());
		let authorizer = Authorizer::new(store, audit.clone());

		Self {
			authorizer,
			audit,
			users,
			groups,
			policies,
			proxies,
		}
	}

	pub fn user(&self, external_id: &str) -> &User {
		self
			.users
			.iter()
			.find(|u| u.external_id == external_id)
			.unwrap_or_else(|| panic!("no seeded user {external_id}"))
	}
}

fn proxy(path: &str, name: &str, host: &str) -> ProxyResource {
	ProxyResource::new(
		"acme",
		path,
		name,
		ProxyTarget {
			host: host.to_string(),
			url: "/*".to_string(),
			method: "GET".to_string(),
			urn: format!("urn:ews:proxy:acme:{name}"),
			action: format!("{name}:Get"),
		},
	)
}

/// What a case expects from the facade.
#[derive(Debug)]
pub enum Expected {
	/// The external ids (or names) of the authorized subset, in order.
	Authorized(&'static [&'static str]),
	Unauthorized,
	InvalidParameter,
}

pub struct AuthzCase {
	pub name: &'static str,
	pub principal: Principal,
	pub scope: &'static str,
	pub action: &'static str,
	pub expected: Expected,
}

pub fn assert_outcome<R, F>(case: &AuthzCase, outcome: Result<Vec<R>, AuthzError>, label: F)
where
	R: Addressable,
	F: Fn(&R) -> String,
{
	match (&case.expected, outcome) {
		(Expected::Authorized(expected), Ok(authorized)) => {
			let got: Vec<String> = authorized.iter().map(&label).collect();
			assert_eq!(got, *expected, "Case '{}': authorized subset", case.name);
		}
		(Expected::Unauthorized, Err(e)) if e.is_unauthorized() => {}
		(Expected::InvalidParameter, Err(e)) if e.is_invalid_parameter() => {}
		(expected, Ok(authorized)) => panic!(
			"Case '{}': expected {:?}, got {} authorized: {:?}",
			case.name,
			expected,
			authorized.len(),
			authorized.iter().map(|r| r.urn().to_string()).collect::<Vec<_>>()
		),
		(expected, Err(e)) => panic!(
			"Case '{}': expected {:?}, got error {} ({})",
			case.name,
			expected,
			e,
			e.code()
		),
	}
}

pub async fn run_user_cases(world: &TestWorld, cases: &[AuthzCase]) {
	for case in cases {
		let outcome = world
			.authorizer
			.authorized_users(&case.principal, case.scope, case.action, world.users.clone())
			.await;
		assert_outcome(case, outcome, |u: &User| u.external_id.clone());
	}
}
