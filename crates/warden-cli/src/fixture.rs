// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! TOML fixtures describing users, groups, policies and proxy resources.
//!
//! ```toml
//! [[users]]
//! external_id = "alice"
//! path = "/eng/"
//!
//! [[groups]]
//! org = "acme"
//! name = "engineering"
//! members = ["alice"]
//! policies = ["eng-read"]
//!
//! [[policies]]
//! org = "acme"
//! name = "eng-read"
//! statements = [
//!   { effect = "allow", actions = ["iam:GetUser"], resources = ["urn:iws:iam::user/eng/*"] },
//! ]
//! ```

use std::collections::HashMap;
use std::path::Path;

use anyhow::{bail, Context, Result};
use serde::Deserialize;
use tracing::debug;
use warden_authz::{Group, MemoryStore, Policy, ProxyResource, ProxyTarget, Statement, User};

fn root_path() -> String {
	"/".to_string()
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Fixture {
	#[serde(default)]
	pub users: Vec<UserFixture>,
	#[serde(default)]
	pub groups: Vec<GroupFixture>,
	#[serde(default)]
	pub policies: Vec<PolicyFixture>,
	#[serde(default)]
	pub proxies: Vec<ProxyFixture>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UserFixture {
	pub external_id: String,
	#[serde(default = "root_path")]
	pub path: String,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GroupFixture {
	pub org: String,
	pub name: String,
	#[serde(default = "root_path")]
	pub path: String,
	/// External ids of member users.
	#[serde(default)]
	pub members: Vec<String>,
	/// Names of attached policies.
	#[serde(default)]
	pub policies: Vec<String>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PolicyFixture {
	pub org: String,
	pub name: String,
	#[serde(default = "root_path")]
	pub path: String,
	#[serde(default)]
	pub statements: Vec<Statement>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProxyFixture {
	pub org: String,
	pub name: String,
	#[serde(default = "root_path")]
	pub path: String,
	pub host: String,
	pub url: String,
	pub method: String,
	pub urn: String,
	pub action: String,
}

impl Fixture {
	pub fn parse(content: &str) -> Result<Self> {
		toml::from_str(content).context("invalid fixture")
	}

	pub async fn load(path: &Path) -> Result<Self> {
		let content = tokio::fs::read_to_string(path)
			.await
			.with_context(|| format!("failed to read fixture {}", path.display()))?;
		Self::parse(&content).with_context(|| format!("in {}", path.display()))
	}

	/// Builds an in-memory store, resolving member and policy references by
	/// external id and policy name.
	pub async fn into_store(self) -> Result<MemoryStore> {
		let store = MemoryStore::new();

		let mut users = HashMap::new();
		for fixture in self.users {
			let user = User::new(fixture.external_id, fixture.path);
			if users.insert(user.external_id.clone(), user.id).is_some() {
				bail!("duplicate user {}", user.external_id);
			}
			store.add_user(user).await;
		}

		let mut policies = HashMap::new();
		for fixture in self.policies {
			let policy = Policy::new(fixture.org, fixture.path, fixture.name, fixture.statements);
			if policies.insert(policy.name.clone(), policy.id).is_some() {
				bail!("duplicate policy {}", policy.name);
			}
			store.add_policy(policy).await;
		}

		for fixture in self.groups {
			let group = Group::new(fixture.org, fixture.path, fixture.name);
			let group_id = group.id;
			let group_name = group.name.clone();
			store.add_group(group).await;

			for member in &fixture.members {
				let Some(user_id) = users.get(member) else {
					bail!("group {group_name} references unknown user {member}");
				};
				store.add_member(group_id, *user_id).await?;
			}
			for name in &fixture.policies {
				let Some(policy_id) = policies.get(name) else {
					bail!("group {group_name} references unknown policy {name}");
				};
				store.attach_policy(group_id, *policy_id).await?;
			}
		}

		for fixture in self.proxies {
			let target = ProxyTarget {
				host: fixture.host,
				url: fixture.url,
				method: fixture.method,
				urn: fixture.urn,
				action: fixture.action,
			};
			store
				.add_proxy_resource(ProxyResource::new(fixture.org, fixture.path, fixture.name, target))
				.await;
		}

		debug!(
			users = users.len(),
			policies = policies.len(),
			"fixture loaded"
		);
		Ok(store)
	}
}
