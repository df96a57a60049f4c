// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Repository port consumed by the authorization facade.
//!
//! The facade resolves a principal by external id, then walks its groups to
//! the attached policies. Persistence lives behind this trait; [`MemoryStore`]
//! is the in-process implementation used by tests and the offline CLI.

use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

use crate::error::StoreError;
use crate::types::{Group, GroupId, Policy, PolicyId, ProxyResource, User, UserId};

#[async_trait]
pub trait AuthzStore: Send + Sync {
	/// Resolves a principal record; `StoreError::NotFound` if unknown.
	async fn user_by_external_id(&self, external_id: &str) -> Result<User, StoreError>;
	async fn groups_for_user(&self, user_id: &UserId) -> Result<Vec<Group>, StoreError>;
	async fn policies_for_group(&self, group_id: &GroupId) -> Result<Vec<Policy>, StoreError>;
}

#[derive(Debug, Default)]
struct MemoryState {
	users: HashMap<UserId, User>,
	groups: HashMap<GroupId, Group>,
	policies: HashMap<PolicyId, Policy>,
	proxy_resources: Vec<ProxyResource>,
	members: HashMap<GroupId, Vec<UserId>>,
	attachments: HashMap<GroupId, Vec<PolicyId>>,
}

/// In-memory repository.
#[derive(Debug, Default)]
pub struct MemoryStore {
	state: RwLock<MemoryState>,
}

impl MemoryStore {
	pub fn new() -> Self {
		Self::default()
	}

	pub async fn add_user(&self, user: User) {
		self.state.write().await.users.insert(user.id, user);
	}

	pub async fn add_group(&self, group: Group) {
		self.state.write().await.groups.insert(group.id, group);
	}

	pub async fn add_policy(&self, policy: Policy) {
		self.state.write().await.policies.insert(policy.id, policy);
	}

	pub async fn add_proxy_resource(&self, resource: ProxyResource) {
		self.state.write().await.proxy_resources.push(resource);
	}

	/// Adds a user to a group. Both must already exist.
	pub async fn add_member(&self, group_id: GroupId, user_id: UserId) -> Result<(), StoreError> {
		let mut state = self.state.write().await;
		if !state.users.contains_key(&user_id) {
			return Err(StoreError::NotFound(format!("user {user_id}")));
		}
		if !state.groups.contains_key(&group_id) {
			return Err(StoreError::NotFound(format!("group {group_id}")));
		}
		let members = state.members.entry(group_id).or_default();
		if !members.contains(&user_id) {
			members.push(user_id);
		}
		Ok(())
	}

	/// Attaches a policy to a group. Both must already exist.
	pub async fn attach_policy(
		&self,
		group_id: GroupId,
		policy_id: PolicyId,
	) -> Result<(), StoreError> {
		let mut state = self.state.write().await;
		if !state.policies.contains_key(&policy_id) {
			return Err(StoreError::NotFound(format!("policy {policy_id}")));
		}
		if !state.groups.contains_key(&group_id) {
			return Err(StoreError::NotFound(format!("group {group_id}")));
		}
		let attached = state.attachments.entry(group_id).or_default();
		if !attached.contains(&policy_id) {
			attached.push(policy_id);
		}
		Ok(())
	}

	pub async fn users(&self) -> Vec<User> {
		let mut users: Vec<User> = self.state.read().await.users.values().cloned().collect();
		users.sort_by(|a, b| a.urn.cmp(&b.urn));
		users
	}

	pub async fn groups(&self) -> Vec<Group> {
		let mut groups: Vec<Group> = self.state.read().await.groups.values().cloned().collect();
		groups.sort_by(|a, b| a.urn.cmp(&b.urn));
		groups
	}

	pub async fn policies(&self) -> Vec<Policy> {
		let mut policies: Vec<Policy> = self.state.read().await.policies.values().cloned().collect();
		policies.sort_by(|a, b| a.urn.cmp(&b.urn));
		policies
	}

	pub async fn proxy_resources(&self) -> Vec<ProxyResource> {
		self.state.read().await.proxy_resources.clone()
	}
}

#[async_trait]
impl AuthzStore for MemoryStore {
	async fn user_by_external_id(&self, external_id: &str) -> Result<User, StoreError> {
		self
			.state
			.read()
			.await
			.users
			.values()
			.find(|u| u.external_id == external_id)
			.cloned()
			.ok_or_else(|| StoreError::NotFound(format!("user {external_id}")))
	}

	async fn groups_for_user(&self, user_id: &UserId) -> Result<Vec<Group>, StoreError> {
		let state = self.state.read().await;
		let mut groups: Vec<Group> = state
			.members
			.iter()
			.filter(|(_, members)| members.contains(user_id))
			.filter_map(|(group_id, _)| state.groups.get(group_id).cloned())
			.collect();
		groups.sort_by(|a, b| a.urn.cmp(&b.urn));
		Ok(groups)
	}

	async fn policies_for_group(&self, group_id: &GroupId) -> Result<Vec<Policy>, StoreError> {
		let state = self.state.read().await;
		Ok(
			state
				.attachments
				.get(group_id)
				.map(|ids| {
					ids
						.iter()
						.filter_map(|id| state.policies.get(id).cloned())
						.collect()
				})
				.unwrap_or_default(),
		)
	}
}
