// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Action pattern matching and the built-in IAM action names.

use crate::urn::WILDCARD;

/// Returns true if any of `patterns` covers the `requested` action.
///
/// A pattern ending in the wildcard marker matches every action that starts
/// with its literal prefix (`"*"` matches everything); any other pattern must
/// equal the requested action exactly.
pub fn action_matches<S: AsRef<str>>(requested: &str, patterns: &[S]) -> bool {
	patterns
		.iter()
		.any(|pattern| pattern_matches(requested, pattern.as_ref()))
}

fn pattern_matches(requested: &str, pattern: &str) -> bool {
	match pattern.strip_suffix(WILDCARD) {
		Some(prefix) => requested.starts_with(prefix),
		None => pattern == requested,
	}
}

/// Actions guarding the IAM resources themselves.
pub mod iam {
	pub const CREATE_USER: &str = "iam:CreateUser";
	pub const DELETE_USER: &str = "iam:DeleteUser";
	pub const GET_USER: &str = "iam:GetUser";
	pub const LIST_USERS: &str = "iam:ListUsers";
	pub const UPDATE_USER: &str = "iam:UpdateUser";
	pub const LIST_GROUPS_FOR_USER: &str = "iam:ListGroupsForUser";

	pub const CREATE_GROUP: &str = "iam:CreateGroup";
	pub const DELETE_GROUP: &str = "iam:DeleteGroup";
	pub const GET_GROUP: &str = "iam:GetGroup";
	pub const LIST_GROUPS: &str = "iam:ListGroups";
	pub const UPDATE_GROUP: &str = "iam:UpdateGroup";
	pub const LIST_MEMBERS: &str = "iam:ListMembers";
	pub const ADD_MEMBER: &str = "iam:AddMember";
	pub const REMOVE_MEMBER: &str = "iam:RemoveMember";
	pub const ATTACH_GROUP_POLICY: &str = "iam:AttachGroupPolicy";
	pub const DETACH_GROUP_POLICY: &str = "iam:DetachGroupPolicy";
	pub const LIST_ATTACHED_GROUP_POLICIES: &str = "iam:ListAttachedGroupPolicies";

	pub const CREATE_POLICY: &str = "iam:CreatePolicy";
	pub const DELETE_POLICY: &str = "iam:DeletePolicy";
	pub const GET_POLICY: &str = "iam:GetPolicy";
	pub const LIST_POLICIES: &str = "iam:ListPolicies";
	pub const UPDATE_POLICY: &str = "iam:UpdatePolicy";
	pub const LIST_ATTACHED_GROUPS: &str = "iam:ListAttachedGroups";

	pub const CREATE_PROXY_RESOURCE: &str = "iam:CreateProxyResource";
	pub const DELETE_PROXY_RESOURCE: &str = "iam:DeleteProxyResource";
	pub const GET_PROXY_RESOURCE: &str = "iam:GetProxyResource";
	pub const LIST_PROXY_RESOURCES: &str = "iam:ListProxyResources";
	pub const UPDATE_PROXY_RESOURCE: &str = "iam:UpdateProxyResource";
}
