// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Warden offline policy evaluation tool.
//!
//! Loads a TOML fixture into the in-memory store and asks the authorization
//! facade which resources a principal may act upon.

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Context;
use clap::{Args as ClapArgs, Parser, Subcommand};
use serde_json::{json, Value};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use warden_authz::action::iam;
use warden_authz::urn::{prefix_urn, ResourceKind, WILDCARD};
use warden_authz::{
	AuditSink, Authorizer, AuthzError, FileAuditSink, MemoryStore, NoopAuditSink, Principal,
	TracingAuditSink,
};
use warden_config::{AuditConfig, AuditSinkKind, AuthzConfig, LogFormat, LoggingConfig};

mod fixture;

use fixture::Fixture;

/// Warden - evaluate IAM policies against a fixture.
#[derive(Parser, Debug)]
#[command(name = "warden", about = "Warden policy evaluation tool", version)]
struct Args {
	/// Config file (defaults to /etc/warden/warden.toml)
	#[arg(long, short, global = true, env = "WARDEN_CONFIG")]
	config: Option<PathBuf>,

	/// Fixture to load; overrides [store].fixture
	#[arg(long, short, global = true)]
	fixture: Option<PathBuf>,

	#[command(subcommand)]
	command: Command,
}

#[derive(ClapArgs, Debug, Clone)]
struct Request {
	/// External identifier of the acting principal
	#[arg(long, short)]
	principal: String,

	/// Action to authorize
	#[arg(long, short)]
	action: Option<String>,

	/// Resource scope (URN or prefix)
	#[arg(long, short)]
	scope: Option<String>,

	/// Organization used to derive the default scope
	#[arg(long)]
	org: Option<String>,

	/// Request identifier recorded in the operation log
	#[arg(long)]
	request_id: Option<String>,
}

#[derive(Subcommand, Debug)]
enum Command {
	/// Authorize caller-declared external resource URNs
	Check {
		#[command(flatten)]
		request: Request,

		/// Full URNs to check
		#[arg(required = true)]
		resources: Vec<String>,
	},
	/// List the users the principal may act upon
	Users(Request),
	/// List the groups the principal may act upon
	Groups(Request),
	/// List the policies the principal may act upon
	Policies(Request),
	/// List the proxy resources the principal may act upon
	Proxies(Request),
	/// Show the restrictions computed for a scope and action
	Explain(Request),
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
	let args = Args::parse();

	let config = match &args.config {
		Some(path) => warden_config::load_config_with_file(path)?,
		None => warden_config::load_config()?,
	};

	init_tracing(&config.logging);

	let fixture_path = args
		.fixture
		.clone()
		.or_else(|| config.store.fixture.clone())
		.context("no fixture given: pass --fixture or set [store].fixture")?;
	let store = Arc::new(Fixture::load(&fixture_path).await?.into_store().await?);
	let authorizer = Authorizer::new(store.clone(), audit_sink(&config.audit));

	tracing::debug!(fixture = %fixture_path.display(), "starting evaluation");

	let (key, outcome) = run(&authorizer, &store, &config.authz, args.command).await;
	let (output, code) = match outcome {
		Ok(value) => (json!({ key: value }), ExitCode::SUCCESS),
		Err(e) => (
			json!({ "error": { "code": e.code(), "message": e.to_string() } }),
			if e.is_unauthorized() {
				ExitCode::from(2)
			} else {
				ExitCode::FAILURE
			},
		),
	};

	println!("{}", serde_json::to_string_pretty(&output)?);
	Ok(code)
}

async fn run(
	authorizer: &Authorizer,
	store: &MemoryStore,
	authz: &AuthzConfig,
	command: Command,
) -> (&'static str, Result<Value, AuthzError>) {
	match command {
		Command::Check { request, resources } => {
			let principal = principal(&request, authz);
			let action = request.action.unwrap_or_default();
			let outcome = authorizer
				.authorized_external_resources(&principal, &action, resources)
				.await
				.map(|urns| json!(urns));
			("authorized", outcome)
		}
		Command::Users(request) => {
			let principal = principal(&request, authz);
			let action = action_or(&request, iam::LIST_USERS);
			let scope = request
				.scope
				.clone()
				.unwrap_or_else(|| prefix_urn("", ResourceKind::User, "/"));
			let outcome = authorizer
				.authorized_users(&principal, &scope, &action, store.users().await)
				.await
				.map(|users| json!(users));
			("authorized", outcome)
		}
		Command::Groups(request) => {
			let principal = principal(&request, authz);
			let action = action_or(&request, iam::LIST_GROUPS);
			let scope = scope_or(&request, ResourceKind::Group);
			let outcome = authorizer
				.authorized_groups(&principal, &scope, &action, store.groups().await)
				.await
				.map(|groups| json!(groups));
			("authorized", outcome)
		}
		Command::Policies(request) => {
			let principal = principal(&request, authz);
			let action = action_or(&request, iam::LIST_POLICIES);
			let scope = scope_or(&request, ResourceKind::Policy);
			let outcome = authorizer
				.authorized_policies(&principal, &scope, &action, store.policies().await)
				.await
				.map(|policies| json!(policies));
			("authorized", outcome)
		}
		Command::Proxies(request) => {
			let principal = principal(&request, authz);
			let action = action_or(&request, iam::LIST_PROXY_RESOURCES);
			let scope = scope_or(&request, ResourceKind::Proxy);
			let outcome = authorizer
				.authorized_proxy_resources(&principal, &scope, &action, store.proxy_resources().await)
				.await
				.map(|resources| json!(resources));
			("authorized", outcome)
		}
		Command::Explain(request) => {
			let principal = principal(&request, authz);
			let action = request.action.clone().unwrap_or_default();
			let scope = request
				.scope
				.clone()
				.unwrap_or_else(|| WILDCARD.to_string());
			let outcome = authorizer
				.restrictions(&principal, &scope, &action)
				.await
				.map(|restrictions| match restrictions {
					Some(restrictions) => json!(restrictions),
					None => json!({ "admin": true }),
				});
			("restrictions", outcome)
		}
	}
}

fn principal(request: &Request, authz: &AuthzConfig) -> Principal {
	let principal = if authz.is_admin(&request.principal) {
		Principal::admin(request.principal.clone())
	} else {
		Principal::user(request.principal.clone())
	};
	match &request.request_id {
		Some(request_id) => principal.with_request_id(request_id.clone()),
		None => principal,
	}
}

fn action_or(request: &Request, default: &str) -> String {
	request
		.action
		.clone()
		.unwrap_or_else(|| default.to_string())
}

/// Explicit scope, else every resource of `kind` in `--org`, else everything.
fn scope_or(request: &Request, kind: ResourceKind) -> String {
	match (&request.scope, &request.org) {
		(Some(scope), _) => scope.clone(),
		(None, Some(org)) => prefix_urn(org, kind, "/"),
		(None, None) => WILDCARD.to_string(),
	}
}

fn audit_sink(config: &AuditConfig) -> Arc<dyn AuditSink> {
	if !config.enabled {
		return Arc::new(NoopAuditSink);
	}
	match (config.sink, &config.path) {
		(AuditSinkKind::File, Some(path)) => Arc::new(FileAuditSink::new(path.clone())),
		_ => Arc::new(TracingAuditSink),
	}
}

fn init_tracing(logging: &LoggingConfig) {
	let filter =
		EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.level));
	let registry = tracing_subscriber::registry().with(filter);

	match logging.format {
		LogFormat::Pretty => registry
			.with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
			.init(),
		LogFormat::Json => registry
			.with(
				tracing_subscriber::fmt::layer()
					.json()
					.with_writer(std::io::stderr),
			)
			.init(),
	}
}
