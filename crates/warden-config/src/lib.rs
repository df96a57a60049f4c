// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Layered configuration for Warden.
//!
//! This crate provides:
//! - Layered configuration from multiple sources (defaults, TOML file, environment)
//! - Type-safe configuration with validation
//! - Consistent environment variable naming (`WARDEN_*`)
//!
//! # Usage
//!
//! ```ignore
//! use warden_config::load_config;
//!
//! let config = load_config()?;
//! println!("audit sink: {}", config.audit.sink);
//! ```

pub mod error;
pub mod layer;
pub mod sections;
pub mod sources;

pub use error::ConfigError;
pub use layer::WardenConfigLayer;
pub use sections::*;
pub use sources::{ConfigSource, DefaultsSource, EnvSource, Precedence, TomlSource};

use tracing::{debug, info};

/// Fully resolved Warden configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WardenConfig {
	pub logging: LoggingConfig,
	pub audit: AuditConfig,
	pub authz: AuthzConfig,
	pub store: StoreConfig,
}

/// Load configuration from all sources with standard precedence.
///
/// Precedence (highest to lowest):
/// 1. Environment variables (`WARDEN_*`)
/// 2. Config file (`/etc/warden/warden.toml`)
/// 3. Built-in defaults
pub fn load_config() -> Result<WardenConfig, ConfigError> {
	load_config_from_sources(vec![
		Box::new(DefaultsSource),
		Box::new(TomlSource::system()),
		Box::new(EnvSource::new()),
	])
}

/// Load configuration with a custom config file path.
pub fn load_config_with_file(
	config_path: impl Into<std::path::PathBuf>,
) -> Result<WardenConfig, ConfigError> {
	load_config_from_sources(vec![
		Box::new(DefaultsSource),
		Box::new(TomlSource::new(config_path)),
		Box::new(EnvSource::new()),
	])
}

/// Merge the given sources in precedence order and finalize the result.
pub fn load_config_from_sources(
	mut sources: Vec<Box<dyn ConfigSource>>,
) -> Result<WardenConfig, ConfigError> {
	sources.sort_by_key(|s| s.precedence());

	let mut merged = WardenConfigLayer::default();
	for source in sources {
		debug!(source = source.name(), "loading configuration source");
		let layer = source.load()?;
		merged.merge(layer);
	}

	finalize(merged)
}

/// Finalize configuration layer into resolved config.
fn finalize(layer: WardenConfigLayer) -> Result<WardenConfig, ConfigError> {
	let logging = layer.logging.unwrap_or_default().finalize();
	let audit = layer.audit.unwrap_or_default().finalize();
	let authz = layer.authz.unwrap_or_default().finalize();
	let store = layer.store.unwrap_or_default().finalize();

	validate_config(&audit)?;

	info!(
		log_level = %logging.level,
		log_format = %logging.format,
		audit_enabled = audit.enabled,
		audit_sink = %audit.sink,
		admins = authz.admins.len(),
		fixture_configured = store.fixture.is_some(),
		"Warden configuration loaded"
	);

	Ok(WardenConfig {
		logging,
		audit,
		authz,
		store,
	})
}

/// Validate cross-field configuration rules.
fn validate_config(audit: &AuditConfig) -> Result<(), ConfigError> {
	if audit.enabled && audit.sink == AuditSinkKind::File && audit.path.is_none() {
		return Err(ConfigError::Validation(
			"audit sink 'file' requires a path. Set [audit].path or WARDEN_AUDIT_PATH.".to_string(),
		));
	}

	Ok(())
}
