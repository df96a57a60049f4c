// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;
use tokio::fs::OpenOptions;
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;

use super::{AuditEventType, AuditLogEntry};

#[derive(Error, Debug)]
pub enum AuditSinkError {
	#[error("transient error: {0}")]
	Transient(String),

	#[error("permanent error: {0}")]
	Permanent(String),
}

/// Destination for operation log entries. Must tolerate concurrent writers.
#[async_trait]
pub trait AuditSink: Send + Sync {
	fn name(&self) -> &str;

	async fn publish(&self, entry: Arc<AuditLogEntry>) -> Result<(), AuditSinkError>;
}

/// Discards every entry.
pub struct NoopAuditSink;

#[async_trait]
impl AuditSink for NoopAuditSink {
	fn name(&self) -> &str {
		"noop"
	}

	async fn publish(&self, _entry: Arc<AuditLogEntry>) -> Result<(), AuditSinkError> {
		Ok(())
	}
}

/// Emits each entry as a `tracing` event on the `audit` target.
pub struct TracingAuditSink;

#[async_trait]
impl AuditSink for TracingAuditSink {
	fn name(&self) -> &str {
		"tracing"
	}

	async fn publish(&self, entry: Arc<AuditLogEntry>) -> Result<(), AuditSinkError> {
		let principal = entry.principal.as_deref().unwrap_or("-");
		let request_id = entry.request_id.as_deref().unwrap_or("-");
		let action = entry.action.as_deref().unwrap_or("-");
		let scope = entry.scope.as_deref().unwrap_or("-");

		match entry.event_type {
			AuditEventType::AccessGranted => tracing::info!(
				target: "audit",
				event_id = %entry.id,
				event_type = %entry.event_type,
				principal,
				admin = entry.admin,
				request_id,
				action,
				scope,
				details = %entry.details,
				"authorization decision"
			),
			AuditEventType::AccessDenied | AuditEventType::AuthorizationFailed => tracing::warn!(
				target: "audit",
				event_id = %entry.id,
				event_type = %entry.event_type,
				principal,
				admin = entry.admin,
				request_id,
				action,
				scope,
				details = %entry.details,
				"authorization decision"
			),
		}
		Ok(())
	}
}

/// Appends entries as JSON lines to a file.
pub struct FileAuditSink {
	path: PathBuf,
	file: Mutex<Option<tokio::fs::File>>,
}

impl FileAuditSink {
	pub fn new(path: impl Into<PathBuf>) -> Self {
		Self {
			path: path.into(),
			file: Mutex::new(None),
		}
	}
}

#[async_trait]
impl AuditSink for FileAuditSink {
	fn name(&self) -> &str {
		"file"
	}

	async fn publish(&self, entry: Arc<AuditLogEntry>) -> Result<(), AuditSinkError> {
		let mut line = serde_json::to_string(entry.as_ref())
			.map_err(|e| AuditSinkError::Permanent(format!("JSON serialization failed: {e}")))?;
		line.push('\n');

		let mut guard = self.file.lock().await;
		if guard.is_none() {
			let file = OpenOptions::new()
				.create(true)
				.append(true)
				.open(&self.path)
				.await
				.map_err(|e| AuditSinkError::Transient(format!("failed to open file: {e}")))?;
			*guard = Some(file);
		}

		let file = guard
			.as_mut()
			.ok_or_else(|| AuditSinkError::Permanent("file handle not initialized".to_string()))?;

		file
			.write_all(line.as_bytes())
			.await
			.map_err(|e| AuditSinkError::Transient(format!("failed to write to file: {e}")))?;
		file
			.flush()
			.await
			.map_err(|e| AuditSinkError::Transient(format!("failed to flush file: {e}")))?;

		Ok(())
	}
}

/// Keeps entries in memory so callers can inspect them.
#[derive(Default)]
pub struct MemoryAuditSink {
	entries: Mutex<Vec<Arc<AuditLogEntry>>>,
}

impl MemoryAuditSink {
	pub fn new() -> Self {
		Self::default()
	}

	pub async fn entries(&self) -> Vec<Arc<AuditLogEntry>> {
		self.entries.lock().await.clone()
	}
}

#[async_trait]
impl AuditSink for MemoryAuditSink {
	fn name(&self) -> &str {
		"memory"
	}

	async fn publish(&self, entry: Arc<AuditLogEntry>) -> Result<(), AuditSinkError> {
		self.entries.lock().await.push(entry);
		Ok(())
	}
}
