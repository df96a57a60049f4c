// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

mod audit;
mod authz;
mod logging;
mod store;

pub use audit::{AuditConfig, AuditConfigLayer, AuditSinkKind};
pub use authz::{AuthzConfig, AuthzConfigLayer};
pub use logging::{LogFormat, LoggingConfig, LoggingConfigLayer};
pub use store::{StoreConfig, StoreConfigLayer};
