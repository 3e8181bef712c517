// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

/// Policy construction errors.
///
/// These describe a misconfigured handler, not a bad request. Request-level
/// failures are never errors; they are returned as [`crate::Decision::Deny`].
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum AuthzError {
	#[error("request parameter name must not be empty")]
	EmptyParameterName,

	#[error("operation restriction for {policy} must list at least one operation")]
	EmptyOperationList { policy: &'static str },
}

/// Failure reported by a data-access collaborator.
#[derive(Debug, thiserror::Error)]
pub enum LookupError {
	#[error("lookup backend unavailable: {0}")]
	Unavailable(String),

	#[error("lookup failed: {0}")]
	Internal(String),
}
