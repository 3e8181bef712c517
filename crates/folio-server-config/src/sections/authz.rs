// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Authorization policy configuration section.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub const DEFAULT_SUBMISSION_PARAM: &str = "submissionId";
pub const DEFAULT_PUBLICATION_PARAM: &str = "publicationId";

/// Response class produced when a data object policy denies a request.
///
/// `NotFound` keeps foreign or missing objects indistinguishable from each other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum DenyStatus {
	#[default]
	NotFound,
	Forbidden,
}

impl fmt::Display for DenyStatus {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			DenyStatus::NotFound => write!(f, "not_found"),
			DenyStatus::Forbidden => write!(f, "forbidden"),
		}
	}
}

impl FromStr for DenyStatus {
	type Err = String;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s.trim().to_ascii_lowercase().as_str() {
			"not_found" | "notfound" | "404" => Ok(DenyStatus::NotFound),
			"forbidden" | "403" => Ok(DenyStatus::Forbidden),
			other => Err(format!(
				"unknown deny status '{other}', expected 'not_found' or 'forbidden'"
			)),
		}
	}
}

/// Authorization configuration layer (partial, for merging).
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct AuthzConfigLayer {
	#[serde(default)]
	pub submission_param: Option<String>,
	#[serde(default)]
	pub publication_param: Option<String>,
	#[serde(default)]
	pub require_submission_for_publication: Option<bool>,
	#[serde(default)]
	pub deny_status: Option<DenyStatus>,
}

impl AuthzConfigLayer {
	pub fn merge(&mut self, other: Self) {
		if other.submission_param.is_some() {
			self.submission_param = other.submission_param;
		}
		if other.publication_param.is_some() {
			self.publication_param = other.publication_param;
		}
		if other.require_submission_for_publication.is_some() {
			self.require_submission_for_publication = other.require_submission_for_publication;
		}
		if other.deny_status.is_some() {
			self.deny_status = other.deny_status;
		}
	}

	pub fn finalize(self) -> AuthzConfig {
		AuthzConfig {
			submission_param: self
				.submission_param
				.filter(|s| !s.trim().is_empty())
				.unwrap_or_else(|| DEFAULT_SUBMISSION_PARAM.to_string()),
			publication_param: self
				.publication_param
				.filter(|s| !s.trim().is_empty())
				.unwrap_or_else(|| DEFAULT_PUBLICATION_PARAM.to_string()),
			require_submission_for_publication: self.require_submission_for_publication.unwrap_or(true),
			deny_status: self.deny_status.unwrap_or_default(),
		}
	}
}

/// Authorization configuration (runtime, fully resolved).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AuthzConfig {
	/// Request parameter carrying the submission id.
	pub submission_param: String,
	/// Request parameter carrying the publication id.
	pub publication_param: String,
	/// Whether publication lookups must be preceded by a resolved submission.
	pub require_submission_for_publication: bool,
	pub deny_status: DenyStatus,
}

impl Default for AuthzConfig {
	fn default() -> Self {
		AuthzConfigLayer::default().finalize()
	}
}
