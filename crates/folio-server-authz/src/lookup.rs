// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Data-access seams used by the data object policies.
//!
//! Implementations live in the persistence layer. Policies receive them through
//! their constructors as `Arc<dyn ...>`.

use async_trait::async_trait;

use crate::entity::{Publication, Submission};
use crate::error::LookupError;
use crate::types::{PublicationId, SubmissionId};

#[async_trait]
pub trait SubmissionLookup: Send + Sync {
	/// Returns `Ok(None)` when no submission has this id.
	async fn get_submission(&self, id: SubmissionId) -> Result<Option<Submission>, LookupError>;
}

#[async_trait]
pub trait PublicationLookup: Send + Sync {
	/// Returns `Ok(None)` when no publication has this id.
	async fn get_publication(&self, id: PublicationId)
		-> Result<Option<Publication>, LookupError>;
}
