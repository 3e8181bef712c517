// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! In-memory lookups for tests and local tooling.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

use crate::entity::{Publication, Submission};
use crate::error::LookupError;
use crate::lookup::{PublicationLookup, SubmissionLookup};
use crate::types::{PublicationId, SubmissionId};

/// Stores submissions and publications in memory and counts lookups.
#[derive(Default)]
pub struct MemoryLookup {
	submissions: Mutex<HashMap<SubmissionId, Submission>>,
	publications: Mutex<HashMap<PublicationId, Publication>>,
	calls: AtomicUsize,
	failing: AtomicBool,
}

impl MemoryLookup {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn insert_submission(&self, submission: Submission) {
		let mut submissions = self.submissions.lock().unwrap_or_else(|e| e.into_inner());
		submissions.insert(submission.id, submission);
	}

	pub fn insert_publication(&self, publication: Publication) {
		let mut publications = self.publications.lock().unwrap_or_else(|e| e.into_inner());
		publications.insert(publication.id, publication);
	}

	/// Number of lookups served so far, of either kind.
	pub fn calls(&self) -> usize {
		self.calls.load(Ordering::SeqCst)
	}

	/// Make every subsequent lookup fail with [`LookupError::Unavailable`].
	pub fn set_failing(&self, failing: bool) {
		self.failing.store(failing, Ordering::SeqCst);
	}

	fn record_call(&self) -> Result<(), LookupError> {
		self.calls.fetch_add(1, Ordering::SeqCst);
		if self.failing.load(Ordering::SeqCst) {
			return Err(LookupError::Unavailable("memory lookup offline".to_string()));
		}
		Ok(())
	}
}

#[async_trait]
impl SubmissionLookup for MemoryLookup {
	async fn get_submission(&self, id: SubmissionId) -> Result<Option<Submission>, LookupError> {
		self.record_call()?;
		let submissions = self.submissions.lock().unwrap_or_else(|e| e.into_inner());
		Ok(submissions.get(&id).cloned())
	}
}

#[async_trait]
impl PublicationLookup for MemoryLookup {
	async fn get_publication(
		&self,
		id: PublicationId,
	) -> Result<Option<Publication>, LookupError> {
		self.record_call()?;
		let publications = self.publications.lock().unwrap_or_else(|e| e.into_inner());
		Ok(publications.get(&id).cloned())
	}
}
