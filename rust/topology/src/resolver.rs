// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Per-query resolution context.
//!
//! A [`Resolver`] borrows the model immutably, carries the scan limit, and
//! collects a [`Diagnostic`] for every item it has to leave out. One is
//! created per query and dropped with it.

use eplus_lite_core::{Model, DEFAULT_SCAN_LIMIT};

use crate::error::Error;
use crate::network::Diagnostic;

pub struct Resolver<'m> {
    pub(crate) model: &'m Model,
    pub(crate) scan_limit: usize,
    diagnostics: Vec<Diagnostic>,
}

impl<'m> Resolver<'m> {
    pub fn new(model: &'m Model) -> Self {
        Self::with_scan_limit(model, DEFAULT_SCAN_LIMIT)
    }

    pub fn with_scan_limit(model: &'m Model, scan_limit: usize) -> Self {
        Self {
            model,
            scan_limit,
            diagnostics: Vec::new(),
        }
    }

    pub fn model(&self) -> &'m Model {
        self.model
    }

    /// Records an omitted item.
    pub(crate) fn omit(&mut self, err: &Error) {
        tracing::warn!(error = %err, "omitting item from topology");
        self.diagnostics.push(Diagnostic::from(err));
    }

    /// Unwraps a per-item result, recording the error as a diagnostic.
    pub(crate) fn keep<T>(&mut self, result: Result<T, Error>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(err) => {
                self.omit(&err);
                None
            }
        }
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn into_diagnostics(self) -> Vec<Diagnostic> {
        self.diagnostics
    }
}
