//! Run counters.

use std::sync::atomic::{AtomicUsize, Ordering};

use serde::Serialize;

/// Counters shared by every stage of a run; safe to bump from worker threads.
#[derive(Debug, Default)]
pub struct Reporter {
    files_scanned: AtomicUsize,
    classes_found: AtomicUsize,
    classes_updated: AtomicUsize,
    methods_added: AtomicUsize,
}

impl Reporter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn file_scanned(&self) {
        self.files_scanned.fetch_add(1, Ordering::Relaxed);
    }

    pub fn classes_found(&self, count: usize) {
        self.classes_found.fetch_add(count, Ordering::Relaxed);
    }

    /// A test file was created or modified with `methods` new stubs.
    pub fn class_updated(&self, methods: usize) {
        self.classes_updated.fetch_add(1, Ordering::Relaxed);
        self.methods_added.fetch_add(methods, Ordering::Relaxed);
    }

    #[must_use]
    pub fn summary(&self) -> Summary {
        Summary {
            files_scanned: self.files_scanned.load(Ordering::Relaxed),
            classes_found: self.classes_found.load(Ordering::Relaxed),
            classes_updated: self.classes_updated.load(Ordering::Relaxed),
            methods_added: self.methods_added.load(Ordering::Relaxed),
        }
    }
}

/// Final counts of a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub files_scanned: usize,
    pub classes_found: usize,
    pub classes_updated: usize,
    pub methods_added: usize,
}
