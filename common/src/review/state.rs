use crate::model::mapping::FieldMapping;
use crate::review::store::ReviewStore;

/// Where an upload session currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    AwaitingFile,
    Mapping,
    Processing,
    Reviewing,
    Validating,
    AllValid,
    Committing,
    Committed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Pending {
    Processing,
    Validating,
    Committing,
}

/// State of one user's CSV upload, from header preview to commit.
///
/// Exclusively owned by the UI that drives it; at most one request is in
/// flight at a time.
#[derive(Debug, Clone)]
pub struct UploadSession {
    pub(crate) user_id: String,
    pub(crate) headers: Vec<String>,
    pub(crate) mapping: FieldMapping,
    pub(crate) store: ReviewStore,
    pub(crate) processed: bool,
    pub(crate) terms_accepted: bool,
    pub(crate) needs_revalidation: bool,
    pub(crate) pending: Option<Pending>,
    pub(crate) committed: Option<usize>,
    pub(crate) last_error: Option<String>,
}

impl UploadSession {
    pub fn new(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            headers: Vec::new(),
            mapping: FieldMapping::default(),
            store: ReviewStore::new(),
            processed: false,
            terms_accepted: false,
            needs_revalidation: false,
            pending: None,
            committed: None,
            last_error: None,
        }
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn mapping(&self) -> &FieldMapping {
        &self.mapping
    }

    pub fn store(&self) -> &ReviewStore {
        &self.store
    }

    pub fn terms_accepted(&self) -> bool {
        self.terms_accepted
    }

    /// Count saved by the last successful commit.
    pub fn committed_count(&self) -> Option<usize> {
        self.committed
    }

    /// Message of the most recent failure, for the blocking alert.
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn is_busy(&self) -> bool {
        self.pending.is_some()
    }

    /// Whether rows were edited since the last validation pass.
    pub fn needs_revalidation(&self) -> bool {
        self.needs_revalidation
    }

    pub fn phase(&self) -> Phase {
        match self.pending {
            Some(Pending::Processing) => return Phase::Processing,
            Some(Pending::Validating) => return Phase::Validating,
            Some(Pending::Committing) => return Phase::Committing,
            None => {}
        }
        if self.committed.is_some() {
            Phase::Committed
        } else if self.processed {
            if !self.needs_revalidation && !self.store.is_empty() && self.store.all_valid() {
                Phase::AllValid
            } else {
                Phase::Reviewing
            }
        } else if !self.headers.is_empty() {
            Phase::Mapping
        } else {
            Phase::AwaitingFile
        }
    }

    /// Whether the commit action is enabled.
    pub fn can_commit(&self) -> bool {
        self.phase() == Phase::AllValid && self.terms_accepted
    }
}
