use crate::error::IngestError;
use crate::requests::SaveUploadedDataRequest;
use crate::model::mapping::FieldMapping;
use crate::review::messages::{Command, Msg};
use crate::review::state::{Pending, UploadSession};
use crate::review::store::ReviewStore;

impl UploadSession {
    /// Applies one message.
    ///
    /// Returns the request to issue, if any. Failed completions leave the
    /// working set as it was, record the message in `last_error` and return
    /// the error so the caller can raise an alert. A completion that does not
    /// answer the request in flight is dropped.
    pub fn update(&mut self, msg: Msg) -> Result<Option<Command>, IngestError> {
        match msg {
            Msg::HeadersLoaded(result) => {
                self.ensure_idle()?;
                let headers = self.settle(result)?;
                self.headers = headers;
                self.mapping = FieldMapping::default();
                self.store.clear();
                self.processed = false;
                self.terms_accepted = false;
                self.needs_revalidation = false;
                self.committed = None;
                Ok(None)
            }
            Msg::SelectColumn { field, column } => {
                self.ensure_idle()?;
                if !column.is_empty() && !self.headers.iter().any(|h| *h == column) {
                    return Err(IngestError::UnknownColumn(column));
                }
                self.mapping.set(field, column);
                Ok(None)
            }
            Msg::ProcessRequested => {
                self.ensure_idle()?;
                self.mapping.ensure_complete()?;
                self.pending = Some(Pending::Processing);
                Ok(Some(Command::ProcessCsv(self.mapping.clone())))
            }
            Msg::ProcessCompleted(result) => {
                if !self.complete(Pending::Processing) {
                    return Ok(None);
                }
                let response = self.settle(result)?;
                self.store.populate(response.rows, &response.errors);
                self.processed = true;
                self.needs_revalidation = false;
                Ok(None)
            }
            Msg::EditCell { row, field, value } => {
                self.ensure_idle()?;
                self.store.edit(row, field, value)?;
                self.needs_revalidation = true;
                Ok(None)
            }
            Msg::DeleteRow(row) => {
                self.ensure_idle()?;
                self.store.delete(row)?;
                Ok(None)
            }
            Msg::RevalidateRequested => {
                self.ensure_idle()?;
                if self.store.is_empty() {
                    return Err(IngestError::NothingToCommit);
                }
                self.pending = Some(Pending::Validating);
                Ok(Some(Command::ValidateRows(self.store.revalidation_payload())))
            }
            Msg::RevalidateCompleted(result) => {
                if !self.complete(Pending::Validating) {
                    return Ok(None);
                }
                let response = self.settle(result)?;
                self.store.merge_validation(&response.data, &response.errors);
                self.needs_revalidation = false;
                Ok(None)
            }
            Msg::TermsToggled(accepted) => {
                self.terms_accepted = accepted;
                Ok(None)
            }
            Msg::CommitRequested => {
                self.ensure_idle()?;
                if self.store.is_empty() {
                    return Err(IngestError::NothingToCommit);
                }
                if !self.store.all_valid() {
                    return Err(IngestError::RowsInvalid(self.store.invalid_count()));
                }
                if self.needs_revalidation {
                    return Err(IngestError::RevalidationRequired);
                }
                if !self.terms_accepted {
                    return Err(IngestError::TermsNotAccepted);
                }
                self.pending = Some(Pending::Committing);
                Ok(Some(Command::SaveRows(SaveUploadedDataRequest {
                    user_id: self.user_id.clone(),
                    data: self.store.rows().to_vec(),
                })))
            }
            Msg::CommitCompleted(result) => {
                if !self.complete(Pending::Committing) {
                    return Ok(None);
                }
                let response = self.settle(result)?;
                self.headers.clear();
                self.mapping = FieldMapping::default();
                self.store = ReviewStore::new();
                self.processed = false;
                self.terms_accepted = false;
                self.committed = Some(response.count);
                Ok(None)
            }
            Msg::Reset => {
                *self = UploadSession::new(std::mem::take(&mut self.user_id));
                Ok(None)
            }
        }
    }

    fn ensure_idle(&self) -> Result<(), IngestError> {
        if self.pending.is_some() {
            Err(IngestError::Busy)
        } else {
            Ok(())
        }
    }

    /// Clears the pending marker when it matches `expected`.
    fn complete(&mut self, expected: Pending) -> bool {
        if self.pending == Some(expected) {
            self.pending = None;
            true
        } else {
            false
        }
    }

    fn settle<T>(&mut self, result: Result<T, IngestError>) -> Result<T, IngestError> {
        match result {
            Ok(value) => {
                self.last_error = None;
                Ok(value)
            }
            Err(err) => {
                self.last_error = Some(err.to_string());
                Err(err)
            }
        }
    }
}
