//! Client-side staging of uploaded rows.
//!
//! The review grid follows an Elm-style loop: the UI turns user actions and
//! HTTP completions into `Msg` values, `UploadSession::update` mutates the
//! session, and any returned `Command` names the request the UI must issue.
//! Its completion is fed back as another `Msg`.
//!
//! - `store`: the ordered working set of rows, addressed by `RowId`.
//! - `state`: the upload session wrapping the store with mapping, terms
//!   acknowledgment and the in-flight request.
//! - `messages`: the `Msg` and `Command` vocabularies.
//! - `update`: the transition function.

mod messages;
mod state;
mod store;
mod update;

pub use messages::{Command, Msg};
pub use state::{Phase, UploadSession};
pub use store::ReviewStore;
