//! The block-lifecycle state machine and the two read engines built on top
//! of the store adapter in `tskv-storage`.
//!
//! This crate is the trait a consensus driver calls against
//! ([`StateMachine`]); it never dials out to a transport, a CLI, or the
//! driver itself — those remain external collaborators reached only through
//! this callback surface.

mod config;
mod deserialize;
mod fetch;
mod query;
mod state_machine;
mod wire;

pub use config::Config;
pub use deserialize::{deserialize_metadata_rows, deserialize_payload_rows};
pub use state_machine::StateMachine;
pub use wire::{Code, CommitResponse, InfoResponse, MetadataRow, PayloadRow, QueryResponse, TxResponse};
