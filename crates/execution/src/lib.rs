//! Clankermon Execution Crate
//!
//! Client side of the remote analytics execution API that produces
//! Clankermon valuations.
//!
//! # Overview
//!
//! A valuation is computed remotely by a saved query. The remote service is
//! asynchronous: submitting parameters returns an execution handle, and the
//! caller has to come back for the rows once the execution completes.
//!
//! ```text
//! +----------------------+     +------------------+
//! |  ExecutionSubmitter  | --> | ExecutionHandle  |
//! +----------------------+     +------------------+
//!                                       |
//!                                       v
//!                            +----------------------+
//!                            |   CompletionPoller   |  (fixed-delay, bounded)
//!                            +----------------------+
//!                                       |
//!                                       v
//!                            +----------------------+
//!                            |   Vec<ResultRow>     |
//!                            +----------------------+
//! ```
//!
//! Both stages talk to the service through the [`ExecutionApi`] trait;
//! [`DuneClient`] is the production implementation.

pub mod client;
pub mod errors;
pub mod models;
pub mod poller;
pub mod submitter;

pub use client::dune::{DuneClient, DuneClientConfig};
pub use client::ExecutionApi;
pub use errors::{ExecutionError, FailureClass};
pub use models::{ExecutionHandle, ExecutionState, ExecutionStatus, QueryParameters, ResultRow};
pub use poller::{CompletionPoller, PollPolicy};
pub use submitter::ExecutionSubmitter;
