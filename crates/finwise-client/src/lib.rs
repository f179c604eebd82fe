pub mod budget;
pub mod commands;
pub mod contracts;
pub mod demo;
pub mod domain;
pub mod error;
pub mod goals;
mod import;
pub mod migrations;
pub mod session;
pub mod setup;
pub mod state;
pub mod store;

pub use contracts::envelope::{FailureEnvelope, SuccessEnvelope};
pub use error::{ClientError, ClientResult};
pub use session::FinanceSession;

pub const API_VERSION: &str = env!("CARGO_PKG_VERSION");
