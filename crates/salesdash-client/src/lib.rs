pub mod chat;
pub mod commands;
pub mod config;
pub mod contact;
pub mod contracts;
pub mod error;
pub mod sales;

pub use contracts::envelope::{FailureEnvelope, SuccessEnvelope};
pub use error::{ClientError, ClientResult, DataSourceError, RowParseError};

pub const API_VERSION: &str = env!("CARGO_PKG_VERSION");
