pub mod config;
pub mod error;
pub mod types;

pub use config::ReceptionistConfig;
pub use error::{ReceptionistError, Result};
pub use types::*;
