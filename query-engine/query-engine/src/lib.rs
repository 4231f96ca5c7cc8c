pub mod cli;
pub mod error;
pub mod logger;
pub mod opt;

use error::BindingError;

pub type BindingResult<T> = Result<T, BindingError>;

#[derive(Debug, Clone, PartialEq, Eq, Copy)]
pub enum LogFormat {
    Text,
    Json,
}
