//! Data transfer objects for the application layer.

mod command_dto;

pub use command_dto::{CommandOutcome, ImageCommand, UrlFailure};
