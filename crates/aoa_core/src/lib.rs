pub mod archive;
pub mod config;
pub mod domain;
pub mod error;
pub mod export;
pub mod extract;
pub mod normalize;
pub mod resolve;
pub mod row;
pub mod table;

pub use domain::{AnswerRecord, AnswerSource, AuditUnit, ContentBlock, ListItem, ReferenceEntry};
pub use error::AppError;
