//! `stocktrack-ai`
//!
//! **Responsibility:** boundary to the hosted generative model.
//!
//! - Model calls are capability traits ([`ReportGenerator`], [`CommandParser`])
//!   injected by the application; tests substitute deterministic fakes.
//! - Reports are insights for display and never mutate items.
//! - Parsed commands are untrusted output and are validated before they touch
//!   the store.

pub mod capability;
pub mod commands;
pub mod reports;
pub mod result;

pub use capability::{CommandParser, ReportGenerator};
pub use commands::{CommandService, FieldKind, FieldSchema, FieldSpec, patch_from_output};
pub use reports::{ChatRole, ChatTurn, ReportKind, ReportService};
pub use result::{AiError, Report};
