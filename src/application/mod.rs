//! Application layer - Use cases and orchestration

pub mod init;
pub mod manage_config;
pub mod workflow;

pub use manage_config::ConfigService;
pub use workflow::{
    Action, Availability, ExportReport, ExportStage, RestoreReport, RestoreSource, SyncWorkflow,
    UiSurface,
};
