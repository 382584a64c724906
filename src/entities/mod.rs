//! Entity module - SeaORM entity definitions for the fortune database.
//! Each entity has a Model struct for data and an Entity struct for operations.

pub mod fortune;
pub mod submission;
pub mod system_state;

pub use fortune::{Column as FortuneColumn, Entity as Fortune, Model as FortuneModel, Provenance};
pub use submission::{
    Column as SubmissionColumn, Entity as Submission, Model as SubmissionModel, SubmissionStatus,
};
pub use system_state::{
    Column as SystemStateColumn, Entity as SystemState, Model as SystemStateModel,
};
