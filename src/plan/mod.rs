pub mod format;
pub mod models;
mod parse;

pub use format::format_plan;
pub use models::{GuestStatus, Plan, PlanData};
pub use parse::PayloadShape;
