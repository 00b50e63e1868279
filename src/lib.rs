pub mod config;
pub mod error;
pub mod plan;
pub mod session;
pub mod startup;
pub mod utils;

pub use error::{Error, PlanResult};
pub use plan::{GuestStatus, PayloadShape, Plan, PlanData};
pub use session::Session;
