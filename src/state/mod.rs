//! Application state module

mod app_state;
mod flow;
mod forms;
mod schema;

pub use app_state::*;
pub use flow::*;
pub use forms::*;
pub use schema::*;
