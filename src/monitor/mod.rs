//! Aggregation event loop and the dashboard session around it.
mod event_loop;
mod session;


pub use event_loop::run_event_loop;
pub use session::{run_session, run_terminal_session};
