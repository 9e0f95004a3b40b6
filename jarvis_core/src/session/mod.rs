//! The outer listen → interpret → respond loop.

mod interrupt;
mod session_loop;

pub use interrupt::Interrupt;
pub use session_loop::{
    ExitReason, FAREWELL, SessionConfig, SessionLoop, SessionState, SessionSummary,
    TERMINATION_PHRASES, is_termination,
};
