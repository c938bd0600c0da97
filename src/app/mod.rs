//! Process-level helpers for the bot binary.

mod shutdown;

pub use shutdown::cancel_on_ctrl_c;
