//! Interactive run using cliclack (Charm-style inline prompts)

mod instructions;
mod prompts;

pub use instructions::next_steps;
pub use prompts::{run, RunArgs};
