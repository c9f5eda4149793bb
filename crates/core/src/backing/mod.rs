//! Per-frame bookkeeping shared between the render thread hooks: which views were tagged in which frame, and the
//! engine's frame tokens.

mod ledger;
mod token;

pub use ledger::*;
pub use token::*;
