//! Rule-based negation context detection for clinical entity mentions.

pub mod cli;
pub mod config;
pub mod corpus;
pub mod error;
pub mod logging;
pub mod negex;
pub mod output;
pub mod sources;

pub use error::{NegexError, Result};
pub use negex::{NegationContextAnalyzer, NegationResult};
