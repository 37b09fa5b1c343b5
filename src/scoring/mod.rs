// Scoring — pure heuristics, no I/O.
//
// `message` scores free-text messages; `link` assesses a single URL.

pub mod link;
pub mod message;

pub use message::analyze_message;
