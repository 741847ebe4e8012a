//! Adapter implementations
//!
//! Adapters implement the port traits with concrete technologies:
//! - Whitespace-delimited text file for the LedgerRepository port

pub mod text_file;
