//! Owner-scoped queries, one module per table.
//!
//! Every builder filters on `user_id`; no query in this module reads or
//! writes another user's rows.

pub mod cycle;
pub mod insight;
pub mod lab;
pub mod peptide;
pub mod schedule;
pub mod supplement;
pub mod tracking;

#[cfg(test)]
mod tests;
