pub mod auth;
pub mod cycle;
pub mod error;
pub mod export;
pub mod insight;
pub mod lab;
pub mod llm;
pub mod peptide;
pub mod schedule;
pub mod supplement;
pub mod tracking;
pub mod validate;
