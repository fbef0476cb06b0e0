pub mod cycle;
pub mod insight;
pub mod lab;
pub mod peptide;
pub mod schedule;
pub mod supplement;
pub mod tracking;
