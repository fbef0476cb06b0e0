//! HTTP-level tests of the peptrack API.
//!
//! The service is built with an unreachable database and a fake identity
//! provider, so these cover routing, authentication, request validation and
//! error mapping without a running Postgres.

mod auth;
mod export;
mod health;
mod helpers;
mod resources;
mod schedule;
mod tracking;
