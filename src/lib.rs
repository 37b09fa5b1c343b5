// ScamGuard: heuristic scam-risk scoring for messages and links.
//
// This is the library root. `scoring` holds the pure heuristics; `db` the
// optional append-only record store; `web` the JSON API around both.

pub mod config;
pub mod db;
pub mod output;
pub mod scoring;
pub mod status;
pub mod web;
