//! WorldWire - A Guardian News Reader
//!
//! This crate provides a small web front end for the Guardian content API.
//! A JSON proxy reshapes upstream search results into a simplified article
//! list, and a server-rendered page lets readers search and browse by section.

pub mod config;
pub mod error;
pub mod fetcher;
pub mod news;
pub mod routes;
pub mod view;
