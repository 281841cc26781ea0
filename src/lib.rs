//! Draftdesk - client for the AI blog draft assistant
//!
//! This library provides typed access to the draft assistant backend and the
//! page-level workflows built on top of it:
//! - `api`: HTTP client wrapper (base URL, bearer token, error mapping)
//! - `session`: bearer token persistence
//! - `services`: auth, file, blog, image and WordPress settings services
//! - `pages`: dashboard, upload, preview, settings and routing workflows

pub mod api;
pub mod config;
pub mod models;
pub mod pages;
pub mod services;
pub mod session;

#[cfg(test)]
pub(crate) mod mock_backend;
