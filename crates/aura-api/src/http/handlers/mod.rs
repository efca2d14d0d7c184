//! HTTP request handlers for the REST API.

pub mod chat;
pub mod conversation;
pub mod mood;
pub mod service;
pub mod ws;
