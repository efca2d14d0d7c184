//! Safety screening for Aura.
//!
//! This module holds the two gates a chat turn passes through: the crisis
//! screen that runs on the inbound user message before any model call, and
//! the moderation review that runs on the draft reply before it is sent.

pub mod crisis;
pub mod moderation;
