//! Moderation review for draft assistant replies.

/// Reply substituted when a draft response is rejected by moderation.
pub const REDIRECT_REPLY: &str =
    "I'd like to approach this topic differently. How else can I support you today?";

/// Verdict from reviewing a draft assistant reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModerationVerdict {
    Safe,
    Flagged,
}

/// Reviews draft replies before they reach the user.
///
/// Object-safe so the chat service can swap reviewers at runtime.
pub trait ModerationPolicy: Send + Sync {
    fn review(&self, reply: &str) -> ModerationVerdict;
}

/// Pass-through reviewer that accepts every reply.
///
/// Provider-side safety settings are the effective gate today; this seam
/// exists so a stricter reviewer can drop in without touching the service.
#[derive(Debug, Clone, Copy, Default)]
pub struct AlwaysSafe;

impl ModerationPolicy for AlwaysSafe {
    fn review(&self, _reply: &str) -> ModerationVerdict {
        ModerationVerdict::Safe
    }
}
