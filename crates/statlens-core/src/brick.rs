//! Brick verification contract.
//!
//! Every widget declares a list of falsifiable assertions about its own state.
//! Hosts call [`Brick::verify`] (or [`Brick::can_render`]) before painting; a
//! widget whose assertions fail should not be drawn.

use std::time::{Duration, Instant};

/// Brick assertion that must be verified at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BrickAssertion {
    /// Text content must be visible (not empty)
    TextVisible,

    /// Every opacity the widget holds lies within [0, 1]
    OpacityInRange,
}

/// Result of verifying brick assertions
#[derive(Debug, Clone)]
pub struct BrickVerification {
    /// All assertions that passed
    pub passed: Vec<BrickAssertion>,
    /// All assertions that failed with reasons
    pub failed: Vec<(BrickAssertion, String)>,
    /// Time taken to verify
    pub verification_time: Duration,
}

impl BrickVerification {
    /// Start collecting results; the elapsed time is recorded by [`Self::finish`].
    #[must_use]
    pub fn collect() -> VerificationBuilder {
        VerificationBuilder {
            started: Instant::now(),
            passed: Vec::new(),
            failed: Vec::new(),
        }
    }

    /// Check if all assertions passed
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Accumulates assertion outcomes for a [`BrickVerification`].
#[derive(Debug)]
pub struct VerificationBuilder {
    started: Instant,
    passed: Vec<BrickAssertion>,
    failed: Vec<(BrickAssertion, String)>,
}

impl VerificationBuilder {
    /// Record `assertion` as passed when `ok`, otherwise as failed with `reason`.
    pub fn check(&mut self, assertion: BrickAssertion, ok: bool, reason: impl FnOnce() -> String) {
        if ok {
            self.passed.push(assertion);
        } else {
            self.failed.push((assertion, reason()));
        }
    }

    /// Finish and stamp the verification time.
    #[must_use]
    pub fn finish(self) -> BrickVerification {
        BrickVerification {
            passed: self.passed,
            failed: self.failed,
            verification_time: self.started.elapsed(),
        }
    }
}

/// Core Brick trait. `Widget` requires it, so every widget carries
/// verifiable assertions.
pub trait Brick: Send + Sync {
    /// Get the brick's unique type name
    fn brick_name(&self) -> &'static str;

    /// Get all assertions for this brick
    fn assertions(&self) -> &[BrickAssertion];

    /// Verify all assertions against current state
    fn verify(&self) -> BrickVerification;

    /// Check if this brick can be rendered (all assertions pass)
    fn can_render(&self) -> bool {
        self.verify().is_valid()
    }
}
