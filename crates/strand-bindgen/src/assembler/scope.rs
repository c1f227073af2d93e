//! Indentation bookkeeping for scopes opened around the native call.

/// Depth counters for code placed before and after the call.
///
/// Entering a scope deepens the pre-call side and resets the post-call
/// side to the same depth. Leaving a scope only shallows the post-call
/// side, so the call line stays at the deepest level reached while the
/// closing lines unwind. Every enter and exit is counted so callers can
/// check that rules paired them.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ScopeDepth {
    above: usize,
    below: usize,
    entered: usize,
    exited: usize,
}

impl ScopeDepth {
    pub fn enter(&mut self) {
        self.above += 1;
        self.below = self.above;
        self.entered += 1;
    }

    pub fn exit(&mut self) {
        self.below = self.below.saturating_sub(1);
        self.exited += 1;
    }

    /// Depth of the next pre-call line, and of the call line itself.
    pub fn above(&self) -> usize {
        self.above
    }

    /// Depth of the next post-call line.
    pub fn below(&self) -> usize {
        self.below
    }

    pub fn entered(&self) -> usize {
        self.entered
    }

    pub fn exited(&self) -> usize {
        self.exited
    }

    pub fn is_balanced(&self) -> bool {
        self.entered == self.exited
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_only_unwinds_the_post_call_side() {
        let mut depth = ScopeDepth::default();
        depth.enter();
        depth.exit();
        depth.enter();
        assert_eq!(depth.above(), 2);
        assert_eq!(depth.below(), 2);
        depth.exit();
        assert_eq!(depth.above(), 2);
        assert_eq!(depth.below(), 1);
        assert!(depth.is_balanced());
    }

    #[test]
    fn unpaired_enter_is_reported() {
        let mut depth = ScopeDepth::default();
        depth.enter();
        assert!(!depth.is_balanced());
        assert_eq!(depth.entered(), 1);
        assert_eq!(depth.exited(), 0);
    }
}
