use std::fmt;

/// Pre-order identity of a node within one indexed pair.
///
/// Both sides share one id space: ids start at 1, every LHS id is below every
/// RHS id. Zero marks a node the indexer never reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct SyntaxId {
    raw: u32,
}

impl SyntaxId {
    pub(crate) fn new(raw: u32) -> Self {
        assert!(raw != 0, "syntax ids start at 1");
        Self { raw }
    }

    pub fn is_zero(self) -> bool {
        self.raw == 0
    }

    pub fn get(self) -> u32 {
        self.raw
    }
}

impl fmt::Display for SyntaxId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.raw.fmt(f)
    }
}

/// Content-equivalence class shared by both sides of a pair.
///
/// Zero means the class has not been computed yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct ContentId {
    raw: u32,
}

impl ContentId {
    pub(crate) fn new(raw: u32) -> Self {
        assert!(raw != 0, "content ids start at 1");
        Self { raw }
    }

    pub fn is_zero(self) -> bool {
        self.raw == 0
    }

    pub fn get(self) -> u32 {
        self.raw
    }
}

impl fmt::Display for ContentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.raw.fmt(f)
    }
}
