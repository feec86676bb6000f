//! Call frames.

use nibble_bytecode::CodeRange;

/// Caller context saved on a call and restored on return.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Frame {
    /// Where to resume in the caller.
    pub return_ip: usize,
    /// The caller's active range.
    pub range: CodeRange,
    /// The caller's register value.
    pub register: i64,
}

/// Bounded LIFO of frames.
#[derive(Debug)]
pub struct FrameStack {
    frames: Vec<Frame>,
    limit: u32,
}

impl FrameStack {
    pub fn new(limit: u32) -> Self {
        Self {
            frames: Vec::new(),
            limit,
        }
    }

    /// Push a frame. Returns false, leaving the stack unchanged, when the
    /// depth limit is already reached.
    #[must_use]
    pub fn push(&mut self, frame: Frame) -> bool {
        if self.depth() >= self.limit {
            return false;
        }
        self.frames.push(frame);
        true
    }

    #[inline]
    pub fn pop(&mut self) -> Option<Frame> {
        self.frames.pop()
    }

    #[inline]
    pub fn depth(&self) -> u32 {
        self.frames.len() as u32
    }

    #[inline]
    pub fn limit(&self) -> u32 {
        self.limit
    }
}
