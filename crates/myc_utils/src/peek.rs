pub trait Peek: Iterator {
    fn peek(&self) -> Option<Self::Item>;

    fn at_end(&self) -> bool {
        self.peek().is_none()
    }
}

/// A cursor that can be restored to an earlier position.
///
/// Used for grammar alternation: a rule records a checkpoint, tries to match,
/// and rewinds if it turns out not to apply.
pub trait Backtrack: Peek {
    type Checkpoint: Copy;

    fn checkpoint(&self) -> Self::Checkpoint;
    fn rewind(&mut self, checkpoint: Self::Checkpoint);
}
