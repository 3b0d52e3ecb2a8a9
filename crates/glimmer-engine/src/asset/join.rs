/// Counts outstanding sub-tasks and releases a payload when the last one settles.
///
/// A join starts with one outstanding token held by the issuing call. Each
/// sub-task adds one; the issuer settles its own token after all sub-tasks are
/// issued. If every sub-task was already complete, that settle releases the
/// payload inline; otherwise the settle of the last sub-task does.
///
/// The payload is released exactly once. Settling an already released join is a
/// no-op that returns `None`.
#[derive(Debug)]
pub struct Join<T> {
    outstanding: usize,
    payload: Option<T>,
}

impl<T> Join<T> {
    pub fn new(payload: T) -> Self {
        Self {
            outstanding: 1,
            payload: Some(payload),
        }
    }

    /// Registers one more sub-task.
    #[inline]
    pub fn add(&mut self) {
        debug_assert!(self.payload.is_some(), "add on a released join");
        self.outstanding += 1;
    }

    #[inline]
    pub fn outstanding(&self) -> usize {
        self.outstanding
    }

    #[inline]
    pub fn is_released(&self) -> bool {
        self.payload.is_none()
    }

    /// Mutable access to the payload while the join is still pending.
    #[inline]
    pub fn payload_mut(&mut self) -> Option<&mut T> {
        self.payload.as_mut()
    }

    /// Marks one task settled; returns the payload when none remain.
    pub fn settle(&mut self) -> Option<T> {
        if self.payload.is_none() {
            return None;
        }
        self.outstanding = self.outstanding.saturating_sub(1);
        if self.outstanding == 0 {
            self.payload.take()
        } else {
            None
        }
    }
}
