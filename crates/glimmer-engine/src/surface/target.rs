use std::fmt;

use crate::coords::SurfaceSize;

/// Opaque id of a rendering target created by the engine.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct TargetId(u64);

impl fmt::Display for TargetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A rendering target and its current drawable size.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct RenderTarget {
    pub id: TargetId,
    pub size: SurfaceSize,
}

/// Running list of every target created, in creation order.
///
/// Targets are created before their assets load, so the list also holds targets
/// whose activation is pending or has failed.
#[derive(Debug, Default)]
pub struct Targets {
    list: Vec<RenderTarget>,
    next_id: u64,
}

impl Targets {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn create(&mut self, size: SurfaceSize) -> TargetId {
        let id = TargetId(self.next_id);
        self.next_id = self.next_id.wrapping_add(1);
        self.list.push(RenderTarget { id, size });
        id
    }

    pub fn get(&self, id: TargetId) -> Option<&RenderTarget> {
        self.list.iter().find(|t| t.id == id)
    }

    pub fn size_of(&self, id: TargetId) -> Option<SurfaceSize> {
        self.get(id).map(|t| t.size)
    }

    /// Returns false if `id` is unknown.
    pub fn set_size(&mut self, id: TargetId, size: SurfaceSize) -> bool {
        match self.list.iter_mut().find(|t| t.id == id) {
            Some(target) => {
                target.size = size;
                true
            }
            None => false,
        }
    }

    pub fn remove(&mut self, id: TargetId) -> Option<RenderTarget> {
        let pos = self.list.iter().position(|t| t.id == id)?;
        Some(self.list.remove(pos))
    }

    pub fn iter(&self) -> impl Iterator<Item = &RenderTarget> {
        self.list.iter()
    }

    pub fn len(&self) -> usize {
        self.list.len()
    }

    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_unique_and_ordered() {
        let mut targets = Targets::new();
        let a = targets.create(SurfaceSize::new(10, 10));
        let b = targets.create(SurfaceSize::new(20, 20));
        assert_ne!(a, b);
        let ids: Vec<_> = targets.iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![a, b]);
    }

    #[test]
    fn set_size_updates_known_target() {
        let mut targets = Targets::new();
        let a = targets.create(SurfaceSize::new(10, 10));
        assert!(targets.set_size(a, SurfaceSize::new(64, 32)));
        assert_eq!(targets.size_of(a), Some(SurfaceSize::new(64, 32)));
    }

    #[test]
    fn removed_target_is_gone() {
        let mut targets = Targets::new();
        let a = targets.create(SurfaceSize::new(1, 1));
        assert!(targets.remove(a).is_some());
        assert!(!targets.set_size(a, SurfaceSize::new(2, 2)));
        assert!(targets.is_empty());
    }
}
