use std::collections::HashMap;
use std::fmt;

use crate::gl::GlApi;
use crate::surface::TargetId;

use super::RenderInstance;

/// Opaque registry key, generated fresh for every registration.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct InstanceKey(u64);

impl fmt::Display for InstanceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "instance {}", self.0)
    }
}

/// Registry of live instances.
///
/// Iteration order is unspecified.
pub struct InstanceStore<G: GlApi> {
    instances: HashMap<InstanceKey, RenderInstance<G>>,
    next_key: u64,
}

impl<G: GlApi> Default for InstanceStore<G> {
    fn default() -> Self {
        Self {
            instances: HashMap::new(),
            next_key: 0,
        }
    }
}

impl<G: GlApi> InstanceStore<G> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, instance: RenderInstance<G>) -> InstanceKey {
        let key = InstanceKey(self.next_key);
        self.next_key = self.next_key.wrapping_add(1);
        self.instances.insert(key, instance);
        key
    }

    pub fn get(&self, key: InstanceKey) -> Option<&RenderInstance<G>> {
        self.instances.get(&key)
    }

    pub fn remove(&mut self, key: InstanceKey) -> Option<RenderInstance<G>> {
        self.instances.remove(&key)
    }

    pub fn key_for_target(&self, target: TargetId) -> Option<InstanceKey> {
        self.instances
            .iter()
            .find_map(|(key, instance)| (instance.target() == target).then_some(*key))
    }

    pub fn iter(&self) -> impl Iterator<Item = (InstanceKey, &RenderInstance<G>)> {
        self.instances.iter().map(|(key, instance)| (*key, instance))
    }

    /// Removes every instance, leaving the key sequence untouched.
    pub fn drain(&mut self) -> impl Iterator<Item = RenderInstance<G>> + '_ {
        self.instances.drain().map(|(_, instance)| instance)
    }

    pub fn len(&self) -> usize {
        self.instances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }
}
