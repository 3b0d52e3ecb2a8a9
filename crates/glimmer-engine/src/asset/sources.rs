use std::collections::HashMap;

use super::AssetId;

/// Shader identifier → fragment source text.
///
/// Programs read their source from here at compile time. Callers may pre-seed
/// entries (the loader then skips the fetch) or overwrite them; an overwrite
/// affects later compilations only.
#[derive(Debug, Default)]
pub struct ShaderSources {
    sources: HashMap<AssetId, String>,
}

impl ShaderSources {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `source` under `id`, returning the previous text if any.
    ///
    /// Replacing an existing entry is reported on the diagnostic channel.
    pub fn insert(&mut self, id: AssetId, source: impl Into<String>) -> Option<String> {
        let previous = self.sources.insert(id.clone(), source.into());
        if previous.is_some() {
            log::info!("shader source `{id}` already exists and has been replaced");
        }
        previous
    }

    pub fn get(&self, id: &AssetId) -> Option<&str> {
        self.sources.get(id).map(String::as_str)
    }

    pub fn contains(&self, id: &AssetId) -> bool {
        self.sources.contains_key(id)
    }

    pub fn remove(&mut self, id: &AssetId) -> Option<String> {
        self.sources.remove(id)
    }

    pub fn len(&self) -> usize {
        self.sources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&AssetId, &str)> {
        self.sources.iter().map(|(id, src)| (id, src.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_then_overwrite_returns_previous() {
        let mut sources = ShaderSources::new();
        let id = AssetId::from("#frag");
        assert_eq!(sources.insert(id.clone(), "a"), None);
        assert_eq!(sources.insert(id.clone(), "b").as_deref(), Some("a"));
        assert_eq!(sources.get(&id), Some("b"));
        assert_eq!(sources.len(), 1);
    }

    #[test]
    fn remove_clears_entry() {
        let mut sources = ShaderSources::new();
        let id = AssetId::from("x.frag");
        sources.insert(id.clone(), "void main(){}");
        assert!(sources.contains(&id));
        sources.remove(&id);
        assert!(sources.is_empty());
    }
}
