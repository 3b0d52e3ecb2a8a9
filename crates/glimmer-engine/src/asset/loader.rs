use std::collections::HashMap;
use std::fmt;

use crate::error::ActivationError;
use crate::host::AssetSource;
use crate::surface::SurfaceRequest;

use super::{AssetId, AssetKind, ImageHandle, Join, ShaderSources};

/// Id of one in-flight collection started by [`AssetLoader::collect`].
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct RequestId(u64);

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "request {}", self.0)
    }
}

/// Everything one surface needs, fully loaded.
///
/// `textures` has the same length as the request's slot list; `None` marks a
/// slot without a texture (only slot 0 can be empty).
#[derive(Debug, Clone)]
pub struct ResolvedAssets {
    pub shader: AssetId,
    pub textures: Vec<Option<ImageHandle>>,
}

/// Result of starting a collection.
#[derive(Debug)]
pub enum Collected {
    /// Every asset was already available; nothing to wait for.
    Ready(ResolvedAssets),
    /// Completion arrives through a later settlement.
    Pending(RequestId),
}

/// A pending request that reached a terminal state during a settlement.
#[derive(Debug)]
pub enum Settled {
    Ready(RequestId, ResolvedAssets),
    Failed(RequestId, ActivationError),
}

#[derive(Debug, Copy, Clone)]
struct Waiter {
    request: RequestId,
    /// Texture slot to fill; `None` for the shader.
    slot: Option<usize>,
}

#[derive(Debug)]
enum LoadState<T> {
    Loading(Vec<Waiter>),
    Ready(T),
    Failed(String),
}

#[derive(Debug)]
enum CacheEntry {
    // Shader text itself lives in `ShaderSources`.
    Shader(LoadState<()>),
    Image(LoadState<ImageHandle>),
}

impl CacheEntry {
    fn kind(&self) -> AssetKind {
        match self {
            Self::Shader(_) => AssetKind::Shader,
            Self::Image(_) => AssetKind::Image,
        }
    }
}

/// Deduplicating loader for shader text and texture images.
///
/// One cache entry exists per raw identifier for the loader's lifetime, so at
/// most one lookup or fetch is ever started per identifier. Requests that hit
/// an entry still loading wait on that same fetch.
#[derive(Debug, Default)]
pub struct AssetLoader {
    cache: HashMap<AssetId, CacheEntry>,
    pending: HashMap<RequestId, Join<ResolvedAssets>>,
    next_request: u64,
}

impl AssetLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts collecting every asset `request` needs.
    ///
    /// Fetches are issued for identifiers seen for the first time. A missing
    /// local reference fails the request immediately; fetches already started
    /// for it stay in the cache for other requesters.
    pub fn collect<S: AssetSource + ?Sized>(
        &mut self,
        request: &SurfaceRequest,
        source: &mut S,
        sources: &mut ShaderSources,
    ) -> Result<Collected, ActivationError> {
        let id = RequestId(self.next_request);
        self.next_request = self.next_request.wrapping_add(1);

        let mut join = Join::new(ResolvedAssets {
            shader: request.shader.clone(),
            textures: vec![None; request.textures.len()],
        });

        self.collect_shader(&request.shader, id, &mut join, source, sources)?;

        for (slot, texture) in request.textures.iter().enumerate() {
            if let Some(texture) = texture {
                self.collect_image(texture, slot, id, &mut join, source)?;
            }
        }

        // Release the issuer's token: completes inline when nothing is outstanding.
        match join.settle() {
            Some(resolved) => {
                log::trace!("{id}: all assets cached");
                Ok(Collected::Ready(resolved))
            }
            None => {
                log::trace!("{id}: waiting on {} asset(s)", join.outstanding());
                self.pending.insert(id, join);
                Ok(Collected::Pending(id))
            }
        }
    }

    fn collect_shader<S: AssetSource + ?Sized>(
        &mut self,
        shader: &AssetId,
        request: RequestId,
        join: &mut Join<ResolvedAssets>,
        source: &mut S,
        sources: &mut ShaderSources,
    ) -> Result<(), ActivationError> {
        match self.cache.get_mut(shader) {
            Some(CacheEntry::Shader(state)) => match state {
                LoadState::Ready(()) => {}
                LoadState::Loading(waiters) => {
                    waiters.push(Waiter { request, slot: None });
                    join.add();
                }
                LoadState::Failed(reason) => {
                    return Err(ActivationError::Fetch {
                        id: shader.clone(),
                        reason: reason.clone(),
                    });
                }
            },
            Some(other) => {
                return Err(ActivationError::KindMismatch {
                    id: shader.clone(),
                    cached: other.kind(),
                    requested: AssetKind::Shader,
                });
            }
            None if sources.contains(shader) => {
                log::debug!("shader {shader} was pre-seeded; no fetch needed");
                self.cache
                    .insert(shader.clone(), CacheEntry::Shader(LoadState::Ready(())));
            }
            None => match shader.local_name() {
                Some(name) => {
                    let text = source
                        .find_script(name)
                        .ok_or_else(|| ActivationError::MissingScript(shader.clone()))?;
                    self.cache
                        .insert(shader.clone(), CacheEntry::Shader(LoadState::Ready(())));
                    sources.insert(shader.clone(), text);
                }
                None => {
                    self.cache.insert(
                        shader.clone(),
                        CacheEntry::Shader(LoadState::Loading(vec![Waiter { request, slot: None }])),
                    );
                    join.add();
                    log::debug!("fetching shader {shader}");
                    source.fetch_text(shader);
                }
            },
        }
        Ok(())
    }

    fn collect_image<S: AssetSource + ?Sized>(
        &mut self,
        texture: &AssetId,
        slot: usize,
        request: RequestId,
        join: &mut Join<ResolvedAssets>,
        source: &mut S,
    ) -> Result<(), ActivationError> {
        let ready = match self.cache.get_mut(texture) {
            Some(CacheEntry::Image(state)) => match state {
                LoadState::Ready(image) => Some(image.clone()),
                LoadState::Loading(waiters) => {
                    waiters.push(Waiter { request, slot: Some(slot) });
                    join.add();
                    None
                }
                LoadState::Failed(reason) => {
                    return Err(ActivationError::Fetch {
                        id: texture.clone(),
                        reason: reason.clone(),
                    });
                }
            },
            Some(other) => {
                return Err(ActivationError::KindMismatch {
                    id: texture.clone(),
                    cached: other.kind(),
                    requested: AssetKind::Image,
                });
            }
            None => match texture.local_name() {
                Some(name) => {
                    let image = source
                        .find_image(name)
                        .ok_or_else(|| ActivationError::MissingImage(texture.clone()))?;
                    self.cache.insert(
                        texture.clone(),
                        CacheEntry::Image(LoadState::Ready(image.clone())),
                    );
                    Some(image)
                }
                None => {
                    self.cache.insert(
                        texture.clone(),
                        CacheEntry::Image(LoadState::Loading(vec![Waiter {
                            request,
                            slot: Some(slot),
                        }])),
                    );
                    join.add();
                    log::debug!("loading image {texture}");
                    source.load_image(texture);
                    None
                }
            },
        };

        if let (Some(image), Some(resolved)) = (ready, join.payload_mut()) {
            resolved.textures[slot] = Some(image);
        }
        Ok(())
    }

    /// Records fetched shader text and completes the requests waiting on it.
    pub fn text_loaded(
        &mut self,
        id: &AssetId,
        text: String,
        sources: &mut ShaderSources,
    ) -> Vec<Settled> {
        match self.cache.get_mut(id) {
            Some(CacheEntry::Shader(state)) => {
                sources.insert(id.clone(), text);
                match std::mem::replace(state, LoadState::Ready(())) {
                    LoadState::Loading(waiters) => self.wake(waiters, None),
                    _ => Vec::new(),
                }
            }
            Some(other) => {
                log::warn!("shader text arrived for {id}, which is cached as {}", other.kind());
                Vec::new()
            }
            None => {
                log::warn!("shader text arrived for {id}, which was never requested");
                self.cache
                    .insert(id.clone(), CacheEntry::Shader(LoadState::Ready(())));
                sources.insert(id.clone(), text);
                Vec::new()
            }
        }
    }

    /// Records a decoded image and completes the requests waiting on it.
    pub fn image_loaded(&mut self, id: &AssetId, image: ImageHandle) -> Vec<Settled> {
        match self.cache.get_mut(id) {
            Some(CacheEntry::Image(state)) => {
                match std::mem::replace(state, LoadState::Ready(image.clone())) {
                    LoadState::Loading(waiters) => self.wake(waiters, Some(&image)),
                    _ => Vec::new(),
                }
            }
            Some(other) => {
                log::warn!("image arrived for {id}, which is cached as {}", other.kind());
                Vec::new()
            }
            None => {
                log::warn!("image arrived for {id}, which was never requested");
                self.cache
                    .insert(id.clone(), CacheEntry::Image(LoadState::Ready(image)));
                Vec::new()
            }
        }
    }

    /// Marks a fetch as failed and fails every request waiting on it.
    ///
    /// Later requests for the same identifier fail immediately.
    pub fn asset_failed(&mut self, id: &AssetId, reason: &str) -> Vec<Settled> {
        let waiters = match self.cache.get_mut(id) {
            Some(CacheEntry::Shader(state)) => take_waiters(state, reason),
            Some(CacheEntry::Image(state)) => take_waiters(state, reason),
            None => {
                log::warn!("failure reported for {id}, which was never requested");
                return Vec::new();
            }
        };

        waiters
            .into_iter()
            .filter_map(|w| self.pending.remove(&w.request).map(|_| w.request))
            .map(|request| {
                Settled::Failed(
                    request,
                    ActivationError::Fetch {
                        id: id.clone(),
                        reason: reason.to_string(),
                    },
                )
            })
            .collect()
    }

    fn wake(&mut self, waiters: Vec<Waiter>, image: Option<&ImageHandle>) -> Vec<Settled> {
        let mut settled = Vec::new();
        for waiter in waiters {
            // Requests that failed after registering are no longer pending.
            let Some(join) = self.pending.get_mut(&waiter.request) else {
                continue;
            };
            if let (Some(slot), Some(image), Some(resolved)) =
                (waiter.slot, image, join.payload_mut())
            {
                resolved.textures[slot] = Some(image.clone());
            }
            if let Some(resolved) = join.settle() {
                self.pending.remove(&waiter.request);
                settled.push(Settled::Ready(waiter.request, resolved));
            }
        }
        settled
    }

    /// Drops a pending request; its waiters are ignored from now on.
    pub fn cancel(&mut self, request: RequestId) -> bool {
        self.pending.remove(&request).is_some()
    }

    pub fn pending_requests(&self) -> usize {
        self.pending.len()
    }

    /// True once `id` has a cache entry, loading or settled.
    pub fn is_cached(&self, id: &AssetId) -> bool {
        self.cache.contains_key(id)
    }

    pub fn is_loading(&self, id: &AssetId) -> bool {
        matches!(
            self.cache.get(id),
            Some(CacheEntry::Shader(LoadState::Loading(_)) | CacheEntry::Image(LoadState::Loading(_)))
        )
    }
}

fn take_waiters<T>(state: &mut LoadState<T>, reason: &str) -> Vec<Waiter> {
    if !matches!(state, LoadState::Loading(_)) {
        log::warn!("ignoring failure for an asset that already settled");
        return Vec::new();
    }
    match std::mem::replace(state, LoadState::Failed(reason.to_string())) {
        LoadState::Loading(waiters) => waiters,
        _ => Vec::new(),
    }
}
