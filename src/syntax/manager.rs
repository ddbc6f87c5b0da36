//! Syntax highlighting manager
//!
//! This module provides the SyntaxManager that coordinates language
//! lookup, per-buffer caches, and the editor lifecycle hooks.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use super::builtin;
use super::cache::LineCache;
use super::language::LanguageDefinition;
use super::projector::{ProjectedSpan, Projector};
use crate::config::Config;
use crate::host::{
    BufferId, BufferKind, FrameDrawEvent, HighlightHooks, HostBuffer, LineDrawEvent, ModifyEvent,
};

/// Main syntax highlighting manager
pub struct SyntaxManager {
    /// Loaded language definitions, shared with the caches using them
    languages: HashMap<String, Arc<LanguageDefinition>>,
    /// Extension to language name mapping
    extension_map: HashMap<String, String>,
    /// Filetype tag to language name mapping
    filetypes: HashMap<String, String>,
    /// Per-buffer caches
    caches: HashMap<BufferId, LineCache>,
    projector: Projector,
    /// Whether syntax highlighting is enabled
    pub enabled: bool,
    redraw: bool,
}

impl SyntaxManager {
    /// Create a new syntax manager with built-in languages
    pub fn new() -> Self {
        let mut manager = Self {
            languages: HashMap::new(),
            extension_map: HashMap::new(),
            filetypes: HashMap::new(),
            caches: HashMap::new(),
            projector: Projector::default(),
            enabled: true,
            redraw: true,
        };

        for lang in builtin::all_languages() {
            manager.add_language(lang);
        }

        manager
    }

    /// Create a manager with the Zig definition adjusted by `config`
    pub fn with_config(config: &Config) -> Self {
        let mut zig = builtin::zig_language();
        for (word, category) in &config.extra_keywords {
            zig.keywords.add(word, *category);
        }

        let mut manager = Self::new();
        manager.enabled = config.enabled;
        manager.projector = Projector::new(config.tab_width);
        manager.add_language(zig);
        manager.add_filetype(&config.filetype, builtin::ZIG_FILETYPE);
        manager
    }

    /// Add a language definition; it answers to its own name as filetype
    pub fn add_language(&mut self, lang: LanguageDefinition) {
        let name = lang.name.clone();
        for ext in &lang.extensions {
            self.extension_map.insert(ext.to_lowercase(), name.clone());
        }
        self.filetypes.insert(name.clone(), name.clone());
        // caches built on a replaced definition are stale
        self.caches.retain(|_, cache| cache.language().name != name);
        self.languages.insert(name, Arc::new(lang));
        self.redraw = true;
    }

    /// Make buffers tagged `filetype` use the language `language`
    pub fn add_filetype(&mut self, filetype: &str, language: &str) {
        self.filetypes.insert(filetype.to_string(), language.to_string());
    }

    /// Detect language from filename
    pub fn detect_language(&self, filename: &Path) -> Option<&str> {
        let ext = filename.extension()?.to_str()?.to_lowercase();
        self.extension_map.get(&ext).map(|s| s.as_str())
    }

    /// Resolve a buffer filetype tag to its language
    pub fn resolve_filetype(&self, filetype: &str) -> Option<&Arc<LanguageDefinition>> {
        self.filetypes
            .get(filetype)
            .and_then(|name| self.languages.get(name))
    }

    /// Cache for a buffer, if one has been created
    pub fn cache(&self, buffer: BufferId) -> Option<&LineCache> {
        self.caches.get(&buffer)
    }

    /// Remove cache for a buffer (when buffer is closed)
    pub fn remove_cache(&mut self, buffer: BufferId) {
        self.caches.remove(&buffer);
    }

    pub fn projector(&self) -> &Projector {
        &self.projector
    }

    /// List available languages
    pub fn list_languages(&self) -> Vec<&str> {
        let mut names: Vec<_> = self.languages.keys().map(|s| s.as_str()).collect();
        names.sort();
        names
    }

    /// Toggle syntax highlighting on/off
    pub fn toggle(&mut self) {
        self.enabled = !self.enabled;
        if !self.enabled {
            // edits made while off never reach the caches
            for cache in self.caches.values_mut() {
                cache.invalidate_all();
            }
        }
        self.redraw = true;
    }

    /// Drop every cache and ask the host to repaint without highlighting
    pub fn unload(&mut self) {
        self.caches.clear();
        self.enabled = false;
        self.redraw = true;
    }

    /// Whether the host should redraw; clears the request
    pub fn take_redraw(&mut self) -> bool {
        std::mem::take(&mut self.redraw)
    }

    /// The cache for a buffer the hooks should act on, or None to no-op
    fn active_cache<B: HostBuffer + ?Sized>(
        &mut self,
        id: BufferId,
        buffer: Option<&B>,
    ) -> Option<&mut LineCache> {
        if !self.enabled {
            return None;
        }
        let buffer = buffer?;
        if buffer.kind() != BufferKind::File {
            return None;
        }
        let Some(language) = buffer.filetype().and_then(|ft| self.resolve_filetype(ft)) else {
            tracing::trace!(buffer = id.0, filetype = ?buffer.filetype(), "no highlighter for buffer");
            return None;
        };
        let language = Arc::clone(language);

        let cache = self
            .caches
            .entry(id)
            .or_insert_with(|| LineCache::new(Arc::clone(&language)));
        if !Arc::ptr_eq(cache.language(), &language) {
            tracing::debug!(buffer = id.0, language = %language.name, "buffer language changed");
            *cache = LineCache::new(language);
        }
        Some(cache)
    }
}

impl Default for SyntaxManager {
    fn default() -> Self {
        Self::new()
    }
}

impl<B: HostBuffer + ?Sized> HighlightHooks<B> for SyntaxManager {
    fn on_frame_pre_draw(&mut self, event: &FrameDrawEvent<'_, B>) {
        let Some(buffer) = event.buffer else { return };
        let Some(cache) = self.active_cache(event.buffer_id, Some(buffer)) else {
            return;
        };
        let last = event.lines.end.min(buffer.line_count());
        if event.lines.start >= last {
            return;
        }
        if let Err(e) = cache.get_spans(buffer, last - 1) {
            tracing::warn!(buffer = event.buffer_id.0, error = %e, "frame pre-draw skipped");
        }
    }

    fn on_line_pre_draw(&mut self, event: &LineDrawEvent<'_, B>) -> Vec<ProjectedSpan> {
        let projector = self.projector;
        let Some(buffer) = event.buffer else {
            return Vec::new();
        };
        let Some(cache) = self.active_cache(event.buffer_id, Some(buffer)) else {
            return Vec::new();
        };
        if let Err(e) = cache.get_spans(buffer, event.line) {
            tracing::warn!(buffer = event.buffer_id.0, line = event.line, error = %e, "line pre-draw skipped");
            return Vec::new();
        }
        match projector.project(cache, buffer, event.line, event.columns.clone()) {
            Ok(spans) => spans,
            Err(e) => {
                tracing::warn!(buffer = event.buffer_id.0, line = event.line, error = %e, "line projection skipped");
                Vec::new()
            }
        }
    }

    fn on_pre_modify(&mut self, event: &ModifyEvent<'_, B>) {
        let Some(buffer) = event.buffer else { return };
        let Some(cache) = self.active_cache(event.buffer_id, Some(buffer)) else {
            return;
        };
        if let Err(e) = cache.on_pre_modify(buffer, event.edit) {
            tracing::warn!(buffer = event.buffer_id.0, error = %e, "pre-modify skipped");
        }
    }

    fn on_post_modify(&mut self, event: &ModifyEvent<'_, B>) {
        let Some(buffer) = event.buffer else { return };
        let Some(cache) = self.active_cache(event.buffer_id, Some(buffer)) else {
            return;
        };
        if let Err(e) = cache.on_post_modify(buffer, event.edit) {
            tracing::warn!(buffer = event.buffer_id.0, error = %e, "post-modify skipped");
        }
    }
}
