//! Renderers per surface, keyed by scene and remembering the GL context
//! their objects were created in.
//!
//! A host that loses its context (activity paused, surface recreated) calls
//! `init` again from a fresh one. Names from the old context mean nothing in
//! the new one, so the old renderer is abandoned rather than destroyed.

use std::collections::HashMap;

use crate::gles::Gles;
use crate::registry::SceneKind;
use crate::renderer::Renderer;

struct Slot<G: Gles> {
    context_id: usize,
    renderer: Renderer<G>,
}

impl<G: Gles> Drop for Slot<G> {
    fn drop(&mut self) {
        // the context this slot was built in is gone or belongs to someone else
        self.renderer.abandon();
    }
}

pub struct SurfaceSlots<G: Gles> {
    slots: HashMap<SceneKind, Slot<G>>,
}

impl<G: Gles> Default for SurfaceSlots<G> {
    fn default() -> Self {
        SurfaceSlots {
            slots: HashMap::new(),
        }
    }
}

impl<G: Gles> SurfaceSlots<G> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Initializes the `kind` renderer on the context `context_id`.
    ///
    /// The existing renderer is re-initialized in place when it was built on
    /// the same context; otherwise `make` supplies a new one and the old one
    /// is abandoned.
    pub fn init_on<F>(&mut self, kind: SceneKind, context_id: usize, make: F) -> bool
    where
        F: FnOnce() -> Renderer<G>,
    {
        let reusable = self
            .slots
            .get(&kind)
            .map_or(false, |slot| slot.context_id == context_id);
        if !reusable {
            info!(
                "Creating {} renderer for GL context 0x{:x}",
                kind.command(),
                context_id
            );
            let slot = Slot {
                context_id,
                renderer: make(),
            };
            if let Some(old) = self.slots.insert(kind, slot) {
                debug!(
                    "Dropping {} renderer of context 0x{:x}",
                    kind.command(),
                    old.context_id
                );
            }
        }
        self.get_mut(kind).map_or(false, |renderer| renderer.init())
    }

    pub fn get_mut(&mut self, kind: SceneKind) -> Option<&mut Renderer<G>> {
        self.slots.get_mut(&kind).map(|slot| &mut slot.renderer)
    }

    pub fn context_id(&self, kind: SceneKind) -> Option<usize> {
        self.slots.get(&kind).map(|slot| slot.context_id)
    }
}
