//! Texture bindings visible to the pixel stage.
//!
//! Sampling and filtering live outside this crate. A texture is anything
//! that can turn a batch of coordinates into a batch of colors; the pixel
//! stage only ever borrows it.

use core::fmt;

use crate::batch::Batch;

/// Number of texture slots a draw call can bind.
pub const MAX_TEXTURES: usize = 4;

/// A read-only texture sampler.
///
/// Implementations must be safe to sample from many threads at once.
pub trait Texture: Send + Sync {
    /// Samples the texture at normalized coordinates `(u, v)`.
    ///
    /// # Returns
    /// * `[r, g, b, a]` channel batches.
    fn sample(&self, u: Batch, v: Batch) -> [Batch; 4];
}

impl<T: Texture + ?Sized> Texture for &T {
    #[inline(always)]
    fn sample(&self, u: Batch, v: Batch) -> [Batch; 4] {
        (**self).sample(u, v)
    }
}

impl<T: Texture + ?Sized> Texture for Box<T> {
    #[inline(always)]
    fn sample(&self, u: Batch, v: Batch) -> [Batch; 4] {
        (**self).sample(u, v)
    }
}

/// The fixed set of texture slots bound for a draw call.
#[derive(Copy, Clone, Default)]
pub struct TextureBindings<'a> {
    slots: [Option<&'a dyn Texture>; MAX_TEXTURES],
}

impl<'a> TextureBindings<'a> {
    /// Bindings with every slot empty.
    pub const fn empty() -> Self {
        Self {
            slots: [None; MAX_TEXTURES],
        }
    }

    /// Binds `texture` to `slot`, replacing whatever was there.
    ///
    /// # Panics
    /// Panics if `slot >= MAX_TEXTURES`.
    #[must_use]
    pub fn with(mut self, slot: usize, texture: &'a dyn Texture) -> Self {
        self.slots[slot] = Some(texture);
        self
    }

    /// Empties `slot`.
    ///
    /// # Panics
    /// Panics if `slot >= MAX_TEXTURES`.
    pub fn unbind(&mut self, slot: usize) {
        self.slots[slot] = None;
    }

    /// Returns the texture in `slot`, if any. Out-of-range slots are empty.
    #[inline]
    pub fn get(&self, slot: usize) -> Option<&'a dyn Texture> {
        self.slots.get(slot).copied().flatten()
    }

    /// Number of occupied slots.
    pub fn bound_count(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }
}

impl fmt::Debug for TextureBindings<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let bound: Vec<bool> = self.slots.iter().map(Option::is_some).collect();
        f.debug_struct("TextureBindings").field("bound", &bound).finish()
    }
}
