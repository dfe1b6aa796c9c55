//! Frame-list animations and their registry.
//!
//! Each [`Animation`] is a small state machine over an ordered frame list.
//! Animations are created through the [`AnimationStore`] and addressed by
//! index from then on; there is no per-animation removal, only a bulk
//! [`AnimationStore::clear`]. All index-taking registry operations are
//! bounds-checked and degrade to no-ops / sentinel values on a bad index.

use crate::resources::texturestore::{TextureId, TextureStore};

/// One frame of an animation: which texture to show and for how long.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimationFrame {
    pub texture: TextureId,
    /// Frame duration in seconds.
    pub duration: f32,
}

/// Playback state. `Finished` is only reachable for non-looping animations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlayState {
    #[default]
    Stopped,
    Playing,
    Finished,
}

/// Ordered frame sequence with playback state.
#[derive(Debug, Clone, Default)]
pub struct Animation {
    frames: Vec<AnimationFrame>,
    looped: bool,
    state: PlayState,
    /// Time spent inside the current frame.
    current_time: f32,
    current_frame: usize,
}

impl Animation {
    pub fn new(looped: bool) -> Self {
        Self {
            looped,
            ..Self::default()
        }
    }

    pub fn add_frame(&mut self, texture: TextureId, duration: f32) {
        self.frames.push(AnimationFrame { texture, duration });
    }

    /// Advances playback. A single call crosses at most one frame boundary,
    /// even for a delta far larger than the frame duration.
    pub fn update(&mut self, delta_time: f32) {
        if self.state != PlayState::Playing || self.frames.is_empty() {
            return;
        }

        self.current_time += delta_time;

        if self.current_time >= self.frames[self.current_frame].duration {
            self.current_time = 0.0;
            self.current_frame += 1;

            if self.current_frame >= self.frames.len() {
                if self.looped {
                    self.current_frame = 0;
                } else {
                    self.current_frame = self.frames.len() - 1;
                    self.state = PlayState::Finished;
                }
            }
        }
    }

    /// Texture of the active frame, or the invalid handle when there are no
    /// frames yet.
    pub fn current_texture(&self) -> TextureId {
        self.frames
            .get(self.current_frame)
            .map(|frame| frame.texture)
            .unwrap_or(TextureId::INVALID)
    }

    /// Starts or resumes playback. Resuming a finished animation does not
    /// reset it; it continues on the last frame.
    pub fn play(&mut self) {
        self.state = PlayState::Playing;
    }

    /// Halts playback, preserving the current position. A finished
    /// animation stays finished.
    pub fn pause(&mut self) {
        if self.state == PlayState::Playing {
            self.state = PlayState::Stopped;
        }
    }

    /// Halts playback and rewinds to the first frame.
    pub fn stop(&mut self) {
        self.state = PlayState::Stopped;
        self.reset();
    }

    /// Rewinds to the first frame without touching the playback state.
    pub fn reset(&mut self) {
        self.current_time = 0.0;
        self.current_frame = 0;
    }

    pub fn is_finished(&self) -> bool {
        self.state == PlayState::Finished
    }

    pub fn state(&self) -> PlayState {
        self.state
    }

    pub fn current_frame(&self) -> usize {
        self.current_frame
    }
}

/// Index-addressed registry of animations.
#[derive(Default)]
pub struct AnimationStore {
    animations: Vec<Animation>,
}

impl AnimationStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty animation and returns its index.
    pub fn create(&mut self, looped: bool) -> usize {
        self.animations.push(Animation::new(looped));
        self.animations.len() - 1
    }

    pub fn get(&self, index: usize) -> Option<&Animation> {
        self.animations.get(index)
    }

    pub fn add_frame(&mut self, index: usize, texture: TextureId, duration: f32) -> bool {
        match self.animations.get_mut(index) {
            Some(animation) => {
                animation.add_frame(texture, duration);
                true
            }
            None => false,
        }
    }

    pub fn update(&mut self, index: usize, delta_time: f32) {
        if let Some(animation) = self.animations.get_mut(index) {
            animation.update(delta_time);
        }
    }

    pub fn play(&mut self, index: usize) {
        if let Some(animation) = self.animations.get_mut(index) {
            animation.play();
        }
    }

    pub fn pause(&mut self, index: usize) {
        if let Some(animation) = self.animations.get_mut(index) {
            animation.pause();
        }
    }

    pub fn stop(&mut self, index: usize) {
        if let Some(animation) = self.animations.get_mut(index) {
            animation.stop();
        }
    }

    pub fn reset(&mut self, index: usize) {
        if let Some(animation) = self.animations.get_mut(index) {
            animation.reset();
        }
    }

    pub fn current_texture(&self, index: usize) -> TextureId {
        self.animations
            .get(index)
            .map(|animation| animation.current_texture())
            .unwrap_or(TextureId::INVALID)
    }

    /// An unknown index reports finished, so scripts polling a stale index
    /// terminate their wait loops instead of spinning forever.
    pub fn is_finished(&self, index: usize) -> bool {
        self.animations
            .get(index)
            .map(|animation| animation.is_finished())
            .unwrap_or(true)
    }

    pub fn len(&self) -> usize {
        self.animations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.animations.is_empty()
    }

    /// Drops every animation and releases each frame's texture reference.
    pub fn clear(&mut self, textures: &mut TextureStore) {
        for animation in self.animations.drain(..) {
            for frame in &animation.frames {
                textures.release(frame.texture);
            }
        }
    }
}
