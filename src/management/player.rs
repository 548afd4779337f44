use crate::types::{Track, TrackItem};

/// Playback queue backing the `queue` command.
///
/// Holds what would be handed to a player: the current track, the list it came
/// from and whether it is shown and playing. Items are resolved to plain
/// [`Track`]s when the queue is filled.
#[derive(Debug, Clone, Default)]
pub struct PlayerQueue {
    current: Option<Track>,
    queue: Vec<Track>,
    index: usize,
    visible: bool,
    playing: bool,
}

impl PlayerQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Plays a single track outside of any list. The queue is left as is.
    pub fn set_track(&mut self, track: Track) {
        self.current = Some(track);
        self.visible = true;
    }

    /// Replaces the queue and jumps to `index`.
    ///
    /// An out of range index is clamped to the last entry. An empty list
    /// clears the current track.
    pub fn set_queue(&mut self, items: Vec<TrackItem>, index: usize) {
        self.queue = items.into_iter().map(TrackItem::into_track).collect();
        self.index = index.min(self.queue.len().saturating_sub(1));
        self.current = self.queue.get(self.index).cloned();
        self.visible = true;
    }

    /// Advances to the next track, wrapping to the first one.
    pub fn next_track(&mut self) {
        if self.queue.is_empty() {
            return;
        }
        self.index = (self.index + 1) % self.queue.len();
        self.current = self.queue.get(self.index).cloned();
    }

    /// Steps back to the previous track, wrapping to the last one.
    pub fn previous_track(&mut self) {
        if self.queue.is_empty() {
            return;
        }
        self.index = if self.index == 0 {
            self.queue.len() - 1
        } else {
            self.index - 1
        };
        self.current = self.queue.get(self.index).cloned();
    }

    /// Moves `steps` tracks forward, or back when negative, wrapping around
    /// the queue. No-op on an empty queue.
    pub fn skip(&mut self, steps: i64) {
        if self.queue.is_empty() {
            return;
        }
        let len = self.queue.len() as i64;
        let offset = steps.rem_euclid(len);
        self.index = ((self.index as i64 + offset) % len) as usize;
        self.current = self.queue.get(self.index).cloned();
    }

    /// Sets the playing flag, or flips it when no state is given.
    pub fn toggle_play(&mut self, state: Option<bool>) {
        self.playing = state.unwrap_or(!self.playing);
    }

    pub fn hide(&mut self) {
        self.visible = false;
        self.playing = false;
    }

    pub fn show(&mut self) {
        self.visible = true;
    }

    pub fn current(&self) -> Option<&Track> {
        self.current.as_ref()
    }

    pub fn queue(&self) -> &[Track] {
        &self.queue
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }
}
