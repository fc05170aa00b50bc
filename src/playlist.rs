//! Fixed relaxation playlist played through the audio engine. Track order
//! is the playlist; shuffle and repeat only change how the next index is
//! chosen, never the list itself.

use rand::Rng;
use serde::Serialize;
use std::sync::Mutex;
use tauri::State;

use crate::audio::SoundSource;
use crate::AppState;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Track {
    pub id: &'static str,
    pub title: &'static str,
    pub artist: &'static str,
    pub category: &'static str,
    pub duration_secs: u32,
    pub source: SoundSource,
}

pub const TRACKS: &[Track] = &[
    Track {
        id: "ocean-waves",
        title: "Ocean Waves",
        artist: "Nature Sounds",
        category: "Nature",
        duration_secs: 180,
        source: SoundSource::Ocean,
    },
    Track {
        id: "forest-rain",
        title: "Forest Rain",
        artist: "Peaceful Mind",
        category: "Nature",
        duration_secs: 240,
        source: SoundSource::Rain { bright: false },
    },
    Track {
        id: "meditation-bell",
        title: "Meditation Bell",
        artist: "Zen Garden",
        category: "Meditation",
        duration_secs: 120,
        source: SoundSource::Chime { base_hz: 523.25 },
    },
    Track {
        id: "soft-piano",
        title: "Soft Piano",
        artist: "Relaxing Music",
        category: "Instrumental",
        duration_secs: 200,
        source: SoundSource::Chime { base_hz: 261.63 },
    },
    Track {
        id: "mountain-stream",
        title: "Mountain Stream",
        artist: "Nature Therapy",
        category: "Nature",
        duration_secs: 300,
        source: SoundSource::Rain { bright: true },
    },
    Track {
        id: "ambient-space",
        title: "Ambient Space",
        artist: "Cosmic Calm",
        category: "Ambient",
        duration_secs: 280,
        source: SoundSource::Drone {
            left_hz: 110.0,
            right_hz: 114.0,
        },
    },
];

#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerState {
    pub current_index: usize,
    pub is_playing: bool,
    pub is_repeat: bool,
    pub is_shuffle: bool,
    pub volume: f32,
}

impl Default for PlayerState {
    fn default() -> Self {
        Self {
            current_index: 0,
            is_playing: false,
            is_repeat: false,
            is_shuffle: false,
            volume: 0.7,
        }
    }
}

impl PlayerState {
    /// Pick the index that follows `current_index`. Repeat replays the
    /// current track; shuffle draws a different random track; otherwise
    /// advance in order, wrapping at the end.
    pub fn next_index(&self) -> usize {
        if self.is_repeat {
            return self.current_index;
        }
        if self.is_shuffle && TRACKS.len() > 1 {
            let mut rng = rand::thread_rng();
            loop {
                let candidate = rng.gen_range(0..TRACKS.len());
                if candidate != self.current_index {
                    return candidate;
                }
            }
        }
        (self.current_index + 1) % TRACKS.len()
    }

    pub fn previous_index(&self) -> usize {
        if self.is_repeat {
            return self.current_index;
        }
        (self.current_index + TRACKS.len() - 1) % TRACKS.len()
    }
}

#[derive(Default)]
pub struct PlaylistStore {
    state: Mutex<PlayerState>,
}

impl PlaylistStore {
    pub fn snapshot(&self) -> PlayerState {
        *self.state.lock().unwrap()
    }

    pub fn update<R>(&self, f: impl FnOnce(&mut PlayerState) -> R) -> R {
        let mut state = self.state.lock().unwrap();
        f(&mut state)
    }
}

fn start_track(state: &State<'_, AppState>, index: usize) -> Result<PlayerState, String> {
    let track = TRACKS.get(index).ok_or("track index out of range")?;
    state.audio.play(track.source)?;
    let snapshot = state.playlist.update(|player| {
        player.current_index = index;
        player.is_playing = true;
        *player
    });
    state.audio.set_volume(snapshot.volume)?;
    Ok(snapshot)
}

#[tauri::command]
pub fn list_tracks() -> Vec<Track> {
    TRACKS.to_vec()
}

#[tauri::command]
pub fn get_player_state(state: State<'_, AppState>) -> PlayerState {
    state.playlist.snapshot()
}

#[tauri::command]
pub fn play_track(state: State<'_, AppState>, track_id: String) -> Result<PlayerState, String> {
    let index = TRACKS
        .iter()
        .position(|track| track.id == track_id)
        .ok_or_else(|| format!("unknown track '{track_id}'"))?;
    start_track(&state, index)
}

#[tauri::command]
pub fn toggle_playback(state: State<'_, AppState>) -> Result<PlayerState, String> {
    let player = state.playlist.snapshot();
    if player.is_playing {
        state.audio.pause()?;
        Ok(state.playlist.update(|p| {
            p.is_playing = false;
            *p
        }))
    } else if state.audio.is_paused() {
        state.audio.resume()?;
        Ok(state.playlist.update(|p| {
            p.is_playing = true;
            *p
        }))
    } else {
        start_track(&state, player.current_index)
    }
}

#[tauri::command]
pub fn next_track(state: State<'_, AppState>) -> Result<PlayerState, String> {
    let index = state.playlist.snapshot().next_index();
    start_track(&state, index)
}

#[tauri::command]
pub fn previous_track(state: State<'_, AppState>) -> Result<PlayerState, String> {
    let index = state.playlist.snapshot().previous_index();
    start_track(&state, index)
}

#[tauri::command]
pub fn stop_playback(state: State<'_, AppState>) -> Result<PlayerState, String> {
    state.audio.stop()?;
    Ok(state.playlist.update(|p| {
        p.is_playing = false;
        *p
    }))
}

#[tauri::command]
pub fn set_volume(state: State<'_, AppState>, volume: f32) -> Result<PlayerState, String> {
    let volume = volume.clamp(0.0, 1.0);
    state.audio.set_volume(volume)?;
    Ok(state.playlist.update(|p| {
        p.volume = volume;
        *p
    }))
}

#[tauri::command]
pub fn toggle_repeat(state: State<'_, AppState>) -> PlayerState {
    state.playlist.update(|p| {
        p.is_repeat = !p.is_repeat;
        *p
    })
}

#[tauri::command]
pub fn toggle_shuffle(state: State<'_, AppState>) -> PlayerState {
    state.playlist.update(|p| {
        p.is_shuffle = !p.is_shuffle;
        *p
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn playlist_has_six_tracks_with_unique_ids() {
        assert_eq!(TRACKS.len(), 6);
        let mut ids: Vec<_> = TRACKS.iter().map(|t| t.id).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), 6);
    }

    #[test]
    fn next_wraps_around_in_order() {
        let mut player = PlayerState::default();
        player.current_index = TRACKS.len() - 1;
        assert_eq!(player.next_index(), 0);
    }

    #[test]
    fn previous_wraps_backward() {
        let player = PlayerState::default();
        assert_eq!(player.previous_index(), TRACKS.len() - 1);
    }

    #[test]
    fn repeat_replays_current_track() {
        let mut player = PlayerState::default();
        player.is_repeat = true;
        player.current_index = 3;
        assert_eq!(player.next_index(), 3);
        assert_eq!(player.previous_index(), 3);
    }

    #[test]
    fn shuffle_never_picks_the_current_track() {
        let mut player = PlayerState::default();
        player.is_shuffle = true;
        player.current_index = 2;
        for _ in 0..100 {
            assert_ne!(player.next_index(), 2);
        }
    }
}
