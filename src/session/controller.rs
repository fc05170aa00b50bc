use std::{sync::Arc, time::Duration};

use log::info;
use serde::Serialize;
use tauri::{AppHandle, Emitter};
use tokio::{sync::Mutex, task::JoinHandle, time};

use anyhow::Result;

use super::cues::StepKind;
use super::sequence::StepSequence;
use super::state::{SessionState, TickOutcome};

/// Display fields of the step currently on screen.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StepView {
    pub name: String,
    pub duration_secs: u32,
    pub instruction: String,
    pub cue: String,
    pub kind: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_area: Option<String>,
}

/// Everything the session screen renders, rebuilt on every read. Kind
/// families all flatten to the same snapshot shape so the command surface
/// stays non-generic.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSnapshot {
    pub routine_id: String,
    pub title: String,
    pub step_count: usize,
    pub current_step_index: usize,
    pub time_remaining_secs: u32,
    pub is_running: bool,
    pub is_paused: bool,
    pub step: StepView,
    pub cue_text: &'static str,
    pub step_progress_percent: f64,
    pub overall_progress_percent: f64,
}

fn build_snapshot<K: StepKind>(
    routine_id: &str,
    sequence: &StepSequence<K>,
    state: &SessionState,
) -> SessionSnapshot {
    let step = sequence.step(state.current_step_index);
    let cue_text = if state.is_active() {
        step.kind.cue_loop().label(state.cue_phase)
    } else {
        "Ready to begin"
    };

    SessionSnapshot {
        routine_id: routine_id.to_string(),
        title: sequence.title().to_string(),
        step_count: sequence.len(),
        current_step_index: state.current_step_index,
        time_remaining_secs: state.time_remaining_secs,
        is_running: state.is_running,
        is_paused: state.is_paused,
        step: StepView {
            name: step.name.clone(),
            duration_secs: step.duration_secs,
            instruction: step.instruction.clone(),
            cue: step.cue.clone(),
            kind: step.kind.label(),
            target_area: step.target_area.clone(),
        },
        cue_text,
        step_progress_percent: state.step_progress_percent(sequence),
        overall_progress_percent: state.overall_progress_percent(sequence),
    }
}

fn emit_snapshot(app_handle: &AppHandle, event: &str, snapshot: SessionSnapshot) {
    let _ = app_handle.emit(event, snapshot);
}

/// Drives one live run of a `StepSequence`: owns the mutable state, the
/// one-second countdown task, and the cosmetic cue-rotation task. Both
/// tasks exist only while the session is actively counting and are aborted
/// on every exit path (pause, reset, completion, teardown), so nothing
/// keeps ticking after the screen is gone.
#[derive(Clone)]
pub struct SessionController<K: StepKind> {
    routine_id: String,
    sequence: Arc<StepSequence<K>>,
    state: Arc<Mutex<SessionState>>,
    app_handle: AppHandle,
    ticker: Arc<Mutex<Option<JoinHandle<()>>>>,
    cue_ticker: Arc<Mutex<Option<JoinHandle<()>>>>,
}

impl<K: StepKind> SessionController<K> {
    pub fn new(
        app_handle: AppHandle,
        routine_id: impl Into<String>,
        sequence: Arc<StepSequence<K>>,
    ) -> Self {
        let state = SessionState::new(&sequence);
        Self {
            routine_id: routine_id.into(),
            sequence,
            state: Arc::new(Mutex::new(state)),
            app_handle,
            ticker: Arc::new(Mutex::new(None)),
            cue_ticker: Arc::new(Mutex::new(None)),
        }
    }

    pub async fn snapshot(&self) -> SessionSnapshot {
        let state = self.state.lock().await;
        build_snapshot(&self.routine_id, &self.sequence, &state)
    }

    pub async fn start(&self) -> SessionSnapshot {
        let snapshot = {
            let mut state = self.state.lock().await;
            state.start();
            build_snapshot(&self.routine_id, &self.sequence, &state)
        };

        self.spawn_ticker().await;
        self.spawn_cue_ticker().await;

        info!("session {} started", self.routine_id);
        emit_snapshot(&self.app_handle, "session-state-changed", snapshot.clone());
        snapshot
    }

    /// Toggle suspension. The tick tasks are torn down while paused and
    /// respawned on resume rather than left idling.
    pub async fn pause(&self) -> SessionSnapshot {
        let snapshot = {
            let mut state = self.state.lock().await;
            state.toggle_pause();
            build_snapshot(&self.routine_id, &self.sequence, &state)
        };

        if snapshot.is_running && !snapshot.is_paused {
            self.spawn_ticker().await;
            self.spawn_cue_ticker().await;
        } else {
            self.cancel_tickers().await;
        }

        emit_snapshot(&self.app_handle, "session-state-changed", snapshot.clone());
        snapshot
    }

    pub async fn reset(&self) -> SessionSnapshot {
        self.cancel_tickers().await;

        let snapshot = {
            let mut state = self.state.lock().await;
            state.reset(&self.sequence);
            build_snapshot(&self.routine_id, &self.sequence, &state)
        };

        emit_snapshot(&self.app_handle, "session-state-changed", snapshot.clone());
        snapshot
    }

    pub async fn skip_to_next(&self) -> SessionSnapshot {
        let snapshot = {
            let mut state = self.state.lock().await;
            state.skip_to_next(&self.sequence);
            build_snapshot(&self.routine_id, &self.sequence, &state)
        };

        emit_snapshot(&self.app_handle, "session-state-changed", snapshot.clone());
        snapshot
    }

    pub async fn jump_to_step(&self, index: usize) -> Result<SessionSnapshot> {
        let snapshot = {
            let mut state = self.state.lock().await;
            state.jump_to_step(&self.sequence, index)?;
            build_snapshot(&self.routine_id, &self.sequence, &state)
        };

        emit_snapshot(&self.app_handle, "session-state-changed", snapshot.clone());
        Ok(snapshot)
    }

    /// Tear down the live run: cancel both tasks. Called when the screen
    /// unmounts; the state itself is dropped with the controller.
    pub async fn teardown(&self) {
        self.cancel_tickers().await;
        info!("session {} torn down", self.routine_id);
    }

    async fn spawn_ticker(&self) {
        let mut ticker_guard = self.ticker.lock().await;
        if let Some(handle) = ticker_guard.take() {
            handle.abort();
        }

        let state = self.state.clone();
        let sequence = self.sequence.clone();
        let routine_id = self.routine_id.clone();
        let app_handle = self.app_handle.clone();

        let handle = tokio::spawn(async move {
            let mut interval = time::interval(Duration::from_secs(1));
            // The first tick of a tokio interval fires immediately.
            interval.tick().await;

            loop {
                interval.tick().await;

                let (outcome, snapshot) = {
                    let mut guard = state.lock().await;
                    if !guard.is_active() {
                        break;
                    }
                    let outcome = guard.tick(&sequence);
                    let snapshot = build_snapshot(&routine_id, &sequence, &guard);
                    (outcome, snapshot)
                };

                emit_snapshot(&app_handle, "session-tick", snapshot.clone());

                if outcome == TickOutcome::Completed {
                    info!("session {routine_id} completed");
                    emit_snapshot(&app_handle, "session-completed", snapshot);
                    break;
                }
            }
        });

        *ticker_guard = Some(handle);
    }

    async fn spawn_cue_ticker(&self) {
        let mut cue_guard = self.cue_ticker.lock().await;
        if let Some(handle) = cue_guard.take() {
            handle.abort();
        }

        let state = self.state.clone();
        let sequence = self.sequence.clone();
        let routine_id = self.routine_id.clone();
        let app_handle = self.app_handle.clone();

        let handle = tokio::spawn(async move {
            loop {
                // Re-read the cue recipe every cycle: the active step (and
                // with it the rotation interval) changes under our feet.
                let cue = {
                    let guard = state.lock().await;
                    if !guard.is_active() {
                        break;
                    }
                    sequence.step(guard.current_step_index).kind.cue_loop()
                };

                if cue.is_static() {
                    time::sleep(Duration::from_millis(1000)).await;
                    continue;
                }

                time::sleep(Duration::from_millis(cue.interval_ms)).await;

                let snapshot = {
                    let mut guard = state.lock().await;
                    if !guard.is_active() {
                        break;
                    }
                    guard.cue_phase = guard.cue_phase.wrapping_add(1);
                    build_snapshot(&routine_id, &sequence, &guard)
                };

                emit_snapshot(&app_handle, "session-cue-changed", snapshot);
            }
        });

        *cue_guard = Some(handle);
    }

    async fn cancel_tickers(&self) {
        if let Some(handle) = self.ticker.lock().await.take() {
            handle.abort();
        }
        if let Some(handle) = self.cue_ticker.lock().await.take() {
            handle.abort();
        }
    }
}
