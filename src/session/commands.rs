use log::info;
use tauri::{AppHandle, State};

use crate::catalog::RoutineSteps;
use crate::AppState;

use super::controller::{SessionController, SessionSnapshot};
use super::cues::{Difficulty, ExerciseKind, StretchIntensity};

/// The one live session, if any. Each kind family needs its own controller
/// type, so the slot is an enum; the macro below folds the families back
/// into a single call site since every controller exposes the same surface.
pub enum ActiveSession {
    Exercise(SessionController<ExerciseKind>),
    Yoga(SessionController<Difficulty>),
    Stretch(SessionController<StretchIntensity>),
}

macro_rules! with_controller {
    ($session:expr, $ctrl:ident => $body:expr) => {
        match $session {
            ActiveSession::Exercise($ctrl) => $body,
            ActiveSession::Yoga($ctrl) => $body,
            ActiveSession::Stretch($ctrl) => $body,
        }
    };
}

impl ActiveSession {
    fn open(app_handle: AppHandle, routine_id: &str, steps: &RoutineSteps) -> Self {
        match steps {
            RoutineSteps::Exercise(seq) => ActiveSession::Exercise(SessionController::new(
                app_handle,
                routine_id,
                seq.clone(),
            )),
            RoutineSteps::Yoga(seq) => {
                ActiveSession::Yoga(SessionController::new(app_handle, routine_id, seq.clone()))
            }
            RoutineSteps::Stretch(seq) => {
                ActiveSession::Stretch(SessionController::new(app_handle, routine_id, seq.clone()))
            }
        }
    }

    async fn snapshot(&self) -> SessionSnapshot {
        with_controller!(self, ctrl => ctrl.snapshot().await)
    }

    async fn teardown(&self) {
        with_controller!(self, ctrl => ctrl.teardown().await)
    }
}

/// Load a routine into the session slot, stopped at its first step. Any
/// session already open is torn down first; there is only ever one.
#[tauri::command]
pub async fn open_session(
    app_handle: AppHandle,
    state: State<'_, AppState>,
    routine_id: String,
) -> Result<SessionSnapshot, String> {
    let routine = state
        .catalog
        .get(&routine_id)
        .ok_or_else(|| format!("unknown routine '{routine_id}'"))?;

    let mut slot = state.session.lock().await;
    if let Some(previous) = slot.take() {
        previous.teardown().await;
    }

    info!("opening session for routine {routine_id}");
    let session = ActiveSession::open(app_handle, routine.id, &routine.steps);
    let snapshot = session.snapshot().await;
    *slot = Some(session);
    Ok(snapshot)
}

#[tauri::command]
pub async fn close_session(state: State<'_, AppState>) -> Result<(), String> {
    let mut slot = state.session.lock().await;
    if let Some(session) = slot.take() {
        session.teardown().await;
    }
    Ok(())
}

#[tauri::command]
pub async fn session_start(state: State<'_, AppState>) -> Result<SessionSnapshot, String> {
    let slot = state.session.lock().await;
    let session = slot.as_ref().ok_or("no session is open")?;
    Ok(with_controller!(session, ctrl => ctrl.start().await))
}

#[tauri::command]
pub async fn session_pause(state: State<'_, AppState>) -> Result<SessionSnapshot, String> {
    let slot = state.session.lock().await;
    let session = slot.as_ref().ok_or("no session is open")?;
    Ok(with_controller!(session, ctrl => ctrl.pause().await))
}

#[tauri::command]
pub async fn session_reset(state: State<'_, AppState>) -> Result<SessionSnapshot, String> {
    let slot = state.session.lock().await;
    let session = slot.as_ref().ok_or("no session is open")?;
    Ok(with_controller!(session, ctrl => ctrl.reset().await))
}

#[tauri::command]
pub async fn session_skip(state: State<'_, AppState>) -> Result<SessionSnapshot, String> {
    let slot = state.session.lock().await;
    let session = slot.as_ref().ok_or("no session is open")?;
    Ok(with_controller!(session, ctrl => ctrl.skip_to_next().await))
}

#[tauri::command]
pub async fn session_jump(
    state: State<'_, AppState>,
    step_index: usize,
) -> Result<SessionSnapshot, String> {
    let slot = state.session.lock().await;
    let session = slot.as_ref().ok_or("no session is open")?;
    with_controller!(session, ctrl => ctrl.jump_to_step(step_index).await)
        .map_err(|e| e.to_string())
}

#[tauri::command]
pub async fn get_session_state(state: State<'_, AppState>) -> Result<SessionSnapshot, String> {
    let slot = state.session.lock().await;
    let session = slot.as_ref().ok_or("no session is open")?;
    Ok(session.snapshot().await)
}
