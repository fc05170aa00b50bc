mod audio;
mod catalog;
mod chat;
mod playlist;
mod profile;
mod session;
mod tasks;

use audio::AudioEngineHandle;
use catalog::{get_routine, list_routines, Catalog};
use chat::{get_chat_history, get_suggested_prompts, send_chat_message, ChatHistory};
use playlist::{
    get_player_state, list_tracks, next_track, play_track, previous_track, set_volume,
    stop_playback, toggle_playback, toggle_repeat, toggle_shuffle, PlaylistStore,
};
use profile::{clear_profile, get_profile, save_profile, ProfileStore};
use session::commands::{
    close_session, get_session_state, open_session, session_jump, session_pause, session_reset,
    session_skip, session_start, ActiveSession,
};
use tasks::{add_task, delete_task, list_tasks, task_stats, toggle_task, TaskStore};
use tauri::Manager;
use tokio::sync::Mutex;

pub(crate) struct AppState {
    pub(crate) audio: AudioEngineHandle,
    pub(crate) catalog: Catalog,
    pub(crate) session: Mutex<Option<ActiveSession>>,
    pub(crate) tasks: TaskStore,
    pub(crate) chat: ChatHistory,
    pub(crate) profile: ProfileStore,
    pub(crate) playlist: PlaylistStore,
}

#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
    // Initialize logging (reads RUST_LOG env var)
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    log::info!("MindEase starting up...");

    tauri::Builder::default()
        .plugin(tauri_plugin_opener::init())
        .setup(|app| {
            let result = (|| -> anyhow::Result<()> {
                let app_data_dir = app
                    .path()
                    .app_data_dir()
                    .map_err(|err| anyhow::anyhow!(err))?;
                std::fs::create_dir_all(&app_data_dir)?;

                let catalog = Catalog::build()?;

                let profile_path = app_data_dir.join("profile.json");
                let profile_store = ProfileStore::new(profile_path)?;

                app.manage(AppState {
                    audio: AudioEngineHandle::new(),
                    catalog,
                    session: Mutex::new(None),
                    tasks: TaskStore::default(),
                    chat: ChatHistory::default(),
                    profile: profile_store,
                    playlist: PlaylistStore::default(),
                });

                Ok(())
            })();

            result.map_err(|err| err.into())
        })
        .invoke_handler(tauri::generate_handler![
            list_routines,
            get_routine,
            open_session,
            close_session,
            session_start,
            session_pause,
            session_reset,
            session_skip,
            session_jump,
            get_session_state,
            add_task,
            toggle_task,
            delete_task,
            list_tasks,
            task_stats,
            get_profile,
            save_profile,
            clear_profile,
            send_chat_message,
            get_chat_history,
            get_suggested_prompts,
            list_tracks,
            get_player_state,
            play_track,
            toggle_playback,
            next_track,
            previous_track,
            stop_playback,
            set_volume,
            toggle_repeat,
            toggle_shuffle,
        ])
        .run(tauri::generate_context!())
        .expect("error while running tauri application");
}
