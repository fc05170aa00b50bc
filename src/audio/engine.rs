use rodio::{OutputStream, Sink};
use serde::{Deserialize, Serialize};
use std::sync::{
    atomic::{AtomicBool, Ordering},
    mpsc::{self, Sender},
    Arc, Mutex,
};
use std::thread;

use super::sources::{Chime, Drone, OceanSwell, Rainfall};

/// Which generator to feed the sink. Carried across the channel into the
/// audio thread, where the non-Send source is actually constructed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "kind")]
pub enum SoundSource {
    Ocean,
    Rain { bright: bool },
    Chime { base_hz: f32 },
    Drone { left_hz: f32, right_hz: f32 },
}

enum AudioCommand {
    Play(SoundSource),
    Stop,
    Pause,
    Resume,
    SetVolume(f32),
}

pub struct AudioEngineHandle {
    tx: Arc<Mutex<Option<Sender<AudioCommand>>>>,
    is_paused: Arc<AtomicBool>,
}

impl AudioEngineHandle {
    pub fn new() -> Self {
        Self {
            tx: Arc::new(Mutex::new(None)),
            is_paused: Arc::new(AtomicBool::new(false)),
        }
    }

    fn ensure_thread(&self) -> Result<Sender<AudioCommand>, String> {
        if let Some(tx) = self.tx.lock().map_err(|e| e.to_string())?.as_ref() {
            return Ok(tx.clone());
        }

        let (tx, rx) = mpsc::channel::<AudioCommand>();
        let is_paused = Arc::clone(&self.is_paused);

        // Dedicated thread holding the non-Send audio objects.
        thread::Builder::new()
            .name("audio-engine".to_string())
            .spawn(move || {
                let mut _stream: Option<OutputStream> = None;
                let mut sink: Option<Sink> = None;

                fn ensure_sink(
                    stream: &mut Option<OutputStream>,
                    sink: &mut Option<Sink>,
                ) -> Result<(), String> {
                    if sink.is_none() {
                        let (s, handle) = OutputStream::try_default()
                            .map_err(|e| format!("Failed to create audio output stream: {}", e))?;
                        let new_sink = Sink::try_new(&handle)
                            .map_err(|e| format!("Failed to create audio sink: {}", e))?;
                        *stream = Some(s);
                        *sink = Some(new_sink);
                    }
                    Ok(())
                }

                while let Ok(cmd) = rx.recv() {
                    match cmd {
                        AudioCommand::Play(source) => {
                            // Replace whatever was playing.
                            if let Some(old) = sink.take() {
                                old.stop();
                            }
                            _stream = None;
                            let _ = ensure_sink(&mut _stream, &mut sink);
                            if let Some(ref s) = sink {
                                match source {
                                    SoundSource::Ocean => s.append(OceanSwell::new()),
                                    SoundSource::Rain { bright } => s.append(Rainfall::new(bright)),
                                    SoundSource::Chime { base_hz } => s.append(Chime::new(base_hz)),
                                    SoundSource::Drone { left_hz, right_hz } => {
                                        s.append(Drone::new(left_hz, right_hz))
                                    }
                                }
                            }
                            is_paused.store(false, Ordering::SeqCst);
                        }
                        AudioCommand::Stop => {
                            if let Some(old) = sink.take() {
                                old.stop();
                            }
                            _stream = None;
                            is_paused.store(false, Ordering::SeqCst);
                        }
                        AudioCommand::Pause => {
                            if let Some(ref s) = sink {
                                s.pause();
                                is_paused.store(true, Ordering::SeqCst);
                            }
                        }
                        AudioCommand::Resume => {
                            if let Some(ref s) = sink {
                                s.play();
                                is_paused.store(false, Ordering::SeqCst);
                            }
                        }
                        AudioCommand::SetVolume(v) => {
                            if let Some(ref s) = sink {
                                s.set_volume(v.clamp(0.0, 1.0));
                            }
                        }
                    }
                }
            })
            .map_err(|e| e.to_string())?;

        let tx_clone = tx.clone();
        *self.tx.lock().map_err(|e| e.to_string())? = Some(tx);
        Ok(tx_clone)
    }

    pub fn play(&self, source: SoundSource) -> Result<(), String> {
        let tx = self.ensure_thread()?;
        tx.send(AudioCommand::Play(source)).map_err(|e| e.to_string())
    }

    pub fn pause(&self) -> Result<(), String> {
        let tx = self.ensure_thread()?;
        tx.send(AudioCommand::Pause).map_err(|e| e.to_string())
    }

    pub fn resume(&self) -> Result<(), String> {
        let tx = self.ensure_thread()?;
        tx.send(AudioCommand::Resume).map_err(|e| e.to_string())
    }

    pub fn stop(&self) -> Result<(), String> {
        if let Ok(Some(tx)) = self.tx.lock().map(|g| g.clone()) {
            let _ = tx.send(AudioCommand::Stop);
        }
        Ok(())
    }

    pub fn set_volume(&self, volume: f32) -> Result<(), String> {
        let tx = self.ensure_thread()?;
        tx.send(AudioCommand::SetVolume(volume))
            .map_err(|e| e.to_string())
    }

    pub fn is_paused(&self) -> bool {
        self.is_paused.load(Ordering::SeqCst)
    }
}
