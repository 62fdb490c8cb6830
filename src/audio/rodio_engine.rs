//! `PlaybackEngine` over a `rodio` output stream and one `Sink` per track.

use std::fs::File;
use std::io::{self, BufReader};
use std::time::Duration;

use rodio::{Decoder, OutputStream, OutputStreamBuilder, Sink};

use crate::library::Track;

use super::engine::{EngineError, PlaybackEngine};

pub struct RodioEngine {
    stream: OutputStream,
    sink: Option<Sink>,
    volume: f32,
}

impl RodioEngine {
    /// Open the default output device.
    pub fn open_default() -> Result<Self, EngineError> {
        let mut stream = OutputStreamBuilder::open_default_stream()
            .map_err(|e| EngineError::Device(e.to_string()))?;
        // rodio logs to stderr when OutputStream is dropped. That's useful in debugging,
        // but noisy for a TUI app.
        stream.log_on_drop(false);

        Ok(Self {
            stream,
            sink: None,
            volume: 1.0,
        })
    }

    fn create_sink(&self, track: &Track) -> Result<Sink, EngineError> {
        let file = File::open(&track.path).map_err(|source| {
            if source.kind() == io::ErrorKind::NotFound {
                EngineError::NotFound(track.path.clone())
            } else {
                EngineError::Open {
                    path: track.path.clone(),
                    source,
                }
            }
        })?;

        let source = Decoder::new(BufReader::new(file)).map_err(|e| EngineError::Decode {
            path: track.path.clone(),
            reason: e.to_string(),
        })?;

        let sink = Sink::connect_new(self.stream.mixer());
        sink.set_volume(self.volume);
        sink.append(source);
        sink.pause();
        Ok(sink)
    }
}

impl PlaybackEngine for RodioEngine {
    fn load(&mut self, track: &Track) -> Result<(), EngineError> {
        // One active track: the old one goes even if the new one fails to open.
        self.stop();
        self.sink = Some(self.create_sink(track)?);
        Ok(())
    }

    fn play(&mut self) {
        if let Some(s) = &self.sink {
            s.play();
        }
    }

    fn pause(&mut self) {
        if let Some(s) = &self.sink {
            s.pause();
        }
    }

    fn unpause(&mut self) {
        self.play();
    }

    fn stop(&mut self) {
        if let Some(s) = self.sink.take() {
            s.stop();
        }
    }

    fn set_volume(&mut self, fraction: f32) {
        self.volume = fraction.clamp(0.0, 1.0);
        if let Some(s) = &self.sink {
            s.set_volume(self.volume);
        }
    }

    fn is_busy(&self) -> bool {
        self.sink.as_ref().is_some_and(|s| !s.empty())
    }

    fn position(&self) -> Result<Duration, EngineError> {
        self.sink
            .as_ref()
            .map(Sink::get_pos)
            .ok_or(EngineError::NothingLoaded)
    }
}
