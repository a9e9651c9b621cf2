use std::{
    sync::mpsc::{self, Receiver, Sender},
    thread,
    time::Duration,
};

use rodio::{source::SineWave, OutputStream, Sink, Source};

use crate::config::Tone;

/// Owns the audio output on its own thread, the output stream can't leave the
/// thread that opened it.
#[derive(Debug)]
pub struct TonePlayer {
    sender: Sender<Tone>,
}

impl TonePlayer {
    #[must_use]
    pub fn spawn() -> Self {
        let (sender, requests) = mpsc::channel();
        thread::spawn(move || play_tones(&requests));
        Self { sender }
    }

    pub fn play(&self, tone: Tone) {
        if self.sender.send(tone).is_err() {
            log::warn!("tone player isn't running, alarm is silent");
        }
    }
}

fn play_tones(requests: &Receiver<Tone>) {
    let (_stream, handle) = match OutputStream::try_default() {
        Ok(output) => output,
        Err(e) => {
            log::error!("couldn't open audio output: {e}");
            return;
        }
    };
    // ends once the player is dropped
    for tone in requests {
        match Sink::try_new(&handle) {
            Ok(sink) => {
                sink.append(
                    SineWave::new(tone.frequency)
                        .take_duration(Duration::from_millis(tone.duration_ms))
                        .amplify(tone.volume),
                );
                // let it finish on its own
                sink.detach();
            }
            Err(e) => log::error!("couldn't play alarm tone: {e}"),
        }
    }
}
