//! Alarm tone generation. Each profile is a one-second synthesized tone;
//! playback runs on a detached thread so the firing sequence is not held up.

use std::f32::consts::PI;

use crate::models::SoundProfile;

pub const SAMPLE_RATE: u32 = 44_100;
const TONE_SECONDS: f32 = 1.0;
const AMPLITUDE: f32 = 0.5;
/// The pulse profile decays to silence over this long.
const PULSE_DECAY_SECONDS: f32 = 0.5;

/// Synthesize the tone for a profile as mono f32 samples.
pub fn render_tone(profile: SoundProfile) -> Vec<f32> {
    let samples = (SAMPLE_RATE as f32 * TONE_SECONDS) as usize;
    let frequency = profile.frequency_hz();
    (0..samples)
        .map(|i| {
            let t = i as f32 / SAMPLE_RATE as f32;
            (2.0 * PI * frequency * t).sin() * envelope(profile, t)
        })
        .collect()
}

fn envelope(profile: SoundProfile, t: f32) -> f32 {
    match profile {
        SoundProfile::Pulse => {
            if t < PULSE_DECAY_SECONDS {
                AMPLITUDE * (1.0 - t / PULSE_DECAY_SECONDS)
            } else {
                0.0
            }
        }
        _ => AMPLITUDE,
    }
}

/// Play the profile's tone through the default audio output. Runs detached;
/// if no output device is available, fall back to the terminal bell.
#[cfg(feature = "sound")]
pub fn play(profile: SoundProfile) {
    use log::warn;

    let samples = render_tone(profile);
    std::thread::spawn(move || {
        let stream = match rodio::OutputStream::try_default() {
            Ok(stream) => stream,
            Err(e) => {
                warn!("no audio output, falling back to the bell: {e}");
                bell();
                return;
            }
        };
        let (_stream, handle) = stream;
        match rodio::Sink::try_new(&handle) {
            Ok(sink) => {
                sink.append(rodio::buffer::SamplesBuffer::new(1, SAMPLE_RATE, samples));
                sink.sleep_until_end();
            }
            Err(e) => {
                warn!("error playing alarm tone: {e}");
                bell();
            }
        }
    });
}

/// Without the `sound` feature there is no audio backend; ring the bell.
#[cfg(not(feature = "sound"))]
pub fn play(_profile: SoundProfile) {
    bell();
}

fn bell() {
    use std::io::Write;
    print!("\x07");
    std::io::stdout().flush().ok();
}
