//! Output-device streaming and the progress clock.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::StreamConfig;
use crossbeam_channel::{bounded, Receiver};
use thiserror::Error;
use tracing::{error, info};

use repojam_compose::{ProgressMark, ProgressSignal};
use repojam_synth::TrackBuffer;

/// Seconds of silence before the first beat, so the stream is running and
/// stable when beat zero arrives.
pub const LEAD_IN_SECONDS: f64 = 0.1;

/// How often the progress clock wakes to check for due marks.
const PROGRESS_TICK: Duration = Duration::from_millis(10);

#[derive(Debug, Error)]
pub enum PlayError {
    #[error("no audio output device found")]
    NoDevice,
    #[error("failed to get output config: {0}")]
    Config(String),
    #[error("failed to build output stream: {0}")]
    Stream(String),
    #[error("resampling failed: {0}")]
    Resample(String),
}

/// A running playback of one track.
///
/// Dropping the session stops the audio. Progress callbacks run on a
/// dedicated thread that walks the mark schedule against a monotonic clock;
/// they are driven by wall time, not by audio-buffer position, so a coarse
/// device buffer cannot make beats stutter.
pub struct PlaybackSession {
    stop_flag: Arc<AtomicBool>,
    done_rx: Receiver<()>,
    _stream: cpal::Stream,
}

impl PlaybackSession {
    /// Starts playing `track` on the default output device.
    ///
    /// `marks` must be sorted by time (the composer emits them that way);
    /// `on_progress` fires once per mark, in order, from the progress thread.
    pub fn start<F>(
        track: &TrackBuffer,
        marks: Vec<ProgressMark>,
        mut on_progress: F,
    ) -> Result<Self, PlayError>
    where
        F: FnMut(ProgressSignal) + Send + 'static,
    {
        let host = cpal::default_host();
        let device = host.default_output_device().ok_or(PlayError::NoDevice)?;
        let supported_config = device
            .default_output_config()
            .map_err(|e| PlayError::Config(e.to_string()))?;

        let device_sample_rate = supported_config.sample_rate().0;
        let channels = supported_config.channels() as usize;

        info!(
            device = %device.name().unwrap_or_default(),
            sample_rate = device_sample_rate,
            channels,
            duration = track.duration_seconds(),
            "starting playback"
        );

        // Lead-in silence, then the rendered track
        let lead_in = (LEAD_IN_SECONDS * track.sample_rate as f64).round() as usize;
        let mut mono = vec![0.0f32; lead_in];
        mono.extend(track.to_f32());

        let mono = resample_if_needed(&mono, track.sample_rate, device_sample_rate)?;

        // Replicate mono across the device's channels
        let output: Vec<f32> = mono
            .iter()
            .flat_map(|&s| std::iter::repeat(s).take(channels))
            .collect();

        let samples = Arc::new(output);
        let total_samples = samples.len();
        let position = Arc::new(AtomicUsize::new(0));
        let stop_flag = Arc::new(AtomicBool::new(false));

        let (done_tx, done_rx) = bounded(1);

        let config: StreamConfig = supported_config.into();
        let samples_cb = samples.clone();
        let position_cb = position.clone();
        let stop_cb = stop_flag.clone();

        let stream = device
            .build_output_stream(
                &config,
                move |data: &mut [f32], _: &cpal::OutputCallbackInfo| {
                    if stop_cb.load(Ordering::SeqCst) {
                        data.fill(0.0);
                        return;
                    }
                    let pos = position_cb.load(Ordering::SeqCst);
                    for (i, sample) in data.iter_mut().enumerate() {
                        *sample = samples_cb.get(pos + i).copied().unwrap_or(0.0);
                    }
                    let new_pos = (pos + data.len()).min(total_samples);
                    position_cb.store(new_pos, Ordering::SeqCst);
                },
                move |err| error!("playback stream error: {}", err),
                None,
            )
            .map_err(|e| PlayError::Stream(e.to_string()))?;

        stream.play().map_err(|e| PlayError::Stream(e.to_string()))?;

        // Progress clock: walk the mark schedule against wall time, then
        // wait for the device to drain before signalling completion.
        let stop_clock = stop_flag.clone();
        let position_clock = position;
        let track_duration = track.duration_seconds();
        thread::spawn(move || {
            let started = Instant::now();
            let mut pending = marks.into_iter();
            let mut next = pending.next();

            let timeout = Duration::from_secs_f64(LEAD_IN_SECONDS + track_duration + 2.0);
            while !stop_clock.load(Ordering::SeqCst) && started.elapsed() < timeout {
                let now = started.elapsed().as_secs_f64();
                while let Some(mark) = next {
                    if now < LEAD_IN_SECONDS + mark.time {
                        next = Some(mark);
                        break;
                    }
                    on_progress(mark.signal);
                    next = pending.next();
                }
                if next.is_none() && position_clock.load(Ordering::SeqCst) >= total_samples {
                    break;
                }
                thread::sleep(PROGRESS_TICK);
            }
            let _ = done_tx.send(());
        });

        Ok(Self {
            stop_flag,
            done_rx,
            _stream: stream,
        })
    }

    /// Stops playback; the progress thread winds down on its next tick.
    pub fn stop(&self) {
        self.stop_flag.store(true, Ordering::SeqCst);
    }

    /// Blocks until the track finishes or [`stop`](Self::stop) is called.
    pub fn wait(self) {
        let _ = self.done_rx.recv();
    }

    /// True once the track has finished or been stopped.
    pub fn is_done(&self) -> bool {
        !self.done_rx.is_empty()
    }
}

impl Drop for PlaybackSession {
    fn drop(&mut self) {
        self.stop_flag.store(true, Ordering::SeqCst);
    }
}

fn resample_if_needed(
    samples: &[f32],
    from_rate: u32,
    to_rate: u32,
) -> Result<Vec<f32>, PlayError> {
    if from_rate == to_rate || samples.is_empty() {
        return Ok(samples.to_vec());
    }

    use rubato::{
        Resampler, SincFixedIn, SincInterpolationParameters, SincInterpolationType,
        WindowFunction,
    };

    let params = SincInterpolationParameters {
        sinc_len: 256,
        f_cutoff: 0.95,
        interpolation: SincInterpolationType::Linear,
        oversampling_factor: 256,
        window: WindowFunction::BlackmanHarris2,
    };

    let mut resampler = SincFixedIn::<f32>::new(
        to_rate as f64 / from_rate as f64,
        2.0,
        params,
        samples.len(),
        1,
    )
    .map_err(|e| PlayError::Resample(e.to_string()))?;

    let input = vec![samples.to_vec()];
    let output = resampler
        .process(&input, None)
        .map_err(|e| PlayError::Resample(e.to_string()))?;

    Ok(output.into_iter().flatten().collect())
}
