use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum CaptureError {
    #[error("no media capture requested")]
    NothingRequested,

    #[error("media device unavailable")]
    Unavailable,

    #[error("media device access denied")]
    Denied,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackKind {
    Video,
    Audio,
}

/// A single acquired device track. Hardware is only released once the track
/// is stopped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaptureTrack {
    kind: TrackKind,
    stopped: bool,
}

impl CaptureTrack {
    #[must_use]
    pub fn new(kind: TrackKind) -> Self {
        Self {
            kind,
            stopped: false,
        }
    }

    #[must_use]
    pub fn kind(&self) -> TrackKind {
        self.kind
    }

    #[must_use]
    pub fn is_stopped(&self) -> bool {
        self.stopped
    }

    /// Release the track. Idempotent.
    pub fn stop(&mut self) {
        self.stopped = true;
    }
}

/// A bundle of acquired tracks, one per requested device.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CaptureStream {
    tracks: Vec<CaptureTrack>,
}

impl CaptureStream {
    #[must_use]
    pub fn new(tracks: Vec<CaptureTrack>) -> Self {
        Self { tracks }
    }

    #[must_use]
    pub fn tracks(&self) -> &[CaptureTrack] {
        &self.tracks
    }

    #[must_use]
    pub fn has_video(&self) -> bool {
        self.tracks.iter().any(|t| t.kind() == TrackKind::Video)
    }

    #[must_use]
    pub fn has_audio(&self) -> bool {
        self.tracks.iter().any(|t| t.kind() == TrackKind::Audio)
    }

    /// Stop every track. Idempotent.
    pub fn stop_all(&mut self) {
        for track in &mut self.tracks {
            track.stop();
        }
    }

    #[must_use]
    pub fn is_stopped(&self) -> bool {
        self.tracks.iter().all(CaptureTrack::is_stopped)
    }
}

/// Seam over the platform's media device API.
///
/// Acquisition is awaited before an interview starts; rejection degrades the
/// flow to no capture rather than blocking it.
#[async_trait]
pub trait MediaCapture: Send + Sync {
    /// Request a combined stream for the enabled devices.
    ///
    /// # Errors
    ///
    /// Returns `CaptureError::NothingRequested` when neither device is
    /// enabled, and `Unavailable`/`Denied` when the platform refuses.
    async fn acquire(&self, video: bool, audio: bool) -> Result<CaptureStream, CaptureError>;
}

/// Capture backend with no real hardware behind it; it hands out inert
/// tracks so the interview flow's acquire/stop lifecycle stays exercised.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullCapture;

#[async_trait]
impl MediaCapture for NullCapture {
    async fn acquire(&self, video: bool, audio: bool) -> Result<CaptureStream, CaptureError> {
        if !video && !audio {
            return Err(CaptureError::NothingRequested);
        }
        let mut tracks = Vec::new();
        if video {
            tracks.push(CaptureTrack::new(TrackKind::Video));
        }
        if audio {
            tracks.push(CaptureTrack::new(TrackKind::Audio));
        }
        Ok(CaptureStream::new(tracks))
    }
}
