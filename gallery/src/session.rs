//! Event loop glue between the gallery and its media element.
//!
//! A session applies user actions to the gallery, executes the media
//! commands it emits, and feeds play results back in as events.

use crate::gallery::Gallery;
use crate::media::MediaItem;
use crate::playback::{MediaCommand, MediaErrorCode, PlayTicket, PlaybackError};
use anyhow::{anyhow, Context};
use futures_util::future::{BoxFuture, FutureExt};
use std::str::FromStr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;

/// The native media element backing direct videos.
pub trait MediaElement: Send + Sync + 'static {
    /// Start playback of `source`. Resolves once the runtime accepts or
    /// refuses the request.
    fn play(&self, source: &str) -> BoxFuture<'static, Result<(), PlaybackError>>;

    fn pause(&self);

    /// Reload `source` from scratch, leaving playback stopped.
    fn reload(&self, source: &str);
}

/// User actions on the gallery.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Next,
    Previous,
    Select(i64),
    TogglePlayback,
    Retry,
    ReportError(MediaErrorCode),
    SourceError,
}

impl FromStr for Action {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split_whitespace();
        let command = parts.next().ok_or_else(|| anyhow!("Empty command"))?;
        let argument = parts.next();

        let action = match (command, argument) {
            ("next", None) => Action::Next,
            ("prev" | "previous", None) => Action::Previous,
            ("select", Some(index)) => Action::Select(
                index
                    .parse()
                    .with_context(|| format!("Invalid index {:?}", index))?,
            ),
            ("play" | "toggle", None) => Action::TogglePlayback,
            ("retry", None) => Action::Retry,
            ("error", Some(code)) => Action::ReportError(code.parse()?),
            ("source-error", None) => Action::SourceError,
            _ => return Err(anyhow!("Unknown command {:?}", s.trim())),
        };

        if parts.next().is_some() {
            return Err(anyhow!("Too many arguments in {:?}", s.trim()));
        }
        Ok(action)
    }
}

/// Events consumed by a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GalleryEvent {
    Action(Action),
    /// Outcome of a play attempt issued earlier.
    PlayResolved {
        ticket: PlayTicket,
        result: Result<(), PlaybackError>,
    },
}

/// Create the event channel for a session.
pub fn channel() -> (mpsc::Sender<GalleryEvent>, mpsc::Receiver<GalleryEvent>) {
    mpsc::channel(100)
}

/// A gallery bound to a media element.
pub struct Session<E: MediaElement> {
    gallery: Gallery,
    element: Arc<E>,
    events: mpsc::Sender<GalleryEvent>,
}

impl<E: MediaElement> Session<E> {
    pub fn new(gallery: Gallery, element: Arc<E>, events: mpsc::Sender<GalleryEvent>) -> Self {
        Self {
            gallery,
            element,
            events,
        }
    }

    pub fn gallery(&self) -> &Gallery {
        &self.gallery
    }

    /// Apply one event. Must be called from within a tokio runtime.
    pub fn handle(&mut self, event: GalleryEvent) {
        match event {
            GalleryEvent::Action(action) => {
                if let Some(command) = self.apply(action) {
                    self.execute(command);
                }
            }
            GalleryEvent::PlayResolved { ticket, result } => {
                self.gallery.resolve_play(ticket, result);
            }
        }
    }

    fn apply(&mut self, action: Action) -> Option<MediaCommand> {
        match action {
            Action::Next => {
                self.gallery.select_next();
                None
            }
            Action::Previous => {
                self.gallery.select_previous();
                None
            }
            Action::Select(index) => {
                self.gallery.select_index(index);
                None
            }
            Action::TogglePlayback => self.gallery.toggle_playback(),
            Action::Retry => self.gallery.retry_playback(),
            Action::ReportError(code) => {
                self.gallery.report_playback_error(code);
                None
            }
            Action::SourceError => {
                self.gallery.report_source_error();
                None
            }
        }
    }

    fn execute(&self, command: MediaCommand) {
        let Some(source) = self.gallery.selected_item().and_then(MediaItem::direct_source) else {
            return;
        };

        match command {
            MediaCommand::Play(ticket) => {
                let attempt = self.element.play(source);
                let events = self.events.clone();
                tokio::spawn(async move {
                    let result = attempt.await;
                    if events
                        .send(GalleryEvent::PlayResolved { ticket, result })
                        .await
                        .is_err()
                    {
                        tracing::debug!("Session closed before play attempt resolved");
                    }
                });
            }
            MediaCommand::Pause => self.element.pause(),
            MediaCommand::Reload => self.element.reload(source),
        }
    }
}

/// Media element that pretends to play after a fixed delay.
#[derive(Debug, Default)]
pub struct SimulatedElement {
    delay: Duration,
    reject: bool,
    reloads: AtomicUsize,
}

impl SimulatedElement {
    pub fn new(delay: Duration, reject: bool) -> Self {
        Self {
            delay,
            reject,
            reloads: AtomicUsize::new(0),
        }
    }

    /// Number of reloads requested so far.
    pub fn reloads(&self) -> usize {
        self.reloads.load(Ordering::SeqCst)
    }
}

impl MediaElement for SimulatedElement {
    fn play(&self, source: &str) -> BoxFuture<'static, Result<(), PlaybackError>> {
        tracing::debug!("Simulated play of {}", source);
        let delay = self.delay;
        let reject = self.reject;
        async move {
            tokio::time::sleep(delay).await;
            if reject {
                Err(PlaybackError::StartRejected {
                    reason: "playback blocked by autoplay policy".into(),
                })
            } else {
                Ok(())
            }
        }
        .boxed()
    }

    fn pause(&self) {
        tracing::debug!("Simulated pause");
    }

    fn reload(&self, source: &str) {
        tracing::debug!("Simulated reload of {}", source);
        self.reloads.fetch_add(1, Ordering::SeqCst);
    }
}
