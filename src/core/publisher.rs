//! State Publisher: pushes full facelet snapshots to whoever is watching
//!
//! Every emission is a complete state, never a delta. Transport failures are
//! logged and swallowed so a dead viewer can never stall the walkthrough.

use std::io::Write;

use tokio::sync::broadcast;
use tracing::{debug, info, warn};

use crate::types::FaceletState;

/// Receives a snapshot after construction and after every committed move
pub trait StatePublisher {
    fn publish(&mut self, state: &FaceletState);
}

impl<P: StatePublisher + ?Sized> StatePublisher for &mut P {
    fn publish(&mut self, state: &FaceletState) {
        (**self).publish(state);
    }
}

impl<P: StatePublisher + ?Sized> StatePublisher for Box<P> {
    fn publish(&mut self, state: &FaceletState) {
        (**self).publish(state);
    }
}

/// Keeps every snapshot in memory, in emission order
#[derive(Debug, Default, Clone)]
pub struct RecordingPublisher {
    history: Vec<FaceletState>,
}

impl RecordingPublisher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshots published so far
    pub fn history(&self) -> &[FaceletState] {
        &self.history
    }

    /// Most recent snapshot
    pub fn latest(&self) -> Option<&FaceletState> {
        self.history.last()
    }

    pub fn len(&self) -> usize {
        self.history.len()
    }

    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }
}

impl StatePublisher for RecordingPublisher {
    fn publish(&mut self, state: &FaceletState) {
        self.history.push(*state);
    }
}

/// Fans snapshots out over a tokio broadcast channel (WebSocket viewers)
#[derive(Debug, Clone)]
pub struct BroadcastPublisher {
    tx: broadcast::Sender<FaceletState>,
}

impl BroadcastPublisher {
    pub fn new(tx: broadcast::Sender<FaceletState>) -> Self {
        Self { tx }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<FaceletState> {
        self.tx.subscribe()
    }
}

impl StatePublisher for BroadcastPublisher {
    fn publish(&mut self, state: &FaceletState) {
        // No receivers is fine: nobody is watching yet
        if let Ok(n) = self.tx.send(*state) {
            debug!(receivers = n, "snapshot broadcast");
        }
    }
}

/// Writes one JSON object per line to any writer, e.g. a viewer's TCP socket
#[derive(Debug)]
pub struct JsonLinePublisher<W: Write> {
    writer: Option<W>,
}

impl<W: Write> JsonLinePublisher<W> {
    pub fn new(writer: W) -> Self {
        Self { writer: Some(writer) }
    }

    /// Writer is still usable
    pub fn is_connected(&self) -> bool {
        self.writer.is_some()
    }

    pub fn into_inner(self) -> Option<W> {
        self.writer
    }
}

impl<W: Write> StatePublisher for JsonLinePublisher<W> {
    fn publish(&mut self, state: &FaceletState) {
        let Some(writer) = self.writer.as_mut() else {
            return;
        };
        let result = serde_json::to_string(state)
            .map_err(std::io::Error::other)
            .and_then(|line| {
                writer.write_all(line.as_bytes())?;
                writer.write_all(b"\n")?;
                writer.flush()
            });
        if let Err(e) = result {
            warn!(error = %e, "viewer write failed, continuing without visual updates");
            self.writer = None;
        }
    }
}

/// Logs each snapshot through tracing
#[derive(Debug, Default, Clone, Copy)]
pub struct LogPublisher;

impl StatePublisher for LogPublisher {
    fn publish(&mut self, state: &FaceletState) {
        info!(solved = state.is_solved(), "cube state\n{}", state);
    }
}

/// Publishes to several sinks in turn
#[derive(Default)]
pub struct FanoutPublisher {
    sinks: Vec<Box<dyn StatePublisher + Send>>,
}

impl FanoutPublisher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, sink: impl StatePublisher + Send + 'static) -> Self {
        self.sinks.push(Box::new(sink));
        self
    }

    pub fn len(&self) -> usize {
        self.sinks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sinks.is_empty()
    }
}

impl StatePublisher for FanoutPublisher {
    fn publish(&mut self, state: &FaceletState) {
        for sink in &mut self.sinks {
            sink.publish(state);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::engine;
    use crate::types::{Face, Move};

    #[test]
    fn test_recording_keeps_order() {
        let mut publisher = RecordingPublisher::new();
        let first = FaceletState::solved();
        let second = engine::apply(&first, Move::clockwise(Face::U));
        publisher.publish(&first);
        publisher.publish(&second);
        assert_eq!(publisher.history(), &[first, second]);
        assert_eq!(publisher.latest(), Some(&second));
    }

    #[test]
    fn test_json_lines() {
        let mut publisher = JsonLinePublisher::new(Vec::new());
        publisher.publish(&FaceletState::solved());
        publisher.publish(&FaceletState::solved());
        let bytes = publisher.into_inner().unwrap();
        let text = String::from_utf8(bytes).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        let parsed: FaceletState = serde_json::from_str(lines[0]).unwrap();
        assert!(parsed.is_solved());
    }

    struct BrokenPipe;

    impl Write for BrokenPipe {
        fn write(&mut self, _: &[u8]) -> std::io::Result<usize> {
            Err(std::io::Error::new(std::io::ErrorKind::BrokenPipe, "gone"))
        }
        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_failed_writer_is_dropped() {
        let mut publisher = JsonLinePublisher::new(BrokenPipe);
        publisher.publish(&FaceletState::solved());
        assert!(!publisher.is_connected());
        publisher.publish(&FaceletState::solved());
    }

    #[test]
    fn test_broadcast_delivers_independent_copies() {
        let (tx, _) = broadcast::channel(8);
        let mut publisher = BroadcastPublisher::new(tx);
        let mut a = publisher.subscribe();
        let mut b = publisher.subscribe();
        publisher.publish(&FaceletState::solved());
        assert!(a.try_recv().unwrap().is_solved());
        assert!(b.try_recv().unwrap().is_solved());
    }

    #[test]
    fn test_fanout_reaches_every_sink() {
        let (tx, _) = broadcast::channel(8);
        let broadcast = BroadcastPublisher::new(tx);
        let mut rx = broadcast.subscribe();
        let mut fanout = FanoutPublisher::new().with(broadcast).with(LogPublisher);
        assert_eq!(fanout.len(), 2);
        fanout.publish(&FaceletState::solved());
        assert!(rx.try_recv().is_ok());
    }
}
