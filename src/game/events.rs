/// Something the outside world may want to react to, such as by playing a
/// sound
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    Ate,
    Crashed,
}

/// Receives events emitted while the game advances
pub trait EventSink {
    fn notify(&mut self, event: GameEvent);
}

impl EventSink for Vec<GameEvent> {
    fn notify(&mut self, event: GameEvent) {
        self.push(event);
    }
}
