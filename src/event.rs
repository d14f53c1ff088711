use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use crossterm::event::{self, Event, KeyEvent};

pub const TICK_RATE: Duration = Duration::from_millis(100);

#[derive(Clone, Debug)]
pub enum AppEvent {
    Key(KeyEvent),
    Tick,
    Resize(u16, u16),
}

pub struct EventHandler {
    rx: mpsc::Receiver<AppEvent>,
    tick_rate: Duration,
    _tx: mpsc::Sender<AppEvent>,
}

impl EventHandler {
    /// Spawn the terminal reader. A `Tick` is sent whenever no input
    /// arrived within `tick_rate`.
    pub fn new(tick_rate: Duration) -> Self {
        let (tx, rx) = mpsc::channel();
        let _tx = tx.clone();

        thread::spawn(move || {
            loop {
                if event::poll(tick_rate).unwrap_or(false) {
                    match event::read() {
                        Ok(Event::Key(key)) => {
                            if tx.send(AppEvent::Key(key)).is_err() {
                                return;
                            }
                        }
                        Ok(Event::Resize(w, h)) => {
                            if tx.send(AppEvent::Resize(w, h)).is_err() {
                                return;
                            }
                        }
                        _ => {}
                    }
                } else if tx.send(AppEvent::Tick).is_err() {
                    return;
                }
            }
        });

        Self { rx, tick_rate, _tx }
    }

    /// Handler fed from an existing channel instead of the terminal.
    pub fn from_channel(
        tx: mpsc::Sender<AppEvent>,
        rx: mpsc::Receiver<AppEvent>,
        tick_rate: Duration,
    ) -> Self {
        Self { rx, tick_rate, _tx: tx }
    }

    pub fn tick_rate(&self) -> Duration {
        self.tick_rate
    }

    pub fn next(&self) -> anyhow::Result<AppEvent> {
        Ok(self.rx.recv()?)
    }
}
