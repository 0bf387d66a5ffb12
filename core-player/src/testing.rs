//! Test support: a scriptable in-memory media resource.
//!
//! Records every transport command it receives and can be told to fail
//! attaches or transport commands, which is enough to exercise the
//! coordinator's race and absorption behavior without a real player.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use bridge_traits::error::{BridgeError, Result};
use bridge_traits::{LoadGeneration, MediaResource};

/// A transport command observed by [`FakeMedia`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Attach {
        locator: String,
        generation: LoadGeneration,
    },
    Play,
    Pause,
    Seek {
        position_ms: u64,
    },
}

/// In-memory [`MediaResource`] for tests.
#[derive(Default)]
pub struct FakeMedia {
    commands: Mutex<Vec<Command>>,
    attach_error: Mutex<Option<String>>,
    transport_disposed: AtomicBool,
}

impl FakeMedia {
    /// Every command received so far, in order.
    pub fn commands(&self) -> Vec<Command> {
        self.commands.lock().expect("commands lock").clone()
    }

    /// The generation of the most recent attach, if any.
    pub fn last_generation(&self) -> Option<LoadGeneration> {
        self.commands
            .lock()
            .expect("commands lock")
            .iter()
            .rev()
            .find_map(|c| match c {
                Command::Attach { generation, .. } => Some(*generation),
                _ => None,
            })
    }

    /// Makes subsequent attaches fail with `OperationFailed(message)`.
    pub fn fail_attach(&self, message: &str) {
        *self.attach_error.lock().expect("attach lock") = Some(message.to_string());
    }

    /// Makes subsequent transport commands fail as if the native player
    /// object had been torn down.
    pub fn fail_transport(&self) {
        self.transport_disposed.store(true, Ordering::SeqCst);
    }

    /// Restores working transport commands.
    pub fn heal_transport(&self) {
        self.transport_disposed.store(false, Ordering::SeqCst);
    }

    fn record(&self, command: Command) {
        self.commands.lock().expect("commands lock").push(command);
    }

    fn transport_result(&self) -> Result<()> {
        if self.transport_disposed.load(Ordering::SeqCst) {
            Err(BridgeError::Disposed("fake media".to_string()))
        } else {
            Ok(())
        }
    }
}

impl MediaResource for FakeMedia {
    fn attach(&self, locator: &str, generation: LoadGeneration) -> Result<()> {
        if let Some(message) = self.attach_error.lock().expect("attach lock").clone() {
            return Err(BridgeError::OperationFailed(message));
        }
        self.record(Command::Attach {
            locator: locator.to_string(),
            generation,
        });
        Ok(())
    }

    fn play(&self) -> Result<()> {
        self.transport_result()?;
        self.record(Command::Play);
        Ok(())
    }

    fn pause(&self) -> Result<()> {
        self.transport_result()?;
        self.record(Command::Pause);
        Ok(())
    }

    fn seek_to(&self, position_ms: u64) -> Result<()> {
        self.transport_result()?;
        self.record(Command::Seek { position_ms });
        Ok(())
    }
}
