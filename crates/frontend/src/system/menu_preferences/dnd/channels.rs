//! Drag payload channels.
//!
//! A standard item dragged into the user menu is written to every channel
//! at drag start. On drop the channels are read in priority order and the
//! first one holding data wins; browsers do not expose the drag data to
//! every drop event, hence the redundancy.

use contracts::system::menu_preferences::StandardMenuItem;
use std::cell::RefCell;
use std::rc::Rc;

/// One place a serialized drag payload can be stashed and recovered from.
pub trait PayloadChannel {
    fn name(&self) -> &'static str;
    fn store(&self, payload: &str);
    fn load(&self) -> Option<String>;
    fn clear(&self);
}

/// Process-local slot. Clones share the same slot.
#[derive(Debug, Clone, Default)]
pub struct MemoryChannel {
    slot: Rc<RefCell<Option<String>>>,
}

impl MemoryChannel {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PayloadChannel for MemoryChannel {
    fn name(&self) -> &'static str {
        "memory"
    }

    fn store(&self, payload: &str) {
        *self.slot.borrow_mut() = Some(payload.to_string());
    }

    fn load(&self) -> Option<String> {
        self.slot.borrow().clone()
    }

    fn clear(&self) {
        self.slot.borrow_mut().take();
    }
}

pub fn encode_payload(item: &StandardMenuItem) -> Result<String, serde_json::Error> {
    serde_json::to_string(item)
}

pub fn decode_payload(payload: &str) -> Result<StandardMenuItem, serde_json::Error> {
    serde_json::from_str(payload)
}

/// Write `payload` to every channel
pub fn broadcast(channels: &[Box<dyn PayloadChannel>], payload: &str) {
    for channel in channels {
        channel.store(payload);
    }
}

/// First non-empty payload, trying channels in order
pub fn recover(channels: &[Box<dyn PayloadChannel>]) -> Option<String> {
    channels.iter().find_map(|channel| {
        let payload = channel.load().filter(|p| !p.trim().is_empty())?;
        log::debug!("Drag payload recovered from '{}' channel", channel.name());
        Some(payload)
    })
}

pub fn clear_all(channels: &[Box<dyn PayloadChannel>]) {
    for channel in channels {
        channel.clear();
    }
}
