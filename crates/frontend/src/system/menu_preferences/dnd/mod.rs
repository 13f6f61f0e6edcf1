//! Drag-and-drop coordination for the menu customization page.
//!
//! Three gestures end up here:
//! - reordering an item of the user menu over another item,
//! - dropping a standard catalog item on the user menu (root append),
//! - dropping a standard catalog item on a user folder.
//!
//! A gesture goes `Idle -> Dragging -> Idle`; whatever happens on drop, the
//! coordinator is back to `Idle` and every payload channel is cleared.

mod browser;
mod channels;

pub use browser::{
    drag_channels, DataTransferChannel, SessionStorageChannel, WindowGlobalChannel,
};
pub use channels::{
    broadcast, clear_all, decode_payload, encode_payload, recover, MemoryChannel, PayloadChannel,
};

use contracts::system::menu_preferences::{StandardMenuItem, UserMenuItem};

use super::ids::IdMinter;
use super::tree_ops;

#[derive(Debug, Clone, PartialEq)]
pub enum DragPayload {
    /// An existing user menu item being reordered
    UserItem { active_id: String },
    /// A standard catalog item being copied into the user menu
    StandardItem(StandardMenuItem),
}

#[derive(Debug, Clone, Default, PartialEq)]
pub enum DragState {
    #[default]
    Idle,
    Dragging(DragPayload),
}

/// What the pointer was released over
#[derive(Debug, Clone, PartialEq)]
pub enum DropTarget {
    /// Another user menu item
    UserItem(String),
    /// The user menu drop zone, outside any folder
    UserMenuRoot,
    /// A specific user folder
    Folder(String),
}

#[derive(Debug, Clone, PartialEq)]
pub enum DropOutcome {
    ReorderApplied,
    InsertedAtRoot { id: String },
    InsertedInFolder { folder_id: String, id: String },
    /// Recognized drop that changed nothing (same item, unknown target,
    /// missing or unreadable payload)
    NoOp,
    Cancelled,
}

#[derive(Debug, Clone, Default)]
pub struct DragCoordinator {
    state: DragState,
    ids: IdMinter,
}

impl DragCoordinator {
    pub fn new(ids: IdMinter) -> Self {
        Self {
            state: DragState::Idle,
            ids,
        }
    }

    pub fn state(&self) -> &DragState {
        &self.state
    }

    pub fn is_dragging_from_external(&self) -> bool {
        matches!(self.state, DragState::Dragging(DragPayload::StandardItem(_)))
    }

    pub fn begin_reorder(&mut self, active_id: impl Into<String>) {
        self.state = DragState::Dragging(DragPayload::UserItem {
            active_id: active_id.into(),
        });
    }

    /// Start dragging a standard item and stash it in every channel.
    pub fn begin_standard_drag(
        &mut self,
        item: &StandardMenuItem,
        channels: &[Box<dyn PayloadChannel>],
    ) {
        match encode_payload(item) {
            Ok(payload) => broadcast(channels, &payload),
            Err(e) => log::warn!("Cannot serialize dragged item '{}': {}", item.id, e),
        }
        self.state = DragState::Dragging(DragPayload::StandardItem(item.clone()));
    }

    pub fn cancel(&mut self, channels: &[Box<dyn PayloadChannel>]) {
        self.state = DragState::Idle;
        clear_all(channels);
    }

    /// Finish the gesture. `target == None` means the pointer was released
    /// outside every drop zone.
    pub fn handle_drop(
        &mut self,
        target: Option<DropTarget>,
        channels: &[Box<dyn PayloadChannel>],
        user_menu: Vec<UserMenuItem>,
    ) -> (Vec<UserMenuItem>, DropOutcome) {
        let state = std::mem::take(&mut self.state);
        let result = match target {
            None => (user_menu, DropOutcome::Cancelled),
            Some(target) => self.apply_drop(state, target, channels, user_menu),
        };
        clear_all(channels);
        result
    }

    fn apply_drop(
        &self,
        state: DragState,
        target: DropTarget,
        channels: &[Box<dyn PayloadChannel>],
        mut user_menu: Vec<UserMenuItem>,
    ) -> (Vec<UserMenuItem>, DropOutcome) {
        if let DragState::Dragging(DragPayload::UserItem { active_id }) = state {
            let over_id = match target {
                DropTarget::UserItem(id) | DropTarget::Folder(id) => id,
                DropTarget::UserMenuRoot => return (user_menu, DropOutcome::NoOp),
            };
            let outcome = if tree_ops::reorder_in_place(&mut user_menu, &active_id, &over_id) {
                DropOutcome::ReorderApplied
            } else {
                DropOutcome::NoOp
            };
            return (user_menu, outcome);
        }

        // Standard item drop; the payload may have been started by another
        // component, so the channels are the source of truth, not `state`.
        let folder_id = match target {
            DropTarget::Folder(id) => Some(id),
            DropTarget::UserItem(id) if tree_ops::is_folder_id(&user_menu, &id) => Some(id),
            DropTarget::UserItem(_) | DropTarget::UserMenuRoot => None,
        };

        let Some(payload) = recover(channels) else {
            log::debug!("Drop without a recoverable payload");
            return (user_menu, DropOutcome::NoOp);
        };
        let item = match decode_payload(&payload) {
            Ok(item) => item,
            Err(e) => {
                log::warn!("Ignoring malformed drag payload: {}", e);
                return (user_menu, DropOutcome::NoOp);
            }
        };

        match folder_id {
            Some(folder_id) => {
                if !tree_ops::is_folder_id(&user_menu, &folder_id) {
                    return (user_menu, DropOutcome::NoOp);
                }
                let copy = tree_ops::copy_with_fresh_ids(&item, Some(folder_id.as_str()), &self.ids);
                let id = copy.id.clone();
                let user_menu = tree_ops::insert_into_folder(user_menu, &folder_id, copy);
                (user_menu, DropOutcome::InsertedInFolder { folder_id, id })
            }
            None => {
                let copy = tree_ops::copy_with_fresh_ids(&item, None, &self.ids);
                let id = copy.id.clone();
                let user_menu = tree_ops::append_to_root(user_menu, copy);
                (user_menu, DropOutcome::InsertedAtRoot { id })
            }
        }
    }
}
