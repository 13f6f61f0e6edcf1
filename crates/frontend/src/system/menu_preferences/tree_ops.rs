//! Menu tree operations
//!
//! All mutations take the tree by value and hand back the changed tree, so
//! callers keep the "new tree per edit" model without cloning subtrees that
//! did not change. Sibling `order_index` values are renumbered 0..n at every
//! level a mutation touched.

use contracts::system::menu_preferences::{
    MenuItemPatch, MenuNode, StandardMenuItem, UserMenuItem,
};

use super::ids::IdMinter;

/// Renumber one sibling level to match its current order
fn renumber_level<T: MenuNode>(items: &mut [T]) {
    for (index, item) in items.iter_mut().enumerate() {
        item.set_order_index(index as i32);
    }
}

/// Move `active_id` to the position of `over_id`.
///
/// Both ids must be siblings; the first level (searched top-down) holding
/// both of them is reordered. Returns `false` when no such level exists.
pub fn reorder_in_place<T: MenuNode>(items: &mut Vec<T>, active_id: &str, over_id: &str) -> bool {
    if active_id == over_id {
        return false;
    }

    let from = items.iter().position(|i| i.id() == active_id);
    let to = items.iter().position(|i| i.id() == over_id);
    if let (Some(from), Some(to)) = (from, to) {
        let moved = items.remove(from);
        items.insert(to, moved);
        renumber_level(items);
        return true;
    }

    items
        .iter_mut()
        .filter(|item| !item.children().is_empty())
        .any(|item| reorder_in_place(item.children_mut(), active_id, over_id))
}

/// Reorder within the level where `active_id` and `over_id` are siblings.
/// Unchanged when they are equal or never share a level.
pub fn find_and_reorder<T: MenuNode>(mut items: Vec<T>, active_id: &str, over_id: &str) -> Vec<T> {
    reorder_in_place(&mut items, active_id, over_id);
    items
}

fn remove_in_place<T: MenuNode>(items: &mut Vec<T>, id: &str) -> bool {
    if let Some(pos) = items.iter().position(|i| i.id() == id) {
        items.remove(pos);
        renumber_level(items);
        return true;
    }
    items
        .iter_mut()
        .any(|item| remove_in_place(item.children_mut(), id))
}

/// Remove the node with `id` at any depth, together with its subtree.
pub fn remove_by_id<T: MenuNode>(mut items: Vec<T>, id: &str) -> Vec<T> {
    if !remove_in_place(&mut items, id) {
        log::debug!("remove_by_id: '{}' not found", id);
    }
    items
}

pub fn find_by_id<'a, T: MenuNode>(items: &'a [T], id: &str) -> Option<&'a T> {
    for item in items {
        if item.id() == id {
            return Some(item);
        }
        if let Some(found) = find_by_id(item.children(), id) {
            return Some(found);
        }
    }
    None
}

pub fn find_by_id_mut<'a, T: MenuNode>(items: &'a mut [T], id: &str) -> Option<&'a mut T> {
    for item in items.iter_mut() {
        if item.id() == id {
            return Some(item);
        }
        if let Some(found) = find_by_id_mut(item.children_mut(), id) {
            return Some(found);
        }
    }
    None
}

/// Whether `id` names a folder anywhere in the tree
pub fn is_folder_id<T: MenuNode>(items: &[T], id: &str) -> bool {
    find_by_id(items, id).is_some_and(|item| item.is_folder())
}

/// Append `new_item` as the last child of folder `parent_id`.
///
/// A missing parent, or a parent that is not a folder, leaves the tree as it
/// was.
pub fn insert_into_folder<T: MenuNode>(mut items: Vec<T>, parent_id: &str, mut new_item: T) -> Vec<T> {
    match find_by_id_mut(&mut items, parent_id) {
        Some(folder) if folder.is_folder() => {
            new_item.set_parent_id(Some(parent_id.to_string()));
            new_item.set_order_index(folder.children().len() as i32);
            folder.children_mut().push(new_item);
        }
        Some(_) => log::debug!("insert_into_folder: '{}' is not a folder", parent_id),
        None => log::debug!("insert_into_folder: folder '{}' not found", parent_id),
    }
    items
}

/// Append `new_item` at the end of the root level.
pub fn append_to_root<T: MenuNode>(mut items: Vec<T>, mut new_item: T) -> Vec<T> {
    new_item.set_parent_id(None);
    new_item.set_order_index(items.len() as i32);
    items.push(new_item);
    items
}

/// Deep copy of `item` as a user item with fresh ids on every node.
///
/// The top-level copy gets `new_parent_id`; each descendant points at its
/// new parent's new id.
pub fn copy_with_fresh_ids<T: MenuNode>(
    item: &T,
    new_parent_id: Option<&str>,
    ids: &IdMinter,
) -> UserMenuItem {
    let mut copy = item.to_user_item();
    copy.id = ids.mint(item.id());
    copy.parent_id = new_parent_id.map(str::to_string);

    let children = item
        .children()
        .iter()
        .map(|child| copy_with_fresh_ids(child, Some(copy.id.as_str()), ids))
        .collect();
    copy.children = children;
    copy
}

/// Ids in depth-first, parent-before-children order, folders excluded.
pub fn flatten_sortable_ids<T: MenuNode>(items: &[T]) -> Vec<String> {
    fn collect<T: MenuNode>(items: &[T], out: &mut Vec<String>) {
        for item in items {
            if !item.is_folder() {
                out.push(item.id().to_string());
            }
            collect(item.children(), out);
        }
    }

    let mut result = Vec::new();
    collect(items, &mut result);
    result
}

/// Total number of nodes at all depths
pub fn count_items<T: MenuNode>(items: &[T]) -> usize {
    items
        .iter()
        .map(|item| 1 + count_items(item.children()))
        .sum()
}

/// Renumber every level, healing gaps left by earlier edits.
pub fn renumber<T: MenuNode>(mut items: Vec<T>) -> Vec<T> {
    fn walk<T: MenuNode>(items: &mut [T]) {
        renumber_level(items);
        for item in items.iter_mut() {
            walk(item.children_mut());
        }
    }

    walk(&mut items);
    items
}

/// Apply `patch` to the user item `id`. Returns `None` when no such item.
pub fn update_item(
    mut items: Vec<UserMenuItem>,
    id: &str,
    patch: &MenuItemPatch,
) -> Option<Vec<UserMenuItem>> {
    let item = find_by_id_mut(&mut items, id)?;
    patch.apply(item);
    Some(items)
}

/// Sets `depth` and `parent_id` on the standard catalog from tree position.
pub fn assign_depth(items: Vec<StandardMenuItem>) -> Vec<StandardMenuItem> {
    fn walk(items: &mut [StandardMenuItem], depth: u32, parent_id: Option<&str>) {
        for item in items.iter_mut() {
            item.depth = depth;
            if parent_id.is_some() {
                item.parent_id = parent_id.map(str::to_string);
            }
            let id = item.id.clone();
            walk(&mut item.children, depth + 1, Some(id.as_str()));
        }
    }

    let mut items = items;
    walk(&mut items, 0, None);
    items
}

/// Navigation projection: hidden items (and their subtrees) dropped.
pub fn visible_tree(items: &[UserMenuItem]) -> Vec<UserMenuItem> {
    items
        .iter()
        .filter(|item| item.is_visible)
        .map(|item| {
            let mut copy = item.to_user_item();
            copy.children = visible_tree(&item.children);
            copy
        })
        .collect()
}
