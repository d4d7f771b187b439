//! Drag-reorder arithmetic over the displayed view.
//!
//! Indices refer to positions in the filtered view. Items hidden by the
//! filter keep their slots in the full list, so moving within a view never
//! reorders anything the user cannot see.

use crate::error::StoreError;
use crate::filter::Filter;
use crate::types::Todo;

/// A position change to persist: `(id, new sort)`.
pub type SortChange = (i64, i64);

/// Move the displayed item at `source` to `destination` and renumber the
/// whole list `1..=N`. Returns every item's new position, in list order.
///
/// A missing destination (a drop outside any target) leaves the list and
/// every `sort` untouched.
pub fn reorder(
    items: &mut [Todo],
    mode: Filter,
    source: usize,
    destination: Option<usize>,
) -> Result<Vec<SortChange>, StoreError> {
    let Some(destination) = destination else {
        return Ok(Vec::new());
    };
    move_displayed(items, mode, source, destination)?;
    Ok(renumber(items))
}

/// Move within the subsequence matching `mode`, leaving other slots fixed.
pub fn move_displayed(
    items: &mut [Todo],
    mode: Filter,
    source: usize,
    destination: usize,
) -> Result<(), StoreError> {
    let slots: Vec<usize> = items
        .iter()
        .enumerate()
        .filter(|(_, todo)| mode.matches(todo))
        .map(|(i, _)| i)
        .collect();

    let len = slots.len();
    for index in [source, destination] {
        if index >= len {
            return Err(StoreError::IndexOutOfRange { index, len });
        }
    }

    let mut displayed: Vec<Todo> = slots.iter().map(|&i| items[i].clone()).collect();
    let moved = displayed.remove(source);
    displayed.insert(destination, moved);

    for (slot, todo) in slots.into_iter().zip(displayed) {
        items[slot] = todo;
    }
    Ok(())
}

/// Assign `sort = position + 1` to every item. All positions are returned,
/// including unchanged ones: the local copy may be ahead of the server.
pub fn renumber(items: &mut [Todo]) -> Vec<SortChange> {
    items
        .iter_mut()
        .enumerate()
        .map(|(position, todo)| {
            todo.sort = position as i64 + 1;
            (todo.id, todo.sort)
        })
        .collect()
}
