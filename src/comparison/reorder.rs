/*!
 * Reordering of ranked sequences.
 *
 * Each operation swaps one element with its neighbour and returns a new
 * sequence. Moves past either end, or from a position that does not exist,
 * return the sequence unchanged.
 */

use log::debug;

/// Direction of a single-step move
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Towards rank 1
    Up,
    /// Away from rank 1
    Down,
}

/// Move the element at `position` one step in `direction`
pub fn move_item<T: Clone>(items: &[T], position: usize, direction: Direction) -> Vec<T> {
    let mut next = items.to_vec();
    if position >= items.len() {
        debug!(
            "Ignoring move of position {} in a sequence of {}",
            position,
            items.len()
        );
        return next;
    }

    match direction {
        Direction::Up if position > 0 => next.swap(position, position - 1),
        Direction::Down if position + 1 < items.len() => next.swap(position, position + 1),
        _ => {}
    }
    next
}

/// Swap the element at `position` with the one before it
pub fn move_up<T: Clone>(items: &[T], position: usize) -> Vec<T> {
    move_item(items, position, Direction::Up)
}

/// Swap the element at `position` with the one after it
pub fn move_down<T: Clone>(items: &[T], position: usize) -> Vec<T> {
    move_item(items, position, Direction::Down)
}
