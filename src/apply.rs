//! The consumer contract, made concrete for `Vec<T>`.
//!
//! A differ's output only transforms a sequence correctly when every
//! modification is applied exactly as specified, in the exact order
//! yielded, without skipping. These helpers implement that contract for a
//! plain in-memory vector; binding layers with their own storage follow
//! the same five cases.

use crate::error::{ApplyError, ApplyResult};
use crate::modification::Modification;

/// Apply one modification to `target`.
///
/// The five cases:
///
/// - `Add`: insert the items at the index.
/// - `Remove`: remove `items.len()` items at the index.
/// - `Replace`: overwrite the items at the index in place.
/// - `Move`: take `items.len()` items out at the source index, then insert
///   them at the destination index, which addresses the sequence *after*
///   the removal.
/// - `Reset`: clear the sequence.
///
/// Fails with [`ApplyError`] when an index does not fit the sequence,
/// which means the consumer's state diverged from the differ's
/// bookkeeping; `target` is left unchanged in that case.
pub fn apply<T>(target: &mut Vec<T>, modification: Modification<T, T>) -> ApplyResult {
    match modification {
        Modification::Add { index, items } => {
            if index > target.len() {
                return Err(ApplyError::OutOfBounds { index, len: target.len() });
            }
            target.splice(index..index, items);
        }
        Modification::Remove { index, items } => {
            let end = index + items.len();
            if end > target.len() {
                return Err(ApplyError::OutOfBounds { index, len: target.len() });
            }
            target.drain(index..end);
        }
        Modification::Replace { index, old_items, new_items } => {
            if old_items.len() != new_items.len() {
                return Err(ApplyError::ReplaceLength {
                    old: old_items.len(),
                    new: new_items.len(),
                });
            }
            let end = index + new_items.len();
            if end > target.len() {
                return Err(ApplyError::OutOfBounds { index, len: target.len() });
            }
            for (slot, item) in target[index..end].iter_mut().zip(new_items) {
                *slot = item;
            }
        }
        Modification::Move { from, to, items } => {
            let end = from + items.len();
            if end > target.len() {
                return Err(ApplyError::OutOfBounds { index: from, len: target.len() });
            }
            if to > target.len() - items.len() {
                return Err(ApplyError::OutOfBounds { index: to, len: target.len() - items.len() });
            }
            let moved: Vec<T> = target.drain(from..end).collect();
            target.splice(to..to, moved);
        }
        Modification::Reset => target.clear(),
    }
    Ok(())
}

/// Apply a whole modification sequence in order (batched consumption).
///
/// Stops at the first failing element; everything applied up to that point
/// remains in `target`, a valid if incomplete transformation.
pub fn apply_all<T>(
    target: &mut Vec<T>,
    modifications: impl IntoIterator<Item = Modification<T, T>>,
) -> ApplyResult {
    for modification in modifications {
        apply(target, modification)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_inserts_at_index() {
        let mut target = vec![1, 3];
        apply(&mut target, Modification::add(1, 2)).unwrap();
        assert_eq!(target, vec![1, 2, 3]);
        apply(&mut target, Modification::add_many(3, [4, 5])).unwrap();
        assert_eq!(target, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_remove_drains_slice() {
        let mut target = vec![1, 2, 3, 4];
        apply(&mut target, Modification::remove_many(1, [2, 3])).unwrap();
        assert_eq!(target, vec![1, 4]);
    }

    #[test]
    fn test_replace_overwrites_in_place() {
        let mut target = vec![1, 2, 3];
        apply(&mut target, Modification::replace(1, 2, 9)).unwrap();
        assert_eq!(target, vec![1, 9, 3]);
    }

    #[test]
    fn test_move_destination_addresses_post_removal_sequence() {
        let mut target = vec!['a', 'b', 'c', 'd'];
        apply(&mut target, Modification::relocate(0, 2, 'a')).unwrap();
        assert_eq!(target, vec!['b', 'c', 'a', 'd']);

        apply(&mut target, Modification::relocate(3, 0, 'd')).unwrap();
        assert_eq!(target, vec!['d', 'b', 'c', 'a']);
    }

    #[test]
    fn test_move_to_same_index_is_identity() {
        let mut target = vec![1, 2];
        apply(&mut target, Modification::relocate(1, 1, 2)).unwrap();
        assert_eq!(target, vec![1, 2]);
    }

    #[test]
    fn test_reset_clears_everything() {
        let mut target = vec![1, 2, 3];
        apply(&mut target, Modification::reset()).unwrap();
        assert!(target.is_empty());
    }

    #[test]
    fn test_out_of_bounds_leaves_target_unchanged() {
        let mut target = vec![1, 2];
        let err = apply(&mut target, Modification::add(3, 9)).unwrap_err();
        assert_eq!(err, ApplyError::OutOfBounds { index: 3, len: 2 });
        assert_eq!(target, vec![1, 2]);

        let err = apply(&mut target, Modification::remove_many(1, [2, 3])).unwrap_err();
        assert_eq!(err, ApplyError::OutOfBounds { index: 1, len: 2 });
        assert_eq!(target, vec![1, 2]);

        let err = apply(&mut target, Modification::relocate(0, 2, 1)).unwrap_err();
        assert_eq!(err, ApplyError::OutOfBounds { index: 2, len: 1 });
    }

    #[test]
    fn test_apply_all_stops_at_first_failure() {
        let mut target = vec![1];
        let mods = vec![
            Modification::add(1, 2),
            Modification::remove(5, 0),
            Modification::add(0, 9),
        ];
        assert!(apply_all(&mut target, mods).is_err());
        // The first element applied, the failing one did not, the rest
        // were never attempted.
        assert_eq!(target, vec![1, 2]);
    }
}
