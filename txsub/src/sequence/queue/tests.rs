use super::super::entry::Entry;
use super::AddressQueue;

fn queue_with(sequences: &[u64]) -> (AddressQueue, Vec<super::super::ReleaseSlot>) {
    let mut queue = AddressQueue::default();
    let slots = sequences
        .iter()
        .map(|sequence| {
            let (entry, slot) = Entry::new(*sequence);
            queue.push(entry);
            slot
        })
        .collect();
    (queue, slots)
}

#[test]
fn test_release_ready_only_releases_next_sequence() {
    let (mut queue, mut slots) = queue_with(&[2, 3, 2, 4]);

    let released = queue.release_ready(1);

    assert_eq!(released, 2);
    assert_eq!(queue.sequences(), vec![3, 4]);
    assert_eq!(slots[0].try_outcome(), Some(Ok(())));
    assert_eq!(slots[1].try_outcome(), None);
    assert_eq!(slots[2].try_outcome(), Some(Ok(())));
    assert_eq!(slots[3].try_outcome(), None);
}

#[test]
fn test_release_ready_keeps_stale_entries() {
    let (mut queue, mut slots) = queue_with(&[2, 7]);

    // account has moved well past sequence 2
    let released = queue.release_ready(5);

    assert_eq!(released, 0);
    assert_eq!(queue.sequences(), vec![2, 7]);
    assert!(slots.iter_mut().all(|slot| slot.try_outcome().is_none()));
}

#[test]
fn test_release_ready_preserves_order_of_remaining() {
    let (mut queue, _slots) = queue_with(&[9, 5, 8, 5, 6]);

    queue.release_ready(4);

    assert_eq!(queue.sequences(), vec![9, 8, 6]);
    assert_eq!(queue.len(), 3);
}

#[test]
fn test_release_ready_can_empty_queue() {
    let (mut queue, _slots) = queue_with(&[3, 3]);

    assert_eq!(queue.release_ready(2), 2);
    assert!(queue.is_empty());
}

#[test]
fn test_release_ready_at_max_sequence_is_noop() {
    let (mut queue, _slots) = queue_with(&[0, u64::MAX]);

    assert_eq!(queue.release_ready(u64::MAX), 0);
    assert_eq!(queue.len(), 2);
}

#[test]
fn test_release_to_dropped_waiter_is_discarded() {
    let (mut queue, slots) = queue_with(&[2]);
    drop(slots);

    assert_eq!(queue.release_ready(1), 1);
    assert!(queue.is_empty());
}
