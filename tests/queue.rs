use std::{
    collections::HashSet,
    sync::atomic::{AtomicUsize, Ordering},
    thread,
};

use hogwild_trainer::WorkQueue;

#[test]
fn single_consumer_sees_push_order() {
    const N: usize = 1000;

    let queue = WorkQueue::new();

    thread::scope(|s| {
        s.spawn(|| (0..N).for_each(|i| queue.push(i)));
    });

    let popped: Vec<_> = std::iter::from_fn(|| queue.try_pop()).collect();
    assert_eq!(popped, (0..N).collect::<Vec<_>>());
}

#[test]
fn concurrent_drain_pops_every_item_once() {
    const N: usize = 10_000;
    const CONSUMERS: usize = 8;

    let queue = WorkQueue::new();
    queue.extend(0..N);

    let popped: Vec<Vec<usize>> = thread::scope(|s| {
        let handles: Vec<_> = (0..CONSUMERS)
            .map(|_| s.spawn(|| std::iter::from_fn(|| queue.try_pop()).collect::<Vec<_>>()))
            .collect();

        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    let total: usize = popped.iter().map(Vec::len).sum();
    let unique: HashSet<_> = popped.iter().flatten().copied().collect();

    assert_eq!(total, N);
    assert_eq!(unique.len(), N);
    assert!(queue.is_empty());
}

#[test]
fn concurrent_producer_and_consumers_lose_nothing() {
    const N: usize = 10_000;
    const CONSUMERS: usize = 4;

    let queue = WorkQueue::new();
    let popped_count = AtomicUsize::new(0);

    let popped: Vec<Vec<usize>> = thread::scope(|s| {
        s.spawn(|| (0..N).for_each(|i| queue.push(i)));

        let handles: Vec<_> = (0..CONSUMERS)
            .map(|_| {
                s.spawn(|| {
                    let mut mine = Vec::new();

                    while popped_count.load(Ordering::SeqCst) < N {
                        match queue.try_pop() {
                            Some(item) => {
                                mine.push(item);
                                popped_count.fetch_add(1, Ordering::SeqCst);
                            }
                            None => thread::yield_now(),
                        }
                    }

                    mine
                })
            })
            .collect();

        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    let unique: HashSet<_> = popped.iter().flatten().copied().collect();
    assert_eq!(popped.iter().map(Vec::len).sum::<usize>(), N);
    assert_eq!(unique, (0..N).collect::<HashSet<_>>());

    // Every consumer saw its own share in push order.
    for share in &popped {
        assert!(share.windows(2).all(|w| w[0] < w[1]));
    }
}

#[test]
fn blocking_consumers_receive_every_item() {
    const N: usize = 1000;
    const CONSUMERS: usize = 4;

    let queue: WorkQueue<Option<usize>> = WorkQueue::new();

    let popped: Vec<Vec<usize>> = thread::scope(|s| {
        let handles: Vec<_> = (0..CONSUMERS)
            .map(|_| {
                s.spawn(|| {
                    let mut mine = Vec::new();
                    loop {
                        match queue.blocking_pop() {
                            None => break mine,
                            Some(item) => mine.push(item),
                        }
                    }
                })
            })
            .collect();

        (0..N).for_each(|i| queue.push(Some(i)));
        (0..CONSUMERS).for_each(|_| queue.push(None));

        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    let unique: HashSet<_> = popped.iter().flatten().copied().collect();
    assert_eq!(unique.len(), N);
}
