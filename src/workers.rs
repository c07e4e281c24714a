// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! A small scoped thread pool.  Work arrives as an iterator of bands,
//! usually rows of a buffer handed out as `&mut` slices, and each
//! worker pulls the next band from a shared queue when it finishes
//! the last.  A band is owned by exactly one worker, so no two
//! workers ever touch the same cell, and the call returns only after
//! every band has been processed.

use log::trace;
use std::any::Any;
use std::panic;
use std::sync::Mutex;

/// Runs `work` on every band using `threads` scoped workers (at least
/// one).  A panic in any worker is re-raised on the calling thread.
pub fn for_each_band<I, T, F>(threads: usize, bands: I, work: F)
where
    I: Iterator<Item = T> + Send,
    T: Send,
    F: Fn(T) + Sync,
{
    let threads = threads.max(1);
    let bands = Mutex::new(bands);
    let outcome = crossbeam::scope(|spawner| {
        for worker in 0..threads {
            let bands = &bands;
            let work = &work;
            spawner.spawn(move |_| {
                let mut done = 0;
                loop {
                    let band = match bands.lock() {
                        Ok(mut queue) => queue.next(),
                        Err(_) => None,
                    };
                    match band {
                        Some(band) => {
                            work(band);
                            done += 1;
                        }
                        None => {
                            break;
                        }
                    }
                }
                trace!("worker {} finished {} bands", worker, done);
            });
        }
    });

    // crossbeam collects every worker panic into one Vec.
    if let Err(payload) = outcome {
        let payload = match payload.downcast::<Vec<Box<dyn Any + Send>>>() {
            Ok(panics) => (*panics)
                .into_iter()
                .next()
                .unwrap_or_else(|| Box::new("worker panicked") as Box<dyn Any + Send>),
            Err(other) => other,
        };
        panic::resume_unwind(payload);
    }
}
