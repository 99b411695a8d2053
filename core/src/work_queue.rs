// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use std::sync::Arc;
use tokio::sync::mpsc::{self, Sender};
use tokio::sync::{mpsc::Receiver, Mutex};

/// Receiving end of a bounded queue shared by several consumers.
/// Each `recv` holds the lock only while waiting for the next item.
pub struct SharedReceiver<T> {
    rx: Arc<Mutex<Receiver<T>>>,
}

impl<T> Clone for SharedReceiver<T> {
    fn clone(&self) -> Self {
        Self {
            rx: Arc::clone(&self.rx),
        }
    }
}

impl<T> SharedReceiver<T> {
    /// Next item, or `None` once every sender is dropped and the queue is drained
    pub async fn recv(&self) -> Option<T> {
        self.rx.lock().await.recv().await
    }
}

/// Bounded multi-consumer work queue on top of a tokio mpsc channel.
/// Senders block once `capacity` items are waiting.
pub fn work_queue<T>(capacity: usize) -> (Sender<T>, SharedReceiver<T>) {
    let (tx, rx) = mpsc::channel(capacity);
    (
        tx,
        SharedReceiver {
            rx: Arc::new(Mutex::new(rx)),
        },
    )
}
