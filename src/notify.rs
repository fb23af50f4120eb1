//! Payload-free change notifications.
//!
//! Contexts push an "something changed" signal; subscribers pull the new
//! state when they next render. Each subscriber owns a [`Subscription`], so
//! views can come and go independently of the context that notifies them.

use std::sync::mpsc::{channel, Receiver, Sender};

/// Observer list owned by a context.
#[derive(Debug, Default)]
pub struct ChangeNotifier {
    subscribers: Vec<Sender<()>>,
}

impl ChangeNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a new subscriber.
    pub fn subscribe(&mut self) -> Subscription {
        let (sender, receiver) = channel();
        self.subscribers.push(sender);
        Subscription { receiver }
    }

    /// Signals every live subscriber and forgets the dropped ones.
    pub fn notify(&mut self) {
        self.subscribers.retain(|sender| sender.send(()).is_ok());
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }
}

/// Receiving end of a [`ChangeNotifier`].
#[derive(Debug)]
pub struct Subscription {
    receiver: Receiver<()>,
}

impl Subscription {
    /// Drains pending signals; true if at least one arrived since the last call.
    pub fn take_changed(&self) -> bool {
        let mut changed = false;
        while self.receiver.try_recv().is_ok() {
            changed = true;
        }
        changed
    }
}
