use async_trait::async_trait;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CartEventKind {
    OrderItemAdded,
    OrderItemUpdated,
    OrderItemRemoved,
}

impl CartEventKind {
    pub const ALL: [CartEventKind; 3] = [
        CartEventKind::OrderItemAdded,
        CartEventKind::OrderItemUpdated,
        CartEventKind::OrderItemRemoved,
    ];
}

/// A line item of `order_id` changed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartEvent {
    pub kind: CartEventKind,
    pub order_id: String,
}

impl CartEvent {
    pub fn new(kind: CartEventKind, order_id: impl Into<String>) -> Self {
        Self {
            kind,
            order_id: order_id.into(),
        }
    }
}

#[async_trait]
pub trait CartEventListener: Send + Sync {
    async fn on_event(&self, event: &CartEvent);
}

pub type Subscription = (CartEventKind, Arc<dyn CartEventListener>);

/// Dispatches cart events to the listeners subscribed at composition time.
#[derive(Clone, Default)]
pub struct EventDispatcher {
    subscriptions: Vec<Subscription>,
}

impl EventDispatcher {
    pub fn subscribe(mut self, kind: CartEventKind, listener: Arc<dyn CartEventListener>) -> Self {
        self.subscriptions.push((kind, listener));
        self
    }

    /// Subscribes `listener` to item added, updated and removed events.
    pub fn subscribe_all(mut self, listener: Arc<dyn CartEventListener>) -> Self {
        for kind in CartEventKind::ALL {
            self.subscriptions.push((kind, listener.clone()));
        }
        self
    }

    /// Runs every listener of the event's kind in subscription order and
    /// returns how many ran.
    pub async fn dispatch(&self, event: &CartEvent) -> usize {
        let mut handled = 0;
        for (kind, listener) in &self.subscriptions {
            if *kind == event.kind {
                listener.on_event(event).await;
                handled += 1;
            }
        }
        tracing::debug!("{:?} for order {} handled by {} listener(s)", event.kind, event.order_id, handled);
        handled
    }

    pub fn len(&self) -> usize {
        self.subscriptions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.subscriptions.is_empty()
    }
}
