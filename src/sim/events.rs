//! Typed event bus
//!
//! Listeners subscribe per event type with a priority (higher runs first).
//! Events published with `remember` are kept as sticky and can be replayed
//! to late subscribers. Dispatch works on a snapshot of the subscriber list,
//! so listeners may subscribe, unsubscribe, or publish while being called.

use std::any::{Any, TypeId, type_name};
use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::fmt::Debug;
use std::rc::Rc;

/// Handle returned by `subscribe`, used to unsubscribe
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Callback = Rc<dyn Fn(&dyn Any)>;

struct Subscription {
    id: SubscriptionId,
    priority: i32,
    callback: Callback,
}

#[derive(Default)]
struct Registry {
    subscribers: HashMap<TypeId, Vec<Subscription>>,
    sticky: HashMap<TypeId, Rc<dyn Any>>,
    next_id: u64,
}

/// Single-threaded publish/subscribe hub
#[derive(Default)]
pub struct EventBus {
    registry: RefCell<Registry>,
    debug_logging: Cell<bool>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Log every published event
    pub fn set_debug_logging(&self, enabled: bool) {
        self.debug_logging.set(enabled);
    }

    pub fn subscribe<E: 'static>(
        &self,
        listener: impl Fn(&E) + 'static,
        priority: i32,
        replay_last: bool,
    ) -> SubscriptionId {
        let listener = Rc::new(listener);
        let callback: Callback = {
            let listener = listener.clone();
            Rc::new(move |event: &dyn Any| {
                if let Some(event) = event.downcast_ref::<E>() {
                    listener(event);
                }
            })
        };

        let (id, replay) = {
            let mut registry = self.registry.borrow_mut();
            let id = SubscriptionId(registry.next_id);
            registry.next_id += 1;

            let subs = registry.subscribers.entry(TypeId::of::<E>()).or_default();
            subs.push(Subscription {
                id,
                priority,
                callback,
            });
            // High to low; stable sort keeps subscription order among equals
            subs.sort_by(|a, b| b.priority.cmp(&a.priority));

            let replay = if replay_last {
                registry.sticky.get(&TypeId::of::<E>()).cloned()
            } else {
                None
            };
            (id, replay)
        };

        if let Some(event) = replay.as_deref().and_then(|e| e.downcast_ref::<E>()) {
            listener(event);
        }

        id
    }

    /// Returns false if the subscription was not found
    pub fn unsubscribe<E: 'static>(&self, id: SubscriptionId) -> bool {
        let mut registry = self.registry.borrow_mut();
        let type_id = TypeId::of::<E>();
        let Some(subs) = registry.subscribers.get_mut(&type_id) else {
            return false;
        };
        let before = subs.len();
        subs.retain(|s| s.id != id);
        let removed = subs.len() != before;

        if subs.is_empty() {
            registry.subscribers.remove(&type_id);
        }
        removed
    }

    pub fn publish<E: Debug + 'static>(&self, event: E, remember: bool) {
        if self.debug_logging.get() {
            log::info!("[EventBus] {} fired: {:?}", short_type_name::<E>(), event);
        }

        let event: Rc<dyn Any> = Rc::new(event);
        let snapshot: Vec<Callback> = {
            let mut registry = self.registry.borrow_mut();
            if remember {
                registry.sticky.insert(TypeId::of::<E>(), event.clone());
            }
            match registry.subscribers.get(&TypeId::of::<E>()) {
                Some(subs) => subs.iter().map(|s| s.callback.clone()).collect(),
                None => return,
            }
        };

        for callback in snapshot {
            callback(&*event);
        }
    }

    /// Drop every subscription
    pub fn clear(&self) {
        self.registry.borrow_mut().subscribers.clear();
    }

    /// Forget all remembered events
    pub fn clear_sticky(&self) {
        self.registry.borrow_mut().sticky.clear();
    }

    pub fn subscriber_count<E: 'static>(&self) -> usize {
        self.registry
            .borrow()
            .subscribers
            .get(&TypeId::of::<E>())
            .map_or(0, Vec::len)
    }
}

fn short_type_name<E>() -> &'static str {
    let full = type_name::<E>();
    full.rsplit("::").next().unwrap_or(full)
}
