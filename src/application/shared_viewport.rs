use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use crate::application::ports::{ChartWidget, QueryStore, SelectorHandles};
use crate::application::viewport_controller::ViewportController;
use crate::domain::events::{DomainEvent, Transition, ViewportEvent};
use crate::domain::logging::LogComponent;
use crate::{log_debug, log_warn};

const COMPONENT: LogComponent = LogComponent::Application("SharedViewport");

/// Cloneable handle to a controller shared by page callbacks.
///
/// Chart widgets redraw synchronously inside `set_window` and report the redraw
/// straight back. Such events arrive while the controller is busy; they are parked
/// and handled by the outer call before it returns.
pub struct SharedViewport<W, Q, S>
where
    W: ChartWidget,
    Q: QueryStore,
    S: SelectorHandles,
{
    controller: Rc<RefCell<ViewportController<W, Q, S>>>,
    pending: Rc<RefCell<VecDeque<ViewportEvent>>>,
}

impl<W, Q, S> Clone for SharedViewport<W, Q, S>
where
    W: ChartWidget,
    Q: QueryStore,
    S: SelectorHandles,
{
    fn clone(&self) -> Self {
        Self { controller: Rc::clone(&self.controller), pending: Rc::clone(&self.pending) }
    }
}

impl<W, Q, S> SharedViewport<W, Q, S>
where
    W: ChartWidget,
    Q: QueryStore,
    S: SelectorHandles,
{
    pub fn new(controller: ViewportController<W, Q, S>) -> Self {
        Self { controller: Rc::new(RefCell::new(controller)), pending: Rc::new(RefCell::new(VecDeque::new())) }
    }

    /// Handle an event now, or park it if the controller is busy further up the stack
    pub fn dispatch(&self, event: ViewportEvent) -> Transition {
        let Ok(mut controller) = self.controller.try_borrow_mut() else {
            log_debug!(COMPONENT, "↪️ {} arrived during another call, deferred", event.event_type());
            self.pending.borrow_mut().push_back(event);
            return Transition::Queued;
        };
        let transition = controller.handle(event);
        self.drain(&mut controller);
        transition
    }

    /// Run `f` with exclusive access; `None` when called re-entrantly
    pub fn update<R>(&self, f: impl FnOnce(&mut ViewportController<W, Q, S>) -> R) -> Option<R> {
        let Ok(mut controller) = self.controller.try_borrow_mut() else {
            log_warn!(COMPONENT, "⚠️ Controller busy, update skipped");
            return None;
        };
        let result = f(&mut controller);
        self.drain(&mut controller);
        Some(result)
    }

    /// Read-only access; `None` while an update is running
    pub fn read<R>(&self, f: impl FnOnce(&ViewportController<W, Q, S>) -> R) -> Option<R> {
        self.controller.try_borrow().ok().map(|controller| f(&controller))
    }

    pub fn pending_len(&self) -> usize {
        self.pending.borrow().len()
    }

    fn drain(&self, controller: &mut ViewportController<W, Q, S>) {
        // Handling a parked event may park more; the pending borrow is released
        // before each call
        loop {
            let next = self.pending.borrow_mut().pop_front();
            let Some(event) = next else {
                break;
            };
            controller.handle(event);
        }
    }
}
