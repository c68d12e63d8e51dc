use crate::candidate::CandidateName;
use crate::notifier::Notifier;
use crate::scheduler::Scheduler;
use crate::selector::{Selector, SpinError, SpinOutcome, Winner};
use rand::Rng;
use rand::rngs::ThreadRng;
use std::cell::{Ref, RefCell};
use std::rc::Rc;

/// Drives a [`Selector`] with a real timer and delivers each winner to the
/// completion callback exactly once.
pub struct Spinner<S, R = ThreadRng> {
    selector: Rc<RefCell<Selector>>,
    notifier: Rc<Notifier<Winner>>,
    scheduler: S,
    rng: RefCell<R>,
}

impl<S: Scheduler> Spinner<S, ThreadRng> {
    pub fn new(selector: Selector, scheduler: S) -> Self {
        Self::with_rng(selector, scheduler, rand::thread_rng())
    }
}

impl<S: Scheduler, R: Rng> Spinner<S, R> {
    pub fn with_rng(selector: Selector, scheduler: S, rng: R) -> Self {
        Self {
            selector: Rc::new(RefCell::new(selector)),
            notifier: Rc::new(Notifier::new()),
            scheduler,
            rng: RefCell::new(rng),
        }
    }

    /// Read access for renderers and observers.
    pub fn selector(&self) -> Ref<'_, Selector> {
        self.selector.borrow()
    }

    pub fn set_candidates<I, T>(&self, names: I)
    where
        I: IntoIterator<Item = T>,
        T: Into<CandidateName>,
    {
        self.selector.borrow_mut().set_candidates(names);
    }

    /// Mutable access for configuration changes.
    pub fn update<F, T>(&self, f: F) -> T
    where
        F: FnOnce(&mut Selector) -> T,
    {
        f(&mut self.selector.borrow_mut())
    }

    /// Replaces any previously registered completion callback.
    pub fn on_complete(&self, callback: impl FnMut(&Winner) + 'static) {
        self.notifier.subscribe(callback);
    }

    pub fn request_spin(&self) -> Result<SpinOutcome, SpinError> {
        let outcome = self
            .selector
            .borrow_mut()
            .request_spin(&mut *self.rng.borrow_mut())?;

        if let SpinOutcome::Started(ticket) = outcome {
            let selector = Rc::clone(&self.selector);
            let notifier = Rc::clone(&self.notifier);
            self.scheduler.schedule(
                ticket.duration,
                Box::new(move || {
                    let winner = selector.borrow_mut().complete_spin(ticket.id);
                    // selector borrow is released here, so callbacks may read it
                    if let Some(winner) = winner {
                        notifier.notify(&winner);
                    }
                }),
            );
        }
        Ok(outcome)
    }
}
