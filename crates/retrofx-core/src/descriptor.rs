use std::cell::RefCell;

use smallvec::SmallVec;

use crate::deps::{Dep, Deps};
use crate::effects::{Dispose, EffectFn};
use crate::equality::shallow_equal;

/// One declared effect call-site.
pub struct EffectDescriptor {
    pub(crate) effect: EffectFn,
    pub(crate) deps: Deps,
    /// Resolved deps captured at the last run. `None` until the first run.
    pub(crate) prev_deps: Option<Dep>,
    pub(crate) destructor: Option<Dispose>,
}

impl EffectDescriptor {
    pub(crate) fn new(effect: EffectFn, deps: Deps) -> Self {
        Self {
            effect,
            deps,
            prev_deps: None,
            destructor: None,
        }
    }

    /// Re-declaration at the same render position keeps diffing state.
    pub(crate) fn reassign(&mut self, effect: EffectFn, deps: Deps) {
        self.effect = effect;
        self.deps = deps;
    }

    pub fn deps(&self) -> &Deps {
        &self.deps
    }

    pub fn prev_deps(&self) -> Option<&Dep> {
        self.prev_deps.as_ref()
    }

    pub fn has_destructor(&self) -> bool {
        self.destructor.is_some()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Slot {
    Static(usize),
    Dynamic(usize),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Pass {
    Mount,
    Update,
}

type Slots = SmallVec<[EffectDescriptor; 4]>;

/// Per-instance descriptor lists.
///
/// `statics` is filled once from the construction buffer and never changes
/// length afterwards. `dynamics` grows on the first render and is matched by
/// position on every render after that.
#[derive(Default)]
pub(crate) struct EffectStore {
    pub(crate) statics: Slots,
    pub(crate) dynamics: Slots,
}

impl EffectStore {
    fn get(&self, slot: Slot) -> Option<&EffectDescriptor> {
        match slot {
            Slot::Static(i) => self.statics.get(i),
            Slot::Dynamic(i) => self.dynamics.get(i),
        }
    }

    fn get_mut(&mut self, slot: Slot) -> Option<&mut EffectDescriptor> {
        match slot {
            Slot::Static(i) => self.statics.get_mut(i),
            Slot::Dynamic(i) => self.dynamics.get_mut(i),
        }
    }

    /// Static slots first, then dynamic, each in declaration order.
    fn slots(&self) -> SmallVec<[Slot; 8]> {
        (0..self.statics.len())
            .map(Slot::Static)
            .chain((0..self.dynamics.len()).map(Slot::Dynamic))
            .collect()
    }

    /// Walks every slot and runs the ones the pass selects. Returns how many
    /// effects ran.
    ///
    /// No borrow is held while user code (deps functions, destructors,
    /// effects) executes.
    pub(crate) fn commit(store: &RefCell<Self>, pass: Pass) -> usize {
        let slots = store.borrow().slots();
        let mut ran = 0;

        for slot in slots {
            let Some(deps) = store.borrow().get(slot).map(|d| d.deps.clone()) else {
                continue;
            };
            let next = deps.resolve();

            if pass == Pass::Update {
                let store = store.borrow();
                let Some(desc) = store.get(slot) else {
                    continue;
                };
                let changed = desc
                    .prev_deps
                    .as_ref()
                    .is_none_or(|prev| !shallow_equal(&next, prev));
                if next.is_truthy() && !changed {
                    continue;
                }
            }

            let destructor = store
                .borrow_mut()
                .get_mut(slot)
                .and_then(|d| d.destructor.take());
            if let Some(destructor) = destructor {
                log::trace!("effect {slot:?}: running destructor");
                destructor.run();
            }

            let Some(effect) = store.borrow().get(slot).map(|d| d.effect.clone()) else {
                continue;
            };
            log::trace!("effect {slot:?}: running ({pass:?}, deps = {next:?})");
            let destructor = effect();

            if let Some(desc) = store.borrow_mut().get_mut(slot) {
                desc.destructor = destructor;
                desc.prev_deps = Some(next);
            }
            ran += 1;
        }

        ran
    }

    /// Runs and clears every outstanding destructor. Returns how many ran.
    pub(crate) fn teardown(store: &RefCell<Self>) -> usize {
        let slots = store.borrow().slots();
        let mut ran = 0;

        for slot in slots {
            let destructor = store
                .borrow_mut()
                .get_mut(slot)
                .and_then(|d| d.destructor.take());
            if let Some(destructor) = destructor {
                log::trace!("effect {slot:?}: teardown");
                destructor.run();
                ran += 1;
            }
        }

        ran
    }
}
