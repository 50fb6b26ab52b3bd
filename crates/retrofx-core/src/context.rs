//! # Declaring effects
//!
//! Every component wrapped in [`WithEffects`](crate::WithEffects) owns one
//! [`Effects`] handle. The handle is passed to the component's `construct` and
//! `render`, and [`Effects::declare_effect`] behaves according to which of the
//! two is running:
//!
//! - during construction, effects are *static*: declared once, diffed with a
//!   dependency function (or always re-run when there is none);
//! - during render, effects are *dynamic*: the Nth declaration of every render
//!   refers to the Nth slot, exactly like `remember`.
//!
//! Any other time the handle refuses with
//! [`EffectError::IllegalInvocationContext`].
//!
//! Render declarations must happen in the same order and the same number of
//! times on every render. Conditional declarations shift every later slot;
//! the result is undefined and only reported with a warning.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

use smallvec::SmallVec;

use crate::deps::Deps;
use crate::descriptor::{EffectDescriptor, EffectStore, Pass};
use crate::effects::Dispose;
use crate::error::EffectError;

/// What the owning instance is doing right now.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    Constructing,
    Rendering,
}

/// Cloneable handle to one instance's effect bookkeeping.
#[derive(Clone, Default)]
pub struct Effects {
    inner: Rc<EffectsInner>,
}

#[derive(Default)]
struct EffectsInner {
    phase: Cell<Phase>,
    cursor: Cell<usize>,
    renders: Cell<u64>,
    pending: RefCell<SmallVec<[EffectDescriptor; 4]>>,
    store: RefCell<EffectStore>,
}

impl Effects {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Declares an effect for the owning component.
    ///
    /// `effect` runs after the component is committed and may return a
    /// cleanup (see [`on_unmount`](crate::on_unmount)). `deps` decides when it
    /// runs again on later updates:
    ///
    /// - [`Deps::Absent`]: on every update;
    /// - `deps![..]`: when any element changes (render only);
    /// - [`Deps::from_fn`]: when the returned value changes, or on every
    ///   update if it returns a falsy value.
    pub fn declare_effect<F>(&self, effect: F, deps: impl Into<Deps>) -> Result<(), EffectError>
    where
        F: Fn() -> Option<Dispose> + 'static,
    {
        let deps = deps.into();
        match self.inner.phase.get() {
            Phase::Rendering => {
                let pos = self.inner.cursor.get();
                self.inner.cursor.set(pos + 1);

                let mut store = self.inner.store.borrow_mut();
                match store.dynamics.get_mut(pos) {
                    Some(desc) => desc.reassign(Rc::new(effect), deps),
                    None => store
                        .dynamics
                        .push(EffectDescriptor::new(Rc::new(effect), deps)),
                }
                Ok(())
            }
            Phase::Constructing => {
                if deps.is_array() {
                    return Err(EffectError::InvalidDependencyShape);
                }
                self.inner
                    .pending
                    .borrow_mut()
                    .push(EffectDescriptor::new(Rc::new(effect), deps));
                Ok(())
            }
            Phase::Idle => Err(EffectError::IllegalInvocationContext),
        }
    }

    pub fn phase(&self) -> Phase {
        self.inner.phase.get()
    }

    /// Number of effects declared during construction.
    pub fn static_len(&self) -> usize {
        self.inner.store.borrow().statics.len()
    }

    /// Number of render-position slots.
    pub fn dynamic_len(&self) -> usize {
        self.inner.store.borrow().dynamics.len()
    }

    /// Effects that currently hold a cleanup.
    pub fn pending_cleanups(&self) -> usize {
        let store = self.inner.store.borrow();
        store
            .statics
            .iter()
            .chain(store.dynamics.iter())
            .filter(|d| d.has_destructor())
            .count()
    }

    /// Enters the construction phase until the guard is dropped.
    pub(crate) fn constructing(&self) -> ConstructGuard<'_> {
        debug_assert_eq!(self.inner.phase.get(), Phase::Idle);
        self.inner.phase.set(Phase::Constructing);
        ConstructGuard {
            fx: self,
            committed: false,
        }
    }

    /// Enters the render phase with the cursor at slot 0.
    pub(crate) fn rendering(&self) -> RenderGuard<'_> {
        debug_assert_eq!(self.inner.phase.get(), Phase::Idle);
        self.inner.cursor.set(0);
        self.inner.phase.set(Phase::Rendering);
        RenderGuard {
            fx: self,
            slots: self.dynamic_len(),
            finished: false,
        }
    }

    pub(crate) fn commit(&self, pass: Pass) -> usize {
        EffectStore::commit(&self.inner.store, pass)
    }

    pub(crate) fn teardown(&self) -> usize {
        EffectStore::teardown(&self.inner.store)
    }
}

impl fmt::Debug for Effects {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Effects")
            .field("phase", &self.phase())
            .field("static", &self.static_len())
            .field("dynamic", &self.dynamic_len())
            .finish()
    }
}

/// Leaves the construction phase on every exit path. The buffered
/// declarations become the static slots only when [`ConstructGuard::commit`]
/// was called; otherwise they are dropped.
pub(crate) struct ConstructGuard<'a> {
    fx: &'a Effects,
    committed: bool,
}

impl ConstructGuard<'_> {
    pub(crate) fn commit(mut self) {
        self.committed = true;
    }
}

impl Drop for ConstructGuard<'_> {
    fn drop(&mut self) {
        let inner = &self.fx.inner;
        let pending = std::mem::take(&mut *inner.pending.borrow_mut());
        if self.committed {
            inner.store.borrow_mut().statics = pending;
        }
        inner.phase.set(Phase::Idle);
    }
}

/// Leaves the render phase on every exit path. Slot counts are only checked
/// for renders that reached [`RenderGuard::finish`].
pub(crate) struct RenderGuard<'a> {
    fx: &'a Effects,
    slots: usize,
    finished: bool,
}

impl RenderGuard<'_> {
    pub(crate) fn finish(mut self) {
        self.finished = true;
    }
}

impl Drop for RenderGuard<'_> {
    fn drop(&mut self) {
        let inner = &self.fx.inner;
        inner.phase.set(Phase::Idle);

        if !self.finished {
            return;
        }

        let declared = inner.cursor.get();
        let slots = self.slots;
        let renders = inner.renders.get();
        inner.renders.set(renders + 1);

        // Slots only grow on the first render; afterwards the count is fixed.
        if renders > 0 && declared != slots {
            log::warn!(
                "render declared {declared} effects but the component has {slots} effect slots; \
                 effect declarations must not be conditional or reordered between renders"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::deps;
    use crate::deps::Dep;

    #[test]
    fn idle_handle_refuses() {
        let fx = Effects::new();
        assert_eq!(
            fx.declare_effect(|| None, Deps::Absent),
            Err(EffectError::IllegalInvocationContext)
        );
        assert_eq!(
            fx.declare_effect(|| None, deps![1]),
            Err(EffectError::IllegalInvocationContext)
        );
    }

    #[test]
    fn construction_rejects_arrays() {
        let fx = Effects::new();
        let guard = fx.constructing();
        assert_eq!(
            fx.declare_effect(|| None, deps![]),
            Err(EffectError::InvalidDependencyShape)
        );
        assert_eq!(fx.declare_effect(|| None, Deps::Absent), Ok(()));
        assert_eq!(
            fx.declare_effect(|| None, Deps::from_fn(|| Dep::from(1))),
            Ok(())
        );
        guard.commit();

        assert_eq!(fx.phase(), Phase::Idle);
        assert_eq!(fx.static_len(), 2);
    }

    #[test]
    fn abandoned_construction_keeps_nothing() {
        let fx = Effects::new();
        {
            let _guard = fx.constructing();
            fx.declare_effect(|| None, Deps::Absent).unwrap();
        }
        assert_eq!(fx.phase(), Phase::Idle);
        assert_eq!(fx.static_len(), 0);
    }

    #[test]
    fn render_slots_are_positional() {
        let fx = Effects::new();
        for round in 0..3 {
            let guard = fx.rendering();
            fx.declare_effect(|| None, deps![round]).unwrap();
            fx.declare_effect(|| None, Deps::Absent).unwrap();
            guard.finish();
        }
        assert_eq!(fx.dynamic_len(), 2);
        assert_eq!(fx.phase(), Phase::Idle);
    }
}
