use std::borrow::Cow;

use crate::component::{Component, EffectComponent};
use crate::context::Effects;
use crate::descriptor::Pass;

/// Where a wrapped instance is in its life.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Lifecycle {
    /// Constructed, not yet committed.
    Idle,
    Mounted,
    /// Terminal.
    Unmounted,
}

/// Adds effect management to an [`EffectComponent`].
///
/// The wrapper owns the inner component and its [`Effects`] handle and is
/// itself a [`Component`], so the host treats it like any other. Every hook
/// is forwarded to the inner component first; the effect pass runs after.
pub struct WithEffects<C: EffectComponent> {
    inner: C,
    fx: Effects,
    lifecycle: Lifecycle,
}

impl<C: EffectComponent> WithEffects<C> {
    pub fn inner(&self) -> &C {
        &self.inner
    }

    pub fn inner_mut(&mut self) -> &mut C {
        &mut self.inner
    }

    pub fn effects(&self) -> &Effects {
        &self.fx
    }

    pub fn lifecycle(&self) -> Lifecycle {
        self.lifecycle
    }
}

impl<C: EffectComponent> Component for WithEffects<C> {
    type Props = C::Props;
    type Context = C::Context;
    type Output = C::Output;
    type Snapshot = C::Snapshot;
    type Error = C::Error;

    fn construct(props: Self::Props, context: &Self::Context) -> Result<Self, Self::Error> {
        let fx = Effects::new();
        let inner = {
            let guard = fx.constructing();
            let inner = C::construct(props, context, &fx)?;
            guard.commit();
            inner
        };
        log::debug!(
            "{}: constructed with {} static effects",
            Self::display_name(),
            fx.static_len()
        );

        Ok(Self {
            inner,
            fx,
            lifecycle: Lifecycle::Idle,
        })
    }

    fn render(&mut self) -> Result<Self::Output, Self::Error> {
        let guard = self.fx.rendering();
        let output = self.inner.render(&self.fx)?;
        guard.finish();
        Ok(output)
    }

    fn props(&self) -> &Self::Props {
        self.inner.props()
    }

    fn receive_props(&mut self, props: Self::Props) -> Self::Props {
        self.inner.receive_props(props)
    }

    fn did_mount(&mut self) -> Result<(), Self::Error> {
        self.inner.did_mount()?;

        if self.lifecycle != Lifecycle::Idle {
            log::warn!(
                "{}: did_mount called while {:?}; effects not run",
                Self::display_name(),
                self.lifecycle
            );
            return Ok(());
        }
        self.lifecycle = Lifecycle::Mounted;

        let ran = self.fx.commit(Pass::Mount);
        log::debug!("{}: mounted, {ran} effects ran", Self::display_name());
        Ok(())
    }

    fn snapshot_before_update(&mut self) -> Option<Self::Snapshot> {
        self.inner.snapshot_before_update()
    }

    fn did_update(
        &mut self,
        prev_props: &Self::Props,
        snapshot: Option<Self::Snapshot>,
    ) -> Result<(), Self::Error> {
        self.inner.did_update(prev_props, snapshot)?;

        if self.lifecycle != Lifecycle::Mounted {
            log::warn!(
                "{}: did_update called while {:?}; effects not run",
                Self::display_name(),
                self.lifecycle
            );
            return Ok(());
        }

        let ran = self.fx.commit(Pass::Update);
        log::debug!("{}: updated, {ran} effects re-ran", Self::display_name());
        Ok(())
    }

    fn will_unmount(&mut self) {
        self.inner.will_unmount();

        let ran = self.fx.teardown();
        self.lifecycle = Lifecycle::Unmounted;
        log::debug!("{}: unmounted, {ran} cleanups ran", Self::display_name());
    }

    fn display_name() -> Cow<'static, str> {
        Cow::Owned(format!("with_effects_support({})", C::display_name()))
    }
}
