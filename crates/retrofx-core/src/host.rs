//! A single-root host driver.
//!
//! `Root` stands in for the tree renderer: it walks one component through
//! construct → render → commit → update* → unmount, calling the hooks in the
//! order a host would. Rendering is synchronous and never re-enters.

use crate::component::Component;

pub struct Root<C: Component> {
    instance: Option<C>,
    output: Option<C::Output>,
    commits: u64,
}

impl<C: Component> Root<C> {
    /// Constructs, renders and commits a new instance.
    pub fn mount(props: C::Props, context: &C::Context) -> Result<Self, C::Error> {
        let mut instance = C::construct(props, context)?;
        let output = instance.render()?;
        instance.did_mount()?;
        log::debug!("root: mounted {}", C::display_name());

        Ok(Self {
            instance: Some(instance),
            output: Some(output),
            commits: 1,
        })
    }

    /// Commits a render with new props.
    pub fn update(&mut self, props: C::Props) -> Result<(), C::Error> {
        let Some(instance) = self.instance.as_mut() else {
            log::warn!("root: update after unmount ignored");
            return Ok(());
        };
        let prev_props = instance.receive_props(props);
        Self::commit_update(instance, &mut self.output, &prev_props)?;
        self.commits += 1;
        Ok(())
    }

    /// Commits a render with the current props, as a state change would.
    pub fn rerender(&mut self) -> Result<(), C::Error>
    where
        C::Props: Clone,
    {
        let Some(instance) = self.instance.as_mut() else {
            log::warn!("root: rerender after unmount ignored");
            return Ok(());
        };
        let prev_props = instance.props().clone();
        Self::commit_update(instance, &mut self.output, &prev_props)?;
        self.commits += 1;
        Ok(())
    }

    /// Runs `will_unmount` and drops the instance. Calling it again is a
    /// no-op.
    pub fn unmount(&mut self) {
        if let Some(mut instance) = self.instance.take() {
            instance.will_unmount();
            self.output = None;
            log::debug!("root: unmounted {}", C::display_name());
        }
    }

    pub fn instance(&self) -> Option<&C> {
        self.instance.as_ref()
    }

    pub fn instance_mut(&mut self) -> Option<&mut C> {
        self.instance.as_mut()
    }

    pub fn output(&self) -> Option<&C::Output> {
        self.output.as_ref()
    }

    /// Number of committed renders, including the initial mount.
    pub fn commits(&self) -> u64 {
        self.commits
    }

    pub fn is_mounted(&self) -> bool {
        self.instance.is_some()
    }

    fn commit_update(
        instance: &mut C,
        output: &mut Option<C::Output>,
        prev_props: &C::Props,
    ) -> Result<(), C::Error> {
        let snapshot = instance.snapshot_before_update();
        *output = Some(instance.render()?);
        instance.did_update(prev_props, snapshot)
    }
}

impl<C: Component> Drop for Root<C> {
    fn drop(&mut self) {
        self.unmount();
    }
}
