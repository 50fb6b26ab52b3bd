//! # Component contracts
//!
//! [`Component`] is what the host tree mounts, updates and unmounts. The host
//! calls, in order:
//!
//! 1. `construct(props, context)`, then `render()`, then `did_mount()` once
//!    the output is committed;
//! 2. for each update: `receive_props(..)` (when props changed),
//!    `snapshot_before_update()`, `render()`, then `did_update(..)`;
//! 3. `will_unmount()` before the instance is dropped.
//!
//! [`EffectComponent`] is the same contract with an [`Effects`] handle passed
//! to `construct` and `render`. Wrapping it in
//! [`WithEffects`](crate::WithEffects) turns it back into a plain
//! [`Component`].

use std::borrow::Cow;

use crate::context::Effects;
use crate::error::EffectError;

/// Short type name without the module path.
pub(crate) fn short_type_name<T: ?Sized>() -> &'static str {
    let full = std::any::type_name::<T>();
    let base = full.split('<').next().unwrap_or(full);
    match base.rfind("::") {
        Some(i) => &full[i + 2..],
        None => full,
    }
}

pub trait Component: Sized {
    type Props;
    /// Host-provided ambient context handed to the constructor.
    type Context;
    type Output;
    type Snapshot;
    type Error;

    fn construct(props: Self::Props, context: &Self::Context) -> Result<Self, Self::Error>;

    fn render(&mut self) -> Result<Self::Output, Self::Error>;

    fn props(&self) -> &Self::Props;

    /// Stores new props and hands back the previous ones.
    fn receive_props(&mut self, props: Self::Props) -> Self::Props;

    fn did_mount(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }

    fn snapshot_before_update(&mut self) -> Option<Self::Snapshot> {
        None
    }

    fn did_update(
        &mut self,
        _prev_props: &Self::Props,
        _snapshot: Option<Self::Snapshot>,
    ) -> Result<(), Self::Error> {
        Ok(())
    }

    fn will_unmount(&mut self) {}

    fn display_name() -> Cow<'static, str> {
        Cow::Borrowed(short_type_name::<Self>())
    }
}

/// A component that declares effects.
///
/// ```rust
/// use retrofx_core::*;
/// use std::borrow::Cow;
///
/// struct Title {
///     text: String,
/// }
///
/// impl EffectComponent for Title {
///     type Props = String;
///     type Context = ();
///     type Output = String;
///     type Snapshot = ();
///     type Error = EffectError;
///
///     fn construct(text: String, _: &(), fx: &Effects) -> Result<Self, EffectError> {
///         fx.declare_effect(|| on_unmount(|| log::debug!("title gone")), Deps::Absent)?;
///         Ok(Title { text })
///     }
///
///     fn render(&mut self, fx: &Effects) -> Result<String, EffectError> {
///         let text = self.text.clone();
///         fx.declare_effect(move || { log::info!("title = {text}"); None }, deps![self.text.clone()])?;
///         Ok(self.text.clone())
///     }
///
///     fn props(&self) -> &String {
///         &self.text
///     }
///
///     fn receive_props(&mut self, text: String) -> String {
///         std::mem::replace(&mut self.text, text)
///     }
/// }
///
/// assert_eq!(WithEffects::<Title>::display_name(), Cow::from("with_effects_support(Title)"));
/// ```
pub trait EffectComponent: Sized {
    type Props;
    type Context;
    type Output;
    type Snapshot;
    type Error: From<EffectError>;

    fn construct(
        props: Self::Props,
        context: &Self::Context,
        fx: &Effects,
    ) -> Result<Self, Self::Error>;

    fn render(&mut self, fx: &Effects) -> Result<Self::Output, Self::Error>;

    fn props(&self) -> &Self::Props;

    fn receive_props(&mut self, props: Self::Props) -> Self::Props;

    fn did_mount(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }

    fn snapshot_before_update(&mut self) -> Option<Self::Snapshot> {
        None
    }

    fn did_update(
        &mut self,
        _prev_props: &Self::Props,
        _snapshot: Option<Self::Snapshot>,
    ) -> Result<(), Self::Error> {
        Ok(())
    }

    fn will_unmount(&mut self) {}

    fn display_name() -> Cow<'static, str> {
        Cow::Borrowed(short_type_name::<Self>())
    }
}

#[cfg(test)]
mod tests {
    use super::short_type_name;

    struct Plain;
    struct Generic<T>(T);

    #[test]
    fn short_names() {
        assert_eq!(short_type_name::<Plain>(), "Plain");
        assert_eq!(short_type_name::<Generic<u8>>(), "Generic<u8>");
    }
}
