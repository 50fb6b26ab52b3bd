//! # Effects for class-style components
//!
//! `retrofx` adds declarative side-effects to components that are driven
//! through fixed lifecycle hooks (construct, render, after mount, after
//! update, before unmount). There are four pieces:
//!
//! - [`shallow_equal`]: positional, identity-based comparison of dependency
//!   lists.
//! - the descriptor store: per-instance *static* slots (declared while
//!   constructing) and *dynamic* slots (declared while rendering, matched by
//!   position).
//! - [`Effects::declare_effect`]: the single place effects are declared.
//! - [`WithEffects`]: wraps an [`EffectComponent`] into a host
//!   [`Component`] and runs the effects after each commit.
//!
//! ## Declaring effects
//!
//! ```rust
//! use retrofx_core::*;
//! use std::cell::Cell;
//! use std::rc::Rc;
//!
//! struct Clock {
//!     zone: &'static str,
//!     ticks: Rc<Cell<u32>>,
//! }
//!
//! impl EffectComponent for Clock {
//!     type Props = &'static str;
//!     type Context = Rc<Cell<u32>>;
//!     type Output = String;
//!     type Snapshot = ();
//!     type Error = EffectError;
//!
//!     fn construct(zone: &'static str, ticks: &Rc<Cell<u32>>, fx: &Effects) -> Result<Self, EffectError> {
//!         // Static: runs once after mount, cleaned up on unmount.
//!         let started = ticks.clone();
//!         fx.declare_effect(
//!             move || {
//!                 started.set(started.get() + 1);
//!                 on_unmount(|| log::info!("clock stopped"))
//!             },
//!             Deps::from_fn(|| Dep::list(["once"])),
//!         )?;
//!         Ok(Clock { zone, ticks: ticks.clone() })
//!     }
//!
//!     fn render(&mut self, fx: &Effects) -> Result<String, EffectError> {
//!         // Dynamic: re-runs whenever `zone` changes.
//!         let zone = self.zone;
//!         fx.declare_effect(move || { log::info!("zone is {zone}"); None }, deps![zone])?;
//!         Ok(format!("clock@{}", self.zone))
//!     }
//!
//!     fn props(&self) -> &&'static str {
//!         &self.zone
//!     }
//!
//!     fn receive_props(&mut self, zone: &'static str) -> &'static str {
//!         std::mem::replace(&mut self.zone, zone)
//!     }
//! }
//!
//! let ticks = Rc::new(Cell::new(0));
//! let mut root = Root::<WithEffects<Clock>>::mount("UTC", &ticks).unwrap();
//! root.update("CET").unwrap();
//! root.unmount();
//! assert_eq!(ticks.get(), 1);
//! ```
//!
//! ## Rules
//!
//! - Array dependencies (`deps![..]`) are only accepted during render; during
//!   construction use [`Deps::from_fn`] or [`Deps::Absent`].
//! - Render must declare the same effects in the same order every time.
//! - On mount every effect runs once. On update an effect re-runs when its
//!   resolved dependencies are falsy (absent, `0`, `""`, ...) or differ from
//!   the previous run. The previous cleanup always runs first.
//! - On unmount every outstanding cleanup runs exactly once.
//! - Errors and panics from user code are never caught.

pub mod adapter;
pub mod component;
pub mod context;
pub mod deps;
pub mod descriptor;
pub mod effects;
pub mod equality;
pub mod error;
pub mod host;
pub mod prelude;

pub use adapter::*;
pub use component::*;
pub use context::*;
pub use deps::*;
pub use effects::*;
pub use equality::*;
pub use error::*;
pub use host::*;
