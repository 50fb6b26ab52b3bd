pub use crate::adapter::{Lifecycle, WithEffects};
pub use crate::component::{Component, EffectComponent};
pub use crate::context::{Effects, Phase};
pub use crate::deps;
pub use crate::deps::{Dep, DepList, Deps};
pub use crate::effects::{Dispose, on_unmount};
pub use crate::equality::shallow_equal;
pub use crate::error::EffectError;
pub use crate::host::Root;
