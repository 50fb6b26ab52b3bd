use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

/// Cleanup returned by an effect. Runs before the effect runs again and when
/// the owning component unmounts.
#[derive(Clone)]
pub struct Dispose(Rc<RefCell<Option<Box<dyn FnOnce()>>>>);

impl Dispose {
    pub fn new(f: impl FnOnce() + 'static) -> Self {
        Self(Rc::new(RefCell::new(Some(Box::new(f)))))
    }

    /// Runs at most once (safe to call multiple times).
    pub fn run(&self) {
        // Release the borrow before calling out, the closure may hold a clone.
        let f = self.0.borrow_mut().take();
        if let Some(f) = f {
            f()
        }
    }

    pub fn is_spent(&self) -> bool {
        self.0.borrow().is_none()
    }
}

impl fmt::Debug for Dispose {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dispose")
            .field("spent", &self.is_spent())
            .finish()
    }
}

/// Helper to register cleanup inside an effect.
///
/// ```rust
/// use retrofx_core::on_unmount;
///
/// let effect = || on_unmount(|| log::info!("bye"));
/// let cleanup = effect().unwrap();
/// cleanup.run();
/// assert!(cleanup.is_spent());
/// ```
pub fn on_unmount(f: impl FnOnce() + 'static) -> Option<Dispose> {
    Some(Dispose::new(f))
}

/// Effect callback: runs after commit and may hand back a cleanup.
pub type EffectFn = Rc<dyn Fn() -> Option<Dispose>>;
