use std::sync::atomic::{AtomicU64, Ordering};

#[derive(Debug, Default)]
pub struct Loader {
    active: AtomicU64,
    shown: AtomicU64,
    hidden: AtomicU64,
}

impl Loader {
    pub fn begin(&self) -> LoaderGuard<'_> {
        self.active.fetch_add(1, Ordering::SeqCst);
        self.shown.fetch_add(1, Ordering::SeqCst);
        LoaderGuard { loader: self }
    }

    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::SeqCst) > 0
    }

    pub fn shown(&self) -> u64 {
        self.shown.load(Ordering::SeqCst)
    }

    pub fn hidden(&self) -> u64 {
        self.hidden.load(Ordering::SeqCst)
    }
}

pub struct LoaderGuard<'a> {
    loader: &'a Loader,
}

impl Drop for LoaderGuard<'_> {
    fn drop(&mut self) {
        self.loader.active.fetch_sub(1, Ordering::SeqCst);
        self.loader.hidden.fetch_add(1, Ordering::SeqCst);
    }
}
