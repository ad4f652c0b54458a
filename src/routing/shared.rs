//! Copy-on-write publication of route tables.
//!
//! Registration happens on a private `SimpleRouter`; the finished table is
//! published with one atomic pointer swap. Requests already dispatching keep
//! the snapshot they loaded.

use std::sync::Arc;

use arc_swap::ArcSwap;

use crate::routing::SimpleRouter;

/// A `SimpleRouter` that can be replaced while requests are being served.
#[derive(Debug)]
pub struct SharedRouter<H> {
    current: ArcSwap<SimpleRouter<H>>,
}

impl<H> SharedRouter<H> {
    pub fn new(router: SimpleRouter<H>) -> Self {
        Self {
            current: ArcSwap::from_pointee(router),
        }
    }

    /// The snapshot to dispatch the current request against.
    pub fn snapshot(&self) -> Arc<SimpleRouter<H>> {
        self.current.load_full()
    }

    /// Publish a fully built router.
    pub fn replace(&self, router: SimpleRouter<H>) {
        let routes = router.table().len();
        self.current.store(Arc::new(router));
        tracing::info!(routes, "Route table swapped");
    }
}

impl<H: Clone> SharedRouter<H> {
    /// Clone the current router, apply `f`, and publish the result.
    ///
    /// Concurrent updates are retried so none is lost.
    pub fn update<F>(&self, f: F)
    where
        F: Fn(&mut SimpleRouter<H>),
    {
        self.current.rcu(|current| {
            let mut next = SimpleRouter::clone(current);
            f(&mut next);
            next
        });
    }
}

impl<H> From<SimpleRouter<H>> for SharedRouter<H> {
    fn from(router: SimpleRouter<H>) -> Self {
        Self::new(router)
    }
}
