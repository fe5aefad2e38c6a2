//! The representation factory.
//!
//! A [`RsFactory`] maps a type identifier (`"RS0001"`, …) to a constructor
//! producing a default, uninitialized [`Representation`]. The loader never
//! matches on type identifiers itself; it asks the factory.
//!
//! Factories are plain values. Whoever owns one fills it during startup
//! (see `tk205_rs::register_representations`) and then hands out shared
//! references; nothing is registered behind the caller's back.

use crate::binding::BindingContext;
use crate::envelope::Envelope;
use crate::performance_map::PerformanceMap;
use serde_json::Value;
use std::any::Any;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

/// Zero-argument constructor for one representation type.
pub type Constructor = Arc<dyn Fn() -> Box<dyn Representation> + Send + Sync>;

/// Upcast helper so trait objects can be downcast to their concrete type.
pub trait AsAny: Any {
    fn as_any(&self) -> &dyn Any;
    fn into_any(self: Box<Self>) -> Box<dyn Any>;
}

impl<T: Any> AsAny for T {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn into_any(self: Box<Self>) -> Box<dyn Any> {
        self
    }
}

/// One equipment type's typed payload.
///
/// Implementations are default-constructible (all fields absent). The
/// factory hands out fresh instances and the envelope initializes each one
/// once; calling [`initialize`](Representation::initialize) again is not
/// guarded against.
pub trait Representation: AsAny + fmt::Debug + Send + Sync {
    /// Type identifier this payload binds, e.g. `"RS0006"`.
    fn rs_id(&self) -> &'static str;

    /// Populate every field from the payload node (`RS_instance`).
    fn initialize(&mut self, node: &Value, cx: &mut BindingContext<'_>);

    /// Performance maps this payload owns, keyed by their field path
    /// relative to the payload.
    fn performance_maps(&self) -> Vec<(&'static str, &PerformanceMap)> {
        Vec::new()
    }

    /// Embedded representations this payload owns, keyed by field path.
    fn embedded(&self) -> Vec<(&'static str, &Envelope)> {
        Vec::new()
    }
}

impl dyn Representation {
    pub fn downcast_ref<T: Representation>(&self) -> Option<&T> {
        self.as_any().downcast_ref::<T>()
    }

    pub fn downcast<T: Representation>(self: Box<Self>) -> Option<Box<T>> {
        self.into_any().downcast::<T>().ok()
    }

    pub fn is<T: Representation>(&self) -> bool {
        self.as_any().is::<T>()
    }

    /// Look up a performance map by the key `performance_maps` reports.
    pub fn performance_map(&self, key: &str) -> Option<&PerformanceMap> {
        self.performance_maps()
            .into_iter()
            .find_map(|(name, map)| (name == key).then_some(map))
    }

    /// Look up an embedded representation by the key `embedded` reports.
    pub fn embedded_representation(&self, key: &str) -> Option<&Envelope> {
        self.embedded()
            .into_iter()
            .find_map(|(name, envelope)| (name == key).then_some(envelope))
    }
}

/// Type identifier → constructor.
#[derive(Clone, Default)]
pub struct RsFactory {
    constructors: BTreeMap<String, Constructor>,
}

impl RsFactory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a constructor for `rs_id`.
    ///
    /// Last write wins: registering an id twice replaces the earlier
    /// constructor, which is handed back to the caller.
    pub fn register<F>(&mut self, rs_id: impl Into<String>, constructor: F) -> Option<Constructor>
    where
        F: Fn() -> Box<dyn Representation> + Send + Sync + 'static,
    {
        let rs_id = rs_id.into();
        let previous = self.constructors.insert(rs_id.clone(), Arc::new(constructor));
        if previous.is_some() {
            tracing::debug!(rs_id = %rs_id, "replaced registered representation constructor");
        }
        previous
    }

    /// A fresh, uninitialized payload for `rs_id`, or `None` if unregistered.
    pub fn create(&self, rs_id: &str) -> Option<Box<dyn Representation>> {
        let constructor = self.constructors.get(rs_id)?;
        tracing::trace!(rs_id, "creating representation");
        Some(constructor())
    }

    pub fn contains(&self, rs_id: &str) -> bool {
        self.constructors.contains_key(rs_id)
    }

    /// Registered identifiers in ascending order.
    pub fn registered_ids(&self) -> impl Iterator<Item = &str> {
        self.constructors.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.constructors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.constructors.is_empty()
    }
}

impl fmt::Debug for RsFactory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RsFactory")
            .field("registered", &self.constructors.keys().collect::<Vec<_>>())
            .finish()
    }
}
