// system.rs - Query-bound callbacks
//
// A system pairs a query with a step function that runs once per matching
// archetype, receiving an `ArchetypeView` of it. An optional begin hook runs
// once, right before the system first touches any archetype.

use crate::ecs::storage::ArchetypeView;
use crate::ecs::{Query, Scene};
use crate::memory::Arena;
use std::fmt;
use tracing::{trace, trace_span};

/// Handle assigned to each registered system.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SystemHandle(u32);

impl SystemHandle {
    pub(crate) fn new(index: u32) -> Self {
        Self(index)
    }

    /// Registration order of the system.
    #[inline]
    pub fn index(self) -> u32 {
        self.0
    }
}

impl fmt::Display for SystemHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

type BeginFn<'s> = Box<dyn FnMut() + 's>;
type StepFn<'s> = Box<dyn FnMut(&mut ArchetypeView<'_>) + 's>;

/// A query plus the callbacks invoked for it.
///
/// Systems registered with a world must be `'static`; systems passed to
/// `World::run` may borrow from the caller.
pub struct System<'s> {
    name: String,
    query: Query,
    begin: Option<BeginFn<'s>>,
    step: StepFn<'s>,
    started: bool,
}

impl<'s> System<'s> {
    pub fn new<F>(name: impl Into<String>, query: Query, step: F) -> Self
    where
        F: FnMut(&mut ArchetypeView<'_>) + 's,
    {
        Self {
            name: name.into(),
            query,
            begin: None,
            step: Box::new(step),
            started: false,
        }
    }

    /// Attach a hook that runs once, before the first activation.
    pub fn with_begin<F>(mut self, begin: F) -> Self
    where
        F: FnMut() + 's,
    {
        self.begin = Some(Box::new(begin));
        self
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn query(&self) -> &Query {
        &self.query
    }

    #[inline]
    pub fn has_begin(&self) -> bool {
        self.begin.is_some()
    }

    /// Whether the system has run at least once.
    #[inline]
    pub fn has_started(&self) -> bool {
        self.started
    }

    /// Activate the step once per matching archetype of `scene`, empty ones
    /// included. Returns the number of activations.
    pub(crate) fn run(&mut self, scene: &Scene, arena: &mut Arena) -> usize {
        let _span = trace_span!("system", name = %self.name).entered();

        if !self.started {
            self.started = true;
            if let Some(begin) = self.begin.as_mut() {
                begin();
            }
        }

        let mut activations = 0;
        for storage in self.query.matching(scene) {
            let mut view = ArchetypeView::new(storage, arena);
            (self.step)(&mut view);
            activations += 1;
        }

        trace!(activations, "system finished");
        activations
    }
}

impl fmt::Debug for System<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("System")
            .field("name", &self.name)
            .field("query", &self.query)
            .field("has_begin", &self.begin.is_some())
            .field("started", &self.started)
            .finish()
    }
}
