//! Step observer trait for monitoring the phases of a physics step.

/// Trait for observing simulation steps.
///
/// Implement this to count contacts, time phases or drive debug overlays.
/// All methods have default no-op implementations. The `body` argument is
/// the body's position in the world's step order.
pub trait StepObserver {
    /// Called after a body's forces have been zeroed and external forces added.
    fn on_external(&mut self, _body: usize) {}

    /// Called after a body's spring forces have been accumulated.
    fn on_internal(&mut self, _body: usize) {}

    /// Called after collision probing with the number of violated contacts.
    fn on_collisions(&mut self, _body: usize, _contacts: usize) {}

    /// Called after a body's nodes have been integrated.
    fn on_integrate(&mut self, _body: usize) {}

    /// Called when a simulation step is fully complete.
    fn on_step_complete(&mut self) {}
}

/// A no-op observer that does nothing. Use as default when no observation needed.
pub struct NoOpStepObserver;

impl StepObserver for NoOpStepObserver {}
