//! Mission observer trait for rendering and results collection.

use bastion_core::events::EngagementEvent;
use bastion_core::state::{MissionFrame, MissionSummary};

/// Callbacks invoked by [`MissionEngine::run`][crate::MissionEngine::run].
///
/// All methods have default no-op implementations so implementors only need to
/// override what they care about.
///
/// # Example: kill counter
///
/// ```rust,ignore
/// struct KillCounter(u32);
///
/// impl MissionObserver for KillCounter {
///     fn on_event(&mut self, event: &EngagementEvent) {
///         if matches!(event, EngagementEvent::BeamResolved { result: InterceptResult::Hit, .. }) {
///             self.0 += 1;
///         }
///     }
/// }
/// ```
pub trait MissionObserver {
    /// Called once per tick with the full visible state.
    fn on_frame(&mut self, _frame: &MissionFrame) {}

    /// Called for every event, in emission order, before `on_frame`.
    fn on_event(&mut self, _event: &EngagementEvent) {}

    /// Called once after the final tick.
    fn on_mission_end(&mut self, _summary: &MissionSummary) {}
}

/// A [`MissionObserver`] that does nothing.
pub struct NoopObserver;

impl MissionObserver for NoopObserver {}

/// Keeps every summary it is handed. Useful across batches of missions.
#[derive(Debug, Default)]
pub struct SummaryCollector {
    pub summaries: Vec<MissionSummary>,
}

impl MissionObserver for SummaryCollector {
    fn on_mission_end(&mut self, summary: &MissionSummary) {
        self.summaries.push(summary.clone());
    }
}
