//! Session actor - owns selection state and coordinates plan recomputation
//!
//! # Concurrency model
//!
//! The actor is the single owner of the selection state, so UI mutations
//! serialize naturally through its mailbox. Every selection setter triggers
//! one detached planning task; the setter never awaits it. Nothing cancels
//! an in-flight task and nothing orders overlapping completions: each task
//! posts its outcome back to the mailbox and outcomes apply in arrival
//! order. **The last completion to arrive wins**, even when its trigger came
//! first - a slow early request can overwrite a fast later one. This
//! last-completion-wins policy is part of the session's contract and is
//! asserted by the tests.

use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::config::{Config, MapConfig};
use crate::domain::{GeoCoordinate, PlanQuery, PlanResult, PlanType, Stop};
use crate::events::{EventBus, SessionEvent};
use crate::map::{MapRenderer, build_map_request};
use crate::providers::{Planner, ProviderError, StopLookup};

use super::handle::SessionHandle;
use super::messages::{SessionCommand, SessionError};

/// Mailbox capacity; mutations and plan completions share it
const CHANNEL_BUFFER: usize = 256;

/// Read-only copy of the full selection state
#[derive(Debug, Clone)]
pub struct SelectionSnapshot {
    pub source: String,
    pub target: String,
    pub source_stops: Vec<Stop>,
    pub target_stops: Vec<Stop>,
    pub selected_source: Option<Stop>,
    pub selected_target: Option<Stop>,
    pub selected_time: Option<String>,
    pub selected_plan_type: Option<PlanType>,
    pub times: Vec<String>,
    pub zoom: u8,
    pub plan: Vec<String>,
    pub map_uri: Option<String>,
    pub center: Option<GeoCoordinate>,
}

/// The mutable state owned by the actor
struct SelectionState {
    source: String,
    target: String,
    source_stops: Vec<Stop>,
    target_stops: Vec<Stop>,
    selected_source: Option<Stop>,
    selected_target: Option<Stop>,
    selected_time: Option<String>,
    selected_plan_type: Option<PlanType>,
    times: Vec<String>,
    zoom: u8,
    plan: Vec<String>,
    map_uri: Option<String>,
    center: Option<GeoCoordinate>,
}

impl SelectionState {
    fn new(zoom: u8) -> Self {
        Self {
            source: String::new(),
            target: String::new(),
            source_stops: Vec::new(),
            target_stops: Vec::new(),
            selected_source: None,
            selected_target: None,
            selected_time: None,
            selected_plan_type: None,
            times: (0..24).map(|hour| format!("{hour:02}")).collect(),
            zoom,
            plan: Vec::new(),
            map_uri: None,
            center: None,
        }
    }

    fn snapshot(&self) -> SelectionSnapshot {
        SelectionSnapshot {
            source: self.source.clone(),
            target: self.target.clone(),
            source_stops: self.source_stops.clone(),
            target_stops: self.target_stops.clone(),
            selected_source: self.selected_source.clone(),
            selected_target: self.selected_target.clone(),
            selected_time: self.selected_time.clone(),
            selected_plan_type: self.selected_plan_type,
            times: self.times.clone(),
            zoom: self.zoom,
            plan: self.plan.clone(),
            map_uri: self.map_uri.clone(),
            center: self.center,
        }
    }

    /// The four planning inputs as currently selected
    fn plan_query(&self) -> PlanQuery {
        PlanQuery {
            source: self.selected_source.as_ref().map(|s| s.id.clone()),
            target: self.selected_target.as_ref().map(|s| s.id.clone()),
            time: self.selected_time.clone(),
            plan_type: self.selected_plan_type,
        }
    }
}

/// The session actor
pub struct Session;

impl Session {
    /// Spawn a session and return its handle
    ///
    /// The actor runs until [`SessionHandle::shutdown`]. It keeps a sender
    /// to its own mailbox for plan completions, so dropping the handles
    /// alone does not stop it.
    pub fn spawn(
        config: &Config,
        lookup: Arc<dyn StopLookup>,
        planner: Arc<dyn Planner>,
        renderer: Arc<dyn MapRenderer>,
        bus: EventBus,
    ) -> SessionHandle {
        debug!(zoom = config.map.zoom, "Session::spawn: called");
        let (tx, rx) = mpsc::channel(CHANNEL_BUFFER);
        let state = SelectionState::new(config.map.zoom);

        tokio::spawn(actor_loop(
            state,
            config.map.clone(),
            lookup,
            planner,
            renderer,
            bus,
            tx.clone(),
            rx,
        ));

        info!("Session spawned");
        SessionHandle::new(tx)
    }
}

#[allow(clippy::too_many_arguments)]
async fn actor_loop(
    mut state: SelectionState,
    map_config: MapConfig,
    lookup: Arc<dyn StopLookup>,
    planner: Arc<dyn Planner>,
    renderer: Arc<dyn MapRenderer>,
    bus: EventBus,
    tx: mpsc::Sender<SessionCommand>,
    mut rx: mpsc::Receiver<SessionCommand>,
) {
    debug!("actor_loop: session actor started");

    // The hour list exists before any interaction; publishing it counts as
    // a change like any other
    bus.emit(SessionEvent::Times {
        times: state.times.clone(),
    });

    while let Some(cmd) = rx.recv().await {
        match cmd {
            SessionCommand::SetSource { text, reply } => {
                debug!(%text, "actor_loop: SetSource command");
                state.source = text;
                let result = match lookup.lookup_stops(&state.source).await {
                    Ok(stops) => {
                        state.source_stops = stops.clone();
                        bus.emit(SessionEvent::SourceStops { stops: stops.clone() });
                        Ok(stops)
                    }
                    // Previous list stays; the failure goes back to the caller
                    Err(e) => Err(SessionError::Lookup(e)),
                };
                let _ = reply.send(result);
            }

            SessionCommand::SetTarget { text, reply } => {
                debug!(%text, "actor_loop: SetTarget command");
                state.target = text;
                let result = match lookup.lookup_stops(&state.target).await {
                    Ok(stops) => {
                        state.target_stops = stops.clone();
                        bus.emit(SessionEvent::TargetStops { stops: stops.clone() });
                        Ok(stops)
                    }
                    Err(e) => Err(SessionError::Lookup(e)),
                };
                let _ = reply.send(result);
            }

            SessionCommand::SetSelectedSource { stop } => {
                debug!(?stop, "actor_loop: SetSelectedSource command");
                state.selected_source = stop;
                trigger_plan(&state, &planner, &tx);
            }

            SessionCommand::SetSelectedTarget { stop } => {
                debug!(?stop, "actor_loop: SetSelectedTarget command");
                state.selected_target = stop;
                trigger_plan(&state, &planner, &tx);
            }

            SessionCommand::SetSelectedTime { time } => {
                debug!(?time, "actor_loop: SetSelectedTime command");
                state.selected_time = time;
                trigger_plan(&state, &planner, &tx);
            }

            SessionCommand::SetSelectedPlanType { plan_type } => {
                debug!(?plan_type, "actor_loop: SetSelectedPlanType command");
                state.selected_plan_type = plan_type;
                trigger_plan(&state, &planner, &tx);
            }

            SessionCommand::SetZoom { zoom } => {
                debug!(zoom, "actor_loop: SetZoom command");
                state.zoom = zoom;
            }

            SessionCommand::ApplyPlan { outcome } => {
                debug!("actor_loop: ApplyPlan command");
                apply_plan(&mut state, outcome, &map_config, renderer.as_ref(), &bus);
            }

            SessionCommand::Snapshot { reply } => {
                debug!("actor_loop: Snapshot command");
                let _ = reply.send(state.snapshot());
            }

            SessionCommand::Shutdown => {
                debug!("actor_loop: Shutdown command");
                info!("Session shutting down");
                break;
            }
        }
    }

    debug!("actor_loop: session actor stopped");
}

/// Fire one planning task for the current selections
///
/// Unconditional: no debounce and no equality check - the UI is the sole
/// mutator and every set re-triggers, even to the same value. The task is
/// detached; it reports back through the mailbox whenever it completes.
fn trigger_plan(state: &SelectionState, planner: &Arc<dyn Planner>, tx: &mpsc::Sender<SessionCommand>) {
    let query = state.plan_query();
    debug!(?query, "trigger_plan: scheduling planning call");
    let planner = Arc::clone(planner);
    let tx = tx.clone();
    tokio::spawn(async move {
        let outcome = planner.compute_plan(query).await;
        // The session may have shut down while the call was in flight
        let _ = tx.send(SessionCommand::ApplyPlan { outcome }).await;
    });
}

/// Apply one completed planning call to the derived state
fn apply_plan(
    state: &mut SelectionState,
    outcome: Result<Option<PlanResult>, ProviderError>,
    map_config: &MapConfig,
    renderer: &dyn MapRenderer,
    bus: &EventBus,
) {
    match outcome {
        Ok(Some(result)) => {
            debug!(lines = result.lines.len(), markers = result.markers.len(), "apply_plan: plan received");
            state.plan = result.lines;
            bus.emit(SessionEvent::Plan {
                lines: state.plan.clone(),
            });

            // No markers means nothing to show; previous map stays
            if let Some(request) = build_map_request(&result.markers, state.zoom, map_config) {
                state.center = Some(request.center);
                let uri = renderer.render(&request);
                state.map_uri = Some(uri.clone());
                bus.emit(SessionEvent::MapUri { uri });
            }
        }
        Ok(None) => {
            // "No plan available" is a normal outcome: the plan clears but
            // the previous map stays on screen
            debug!("apply_plan: no plan available");
            state.plan.clear();
            bus.emit(SessionEvent::Plan { lines: Vec::new() });
        }
        Err(e) => {
            warn!(error = %e, "apply_plan: planning call failed, keeping previous state");
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::config::MapCredentials;
    use crate::map::StaticMapRenderer;
    use crate::providers::mock::{MockPlanner, MockStopLookup};
    use tokio::sync::broadcast;

    /// Next event that is not the startup Times publication
    ///
    /// Subscribing races the actor's startup emit, so Times may or may not
    /// be observed first.
    async fn next_change(rx: &mut broadcast::Receiver<SessionEvent>) -> SessionEvent {
        loop {
            let event = rx.recv().await.unwrap();
            if event.field() != "Times" {
                return event;
            }
        }
    }

    fn plan(lines: &[&str], markers: &[(f64, f64)]) -> PlanResult {
        PlanResult {
            lines: lines.iter().map(|s| s.to_string()).collect(),
            markers: markers.iter().map(|&(lat, lon)| GeoCoordinate::new(lat, lon)).collect(),
        }
    }

    fn spawn_with(planner: Arc<MockPlanner>, lookup: Arc<MockStopLookup>) -> (SessionHandle, EventBus) {
        let bus = EventBus::with_default_capacity();
        let renderer = Arc::new(StaticMapRenderer::new(MapCredentials::new("test-key")));
        let handle = Session::spawn(&Config::default(), lookup, planner, renderer, bus.clone());
        (handle, bus)
    }

    async fn settle() {
        // Long enough for detached plan tasks to post back
        tokio::time::sleep(Duration::from_millis(50)).await;
    }

    #[tokio::test]
    async fn test_times_published_at_startup() {
        let (handle, _bus) = spawn_with(Arc::new(MockPlanner::new()), Arc::new(MockStopLookup::new()));
        let snapshot = handle.snapshot().await.unwrap();
        assert_eq!(snapshot.times.len(), 24);
        assert_eq!(snapshot.times[0], "00");
        assert_eq!(snapshot.times[23], "23");
        handle.shutdown().await.unwrap();
    }

    #[tokio::test]
    async fn test_set_source_resolves_and_notifies() {
        let stop = Stop::new("s1", "Central", GeoCoordinate::new(32.0, 34.8));
        let lookup = Arc::new(MockStopLookup::new().with_outcome(Ok(vec![stop.clone()])));
        let (handle, bus) = spawn_with(Arc::new(MockPlanner::new()), lookup);
        let mut rx = bus.subscribe();

        let stops = handle.set_source("central").await.unwrap();
        assert_eq!(stops, vec![stop.clone()]);

        let snapshot = handle.snapshot().await.unwrap();
        assert_eq!(snapshot.source, "central");
        assert_eq!(snapshot.source_stops, vec![stop]);

        // One SourceStops notification for the resolution
        let event = next_change(&mut rx).await;
        assert_eq!(event.field(), "SourceStops");

        handle.shutdown().await.unwrap();
    }

    #[tokio::test]
    async fn test_lookup_failure_surfaces_and_keeps_previous_list() {
        let stop = Stop::new("s1", "Central", GeoCoordinate::new(32.0, 34.8));
        let lookup = Arc::new(
            MockStopLookup::new()
                .with_outcome(Ok(vec![stop.clone()]))
                .with_outcome(Err(ProviderError::Api {
                    status: 502,
                    message: "lookup down".to_string(),
                })),
        );
        let (handle, _bus) = spawn_with(Arc::new(MockPlanner::new()), lookup);

        handle.set_source("central").await.unwrap();

        let result = handle.set_source("cent").await;
        assert!(matches!(result, Err(SessionError::Lookup(ProviderError::Api { status: 502, .. }))));

        // The failed lookup left the resolved list alone
        let snapshot = handle.snapshot().await.unwrap();
        assert_eq!(snapshot.source_stops, vec![stop]);
        // The text itself was stored before the lookup ran
        assert_eq!(snapshot.source, "cent");

        handle.shutdown().await.unwrap();
    }

    #[tokio::test]
    async fn test_every_selection_set_triggers_exactly_one_call() {
        let planner = Arc::new(MockPlanner::new());
        let (handle, _bus) = spawn_with(planner.clone(), Arc::new(MockStopLookup::new()));

        let stop = Stop::new("s1", "Central", GeoCoordinate::new(32.0, 34.8));
        handle.set_selected_source(Some(stop.clone())).await.unwrap();
        handle.set_selected_target(Some(stop.clone())).await.unwrap();
        handle.set_selected_time(Some("09".to_string())).await.unwrap();
        handle.set_selected_plan_type(Some(PlanType::Direct)).await.unwrap();
        // Same value again: still re-triggers
        handle.set_selected_source(Some(stop)).await.unwrap();

        settle().await;
        assert_eq!(planner.call_count(), 5);

        handle.shutdown().await.unwrap();
    }

    #[tokio::test]
    async fn test_plan_result_updates_plan_and_map() {
        let planner = Arc::new(
            MockPlanner::new().with_outcome(Ok(Some(plan(&["Board line 5"], &[(0.0, 0.0), (2.0, 4.0)])))),
        );
        let (handle, bus) = spawn_with(planner, Arc::new(MockStopLookup::new()));
        let mut rx = bus.subscribe();

        handle.set_selected_time(Some("08".to_string())).await.unwrap();
        settle().await;

        let snapshot = handle.snapshot().await.unwrap();
        assert_eq!(snapshot.plan, vec!["Board line 5"]);
        assert_eq!(snapshot.center, Some(GeoCoordinate::new(1.0, 2.0)));
        let uri = snapshot.map_uri.unwrap();
        assert!(uri.contains("center=1%2C2"));
        assert!(uri.contains("key=test-key"));

        // Plan notification, then MapUri notification
        assert_eq!(next_change(&mut rx).await.field(), "Plan");
        assert_eq!(next_change(&mut rx).await.field(), "MapUri");

        handle.shutdown().await.unwrap();
    }

    #[tokio::test]
    async fn test_absent_plan_clears_plan_and_keeps_map() {
        let planner = Arc::new(
            MockPlanner::new()
                .with_outcome(Ok(Some(plan(&["Board line 5"], &[(0.0, 0.0), (2.0, 4.0)]))))
                .with_outcome(Ok(None)),
        );
        let (handle, _bus) = spawn_with(planner, Arc::new(MockStopLookup::new()));

        handle.set_selected_time(Some("08".to_string())).await.unwrap();
        settle().await;
        let before = handle.snapshot().await.unwrap();
        assert!(!before.plan.is_empty());

        handle.set_selected_time(None).await.unwrap();
        settle().await;
        let after = handle.snapshot().await.unwrap();

        // Plan cleared; map uri and center bit-identical to before
        assert!(after.plan.is_empty());
        assert_eq!(after.map_uri, before.map_uri);
        assert_eq!(after.center, before.center);

        handle.shutdown().await.unwrap();
    }

    #[tokio::test]
    async fn test_empty_markers_skip_map_update() {
        let planner = Arc::new(
            MockPlanner::new()
                .with_outcome(Ok(Some(plan(&["walk"], &[(10.0, 20.0)]))))
                .with_outcome(Ok(Some(plan(&["stay put"], &[])))),
        );
        let (handle, _bus) = spawn_with(planner, Arc::new(MockStopLookup::new()));

        handle.set_selected_time(Some("07".to_string())).await.unwrap();
        settle().await;
        let before = handle.snapshot().await.unwrap();

        handle.set_selected_time(Some("08".to_string())).await.unwrap();
        settle().await;
        let after = handle.snapshot().await.unwrap();

        // The plan text moved on but the map did not
        assert_eq!(after.plan, vec!["stay put"]);
        assert_eq!(after.map_uri, before.map_uri);
        assert_eq!(after.center, Some(GeoCoordinate::new(10.0, 20.0)));

        handle.shutdown().await.unwrap();
    }

    #[tokio::test]
    async fn test_planner_failure_keeps_previous_state() {
        let planner = Arc::new(
            MockPlanner::new()
                .with_outcome(Ok(Some(plan(&["Board line 5"], &[(1.0, 1.0)]))))
                .with_outcome(Err(ProviderError::Api {
                    status: 500,
                    message: "planner down".to_string(),
                })),
        );
        let (handle, _bus) = spawn_with(planner, Arc::new(MockStopLookup::new()));

        handle.set_selected_time(Some("08".to_string())).await.unwrap();
        settle().await;
        let before = handle.snapshot().await.unwrap();

        handle.set_selected_time(Some("09".to_string())).await.unwrap();
        settle().await;
        let after = handle.snapshot().await.unwrap();

        assert_eq!(after.plan, before.plan);
        assert_eq!(after.map_uri, before.map_uri);

        handle.shutdown().await.unwrap();
    }

    #[tokio::test]
    async fn test_race_last_completion_wins() {
        // Trigger A resolves slowly, trigger B quickly: B's result lands
        // first and A's completion overwrites it. The final state reflects
        // A - last completion wins, not last trigger.
        let planner = Arc::new(
            MockPlanner::new()
                .with_delayed_outcome(
                    Duration::from_millis(100),
                    Ok(Some(plan(&["slow plan A"], &[(0.0, 0.0), (2.0, 4.0)]))),
                )
                .with_delayed_outcome(
                    Duration::from_millis(10),
                    Ok(Some(plan(&["fast plan B"], &[(10.0, 10.0), (20.0, 20.0)]))),
                ),
        );
        let (handle, _bus) = spawn_with(planner, Arc::new(MockStopLookup::new()));

        handle.set_selected_time(Some("08".to_string())).await.unwrap();
        handle.set_selected_time(Some("09".to_string())).await.unwrap();

        tokio::time::sleep(Duration::from_millis(250)).await;
        let snapshot = handle.snapshot().await.unwrap();

        assert_eq!(snapshot.plan, vec!["slow plan A"]);
        assert_eq!(snapshot.center, Some(GeoCoordinate::new(1.0, 2.0)));

        handle.shutdown().await.unwrap();
    }

    #[tokio::test]
    async fn test_zoom_set_does_not_trigger_planning() {
        let planner = Arc::new(MockPlanner::new());
        let (handle, _bus) = spawn_with(planner.clone(), Arc::new(MockStopLookup::new()));

        handle.set_zoom(13).await.unwrap();
        settle().await;
        assert_eq!(planner.call_count(), 0);

        let snapshot = handle.snapshot().await.unwrap();
        assert_eq!(snapshot.zoom, 13);

        handle.shutdown().await.unwrap();
    }
}
