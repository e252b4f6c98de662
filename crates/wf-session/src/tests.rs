//! Unit tests for wf-session.

#[cfg(test)]
mod helpers {
    use tokio::sync::mpsc;

    use wf_core::WayfinderConfig;
    use wf_data::{parse_map_json, Dataset};
    use wf_narrate::Announcement;

    use crate::{Wayfinder, WayfinderBuilder};

    pub type Tx = mpsc::UnboundedSender<Announcement>;
    pub type Rx = mpsc::UnboundedReceiver<Announcement>;

    /// ```text
    ///   Staircase2 (0,10)
    ///      │      \
    ///      │       OliveCafe (5,5)
    ///      │
    ///   MainGateway (0,0) ── T1 (5,0) ── Staircase1 (10,0)
    ///
    ///   Island (100,100), unconnected
    /// ```
    pub const MAP: &str = r#"{
        "nodes": {
            "MainGateway": { "x": 0,   "y": 0 },
            "Staircase1":  { "x": 10,  "y": 0 },
            "Staircase2":  { "x": 0,   "y": 10 },
            "OliveCafe":   { "x": 5,   "y": 5 },
            "Island":      { "x": 100, "y": 100 }
        },
        "turnPoints": { "T1": { "x": 5, "y": 0 } },
        "edges": [
            { "from": "MainGateway", "to": "T1" },
            { "from": "T1", "to": "Staircase1" },
            { "from": "MainGateway", "to": "Staircase2" },
            { "from": "Staircase2", "to": "OliveCafe" }
        ],
        "categories": {
            "MainGateway": "Gateway",
            "Staircase1": "Staircase",
            "Staircase2": "Staircase"
        },
        "synonyms": {
            "OliveCafe": ["olive cafe", "cafe"],
            "category:staircase": ["staircase", "stairs"]
        }
    }"#;

    pub fn dataset() -> Dataset {
        parse_map_json(MAP).unwrap()
    }

    pub fn engine_with(config: WayfinderConfig) -> (Wayfinder<Tx>, Rx) {
        let (tx, rx) = mpsc::unbounded_channel();
        let wayfinder = WayfinderBuilder::new(dataset(), tx).config(config).build().unwrap();
        (wayfinder, rx)
    }

    pub fn engine() -> (Wayfinder<Tx>, Rx) {
        engine_with(WayfinderConfig::default())
    }
}

// ── Events without routing ────────────────────────────────────────────────────

#[cfg(test)]
mod events {
    use wf_core::Category;
    use wf_resolve::ResolveError;

    use crate::{InputEvent, Notice, SessionState};
    use super::helpers::engine;

    #[test]
    fn unknown_marker_keeps_the_position() {
        let (mut w, _rx) = engine();
        let out = w.handle(SessionState::new(), InputEvent::LocationFix("Narnia".into()));
        assert_eq!(out.notices, [Notice::PositionUnknown { id: "Narnia".into() }]);
        assert_eq!(out.state, SessionState::new());
    }

    #[test]
    fn fix_sets_the_position() {
        let (mut w, _rx) = engine();
        let out = w.handle(SessionState::new(), InputEvent::LocationFix("MainGateway".into()));
        let gate = w.graph().lookup("MainGateway").unwrap();
        assert_eq!(out.state.position, Some(gate));
        assert_eq!(out.notices, [Notice::PositionFixed { node: gate, id: "MainGateway".into() }]);
    }

    #[test]
    fn repeated_fix_is_a_no_op() {
        let (mut w, _rx) = engine();
        let first = w.handle(SessionState::new(), InputEvent::LocationFix("T1".into()));
        let again = w.handle(first.state.clone(), InputEvent::LocationFix("T1".into()));
        assert!(again.notices.is_empty());
        assert_eq!(again.state, first.state);
    }

    #[test]
    fn category_needs_a_position_but_a_concrete_alias_does_not() {
        let (mut w, _rx) = engine();

        let out = w.handle(SessionState::new(), InputEvent::Utterance("nearest staircase".into()));
        assert_eq!(
            out.notices,
            [Notice::ResolutionFailed {
                key:    "staircase".into(),
                reason: ResolveError::PositionRequired { category: Category::Staircase },
            }]
        );
        assert_eq!(out.state, SessionState::new());

        let out = w.handle(out.state, InputEvent::Destination("Staircase 1".into()));
        let stairs = w.graph().lookup("Staircase1").unwrap();
        assert_eq!(out.state.destination, Some(stairs));
        assert_eq!(out.notices.len(), 1, "no route without a position");
        assert!(matches!(out.notices[0], Notice::ResolvedDestination { node, .. } if node == stairs));
    }

    #[test]
    fn unrecognized_phrase_keeps_the_destination() {
        let (mut w, _rx) = engine();
        let state = w.handle(SessionState::new(), InputEvent::Destination("island".into())).state;
        let out = w.handle(state.clone(), InputEvent::Utterance("take me to the cinema".into()));
        assert_eq!(out.state, state);
        let [Notice::ResolutionFailed { key, reason }] = out.notices.as_slice() else {
            panic!("unexpected notices {:?}", out.notices);
        };
        assert_eq!(key, "thecinema");
        assert!(matches!(reason, ResolveError::Unresolved { .. }));
    }

    #[test]
    fn asking_for_where_you_stand_arrives_at_once() {
        let (mut w, _rx) = engine();
        let state = w.handle(SessionState::new(), InputEvent::LocationFix("OliveCafe".into())).state;
        let out = w.handle(state, InputEvent::Utterance("the cafe please".into()));
        assert!(matches!(out.notices.last(), Some(Notice::Arrived { id, .. }) if id == "OliveCafe"));
        assert_eq!(out.state.destination, None);
        assert!(!w.is_narrating());
    }

    #[test]
    fn notices_read_naturally() {
        let (w, _rx) = engine();
        let gate = w.graph().lookup("MainGateway").unwrap();
        assert_eq!(Notice::Arrived { node: gate, id: "MainGateway".into() }.to_string(), "You have arrived at MainGateway");
        assert_eq!(
            Notice::RouteUnavailable { from: "A".into(), to: "B".into() }.to_string(),
            "No path found from A to B"
        );
    }
}

// ── Routing and narration ─────────────────────────────────────────────────────

#[cfg(test)]
mod routing {
    use std::time::Duration;

    use wf_core::{RouteId, SolverKind, WayfinderConfig};
    use wf_narrate::Announcement;

    use crate::{InputEvent, Notice, SessionState};
    use super::helpers::{engine, engine_with};

    #[tokio::test(start_paused = true)]
    async fn fix_then_request_routes_and_narrates() {
        let (mut w, mut rx) = engine();
        let state = w.handle(SessionState::new(), InputEvent::LocationFix("MainGateway".into())).state;
        let out = w.handle(state, InputEvent::Utterance("I want to go to the olive cafe".into()));

        assert_eq!(out.notices.len(), 2);
        assert!(matches!(&out.notices[0], Notice::ResolvedDestination { id, .. } if id == "OliveCafe"));
        let Notice::RouteComputed { route, distance, summary, .. } = &out.notices[1] else {
            panic!("expected a route, got {:?}", out.notices[1]);
        };
        assert_eq!(summary, "Shortest path: MainGateway → Staircase2 → OliveCafe");
        assert!((distance - (10.0 + 50f64.sqrt())).abs() < 1e-9);
        assert_eq!(out.state.route, Some(*route));
        assert!(w.is_narrating());

        let mut texts = Vec::new();
        for _ in 0..3 {
            texts.push(rx.recv().await.unwrap().text().to_owned());
        }
        assert_eq!(texts, ["Turn right at Staircase2", "Continue to OliveCafe", "You have arrived at OliveCafe"]);
        assert!(!w.is_narrating());
    }

    #[tokio::test(start_paused = true)]
    async fn nearest_staircase_from_the_cafe() {
        let (mut w, _rx) = engine();
        let state = w.handle(SessionState::new(), InputEvent::LocationFix("OliveCafe".into())).state;
        let out = w.handle(state, InputEvent::Utterance("take me to the nearest stairs".into()));
        assert!(matches!(&out.notices[0], Notice::ResolvedDestination { id, .. } if id == "Staircase2"));
    }

    #[tokio::test(start_paused = true)]
    async fn pending_destination_routes_on_fix() {
        let (mut w, _rx) = engine();
        let state = w.handle(SessionState::new(), InputEvent::Destination("Staircase1".into())).state;
        let out = w.handle(state, InputEvent::LocationFix("MainGateway".into()));

        assert!(matches!(out.notices[0], Notice::PositionFixed { .. }));
        let Notice::RouteComputed { path, .. } = &out.notices[1] else {
            panic!("expected a route, got {:?}", out.notices);
        };
        let names: Vec<&str> = path.iter().map(|&n| w.graph().name(n)).collect();
        assert_eq!(names, ["MainGateway", "T1", "Staircase1"]);
    }

    #[tokio::test(start_paused = true)]
    async fn fix_at_destination_arrives_and_stops_narration() {
        let (mut w, _rx) = engine();
        let state = w.handle(SessionState::new(), InputEvent::LocationFix("MainGateway".into())).state;
        let state = w.handle(state, InputEvent::Utterance("staircase 1".into())).state;
        assert!(w.is_narrating());

        let out = w.handle(state, InputEvent::LocationFix("Staircase1".into()));
        assert!(matches!(out.notices.as_slice(), [Notice::PositionFixed { .. }, Notice::Arrived { .. }]));
        assert_eq!(out.state.destination, None);
        assert_eq!(out.state.route, None);
        assert!(!w.is_narrating());
    }

    #[tokio::test(start_paused = true)]
    async fn unreachable_destination() {
        let (mut w, _rx) = engine();
        let state = w.handle(SessionState::new(), InputEvent::LocationFix("MainGateway".into())).state;
        let out = w.handle(state, InputEvent::Utterance("island".into()));
        assert_eq!(
            out.notices.last(),
            Some(&Notice::RouteUnavailable { from: "MainGateway".into(), to: "Island".into() })
        );
        assert!(out.state.destination.is_some());
        assert_eq!(out.state.route, None);
        assert!(!w.is_narrating());
    }

    #[tokio::test(start_paused = true)]
    async fn second_request_replaces_the_first_narration() {
        let (mut w, mut rx) = engine();
        let state = w.handle(SessionState::new(), InputEvent::LocationFix("MainGateway".into())).state;
        let state = w.handle(state, InputEvent::Utterance("olive cafe".into())).state;
        let first = state.route.unwrap();
        let state = w.handle(state, InputEvent::Utterance("staircase 1".into())).state;
        let second = state.route.unwrap();
        assert_eq!(second, first.next());

        let a = rx.recv().await.unwrap();
        let b = rx.recv().await.unwrap();
        assert_eq!((a.route(), b.route()), (second, second));
        assert!(matches!(b, Announcement::Arrival { .. }));

        tokio::time::sleep(Duration::from_secs(60)).await;
        assert!(rx.try_recv().is_err(), "nothing from the superseded route");
    }

    #[tokio::test(start_paused = true)]
    async fn route_ids_keep_increasing_after_arrival() {
        let (mut w, _rx) = engine();
        let state = w.handle(SessionState::new(), InputEvent::LocationFix("MainGateway".into())).state;
        let state = w.handle(state, InputEvent::Utterance("staircase 1".into())).state;
        assert_eq!(state.route, Some(RouteId(0)));
        let state = w.handle(state, InputEvent::LocationFix("Staircase1".into())).state;
        let state = w.handle(state, InputEvent::Utterance("stairs 2".into())).state;
        // "stairs 2" is not an alias here, but "stairs" is: nearest from Staircase1 is itself.
        assert_eq!(state.route, None);
        let state = w.handle(state, InputEvent::Destination("OliveCafe".into())).state;
        assert_eq!(state.route, Some(RouteId(1)));
    }

    #[tokio::test(start_paused = true)]
    async fn repeated_fix_reroutes_only_once_narration_stopped() {
        let (mut w, _rx) = engine();
        let state = w.handle(SessionState::new(), InputEvent::LocationFix("MainGateway".into())).state;
        let state = w.handle(state, InputEvent::Utterance("staircase 1".into())).state;
        assert!(w.is_narrating());

        let again = w.handle(state.clone(), InputEvent::LocationFix("MainGateway".into()));
        assert!(again.notices.is_empty(), "narration still running");

        let state = w.stop_narration(again.state);
        assert!(!w.is_narrating());
        let out = w.handle(state, InputEvent::LocationFix("MainGateway".into()));
        assert!(matches!(
            out.notices.as_slice(),
            [Notice::PositionFixed { .. }, Notice::RouteComputed { .. }]
        ));
        assert_eq!(out.state.route, Some(RouteId(1)));
        assert!(w.is_narrating());
    }

    #[tokio::test(start_paused = true)]
    async fn heap_solver_gives_the_same_route() {
        let config = WayfinderConfig { solver: SolverKind::Heap, ..WayfinderConfig::default() };
        let (mut w, _rx) = engine_with(config);
        let state = w.handle(SessionState::new(), InputEvent::LocationFix("MainGateway".into())).state;
        let out = w.handle(state, InputEvent::Utterance("cafe".into()));
        assert!(matches!(
            &out.notices[1],
            Notice::RouteComputed { summary, .. } if summary == "Shortest path: MainGateway → Staircase2 → OliveCafe"
        ));
    }
}

// ── Build and reload ──────────────────────────────────────────────────────────

#[cfg(test)]
mod lifecycle {
    use tokio::sync::mpsc;

    use wf_core::{NarrationConfig, WayfinderConfig};
    use wf_data::{parse_map_json, DataError, Dataset};
    use wf_narrate::Announcement;

    use crate::{InputEvent, Notice, SessionError, SessionState, WayfinderBuilder};
    use super::helpers::{dataset, engine};

    #[test]
    fn invalid_config_is_rejected() {
        let (tx, _rx) = mpsc::unbounded_channel::<Announcement>();
        let config = WayfinderConfig {
            narration: NarrationConfig { step_interval_ms: 0 },
            ..WayfinderConfig::default()
        };
        let err = WayfinderBuilder::new(dataset(), tx).config(config).build().err().unwrap();
        assert!(matches!(err, SessionError::Config(_)), "{err:?}");
    }

    #[test]
    fn empty_dataset_is_rejected() {
        let (tx, _rx) = mpsc::unbounded_channel::<Announcement>();
        let err = WayfinderBuilder::new(Dataset::new(), tx).build().err().unwrap();
        assert!(matches!(err, SessionError::Data(DataError::Invalid(_))), "{err:?}");
    }

    #[test]
    fn reload_carries_surviving_nodes_by_id() {
        let (mut w, _rx) = engine();
        let state = w.handle(SessionState::new(), InputEvent::LocationFix("OliveCafe".into())).state;
        let state = w.handle(state, InputEvent::Destination("island".into())).state;
        assert!(state.destination.is_some());

        let smaller = parse_map_json(
            r#"{
                "nodes": { "Kiosk": { "x": 0, "y": 0 }, "OliveCafe": { "x": 5, "y": 5 } },
                "edges": [ { "from": "Kiosk", "to": "OliveCafe" } ]
            }"#,
        )
        .unwrap();
        let state = w.reload(&smaller, &state).unwrap();

        assert_eq!(state.position, w.graph().lookup("OliveCafe"));
        assert_eq!(state.destination, None);
        assert_eq!(w.graph().node_count(), 2);
        assert!(w.graph().lookup("Island").is_none());
    }

    #[test]
    fn state_from_before_a_reload_does_not_outlive_it() {
        let (mut w, _rx) = engine();
        let old = w.handle(SessionState::new(), InputEvent::LocationFix("OliveCafe".into())).state;
        let old = w.handle(old, InputEvent::Destination("island".into())).state;

        let smaller = parse_map_json(
            r#"{
                "nodes": { "Kiosk": { "x": 0, "y": 0 }, "Exit": { "x": 5, "y": 0 } },
                "edges": [ { "from": "Kiosk", "to": "Exit" } ]
            }"#,
        )
        .unwrap();
        w.reload(&smaller, &SessionState::new()).unwrap();

        let out = w.handle(old.clone(), InputEvent::LocationFix("Kiosk".into()));
        let kiosk = w.graph().lookup("Kiosk").unwrap();
        assert_eq!(out.state, SessionState { position: Some(kiosk), ..SessionState::new() });
        assert_eq!(out.notices, [Notice::PositionFixed { node: kiosk, id: "Kiosk".into() }]);

        let carried = w.reload(&smaller, &old).unwrap();
        assert_eq!(carried.destination, None);
    }

    #[test]
    fn failed_reload_keeps_the_old_dataset() {
        let (mut w, _rx) = engine();
        assert!(w.reload(&Dataset::new(), &SessionState::new()).is_err());
        assert!(w.graph().lookup("Island").is_some());
    }
}
