//! Behavioural tests for loading stops and exporting planned trips.
//!
//! Routing is provided by [`StubRouter`] so no GraphHopper server is needed.

use std::cell::RefCell;
use std::fs;

use camino::Utf8PathBuf;
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use serde_json::{Value, json};
use tempfile::TempDir;
use waypath_core::test_support::InputOrderSequencer;
use waypath_core::{PlanError, RouterError, TripPlanner};
use waypath_data::geojson::{
    PointSetLoadError, load_point_set_from_path, write_route_geojson_to_path,
};
use waypath_data::routing::test_support::StubRouter;

/// Outcome of one load, plan and export run.
#[derive(Debug)]
enum ExportFailure {
    Load(PointSetLoadError),
    Plan(PlanError),
}

type OutcomeCell = RefCell<Option<Result<Value, ExportFailure>>>;

/// Scratch directory holding the input and output files.
struct Workspace {
    dir: TempDir,
}

impl Workspace {
    fn path(&self, name: &str) -> Utf8PathBuf {
        Utf8PathBuf::from_path_buf(self.dir.path().join(name)).expect("temp path is UTF-8")
    }

    fn input(&self) -> Utf8PathBuf {
        self.path("stops.geojson")
    }

    fn output(&self) -> Utf8PathBuf {
        self.path("out/route.geojson")
    }
}

#[fixture]
fn workspace() -> Workspace {
    Workspace {
        dir: tempfile::tempdir().expect("temp dir"),
    }
}

#[fixture]
fn router() -> RefCell<Option<StubRouter>> {
    RefCell::new(None)
}

#[fixture]
fn outcome() -> OutcomeCell {
    RefCell::new(None)
}

fn write_input(workspace: &Workspace, features: Vec<Value>) {
    let document = json!({"type": "FeatureCollection", "features": features});
    fs::write(workspace.input(), document.to_string()).expect("write input");
}

fn point(lon: f64, lat: f64) -> Value {
    json!({"type": "Feature", "properties": {}, "geometry": {"type": "Point", "coordinates": [lon, lat]}})
}

fn run(workspace: &Workspace, router: &RefCell<Option<StubRouter>>, round_trip: bool) -> Result<Value, ExportFailure> {
    let stub = router.borrow().clone().expect("router must be initialised");
    let points = load_point_set_from_path(&workspace.input()).map_err(ExportFailure::Load)?;
    let route = TripPlanner::new(stub, InputOrderSequencer)
        .plan_trip(&points, round_trip)
        .map_err(ExportFailure::Plan)?;
    write_route_geojson_to_path(&workspace.output(), &route).expect("export should succeed");
    let text = fs::read_to_string(workspace.output()).expect("read export");
    Ok(serde_json::from_str(&text).expect("export is JSON"))
}

fn exported(outcome: &OutcomeCell) -> Value {
    match &*outcome.borrow() {
        Some(Ok(document)) => document.clone(),
        other => panic!("expected a successful export, got {other:?}"),
    }
}

fn feature_properties(outcome: &OutcomeCell, index: usize) -> Value {
    exported(outcome)["features"][index]["properties"].clone()
}

// --- Given steps ---

#[given("a GeoJSON file with three stops")]
fn three_stops(#[from(workspace)] workspace: &Workspace) {
    write_input(
        workspace,
        vec![point(13.40, 52.50), point(13.41, 52.50), point(13.41, 52.51)],
    );
}

#[given("a GeoJSON file containing a LineString feature")]
fn line_input(#[from(workspace)] workspace: &Workspace) {
    write_input(
        workspace,
        vec![
            point(13.40, 52.50),
            json!({
                "type": "Feature",
                "properties": {},
                "geometry": {"type": "LineString", "coordinates": [[13.4, 52.5], [13.5, 52.6]]}
            }),
        ],
    );
}

#[given("a routing service with unit distances")]
fn unit_router(#[from(router)] router: &RefCell<Option<StubRouter>>) {
    *router.borrow_mut() = Some(StubRouter::with_unit_distances(3));
}

#[given("a routing service reporting elevations 10, 40 and 25")]
fn elevation_router(#[from(router)] router: &RefCell<Option<StubRouter>>) {
    *router.borrow_mut() =
        Some(StubRouter::with_unit_distances(3).with_elevations(vec![10.0, 40.0, 25.0]));
}

#[given("a routing service that is unreachable")]
fn unreachable_router(#[from(router)] router: &RefCell<Option<StubRouter>>) {
    *router.borrow_mut() = Some(StubRouter::with_error(RouterError::NetworkError {
        url: "http://localhost:8989/route".to_owned(),
        message: "connection refused".to_owned(),
    }));
}

// --- When steps ---

#[when("I plan a round trip and export it")]
fn plan_round_trip(
    #[from(workspace)] workspace: &Workspace,
    #[from(router)] router: &RefCell<Option<StubRouter>>,
    #[from(outcome)] outcome: &OutcomeCell,
) {
    *outcome.borrow_mut() = Some(run(workspace, router, true));
}

#[when("I plan an open trip and export it")]
fn plan_open_trip(
    #[from(workspace)] workspace: &Workspace,
    #[from(router)] router: &RefCell<Option<StubRouter>>,
    #[from(outcome)] outcome: &OutcomeCell,
) {
    *outcome.borrow_mut() = Some(run(workspace, router, false));
}

// --- Then steps ---

#[then("the export has 3 leg features and a trip feature")]
fn three_legs(#[from(outcome)] outcome: &OutcomeCell) {
    assert_feature_counts(&exported(outcome), 3);
}

#[then("the export has 2 leg features and a trip feature")]
fn two_legs(#[from(outcome)] outcome: &OutcomeCell) {
    assert_feature_counts(&exported(outcome), 2);
}

fn assert_feature_counts(document: &Value, legs: usize) {
    let features = document["features"].as_array().expect("features array");
    assert_eq!(features.len(), legs + 1, "expected {legs} legs plus the trip");
    assert!(
        features[..legs]
            .iter()
            .all(|feature| feature["properties"]["type"] == "leg")
    );
    assert_eq!(features[legs]["properties"]["type"], "trip");
}

#[then("the trip feature lists the order 0, 1, 2 as a round trip")]
fn trip_metadata(#[from(outcome)] outcome: &OutcomeCell) {
    let properties = feature_properties(outcome, 3);
    assert_eq!(properties["ordered_indices"], json!([0, 1, 2]));
    assert_eq!(properties["roundTrip"], json!(true));
    assert_eq!(properties["profile"], json!("stub"));
}

#[then("the first leg climbs 30 metres")]
fn first_leg_climbs(#[from(outcome)] outcome: &OutcomeCell) {
    let properties = feature_properties(outcome, 0);
    assert_eq!(properties["ascend_m"], json!(30.0));
    assert_eq!(properties["descend_m"], json!(0.0));
}

#[then("the second leg descends 15 metres")]
fn second_leg_descends(#[from(outcome)] outcome: &OutcomeCell) {
    let properties = feature_properties(outcome, 1);
    assert_eq!(properties["ascend_m"], json!(0.0));
    assert_eq!(properties["descend_m"], json!(15.0));
}

#[then("an unsupported geometry error is reported")]
fn unsupported_geometry(#[from(outcome)] outcome: &OutcomeCell) {
    let borrowed = outcome.borrow();
    assert!(
        matches!(
            &*borrowed,
            Some(Err(ExportFailure::Load(PointSetLoadError::UnsupportedGeometry {
                feature_index: 1,
                ..
            })))
        ),
        "expected UnsupportedGeometry, got {borrowed:?}"
    );
}

#[then("a routing failure is reported")]
fn routing_failure(#[from(outcome)] outcome: &OutcomeCell) {
    let borrowed = outcome.borrow();
    assert!(
        matches!(&*borrowed, Some(Err(ExportFailure::Plan(PlanError::Matrix(_))))),
        "expected a matrix failure, got {borrowed:?}"
    );
}

#[then("no export file is written")]
fn no_export(#[from(workspace)] workspace: &Workspace) {
    assert!(!workspace.output().exists());
}

// --- Scenario registrations ---

macro_rules! register_scenario {
    ($fn_name:ident, $title:literal) => {
        #[scenario(path = "tests/features/route_export.feature", name = $title)]
        fn $fn_name(workspace: Workspace, router: RefCell<Option<StubRouter>>, outcome: OutcomeCell) {
            let _ = (workspace, router, outcome);
        }
    };
}

register_scenario!(exporting_round_trip, "exporting a round trip over three stops");
register_scenario!(exporting_open_trip, "exporting an open trip over three stops");
register_scenario!(reporting_climbs, "reporting climbs per leg");
register_scenario!(rejecting_line_geometry, "rejecting a file with line geometry");
register_scenario!(surfacing_routing_failure, "surfacing a routing failure");
