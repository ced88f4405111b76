//! Test helpers for writing point sets and injecting stub routers.

use std::fs;

use camino::{Utf8Path, Utf8PathBuf};
use serde_json::json;
use tempfile::TempDir;
use waypath_core::PointRouter;
use waypath_data::routing::test_support::StubRouter;

use crate::CliError;
use crate::plan::{PlanConfig, PlanRouterBuilder};

/// Write `contents` to `path`, creating parent directories.
pub(super) fn write_utf8(path: &Utf8Path, contents: &[u8]) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("create parent directory");
    }
    fs::write(path, contents).expect("write test file");
}

/// GeoJSON `FeatureCollection` with one `Point` feature per `(lon, lat)`.
pub(super) fn points_geojson(points: &[(f64, f64)]) -> String {
    let features: Vec<_> = points
        .iter()
        .map(|&(lon, lat)| {
            json!({
                "type": "Feature",
                "properties": {},
                "geometry": {"type": "Point", "coordinates": [lon, lat]}
            })
        })
        .collect();
    json!({"type": "FeatureCollection", "features": features}).to_string()
}

/// Three points a few hundred metres apart.
pub(super) const THREE_STOPS: [(f64, f64); 3] = [(13.40, 52.50), (13.41, 52.50), (13.41, 52.51)];

/// Temporary directory with UTF-8 path accessors.
pub(super) struct Workspace {
    _dir: TempDir,
    root: Utf8PathBuf,
}

impl Workspace {
    pub(super) fn new() -> Self {
        let dir = TempDir::new().expect("tempdir");
        let root = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).expect("utf-8 workspace");
        Self { _dir: dir, root }
    }

    pub(super) fn path(&self, name: &str) -> Utf8PathBuf {
        self.root.join(name)
    }

    pub(super) fn points_path(&self) -> Utf8PathBuf {
        self.path("stops.geojson")
    }

    pub(super) fn output_path(&self) -> Utf8PathBuf {
        self.path("out/route.geojson")
    }

    pub(super) fn write_points(&self, points: &[(f64, f64)]) {
        write_utf8(&self.points_path(), points_geojson(points).as_bytes());
    }
}

/// Router builder handing out a clone of a [`StubRouter`].
#[derive(Debug)]
pub(super) struct StubRouterBuilder {
    pub(super) router: StubRouter,
}

impl PlanRouterBuilder for StubRouterBuilder {
    fn build(&self, _config: &PlanConfig) -> Result<Box<dyn PointRouter>, CliError> {
        Ok(Box::new(self.router.clone()))
    }
}
