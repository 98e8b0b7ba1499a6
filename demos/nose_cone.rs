//! Builds a pointed dome from stacked horizontal rings.
//!
//! The profile is a quarter ellipse with a horizontal semi-axis of 4 and a
//! vertical semi-axis of 6. Ring levels are spaced so that the profile
//! never strays more than the allowed crown from its chords.
//!
//! ```text
//! cargo run --example nose_cone
//! RUST_LOG=weft=debug cargo run --example nose_cone
//! ```

use std::f64::consts::FRAC_PI_2;

use tracing::info;
use weft::geometry::{ChainParams, Circle, Curve};
use weft::math::{Point3, Vector3};
use weft::mesh::Mesh;
use weft::operations::stitch::{FanAroundApex, StitchRings};
use weft::Result;

/// Permissible deviation from the surface.
const ALLOWABLE_CROWN: f64 = 0.03;

/// Horizontal semi-axis of the profile.
const SEMI_A: f64 = 4.0;

/// Vertical semi-axis of the profile.
const SEMI_B: f64 = 6.0;

/// The topmost ring sits at this fraction of the quarter ellipse.
const RANGE_TOP: f64 = 0.95;

/// Point on the quarter ellipse at parameter `t` in `[0, 1]`, as
/// `(radius, height)`.
fn profile_at(t: f64) -> (f64, f64) {
    let theta = t * FRAC_PI_2;
    (SEMI_A * theta.cos(), SEMI_B * theta.sin())
}

/// Parameter step from `t` whose chord stays within `crown` of the profile.
fn profile_step(t: f64, crown: f64) -> f64 {
    let theta = t * FRAC_PI_2;
    let (s, c) = theta.sin_cos();
    let speed = (SEMI_A * SEMI_A * s * s + SEMI_B * SEMI_B * c * c).sqrt();
    let curvature_radius = speed.powi(3) / (SEMI_A * SEMI_B);
    let chord = 2.0 * curvature_radius * (1.0 - crown / curvature_radius).acos();
    chord / speed / FRAC_PI_2
}

/// Ring levels from the base up to [`RANGE_TOP`].
fn ring_levels(crown: f64) -> Vec<f64> {
    let mut raw = Vec::new();
    let mut t = 0.0;
    while t < RANGE_TOP {
        raw.push(t);
        t += profile_step(t, crown);
    }

    // Stretch the levels down rather than end on a row of slivers
    let n = raw.len();
    let mut levels = if n >= 2 && RANGE_TOP - raw[n - 1] < 0.3 * (raw[n - 1] - raw[n - 2]) {
        let interval = raw[n - 1] - raw[n - 2];
        let factor = (RANGE_TOP - 0.6 * interval) / RANGE_TOP;
        raw.iter().map(|t| t * factor).collect()
    } else {
        raw
    };
    levels.push(RANGE_TOP);
    levels
}

fn build_nose_cone() -> Result<Mesh> {
    let params = ChainParams::default().with_crown(0.7 * ALLOWABLE_CROWN);
    let mut dome = Mesh::new();

    let levels = ring_levels(0.7 * ALLOWABLE_CROWN);
    let mut lower = Circle::horizontal(0.0, SEMI_A)?.approximate(&params)?;
    for &level in levels.iter().skip(1) {
        let (radius, height) = profile_at(level);
        let upper = Circle::horizontal(height, radius)?.approximate(&params)?;

        let hoop = StitchRings::new(&upper, &lower).execute()?;
        dome.absorb(hoop)?;

        lower = upper;
    }

    let cap = FanAroundApex::new(&lower, Point3::new(0.0, 0.0, SEMI_B)).execute()?;
    dome.absorb(cap)?;

    info!(rings = levels.len(), "nose cone built");
    Ok(dome)
}

fn main() -> Result<()> {
    // Default: WARN for everything, INFO for weft and this demo.
    // Override with RUST_LOG env var (e.g. RUST_LOG=weft=debug).
    let env_filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(tracing_subscriber::filter::LevelFilter::WARN.into())
        .add_directive("nose_cone=info".parse().unwrap_or_default())
        .add_directive("weft=info".parse().unwrap_or_default());
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let dome = build_nose_cone()?;
    info!(
        facets = dome.facet_count(),
        boundary = dome.boundary_count(),
        interior = dome.interior_count(),
        coherent = dome.is_coherent(&Vector3::z()),
        "dome statistics"
    );

    let export = dome.to_triangle_mesh()?;
    info!(
        vertices = export.vertices.len(),
        triangles = export.indices.len(),
        "flat-shaded export"
    );
    Ok(())
}
