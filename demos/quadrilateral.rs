//! Fills a flat quadrilateral with three strips between vertical chains.
//!
//! ```text
//! cargo run --example quadrilateral
//! ```

use tracing::info;
use weft::geometry::{Curve, LineSeg};
use weft::math::{Point3, Vector3};
use weft::mesh::{EdgeKind, Mesh};
use weft::operations::stitch::StitchStrip;
use weft::Result;

fn build_quadrilateral() -> Result<Mesh> {
    let inboard_fwd = Point3::new(-10.0, 8.0, 0.0);
    let tip_fwd = Point3::new(12.0, 6.0, 0.0);
    let tip_aft = Point3::new(12.0, -2.0, 0.0);
    let inboard_aft = Point3::new(-10.0, -5.0, 0.0);

    // Four outline edges
    let top = LineSeg::new(inboard_fwd, tip_fwd)?;
    let right = LineSeg::new(tip_aft, tip_fwd)?;
    let bottom = LineSeg::new(inboard_aft, tip_aft)?;
    let left = LineSeg::new(inboard_aft, inboard_fwd)?;

    // Two interior chains, a quarter and half way across
    let near = LineSeg::new(bottom.evaluate(0.25)?, top.evaluate(0.25)?)?;
    let middle = LineSeg::new(bottom.evaluate(0.5)?, top.evaluate(0.5)?)?;

    let left_chain = left.points_at(&[0.0, 0.2, 0.4, 0.6, 0.8, 1.0])?;
    let near_chain = near.points_at(&[0.0, 0.25, 0.5, 0.75, 1.0])?;
    let middle_chain = middle.points_at(&[0.0, 0.3, 0.55, 0.75, 1.0])?;
    let right_chain = right.points_at(&[0.0, 0.35, 0.75, 1.0])?;

    let mut flag = Mesh::new();
    for (port, starboard) in [
        (&left_chain, &near_chain),
        (&near_chain, &middle_chain),
        (&middle_chain, &right_chain),
    ] {
        let strip = StitchStrip::new(port, starboard).execute()?;
        flag.absorb(strip)?;
    }
    Ok(flag)
}

fn main() -> Result<()> {
    // Default: WARN for everything, INFO for weft and this demo.
    let env_filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(tracing_subscriber::filter::LevelFilter::WARN.into())
        .add_directive("quadrilateral=info".parse().unwrap_or_default())
        .add_directive("weft=info".parse().unwrap_or_default());
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let flag = build_quadrilateral()?;
    let outline = flag
        .edge_segments()
        .iter()
        .filter(|seg| seg.kind == EdgeKind::Boundary)
        .count();
    info!(
        facets = flag.facet_count(),
        outline,
        interior = flag.interior_count(),
        coherent = flag.is_coherent(&Vector3::z()),
        "quadrilateral statistics"
    );
    Ok(())
}
