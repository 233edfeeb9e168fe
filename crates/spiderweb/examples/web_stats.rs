//! Print strand counts and drape extents for a few parameter sets.
//!
//! Usage:
//!   cargo run -p spiderweb --example web_stats -- recursive
//!   cargo run -p spiderweb --example web_stats -- flat

use spiderweb::prelude::*;

fn main() {
    let mode = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "recursive".to_string());
    let include_sub = match mode.as_str() {
        "recursive" => true,
        "flat" => false,
        _ => {
            eprintln!("usage: web_stats [recursive|flat]");
            return;
        }
    };
    for seed in 0..4 {
        let mut scene = Scene::new();
        for (i, x) in [-4.0, 0.0, 4.0].into_iter().enumerate() {
            let id = scene.add_mesh(&format!("post{i}"), MeshData::cube(0.5), Vec3::new(x, 0.0, 2.0));
            scene.select(id);
        }
        let op = SpiderwebOperator::new(WebParams {
            include_sub,
            seed,
            ..WebParams::default()
        });
        match op.execute(&mut scene) {
            Ok(id) => {
                let curve = scene.curve(id).expect("web curve");
                let lowest = curve
                    .splines
                    .iter()
                    .map(|s| s.points[1].z)
                    .fold(f64::INFINITY, f64::min);
                println!(
                    "seed={seed} splines={} points={} lowest_mid_z={lowest:.3}",
                    curve.splines.len(),
                    curve.point_count()
                );
            }
            Err(e) => println!("seed={seed} error: {e}"),
        }
    }
}
