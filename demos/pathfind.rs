//! Queue a few path requests over a randomly obstructed grid and print the
//! resulting waypoints.
//!
//! Run with `RUST_LOG=debug` to watch the search engine's own reporting.

use glam::{Vec2, Vec3};
use gridnav_core::{Grid, GridConfig};
use gridnav_paths::{PathRequestQueue, Pathfinder};
use rand::RngExt;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let mut rng = rand::rng();
    let obstacles: Vec<Vec3> = (0..14)
        .map(|_| {
            Vec3::new(
                rng.random_range(-8.0..8.0),
                0.0,
                rng.random_range(-8.0..8.0),
            )
        })
        .collect();

    let config = GridConfig::new(Vec3::ZERO, Vec2::new(20.0, 20.0), 0.5);
    let grid = Grid::build(config, |point, radius| {
        // Each obstacle is a disc of radius 1.0 probed against the node.
        obstacles
            .iter()
            .any(|center| center.distance(point) < radius + 1.0)
    })?;
    let blocked = grid.iter().filter(|(_, n)| !n.walkable).count();
    log::info!("grid built: {} nodes, {} blocked", grid.max_nodes(), blocked);

    let mut queue = PathRequestQueue::new(Pathfinder::new(grid));
    let corners = [
        (Vec3::new(-9.5, 0.0, -9.5), Vec3::new(9.5, 0.0, 9.5)),
        (Vec3::new(-9.5, 0.0, 9.5), Vec3::new(9.5, 0.0, -9.5)),
        (Vec3::new(-9.5, 0.0, 0.0), Vec3::new(9.5, 0.0, 0.0)),
    ];

    for (start, end) in corners {
        queue.request_path(start, end, move |result| {
            if result.success {
                println!(
                    "{start} -> {end}: cost {}, {} waypoints",
                    result.cost,
                    result.waypoints.len()
                );
                for waypoint in &result.waypoints {
                    println!("    {waypoint}");
                }
            } else {
                println!("{start} -> {end}: no path");
            }
        });
    }

    Ok(())
}
