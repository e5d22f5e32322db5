//! Seeded Fruchterman-Reingold layout for the route graph.

use petgraph::graph::NodeIndex;
use petgraph::visit::EdgeRef;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use tracing::debug;

use super::RouteGraph;

pub const DEFAULT_SEED: u64 = 42;
const ITERATIONS: usize = 50;
const INITIAL_TEMPERATURE: f64 = 0.1;
/// Floor on pairwise distance so coincident nodes still repel.
const MIN_DISTANCE: f64 = 0.01;

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

/// Node positions, indexed like the graph's nodes.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Layout {
    positions: Vec<Position>,
}

impl Layout {
    pub fn position(&self, node: NodeIndex) -> Option<Position> {
        self.positions.get(node.index()).copied()
    }

    pub fn positions(&self) -> &[Position] {
        &self.positions
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}

/// Spreads the airports over the plane by simulating springs along routes and
/// repulsion between every pair.
///
/// Positions start uniformly in the unit square from `seed`, so the same graph
/// and seed always produce the same layout. The result is centred on the origin
/// with the largest coordinate magnitude scaled to 1.
#[tracing::instrument(skip(graph), fields(nodes = graph.node_count()))]
pub fn spring_layout(graph: &RouteGraph, seed: u64) -> Layout {
    let n = graph.node_count();
    match n {
        0 => return Layout::default(),
        1 => {
            return Layout {
                positions: vec![Position::default()],
            };
        }
        _ => {}
    }

    // Springs pull both ends together regardless of direction
    let mut adjacent = vec![vec![false; n]; n];
    for edge in graph.inner().edge_references() {
        let (a, b) = (edge.source().index(), edge.target().index());
        adjacent[a][b] = true;
        adjacent[b][a] = true;
    }

    let mut rng = StdRng::seed_from_u64(seed);
    let mut pos: Vec<[f64; 2]> = (0..n)
        .map(|_| [rng.random::<f64>(), rng.random::<f64>()])
        .collect();

    let k = (1.0 / n as f64).sqrt();
    let mut temperature = INITIAL_TEMPERATURE;
    let cooling = INITIAL_TEMPERATURE / (ITERATIONS as f64 + 1.0);

    for _ in 0..ITERATIONS {
        let mut displacement = vec![[0.0f64; 2]; n];
        for i in 0..n {
            for j in 0..n {
                if i == j {
                    continue;
                }
                let dx = pos[i][0] - pos[j][0];
                let dy = pos[i][1] - pos[j][1];
                let distance = (dx * dx + dy * dy).sqrt().max(MIN_DISTANCE);
                let attraction = if adjacent[i][j] { distance / k } else { 0.0 };
                let force = k * k / (distance * distance) - attraction;
                displacement[i][0] += dx * force;
                displacement[i][1] += dy * force;
            }
        }

        for (p, d) in pos.iter_mut().zip(&displacement) {
            let length = (d[0] * d[0] + d[1] * d[1]).sqrt().max(MIN_DISTANCE);
            p[0] += d[0] * temperature / length;
            p[1] += d[1] * temperature / length;
        }
        temperature -= cooling;
    }

    let positions = rescale(&pos);
    debug!(nodes = positions.len(), "Layout computed");
    Layout { positions }
}

fn rescale(pos: &[[f64; 2]]) -> Vec<Position> {
    let n = pos.len() as f64;
    let cx = pos.iter().map(|p| p[0]).sum::<f64>() / n;
    let cy = pos.iter().map(|p| p[1]).sum::<f64>() / n;

    let limit = pos
        .iter()
        .flat_map(|p| [(p[0] - cx).abs(), (p[1] - cy).abs()])
        .fold(0.0f64, f64::max);
    let scale = if limit > 0.0 { 1.0 / limit } else { 1.0 };

    pos.iter()
        .map(|p| Position {
            x: (p[0] - cx) * scale,
            y: (p[1] - cy) * scale,
        })
        .collect()
}
