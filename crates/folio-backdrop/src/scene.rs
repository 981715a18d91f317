//! Static scene geometry generated once per mount

use glam::Vec3;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// Radius of the node ellipsoid before axis scaling
pub const SCENE_RADIUS: f32 = 25.0;
/// Ellipsoid axis scales
pub const SCENE_AXES: Vec3 = Vec3::new(1.5, 0.8, 1.0);
/// Each coordinate is jittered by up to this much either way
pub const NODE_JITTER: f32 = 4.0;
/// Upper bound on generated links
pub const MAX_LINKS: usize = 1024;

/// Node graph: positions plus index pairs closer than the link distance
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Scene {
    pub nodes: Vec<Vec3>,
    pub links: Vec<[u32; 2]>,
}

impl Scene {
    /// Sample `count` nodes in a soft ellipsoid and link close pairs
    ///
    /// The same seed always produces the same scene.
    pub fn generate(count: u32, link_distance: f32, seed: u64) -> Self {
        let mut rng = SmallRng::seed_from_u64(seed);
        let nodes: Vec<Vec3> = (0..count)
            .map(|_| {
                let theta = rng.gen::<f32>() * std::f32::consts::TAU;
                let phi = rng.gen::<f32>() * std::f32::consts::PI;
                let on_shell = Vec3::new(
                    phi.sin() * theta.cos(),
                    phi.sin() * theta.sin(),
                    phi.cos(),
                ) * SCENE_AXES
                    * SCENE_RADIUS;
                let jitter = Vec3::new(
                    rng.gen_range(-NODE_JITTER..NODE_JITTER),
                    rng.gen_range(-NODE_JITTER..NODE_JITTER),
                    rng.gen_range(-NODE_JITTER..NODE_JITTER),
                );
                on_shell + jitter
            })
            .collect();

        let mut links = Vec::new();
        'outer: for i in 0..nodes.len() {
            for j in (i + 1)..nodes.len() {
                if nodes[i].distance(nodes[j]) < link_distance {
                    if links.len() == MAX_LINKS {
                        log::debug!("[backdrop] link cap {} reached", MAX_LINKS);
                        break 'outer;
                    }
                    links.push([i as u32, j as u32]);
                }
            }
        }

        Self { nodes, links }
    }

    /// Link endpoints flattened into a line list
    pub fn line_vertices(&self) -> Vec<[f32; 3]> {
        self.links
            .iter()
            .flat_map(|[a, b]| {
                [
                    self.nodes[*a as usize].to_array(),
                    self.nodes[*b as usize].to_array(),
                ]
            })
            .collect()
    }
}

/// Unit cube edges as a line list, 12 edges
pub fn cube_edges() -> Vec<[f32; 3]> {
    let corner = |i: u32| {
        Vec3::new(
            if i & 1 == 0 { -0.5 } else { 0.5 },
            if i & 2 == 0 { -0.5 } else { 0.5 },
            if i & 4 == 0 { -0.5 } else { 0.5 },
        )
    };
    let mut edges = Vec::with_capacity(24);
    for a in 0..8u32 {
        for bit in [1u32, 2, 4] {
            let b = a | bit;
            if b != a {
                edges.push(corner(a).to_array());
                edges.push(corner(b).to_array());
            }
        }
    }
    edges
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_count() {
        let scene = Scene::generate(70, 12.0, 1);
        assert_eq!(scene.nodes.len(), 70);
    }

    #[test]
    fn test_generate_deterministic() {
        assert_eq!(Scene::generate(48, 9.5, 42), Scene::generate(48, 9.5, 42));
        assert_ne!(Scene::generate(48, 9.5, 42), Scene::generate(48, 9.5, 43));
    }

    #[test]
    fn test_nodes_within_bounds() {
        let scene = Scene::generate(114, 17.0, 7);
        let bound = SCENE_AXES * SCENE_RADIUS + Vec3::splat(NODE_JITTER);
        for node in &scene.nodes {
            assert!(node.abs().cmple(bound).all(), "{:?} out of bounds", node);
        }
    }

    #[test]
    fn test_links_respect_distance() {
        let distance = 9.5;
        let scene = Scene::generate(48, distance, 3);
        for [a, b] in &scene.links {
            assert!(a < b);
            let d = scene.nodes[*a as usize].distance(scene.nodes[*b as usize]);
            assert!(d < distance);
        }
        assert_eq!(scene.line_vertices().len(), scene.links.len() * 2);
    }

    #[test]
    fn test_link_cap() {
        // Everything within reach of everything
        let scene = Scene::generate(200, 1000.0, 5);
        assert_eq!(scene.links.len(), MAX_LINKS);
    }

    #[test]
    fn test_empty_scene() {
        let scene = Scene::generate(0, 10.0, 0);
        assert!(scene.nodes.is_empty());
        assert!(scene.links.is_empty());
    }

    #[test]
    fn test_cube_edges() {
        let edges = cube_edges();
        assert_eq!(edges.len(), 24);
        for pair in edges.chunks(2) {
            let a = Vec3::from_array(pair[0]);
            let b = Vec3::from_array(pair[1]);
            assert!((a.distance(b) - 1.0).abs() < 1e-6);
        }
    }
}
