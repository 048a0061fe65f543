// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Basic usage of Understory BIH: insert, remove, and query with lazy rebuilds.

use glam::Vec3;
use understory_bih::{Aabb3D, BihWrap, BuildError, Ray};

fn main() -> Result<(), BuildError> {
    // Bounds live with the caller; the index only stores ids.
    let mut bounds = vec![
        Aabb3D::from_min_size(Vec3::ZERO, Vec3::ONE),
        Aabb3D::from_min_size(Vec3::splat(10.0), Vec3::ONE),
    ];
    bounds.push(Aabb3D::new(
        Vec3::new(3.0, -0.5, -0.5),
        Vec3::new(4.0, 0.5, 0.5),
    ));

    let mut idx = BihWrap::new(|id: &usize| bounds[*id]);
    idx.insert(0);
    idx.insert(1);

    let ray = Ray::new(Vec3::new(-5.0, 0.0, 0.0), Vec3::X);
    let mut max_dist = f32::MAX;
    let mut hits = Vec::new();
    idx.intersect_ray(
        &ray,
        |_, id, _, _| {
            hits.push(*id);
            false
        },
        &mut max_dist,
        false,
    )?;
    println!("ray candidates: {hits:?}");

    // Swap object 0 for object 2; both changes land in one rebuild.
    idx.remove(&0);
    idx.insert(2);
    hits.clear();
    idx.intersect_ray(
        &ray,
        |_, id, _, _| {
            hits.push(*id);
            false
        },
        &mut max_dist,
        false,
    )?;
    println!("ray candidates after swap: {hits:?}");

    let mut inside = Vec::new();
    idx.intersect_point(Vec3::new(10.5, 10.2, 10.1), |_, id| inside.push(*id))?;
    println!("objects containing (10.5, 10.2, 10.1): {inside:?}");
    println!("{idx:?}");
    Ok(())
}
