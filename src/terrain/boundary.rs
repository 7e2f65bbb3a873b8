//! Region outline tracing.
//!
//! Marching squares over the region's cell centres (padded by one empty
//! cell on every side) yields closed contours through the midpoints between
//! member and non-member centres. Contours are simplified with
//! Douglas-Peucker at a quarter tile and the longest one is kept, so a region
//! fills as a single polygon.

use std::collections::HashMap;

use crate::core::types::{IVec2, Vec2};
use crate::terrain::{CellMask, Region};

/// Simplification tolerance as a fraction of the tile size
const SIMPLIFY_TOLERANCE: f32 = 0.25;

/// Outline polygon of `region` in world units (`tile_size` per cell).
///
/// Empty when the region is empty or the tile size is not positive.
pub fn trace_outline(region: &Region, tile_size: f32) -> Vec<Vec2> {
    if region.is_empty() || !(tile_size > 0.0) || !tile_size.is_finite() {
        return Vec::new();
    }

    let origin = Vec2::new(region.bounds.min_x as f32, region.bounds.min_y as f32);
    let to_world = |h: IVec2| (h.as_vec2() * 0.5 + origin - Vec2::splat(0.5)) * tile_size;

    let mut best: Vec<Vec2> = Vec::new();
    for contour in trace_contours(region) {
        let world: Vec<Vec2> = contour.into_iter().map(to_world).collect();
        let simplified = simplify_polyline(&world, tile_size * SIMPLIFY_TOLERANCE);
        if simplified.len() > best.len() {
            best = simplified;
        }
    }
    best
}

/// Closed contours in half-sample units: sample `(i, j)` sits at `(2i, 2j)`,
/// where sample `(1, 1)` is the centre of the bounds' min cell.
fn trace_contours(region: &Region) -> Vec<Vec<IVec2>> {
    let mask = region.mask();
    let cols = region.bounds.width() as i32 + 2;
    let rows = region.bounds.height() as i32 + 2;

    let mut segments = Vec::new();
    for j in 0..rows - 1 {
        for i in 0..cols - 1 {
            square_segments(&mask, region, i, j, &mut segments);
        }
    }
    link_segments(&segments)
}

fn square_segments(mask: &CellMask, region: &Region, i: i32, j: i32, out: &mut Vec<(IVec2, IVec2)>) {
    let inside = |di: i32, dj: i32| {
        mask.contains(region.bounds.min_x + i + di - 1, region.bounds.min_y + j + dj - 1) as u8
    };
    let case = inside(0, 0) | inside(1, 0) << 1 | inside(1, 1) << 2 | inside(0, 1) << 3;

    let top = IVec2::new(2 * i + 1, 2 * j);
    let bottom = IVec2::new(2 * i + 1, 2 * j + 2);
    let left = IVec2::new(2 * i, 2 * j + 1);
    let right = IVec2::new(2 * i + 2, 2 * j + 1);

    // Saddles (5, 10) keep diagonal members apart
    match case {
        1 | 14 => out.push((top, left)),
        2 | 13 => out.push((top, right)),
        3 | 12 => out.push((left, right)),
        4 | 11 => out.push((right, bottom)),
        6 | 9 => out.push((top, bottom)),
        7 | 8 => out.push((left, bottom)),
        5 => {
            out.push((top, left));
            out.push((right, bottom));
        }
        10 => {
            out.push((top, right));
            out.push((left, bottom));
        }
        _ => {}
    }
}

/// Chain segments sharing endpoints into closed loops
fn link_segments(segments: &[(IVec2, IVec2)]) -> Vec<Vec<IVec2>> {
    let mut incident: HashMap<IVec2, Vec<usize>> = HashMap::new();
    for (idx, &(a, b)) in segments.iter().enumerate() {
        incident.entry(a).or_default().push(idx);
        incident.entry(b).or_default().push(idx);
    }

    let mut used = vec![false; segments.len()];
    let mut contours = Vec::new();
    for start in 0..segments.len() {
        if used[start] {
            continue;
        }
        used[start] = true;
        let (first, mut tip) = segments[start];
        let mut contour = vec![first, tip];

        while let Some(next) = incident
            .get(&tip)
            .and_then(|ids| ids.iter().copied().find(|&i| !used[i]))
        {
            used[next] = true;
            let (a, b) = segments[next];
            tip = if a == tip { b } else { a };
            if tip == first {
                break;
            }
            contour.push(tip);
        }
        contours.push(contour);
    }
    contours
}

/// Douglas-Peucker simplification of an open polyline, keeping both ends
pub fn simplify_polyline(points: &[Vec2], tolerance: f32) -> Vec<Vec2> {
    if points.len() < 3 {
        return points.to_vec();
    }
    let mut result = Vec::with_capacity(points.len());
    simplify_recursive(points, tolerance * tolerance, &mut result);
    if let Some(&last) = points.last() {
        result.push(last);
    }
    result
}

fn simplify_recursive(points: &[Vec2], tolerance_sq: f32, result: &mut Vec<Vec2>) {
    if points.len() < 2 {
        return;
    }
    let (max_dist_sq, max_idx) = farthest_from_chord(points);
    if max_dist_sq > tolerance_sq {
        simplify_recursive(&points[..=max_idx], tolerance_sq, result);
        simplify_recursive(&points[max_idx..], tolerance_sq, result);
    } else {
        // Last point is pushed by the caller
        result.push(points[0]);
    }
}

/// Squared distance of the farthest interior point from the first→last segment
fn farthest_from_chord(points: &[Vec2]) -> (f32, usize) {
    let first = points[0];
    let last = points[points.len() - 1];
    let chord = last - first;
    let len_sq = chord.length_squared();

    let mut max_dist_sq = 0.0f32;
    let mut max_idx = 0;
    for (i, &p) in points.iter().enumerate().take(points.len() - 1).skip(1) {
        let closest = if len_sq > 0.0 {
            first + chord * ((p - first).dot(chord) / len_sq).clamp(0.0, 1.0)
        } else {
            first
        };
        let d = p.distance_squared(closest);
        if d > max_dist_sq {
            max_dist_sq = d;
            max_idx = i;
        }
    }
    (max_dist_sq, max_idx)
}
