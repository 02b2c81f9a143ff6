//! Shape generation for the game scene
//!
//! Everything is built in canvas pixels: origin top-left, y down.

use glam::Vec2;

use super::vertex::{Vertex, colors};
use crate::consts::{CANVAS_HEIGHT, CANVAS_WIDTH, TILE_HEIGHT, TILE_WIDTH};
use crate::sim::{Round, Span, Tile};

/// Generate vertices for an axis-aligned filled rectangle
pub fn rect(origin: Vec2, size: Vec2, color: [f32; 4]) -> [Vertex; 6] {
    let min = origin;
    let max = origin + size;

    // Two triangles
    [
        Vertex::new(min.x, min.y, color),
        Vertex::new(max.x, min.y, color),
        Vertex::new(min.x, max.y, color),
        Vertex::new(min.x, max.y, color),
        Vertex::new(max.x, min.y, color),
        Vertex::new(max.x, max.y, color),
    ]
}

/// Top-left corner of the tile at queue position `index` (0 = bottom)
pub fn tile_origin(index: usize) -> Vec2 {
    Vec2::new(
        CANVAS_WIDTH / 2.0 - TILE_WIDTH / 2.0,
        CANVAS_HEIGHT - (index as f32 + 1.0) * TILE_HEIGHT,
    )
}

fn span_rect(origin: Vec2, span: Span, color: [f32; 4]) -> [Vertex; 6] {
    rect(
        origin + Vec2::new(span.offset, 0.0),
        Vec2::new(span.width, TILE_HEIGHT),
        color,
    )
}

/// Water on the safe side, log on the other
pub fn tile(tile: &Tile, index: usize) -> Vec<Vertex> {
    let origin = tile_origin(index);
    let mut vertices = Vec::with_capacity(12);
    vertices.extend(span_rect(origin, tile.danger_zone(), colors::LOG));
    vertices.extend(span_rect(origin, tile.safe_zone(), colors::WATER));
    vertices
}

/// Full frame: background, timer bar, tile stack, loss overlay
pub fn scene(round: &Round) -> Vec<Vertex> {
    let canvas = Vec2::new(CANVAS_WIDTH, CANVAS_HEIGHT);
    let mut vertices = Vec::with_capacity(6 * 3 + round.queue().len() * 12);

    vertices.extend(rect(Vec2::ZERO, canvas, colors::BACKGROUND));

    let timer = round.timer();
    if timer > 0.0 {
        vertices.extend(rect(
            Vec2::ZERO,
            Vec2::new(CANVAS_WIDTH * timer, CANVAS_HEIGHT),
            colors::TIMER,
        ));
    }

    for (index, t) in round.queue().iter().enumerate() {
        vertices.extend(tile(t, index));
    }

    if round.failure_flash() {
        vertices.extend(rect(Vec2::ZERO, canvas, colors::FAILURE_OVERLAY));
    }

    vertices
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::{SAFE_AREA_WIDTH, TILE_COUNT};
    use crate::sim::{KeyInput, Side};

    fn bounds(vertices: &[Vertex]) -> (Vec2, Vec2) {
        let mut min = Vec2::splat(f32::MAX);
        let mut max = Vec2::splat(f32::MIN);
        for v in vertices {
            let p = Vec2::from(v.position);
            min = min.min(p);
            max = max.max(p);
        }
        (min, max)
    }

    #[test]
    fn test_rect_corners() {
        let verts = rect(Vec2::new(10.0, 20.0), Vec2::new(5.0, 7.0), colors::LOG);
        let (min, max) = bounds(&verts);
        assert_eq!(min, Vec2::new(10.0, 20.0));
        assert_eq!(max, Vec2::new(15.0, 27.0));
    }

    #[test]
    fn test_first_tile_sits_at_bottom_center() {
        let origin = tile_origin(0);
        assert_eq!(origin.x, (CANVAS_WIDTH - TILE_WIDTH) / 2.0);
        assert_eq!(origin.y + TILE_HEIGHT, CANVAS_HEIGHT);
        assert_eq!(tile_origin(TILE_COUNT - 1).y, 0.0);
    }

    #[test]
    fn test_left_safe_tile_has_water_on_left() {
        let verts = tile(&Tile::new(Side::Left), 0);
        let water: Vec<Vertex> = verts
            .iter()
            .copied()
            .filter(|v| v.color == colors::WATER)
            .collect();
        let (min, max) = bounds(&water);
        assert_eq!(min.x, tile_origin(0).x);
        assert_eq!(max.x - min.x, SAFE_AREA_WIDTH);
    }

    #[test]
    fn test_scene_layers() {
        let mut round = Round::new(11);
        // Fresh round: background + tiles, no timer bar, no overlay
        assert_eq!(scene(&round).len(), 6 + TILE_COUNT * 12);

        round.on_tick(60);
        assert_eq!(scene(&round).len(), 12 + TILE_COUNT * 12);

        round.on_key_press(KeyInput::Other).unwrap();
        let verts = scene(&round);
        assert_eq!(verts.len(), 12 + TILE_COUNT * 12);
        assert_eq!(verts.last().map(|v| v.color), Some(colors::FAILURE_OVERLAY));
    }
}
