//! Shape generation for 2D primitives
//!
//! Turns a `DrawList` into triangle lists. Positions stay in screen pixels;
//! the pipeline maps them to clip space.

use glam::Vec2;
use std::f32::consts::PI;
use std::ops::Range;

use super::glyphs::text_cells;
use super::scene::{Color, DrawCommand, DrawList, Rect};
use super::vertex::{SpriteVertex, Vertex};

/// Circle segments for cloud puffs
const CIRCLE_SEGMENTS: u32 = 24;

/// A run of consecutive vertices drawn with one pipeline
#[derive(Debug, Clone, PartialEq)]
pub enum Batch {
    Colored(Range<u32>),
    Sprite(Range<u32>),
}

/// Vertex data for one frame, with batches in painter's order
#[derive(Debug, Default)]
pub struct Tessellation {
    pub colored: Vec<Vertex>,
    pub sprite: Vec<SpriteVertex>,
    pub batches: Vec<Batch>,
}

impl Tessellation {
    fn push_colored(&mut self, vertices: &[Vertex]) {
        if vertices.is_empty() {
            return;
        }
        let start = self.colored.len() as u32;
        self.colored.extend_from_slice(vertices);
        let end = self.colored.len() as u32;
        match self.batches.last_mut() {
            Some(Batch::Colored(range)) => range.end = end,
            _ => self.batches.push(Batch::Colored(start..end)),
        }
    }

    fn push_sprite(&mut self, vertices: &[SpriteVertex]) {
        let start = self.sprite.len() as u32;
        self.sprite.extend_from_slice(vertices);
        let end = self.sprite.len() as u32;
        match self.batches.last_mut() {
            Some(Batch::Sprite(range)) => range.end = end,
            _ => self.batches.push(Batch::Sprite(start..end)),
        }
    }
}

/// Tessellate every command, keeping draw order across both pipelines
pub fn tessellate(list: &DrawList) -> Tessellation {
    let mut out = Tessellation::default();

    for command in &list.commands {
        match command {
            DrawCommand::FillRect { rect, color } => out.push_colored(&rect_vertices(rect, *color)),
            DrawCommand::FillCircle {
                center,
                radius,
                color,
            } => out.push_colored(&circle(*center, *radius, *color, CIRCLE_SEGMENTS)),
            DrawCommand::Sprite { rect } => out.push_sprite(&sprite_quad(rect)),
            DrawCommand::Text {
                text: label,
                baseline,
                size,
                color,
            } => out.push_colored(&text(label, *baseline, *size, *color)),
        }
    }

    out
}

/// Two triangles covering `rect`
pub fn rect_vertices(rect: &Rect, color: Color) -> [Vertex; 6] {
    let (x0, y0) = (rect.x, rect.y);
    let (x1, y1) = (rect.x + rect.w, rect.y + rect.h);
    [
        Vertex::new(x0, y0, color),
        Vertex::new(x0, y1, color),
        Vertex::new(x1, y0, color),
        Vertex::new(x1, y0, color),
        Vertex::new(x0, y1, color),
        Vertex::new(x1, y1, color),
    ]
}

/// Textured quad; uv (0,0) is the image's top-left
pub fn sprite_quad(rect: &Rect) -> [SpriteVertex; 6] {
    let (x0, y0) = (rect.x, rect.y);
    let (x1, y1) = (rect.x + rect.w, rect.y + rect.h);
    [
        SpriteVertex::new(x0, y0, 0.0, 0.0),
        SpriteVertex::new(x0, y1, 0.0, 1.0),
        SpriteVertex::new(x1, y0, 1.0, 0.0),
        SpriteVertex::new(x1, y0, 1.0, 0.0),
        SpriteVertex::new(x0, y1, 0.0, 1.0),
        SpriteVertex::new(x1, y1, 1.0, 1.0),
    ]
}

/// Generate vertices for a filled circle
pub fn circle(center: Vec2, radius: f32, color: Color, segments: u32) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity((segments * 3) as usize);

    for i in 0..segments {
        let theta1 = (i as f32 / segments as f32) * 2.0 * PI;
        let theta2 = ((i + 1) as f32 / segments as f32) * 2.0 * PI;

        // Triangle from center to edge
        vertices.push(Vertex::new(center.x, center.y, color));
        vertices.push(Vertex::new(
            center.x + radius * theta1.cos(),
            center.y + radius * theta1.sin(),
            color,
        ));
        vertices.push(Vertex::new(
            center.x + radius * theta2.cos(),
            center.y + radius * theta2.sin(),
            color,
        ));
    }

    vertices
}

/// Bitmap text as one quad per lit glyph cell
pub fn text(text: &str, baseline: Vec2, size: f32, color: Color) -> Vec<Vertex> {
    text_cells(text, baseline, size)
        .iter()
        .flat_map(|cell| rect_vertices(cell, color))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::scene::draw;
    use crate::renderer::vertex::colors;
    use crate::settings::Tuning;
    use crate::sim::{GameState, Viewport};

    #[test]
    fn test_rect_covers_corners() {
        let verts = rect_vertices(&Rect::new(10.0, 20.0, 30.0, 40.0), colors::OBSTACLE);
        let xs: Vec<f32> = verts.iter().map(|v| v.position[0]).collect();
        let ys: Vec<f32> = verts.iter().map(|v| v.position[1]).collect();
        assert_eq!(xs.iter().cloned().fold(f32::MAX, f32::min), 10.0);
        assert_eq!(xs.iter().cloned().fold(f32::MIN, f32::max), 40.0);
        assert_eq!(ys.iter().cloned().fold(f32::MAX, f32::min), 20.0);
        assert_eq!(ys.iter().cloned().fold(f32::MIN, f32::max), 60.0);
    }

    #[test]
    fn test_circle_vertex_count() {
        assert_eq!(circle(Vec2::ZERO, 20.0, colors::CLOUD, 24).len(), 72);
    }

    #[test]
    fn test_sprite_splits_batches_in_order() {
        let state = GameState::new(Tuning::default(), Viewport::new(800.0, 600.0), 1);
        let tess = tessellate(&draw(&state, true, "Skor", 0.0));

        assert_eq!(tess.batches.len(), 3);
        assert!(matches!(tess.batches[0], Batch::Colored(_)));
        assert_eq!(tess.batches[1], Batch::Sprite(0..6));
        assert!(matches!(tess.batches[2], Batch::Colored(_)));

        // Colored ranges tile the colored buffer without gaps
        if let (Batch::Colored(a), Batch::Colored(b)) = (&tess.batches[0], &tess.batches[2]) {
            assert_eq!(a.start, 0);
            assert_eq!(a.end, b.start);
            assert_eq!(b.end as usize, tess.colored.len());
        }
    }

    #[test]
    fn test_text_command_becomes_glyph_quads() {
        let list = DrawList {
            viewport: Viewport::new(800.0, 600.0),
            commands: vec![DrawCommand::Text {
                text: "Puan: 10".to_string(),
                baseline: Vec2::new(20.0, 40.0),
                size: 14.0,
                color: colors::SCORE_TEXT,
            }],
        };
        let tess = tessellate(&list);
        let cells = text_cells("Puan: 10", Vec2::new(20.0, 40.0), 14.0);
        assert_eq!(tess.colored.len(), cells.len() * 6);
        assert_eq!(tess.batches, vec![Batch::Colored(0..tess.colored.len() as u32)]);
    }

    #[test]
    fn test_placeholder_keeps_single_batch() {
        let state = GameState::new(Tuning::default(), Viewport::new(800.0, 600.0), 1);
        let tess = tessellate(&draw(&state, false, "Skor", 0.0));
        assert_eq!(tess.batches.len(), 1);
        assert!(tess.sprite.is_empty());
    }
}
