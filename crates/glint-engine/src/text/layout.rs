use std::io;

use crate::coords::{ColorRgba, Rect, Transform, Vec2};
use crate::error::{Error, Result};
use crate::geom::Mesh;
use crate::render::{Material, RenderSurface, ShaderId};

use super::atlas::{Atlas, Glyph};

/// Substituted for code points the atlas does not contain.
pub const FALLBACK_GLYPH: char = '?';

// ── layout ────────────────────────────────────────────────────────────────

impl Atlas {
    /// Lays out `text` starting at `cursor` and advances `cursor` past it.
    ///
    /// Layout space is +Y up. `\n` returns the pen to `origin.x` and moves it
    /// down one line. Normalized glyph metrics are multiplied by
    /// `scale * size()`, so `scale = 1` gives glyphs at their baked pixel size.
    ///
    /// Returns the glyph quads (tinted with `color`) and the text bounds: from
    /// the first line's ascent line at the start position to the last line's
    /// descent line at the final cursor. On error `cursor` is left unchanged.
    pub fn layout(
        &self,
        origin: Vec2,
        cursor: &mut Vec2,
        text: &str,
        color: ColorRgba,
        scale: f32,
    ) -> Result<(Mesh, Rect)> {
        let start = *cursor;
        let mut pen = start;
        let s = scale * self.size() as f32;
        let line_height = self.line_height() * scale;

        let mut mesh = Mesh::new();
        for ch in text.chars() {
            if ch == '\n' {
                pen.x = origin.x;
                pen.y -= line_height;
                continue;
            }

            let glyph = self.glyph_or_fallback(ch)?;
            let size = glyph.uv.size() * s;
            if size.x > 0.0 && size.y > 0.0 {
                let quad = Rect::from_origin_size(pen + glyph.bearing * s, size);
                mesh.append(&Mesh::quad(quad, glyph.uv, color));
            }
            pen.x += glyph.advance * s;
        }

        *cursor = pen;
        let bounds = Rect::from_corners(
            Vec2::new(start.x, start.y - self.ascent() * scale),
            Vec2::new(pen.x, pen.y - self.descent() * scale),
        );
        Ok((mesh, bounds))
    }

    fn glyph_or_fallback(&self, ch: char) -> Result<&Glyph> {
        if let Some(glyph) = self.glyph(ch) {
            return Ok(glyph);
        }
        log::debug!("no glyph for {ch:?}, substituting {FALLBACK_GLYPH:?}");
        self.glyph(FALLBACK_GLYPH)
            .ok_or(Error::MissingFallback { ch, fallback: FALLBACK_GLYPH })
    }
}

// ── live text ─────────────────────────────────────────────────────────────

/// A string bound to an atlas, with its laid-out mesh kept current.
///
/// [`Text::set`] replaces the content and rebuilds from `origin`;
/// [`Text::write_str`] (and [`io::Write`]) append from the current cursor.
/// [`Text::revision`] changes whenever the mesh does, so callers can skip
/// re-uploading unchanged text.
pub struct Text<'a> {
    atlas: &'a Atlas,
    material: Material,
    content: String,
    mesh: Option<Mesh>,
    bounds: Rect,
    origin: Vec2,
    cursor: Vec2,
    color: ColorRgba,
    scale: f32,
    revision: u64,
    // Trailing bytes of an incomplete UTF-8 sequence from `io::Write`.
    pending: Vec<u8>,
}

impl<'a> Text<'a> {
    pub fn new(atlas: &'a Atlas, text: &str) -> Result<Self> {
        let mut t = Self {
            atlas,
            material: Material { shader: ShaderId::SPRITE, textures: atlas.texture().into_iter().collect() },
            content: String::new(),
            mesh: None,
            bounds: Rect::ZERO,
            origin: Vec2::zero(),
            cursor: Vec2::zero(),
            color: ColorRgba::white(),
            scale: 1.0,
            revision: 0,
            pending: Vec::new(),
        };
        t.set(text)?;
        Ok(t)
    }

    /// Replaces the content. Does nothing if `text` equals the current content.
    pub fn set(&mut self, text: &str) -> Result<()> {
        if self.content == text {
            return Ok(());
        }
        self.pending.clear();
        self.rebuild(text)
    }

    /// Appends `text` at the cursor.
    pub fn write_str(&mut self, text: &str) -> Result<()> {
        if text.is_empty() {
            return Ok(());
        }
        if self.mesh.is_none() {
            return self.rebuild(text);
        }

        let mut cursor = self.cursor;
        let (more, bounds) = self.atlas.layout(self.origin, &mut cursor, text, self.color, self.scale)?;

        if let Some(mesh) = self.mesh.as_mut() {
            mesh.append(&more);
        }
        self.bounds = self.bounds.union(bounds);
        self.cursor = cursor;
        self.content.push_str(text);
        self.revision += 1;
        Ok(())
    }

    fn rebuild(&mut self, text: &str) -> Result<()> {
        let mut cursor = self.origin;
        let (mesh, bounds) = self.atlas.layout(self.origin, &mut cursor, text, self.color, self.scale)?;

        self.content.clear();
        self.content.push_str(text);
        self.mesh = Some(mesh);
        self.bounds = bounds;
        self.cursor = cursor;
        self.revision += 1;
        Ok(())
    }

    fn relayout(&mut self) -> Result<()> {
        if self.mesh.is_none() {
            return Ok(());
        }
        let text = std::mem::take(&mut self.content);
        let result = self.rebuild(&text);
        if result.is_err() {
            self.content = text;
        }
        result
    }

    // ── accessors ─────────────────────────────────────────────────────────

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.content
    }

    /// Layout bounds (ascent to descent, start to final cursor).
    #[inline]
    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    /// Tight bounds of the glyph quads. [`Rect::ZERO`] when there are none.
    pub fn mesh_bounds(&self) -> Rect {
        self.mesh.as_ref().map_or(Rect::ZERO, Mesh::bounds)
    }

    /// `None` until content is first set.
    #[inline]
    pub fn mesh(&self) -> Option<&Mesh> {
        self.mesh.as_ref()
    }

    #[inline]
    pub fn revision(&self) -> u64 {
        self.revision
    }

    #[inline]
    pub fn atlas(&self) -> &'a Atlas {
        self.atlas
    }

    /// Baseline start of the first line.
    #[inline]
    pub fn origin(&self) -> Vec2 {
        self.origin
    }

    /// Where the next appended glyph goes.
    #[inline]
    pub fn cursor(&self) -> Vec2 {
        self.cursor
    }

    #[inline]
    pub fn color(&self) -> ColorRgba {
        self.color
    }

    #[inline]
    pub fn scale(&self) -> f32 {
        self.scale
    }

    /// Moves the text to start at `origin`, laying it out again.
    pub fn set_origin(&mut self, origin: Vec2) -> Result<()> {
        if self.origin == origin {
            return Ok(());
        }
        self.origin = origin;
        self.cursor = origin;
        self.relayout()
    }

    /// Changes the glyph scale, laying the text out again.
    pub fn set_scale(&mut self, scale: f32) -> Result<()> {
        if self.scale == scale {
            return Ok(());
        }
        self.scale = scale;
        self.relayout()
    }

    /// Retints the existing glyphs and any written later. No re-layout.
    pub fn set_color(&mut self, color: ColorRgba) {
        self.color = color;
        if let Some(mesh) = self.mesh.as_mut() {
            mesh.set_color(color);
            self.revision += 1;
        }
    }

    // ── drawing ───────────────────────────────────────────────────────────

    pub fn draw(&self, surface: &mut (impl RenderSurface + ?Sized), transform: Transform) {
        self.draw_color_mask(surface, transform, ColorRgba::white());
    }

    pub fn draw_color_mask(&self, surface: &mut (impl RenderSurface + ?Sized), transform: Transform, tint: ColorRgba) {
        if let Some(mesh) = &self.mesh {
            surface.add(mesh, transform, tint, &self.material);
        }
    }

    /// Draws unscaled, offset by `rect.min`.
    pub fn draw_rect(&self, surface: &mut (impl RenderSurface + ?Sized), rect: Rect, tint: ColorRgba) {
        self.draw_color_mask(surface, Transform::translate(rect.min.x, rect.min.y), tint);
    }

    /// Draws with [`Text::bounds`] stretched onto `rect`.
    pub fn rect_draw_color_mask(&self, surface: &mut (impl RenderSurface + ?Sized), rect: Rect, tint: ColorRgba) {
        self.draw_color_mask(surface, Transform::rect_to_rect(self.bounds, rect), tint);
    }
}

impl io::Write for Text<'_> {
    /// Appends UTF-8 text. A multi-byte sequence split across calls is held
    /// back until it completes; invalid bytes become U+FFFD.
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.pending.extend_from_slice(buf);
        let text = drain_utf8(&mut self.pending);
        self.write_str(&text).map_err(io::Error::other)?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Removes and returns the decodable prefix of `bytes`, leaving an incomplete
/// trailing sequence in place.
fn drain_utf8(bytes: &mut Vec<u8>) -> String {
    let mut out = String::new();
    let mut rest: &[u8] = bytes;

    loop {
        match std::str::from_utf8(rest) {
            Ok(s) => {
                out.push_str(s);
                rest = &[];
                break;
            }
            Err(e) => {
                let (valid, after) = rest.split_at(e.valid_up_to());
                out.push_str(&String::from_utf8_lossy(valid));
                match e.error_len() {
                    Some(n) => {
                        out.push(char::REPLACEMENT_CHARACTER);
                        rest = &after[n..];
                    }
                    None => {
                        rest = after;
                        break;
                    }
                }
            }
        }
    }

    let consumed = bytes.len() - rest.len();
    bytes.drain(..consumed);
    out
}
