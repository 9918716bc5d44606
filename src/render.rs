//! Layer compositing onto the panel.
//!
//! Nothing is kept in a frame buffer: for every pixel that needs repainting
//! the render list is searched front to back and the winning colour is pushed
//! straight into the display's active window.

use core::convert::Infallible;

use embedded_graphics::mono_font::ascii::{FONT_10X20, FONT_6X10};
use embedded_graphics::mono_font::{MonoFont, MonoTextStyle, MonoTextStyleBuilder};
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{PointsIter, Rectangle};
use embedded_graphics::text::{Alignment, Baseline, Text, TextStyleBuilder};

use crate::config::*;
use crate::geometry::Region;
use crate::layer::{Scene, TransformId};
use crate::score::Scoreboard;

/// Display driver seam.
///
/// After `set_area`, consecutive `write_pixel` calls fill the area row by
/// row, left to right.
pub trait PixelSink {
    fn set_area(&mut self, area: Region);
    fn write_pixel(&mut self, color: Rgb565);
}

pub const SCREEN: Region = Region::new(
    Point::new(0, 0),
    Point::new(SCREEN_WIDTH as Coord - 1, SCREEN_HEIGHT as Coord - 1),
);

/// Promote every moving layer's pending position to current.
///
/// Runs with interrupts masked so no half-shifted history is ever
/// observable; only plain moves happen inside.
pub fn commit(scene: &mut Scene) {
    critical_section::with(|_| {
        for id in TransformId::ALL {
            scene.body_mut(id).shift();
        }
    });
}

/// Commit positions, then repaint the footprint of every moving layer.
pub fn redraw<P: PixelSink>(scene: &mut Scene, sink: &mut P) {
    commit(scene);
    for id in TransformId::ALL {
        let footprint = scene.body(id).footprint();
        paint_region(scene, footprint, sink);
    }
}

/// Composite every pixel inside `region` (clipped to the screen).
pub fn paint_region<P: PixelSink>(scene: &Scene, region: Region, sink: &mut P) {
    let Some(region) = region.intersection(&SCREEN) else {
        return;
    };
    sink.set_area(region);
    for p in region.points() {
        sink.write_pixel(scene.color_at(p));
    }
}

/// Full-screen composite, used once at start-up.
pub fn paint_all<P: PixelSink>(scene: &Scene, sink: &mut P) {
    paint_region(scene, SCREEN, sink);
}

/// Both score digits at their fixed anchors.
pub fn draw_scores<P: PixelSink>(scores: &Scoreboard, sink: &mut P) {
    let mut canvas = Canvas::new(sink);
    draw_digit(&mut canvas, scores.left(), LEFT_SCORE_ANCHOR);
    draw_digit(&mut canvas, scores.right(), RIGHT_SCORE_ANCHOR);
}

fn draw_digit<P: PixelSink>(canvas: &mut Canvas<'_, P>, value: u8, (x, y): (Coord, Coord)) {
    let digit = char::from_digit(u32::from(value.min(9)), 10).unwrap_or('?');
    let mut buf = [0u8; 4];
    let text = digit.encode_utf8(&mut buf);
    Text::with_baseline(text, Point::new(x, y), opaque_style(&FONT_6X10), Baseline::Top)
        .draw(canvas)
        .ok();
}

/// "GAME OVER" on two lines, centred on the field.
pub fn draw_game_over<P: PixelSink>(sink: &mut P) {
    let mut canvas = Canvas::new(sink);
    let layout = TextStyleBuilder::new()
        .alignment(Alignment::Center)
        .baseline(Baseline::Middle)
        .build();
    let center = Point::new(FIELD_CENTER_X, FIELD_CENTER_Y);
    Text::with_text_style("GAME\nOVER", center, opaque_style(&FONT_10X20), layout)
        .draw(&mut canvas)
        .ok();
}

fn opaque_style(font: &'static MonoFont<'static>) -> MonoTextStyle<'static, Rgb565> {
    MonoTextStyleBuilder::new()
        .font(font)
        .text_color(FG_COLOR)
        .background_color(BG_COLOR)
        .build()
}

/// `DrawTarget` view of a [`PixelSink`], for text.
pub struct Canvas<'a, P: PixelSink> {
    sink: &'a mut P,
}

impl<'a, P: PixelSink> Canvas<'a, P> {
    pub fn new(sink: &'a mut P) -> Self {
        Self { sink }
    }
}

impl<P: PixelSink> OriginDimensions for Canvas<'_, P> {
    fn size(&self) -> Size {
        Size::new(SCREEN_WIDTH, SCREEN_HEIGHT)
    }
}

impl<P: PixelSink> DrawTarget for Canvas<'_, P> {
    type Color = Rgb565;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            if SCREEN.contains(point) {
                self.sink.set_area(Region::point(point));
                self.sink.write_pixel(color);
            }
        }
        Ok(())
    }

    fn fill_contiguous<I>(&mut self, area: &Rectangle, colors: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Self::Color>,
    {
        if area.is_zero_sized() {
            return Ok(());
        }
        let screen = self.bounding_box();
        if screen.intersection(area) != *area {
            // partly off screen: fall back to clipped single pixels
            let pixels = area.points().zip(colors).map(|(p, c)| Pixel(p, c));
            return self.draw_iter(pixels);
        }
        let region = Region::from(*area);
        self.sink.set_area(region);
        for color in colors.into_iter().take(region.area() as usize) {
            self.sink.write_pixel(color);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layer::LayerId;

    /// Keeps a full-screen copy of whatever was written.
    struct Screen {
        pixels: Vec<Option<Rgb565>>,
        area: Region,
        cursor: Point,
        areas: Vec<Region>,
    }

    impl Screen {
        fn new() -> Self {
            Self {
                pixels: vec![None; (SCREEN_WIDTH * SCREEN_HEIGHT) as usize],
                area: SCREEN,
                cursor: Point::zero(),
                areas: Vec::new(),
            }
        }

        fn at(&self, p: Point) -> Option<Rgb565> {
            self.pixels[(p.y as u32 * SCREEN_WIDTH + p.x as u32) as usize]
        }

        fn clear(&mut self) {
            self.pixels.iter_mut().for_each(|p| *p = None);
            self.areas.clear();
        }
    }

    impl PixelSink for Screen {
        fn set_area(&mut self, area: Region) {
            self.area = area;
            self.cursor = area.top_left;
            self.areas.push(area);
        }

        fn write_pixel(&mut self, color: Rgb565) {
            let p = self.cursor;
            self.pixels[(p.y as u32 * SCREEN_WIDTH + p.x as u32) as usize] = Some(color);
            self.cursor.x += 1;
            if self.cursor.x > self.area.bot_right.x {
                self.cursor.x = self.area.top_left.x;
                self.cursor.y += 1;
            }
        }
    }

    #[test]
    fn paint_all_covers_the_screen() {
        let scene = Scene::new();
        let mut screen = Screen::new();
        paint_all(&scene, &mut screen);
        assert!(screen.pixels.iter().all(Option::is_some));
        assert_eq!(screen.at(Point::new(0, 0)), Some(BG_COLOR));
        assert_eq!(screen.at(Point::new(1, 1)), Some(FG_COLOR));
        assert_eq!(screen.at(Point::new(FIELD_CENTER_X, FIELD_CENTER_Y)), Some(BALL_COLOR));
    }

    #[test]
    fn moved_ball_leaves_no_trail() {
        let mut scene = Scene::new();
        let start = scene.layer(LayerId::BALL).pos;
        let mut screen = Screen::new();
        paint_all(&scene, &mut screen);

        scene.layer_mut(LayerId::BALL).next = start + Point::new(10, 0);
        redraw(&mut scene, &mut screen);

        assert_eq!(screen.at(start), Some(BG_COLOR));
        assert_eq!(screen.at(start + Point::new(10, 0)), Some(BALL_COLOR));
        let ball = scene.layer(LayerId::BALL);
        assert_eq!(ball.last, start);
        assert_eq!(ball.pos, start + Point::new(10, 0));
    }

    #[test]
    fn redraw_touches_only_moving_footprints() {
        let mut scene = Scene::new();
        let mut screen = Screen::new();
        let start = scene.layer(LayerId::BALL).pos;
        scene.layer_mut(LayerId::BALL).next = start + Point::new(1, -3);
        redraw(&mut scene, &mut screen);

        let footprints: Vec<Region> =
            TransformId::ALL.iter().map(|&id| scene.body(id).footprint()).collect();
        assert_eq!(screen.areas, footprints);
        for p in SCREEN.points() {
            let inside = footprints.iter().any(|f| f.contains(p));
            assert_eq!(screen.at(p).is_some(), inside, "pixel {:?}", p);
        }
        // the field border away from every mover is never rewritten
        assert_eq!(screen.at(Point::new(1, FIELD_CENTER_Y)), None);
    }

    #[test]
    fn commit_leaves_the_field_alone() {
        let mut scene = Scene::new();
        let field = *scene.layer(LayerId::FIELD);
        scene.layer_mut(LayerId::FIELD).next = field.pos + Point::new(5, 5);
        commit(&mut scene);
        assert_eq!(scene.layer(LayerId::FIELD).pos, field.pos);

        // a resting paddle's history collapses onto its position
        let paddle = scene.layer(LayerId::LEFT_PADDLE);
        assert_eq!((paddle.last, paddle.pos), (paddle.next, paddle.next));
    }

    #[test]
    fn scores_render_as_glyphs() {
        let mut screen = Screen::new();
        let mut scores = Scoreboard::new();
        draw_scores(&scores, &mut screen);
        let zero: Vec<_> = screen.pixels.clone();
        assert!(zero.iter().flatten().any(|&c| c == FG_COLOR));

        screen.clear();
        scores.award(crate::layer::PaddleSide::Left);
        draw_scores(&scores, &mut screen);
        assert_ne!(screen.pixels, zero);

        let (x, y) = LEFT_SCORE_ANCHOR;
        let cell = Region::new(Point::new(x, y), Point::new(x + 5, y + 9));
        for p in cell.points() {
            assert!(screen.at(p).is_some(), "glyph cell pixel {:?} not written", p);
        }
    }

    #[test]
    fn game_over_text_is_centred() {
        let mut screen = Screen::new();
        draw_game_over(&mut screen);
        let written: Vec<Point> = SCREEN
            .points()
            .filter(|&p| screen.at(p) == Some(FG_COLOR))
            .collect();
        assert!(!written.is_empty());
        let min_x = written.iter().map(|p| p.x).min().unwrap_or(0);
        let max_x = written.iter().map(|p| p.x).max().unwrap_or(0);
        assert!((FIELD_CENTER_X - min_x - (max_x - FIELD_CENTER_X)).abs() <= 10);
    }
}
