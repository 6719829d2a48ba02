//! scene description and the drawing surface it is painted on
pub mod assets;

use crate::config::WindowSize;
use crate::orientation::{Segment, SegmentKind};
use crate::types::Position;
use assets::{Rgb, Sprite, SpriteKind, SpriteSource};
use num_format::{Locale, ToFormattedString};

/// colour the screen is cleared to
pub const BACKGROUND: Rgb = Rgb(234, 240, 243);
#[allow(missing_docs)]
pub const TITLE_COLOR: Rgb = Rgb(238, 60, 42);
#[allow(missing_docs)]
pub const TEXT_COLOR: Rgb = Rgb(0, 111, 130);
#[allow(missing_docs)]
pub const NOTE_COLOR: Rgb = Rgb(100, 111, 230);
#[allow(missing_docs)]
pub const DIGIT_COLOR: Rgb = Rgb(50, 50, 50);

/// Frames the ball stays visible once the explosion starts
pub const BALL_VISIBLE_FRAMES: usize = 4;

/// A 2D canvas of fixed size. Positions are top left corners, in units.
pub trait Surface {
    /// clears the whole canvas
    fn fill(&mut self, color: Rgb);

    /// draws `sprite` turned counter clockwise by `rotation` degrees
    fn blit(&mut self, sprite: &Sprite, top_left: (f32, f32), rotation: f32);

    /// draws one frame of an animated sprite
    fn blit_frame(&mut self, sprite: &Sprite, top_left: (f32, f32), frame: usize);

    #[allow(missing_docs)]
    fn text(&mut self, top_left: (f32, f32), text: &str, color: Rgb);
}

/// Text shown on top of the play field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Overlay {
    /// idle screen, waiting for start
    Attract,
    /// a draw is running
    Drawing,
    /// all digits are out, waiting for restart
    Restart,
}

/// Everything visible in one frame
#[derive(Debug, Clone, PartialEq)]
pub struct Scene<'a> {
    #[allow(missing_docs)]
    pub window: WindowSize,
    /// snake segments, tail first
    pub segments: Vec<Segment>,
    /// the ball being hunted, if it is still visible
    pub ball: Option<Position>,
    /// explosion frame playing over a cell
    pub explosion: Option<(Position, usize)>,
    #[allow(missing_docs)]
    pub overlay: Overlay,
    /// digits revealed so far, in reveal order (least significant first)
    pub digits: &'a [u8],
    /// upper bound of the draw, shown on the idle screen
    pub max_number: u32,
}

impl Scene<'_> {
    /// top left of the panel ball holding the `k`th revealed digit
    pub fn panel_slot(window: WindowSize, k: usize) -> (f32, f32) {
        (
            (window.width - 50 - 100 * (k as i32 + 1)) as f32,
            (window.height - 100) as f32,
        )
    }

    /// Paints the scene back to front: background, snake from tail to head,
    /// ball and explosion, text overlays, digit panel. Sprites that failed to
    /// load are left out.
    pub fn draw<S: Surface, A: SpriteSource>(&self, surface: &mut S, assets: &mut A) {
        assets.load_assets();
        let assets = &*assets;

        surface.fill(BACKGROUND);

        for segment in self.segments.iter() {
            let kind = match segment.kind {
                SegmentKind::Tail => SpriteKind::Tail,
                SegmentKind::Body => SpriteKind::Body,
                SegmentKind::Head => SpriteKind::Head,
            };
            if let Some(sprite) = assets.sprite(kind) {
                let at = segment.pose.top_left(segment.cell, sprite.width);
                surface.blit(sprite, at, segment.pose.rotation_degrees());
            }
        }

        if let (Some(ball), Some(sprite)) = (self.ball, assets.sprite(SpriteKind::Ball)) {
            let half = sprite.width / 2.0;
            surface.blit_frame(sprite, (ball.x as f32 - half, ball.y as f32 - half), 0);
        }

        if let (Some((cell, frame)), Some(sprite)) =
            (self.explosion, assets.sprite(SpriteKind::Explosion))
        {
            let half = sprite.width / 2.0;
            surface.blit_frame(sprite, (cell.x as f32 - half, cell.y as f32 - half), frame);
        }

        surface.text((10.0, 10.0), "Snake Lottery", TITLE_COLOR);
        match self.overlay {
            Overlay::Attract => {
                surface.text((300.0, 40.0), "Press 'SPACE' to crack a ball.", TEXT_COLOR);
                surface.text(
                    (50.0, 100.0),
                    &format!(
                        "Tonight's number is somewhere between 1 and {}...",
                        self.max_number.to_formatted_string(&Locale::en)
                    ),
                    NOTE_COLOR,
                );
            }
            Overlay::Drawing => {}
            Overlay::Restart => {
                surface.text((300.0, 40.0), "Press 'X' to restart.", TEXT_COLOR);
            }
        }

        let sphere = assets.sprite(SpriteKind::Sphere);
        for (k, digit) in self.digits.iter().enumerate() {
            let (x, y) = Self::panel_slot(self.window, k);
            if let Some(sprite) = sphere {
                surface.blit_frame(sprite, (x, y), 0);
            }
            surface.text((x + 50.0, y + 50.0), &digit.to_string(), DIGIT_COLOR);
        }
    }
}
