//! sprite cache, loaded once from `sprites.json` with built in fallbacks
//!
//! A missing or unreadable manifest falls back to the built in glyph set. A
//! manifest entry that fails to parse is skipped: that sprite is simply not
//! drawn. Neither case stops the lottery.
use fxhash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// file name of the sprite manifest inside the assets directory
pub const MANIFEST: &str = "sprites.json";

/// 24 bit colour
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb(pub u8, pub u8, pub u8);

/// Every sprite the scene knows how to draw
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpriteKind {
    #[allow(missing_docs)]
    Head,
    #[allow(missing_docs)]
    Body,
    #[allow(missing_docs)]
    Tail,
    /// the small ball the snake hunts
    Ball,
    /// the large ball in the digit panel
    Sphere,
    /// explosion sheet, one glyph per frame
    Explosion,
}

impl SpriteKind {
    #[allow(missing_docs)]
    pub fn all() -> [SpriteKind; 6] {
        [
            SpriteKind::Head,
            SpriteKind::Body,
            SpriteKind::Tail,
            SpriteKind::Ball,
            SpriteKind::Sphere,
            SpriteKind::Explosion,
        ]
    }

    /// key used in the manifest
    pub fn name(&self) -> &'static str {
        match self {
            SpriteKind::Head => "head",
            SpriteKind::Body => "body",
            SpriteKind::Tail => "tail",
            SpriteKind::Ball => "ball",
            SpriteKind::Sphere => "sphere",
            SpriteKind::Explosion => "explosion",
        }
    }

    /// the sprite used when the manifest doesn't name this kind
    pub fn fallback(&self) -> Sprite {
        let (width, glyphs, color) = match self {
            SpriteKind::Head => (30.0, "▶◥▲◤◀◣▼◢", Rgb(238, 60, 42)),
            SpriteKind::Body => (24.0, "━╱┃╲━╱┃╲", Rgb(0, 111, 130)),
            SpriteKind::Tail => (30.0, "→↗↑↖←↙↓↘", Rgb(0, 111, 130)),
            SpriteKind::Ball => (32.0, "?", Rgb(0, 0, 0)),
            SpriteKind::Sphere => (100.0, "◯", Rgb(50, 50, 50)),
            SpriteKind::Explosion => (40.0, "·∗✶✷✸✹✺", Rgb(238, 60, 42)),
        };
        Sprite {
            width,
            glyphs: glyphs.chars().collect(),
            color,
        }
    }
}

/// A drawable image.
///
/// Rotatable sprites carry eight glyphs, one per eighth turn counter
/// clockwise from facing right. Animated sprites carry one glyph per frame.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Sprite {
    /// edge length in units, sprites are square
    pub width: f32,
    #[allow(missing_docs)]
    pub glyphs: Vec<char>,
    #[allow(missing_docs)]
    pub color: Rgb,
}

impl Sprite {
    /// the glyph for `index`, wrapping around the glyph list
    pub fn glyph(&self, index: usize) -> char {
        if self.glyphs.is_empty() {
            ' '
        } else {
            self.glyphs[index % self.glyphs.len()]
        }
    }
}

/// Something that hands out sprites after a one time load
pub trait SpriteSource {
    /// loads every sprite; calls after the first are no-ops
    fn load_assets(&mut self);

    /// a loaded sprite, `None` when it was skipped
    fn sprite(&self, kind: SpriteKind) -> Option<&Sprite>;
}

/// Sprite cache backed by a manifest file
#[derive(Debug, Clone)]
pub struct Assets {
    dir: PathBuf,
    loaded: bool,
    sprites: FxHashMap<SpriteKind, Sprite>,
}

impl Assets {
    /// cache reading `sprites.json` from `dir` on first use
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Assets {
            dir: dir.into(),
            loaded: false,
            sprites: FxHashMap::default(),
        }
    }

    /// cache holding only the built in sprites
    pub fn builtin() -> Self {
        Assets {
            dir: PathBuf::new(),
            loaded: true,
            sprites: SpriteKind::all()
                .iter()
                .map(|k| (*k, k.fallback()))
                .collect(),
        }
    }

    #[allow(missing_docs)]
    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    fn read_manifest(path: &Path) -> Option<FxHashMap<String, serde_json::Value>> {
        let raw = match fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(e) => {
                warn!("sprite manifest {} unavailable ({}), using built in sprites", path.display(), e);
                return None;
            }
        };
        match serde_json::from_str(&raw) {
            Ok(entries) => Some(entries),
            Err(e) => {
                warn!("sprite manifest {} is invalid ({}), using built in sprites", path.display(), e);
                None
            }
        }
    }
}

impl SpriteSource for Assets {
    fn load_assets(&mut self) {
        if self.loaded {
            return;
        }
        self.loaded = true;

        let path = self.dir.join(MANIFEST);
        let mut entries = Self::read_manifest(&path).unwrap_or_default();

        for kind in SpriteKind::all().iter() {
            match entries.remove(kind.name()) {
                Some(value) => match serde_json::from_value::<Sprite>(value) {
                    Ok(sprite) => {
                        self.sprites.insert(*kind, sprite);
                    }
                    Err(e) => warn!("skipping sprite {}: {}", kind.name(), e),
                },
                None => {
                    debug!("sprite {} not in manifest, using built in", kind.name());
                    self.sprites.insert(*kind, kind.fallback());
                }
            }
        }

        for unknown in entries.keys() {
            warn!("ignoring unknown sprite {} in {}", unknown, path.display());
        }
        info!("loaded {} sprites", self.sprites.len());
    }

    fn sprite(&self, kind: SpriteKind) -> Option<&Sprite> {
        self.sprites.get(&kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("snake-lottery-{}-{}", name, std::process::id()));
        fs::create_dir_all(&dir).expect("temp dir is writable");
        dir
    }

    #[test]
    fn test_missing_manifest_falls_back() {
        let mut assets = Assets::new("/definitely/not/here");
        assert!(!assets.is_loaded());
        assets.load_assets();
        assert!(assets.is_loaded());
        for kind in SpriteKind::all().iter() {
            assert_eq!(assets.sprite(*kind), Some(&kind.fallback()));
        }
    }

    #[test]
    fn test_manifest_overrides_and_skips() {
        let dir = scratch_dir("manifest");
        let mut f = fs::File::create(dir.join(MANIFEST)).expect("writable");
        write!(
            f,
            r#"{{"head": {{"width": 10, "glyphs": ["H"], "color": [1, 2, 3]}}, "ball": {{"width": "big"}}}}"#
        )
        .expect("writable");
        drop(f);

        let mut assets = Assets::new(&dir);
        assets.load_assets();
        let head = assets.sprite(SpriteKind::Head).expect("head loaded");
        assert_eq!(head.width, 10.0);
        assert_eq!(head.glyph(5), 'H');
        assert_eq!(head.color, Rgb(1, 2, 3));
        assert_eq!(assets.sprite(SpriteKind::Ball), None);
        assert_eq!(assets.sprite(SpriteKind::Body), Some(&SpriteKind::Body.fallback()));

        let _ = fs::remove_dir_all(dir);
    }

    #[test]
    fn test_shipped_manifest_loads_every_sprite() {
        let mut assets = Assets::new(Path::new(env!("CARGO_MANIFEST_DIR")).join("assets"));
        assets.load_assets();
        for kind in SpriteKind::all().iter() {
            assert!(assets.sprite(*kind).is_some(), "{} missing", kind.name());
        }
        let ball = assets.sprite(SpriteKind::Ball).expect("ball loaded");
        assert_eq!(ball.glyphs, vec!['?']);
        assert_eq!(ball, &SpriteKind::Ball.fallback());
    }

    #[test]
    fn test_load_happens_once() {
        let mut assets = Assets::builtin();
        assets.sprites.clear();
        assets.load_assets();
        assert!(assets.sprite(SpriteKind::Head).is_none());
    }

    #[test]
    fn test_rotatable_fallbacks_have_eight_glyphs() {
        for kind in [SpriteKind::Head, SpriteKind::Body, SpriteKind::Tail].iter() {
            assert_eq!(kind.fallback().glyphs.len(), 8);
        }
        assert_eq!(SpriteKind::Explosion.fallback().glyphs.len(), 7);
    }
}
