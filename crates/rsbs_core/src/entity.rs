use serde::Deserialize;

/// Width and height of every circle sprite, in logical pixels.
pub const SPRITE_SIZE: u32 = 128;

pub const DEFAULT_X: i32 = 256;
pub const DEFAULT_Y: i32 = 176;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CircleColor {
    #[default]
    Red,
    Blue,
    Green,
}

impl CircleColor {
    pub const ALL: &'static [CircleColor] =
        &[CircleColor::Red, CircleColor::Blue, CircleColor::Green];

    pub fn label(self) -> &'static str {
        match self {
            Self::Red => "red",
            Self::Blue => "blue",
            Self::Green => "green",
        }
    }
}

impl std::fmt::Display for CircleColor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Destination rectangle in logical screen pixels, origin top-left.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: u32,
    pub h: u32,
}

impl Rect {
    pub fn new(x: i32, y: i32, w: u32, h: u32) -> Self {
        Self { x, y, w, h }
    }

    pub fn screen(width: u32, height: u32) -> Self {
        Self::new(0, 0, width, height)
    }
}

/// The four drawables a frame is composed from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Layer {
    Background,
    Circle(CircleColor),
}

impl Layer {
    pub const ALL: &'static [Layer] = &[
        Layer::Background,
        Layer::Circle(CircleColor::Red),
        Layer::Circle(CircleColor::Blue),
        Layer::Circle(CircleColor::Green),
    ];
}

/// The movable circle. `y` never changes after construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Entity {
    pub x: i32,
    y: i32,
    pub color: CircleColor,
}

impl Entity {
    pub fn new(x: i32, y: i32) -> Self {
        Self {
            x,
            y,
            color: CircleColor::default(),
        }
    }

    pub fn y(&self) -> i32 {
        self.y
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, SPRITE_SIZE, SPRITE_SIZE)
    }

    pub fn layer(&self) -> Layer {
        Layer::Circle(self.color)
    }
}

impl Default for Entity {
    fn default() -> Self {
        Self::new(DEFAULT_X, DEFAULT_Y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_entity_is_centered_red() {
        let entity = Entity::default();
        assert_eq!(entity.x, 256);
        assert_eq!(entity.y(), 176);
        assert_eq!(entity.color, CircleColor::Red);
        assert_eq!(entity.rect(), Rect::new(256, 176, 128, 128));
    }

    #[test]
    fn layer_follows_color() {
        let mut entity = Entity::default();
        entity.color = CircleColor::Green;
        assert_eq!(entity.layer(), Layer::Circle(CircleColor::Green));
    }

    #[test]
    fn display_matches_label() {
        for &color in CircleColor::ALL {
            assert_eq!(format!("{}", color), color.label());
        }
    }

    #[test]
    fn layer_all_has_every_drawable() {
        assert_eq!(Layer::ALL.len(), 4);
        assert!(Layer::ALL.contains(&Layer::Background));
        for &color in CircleColor::ALL {
            assert!(Layer::ALL.contains(&Layer::Circle(color)));
        }
    }
}
