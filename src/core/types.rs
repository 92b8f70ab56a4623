//! Core type definitions used throughout the codebase

use serde::{Deserialize, Serialize};

/// Dense index into every parallel array of the entity store
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntityHandle(pub u32);

impl EntityHandle {
    pub fn new(index: u32) -> Self {
        Self(index)
    }

    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// 2D position or velocity
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    #[inline]
    pub fn distance_squared(&self, other: &Self) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx * dx + dy * dy
    }

    pub fn length(&self) -> f32 {
        (self.x * self.x + self.y * self.y).sqrt()
    }

    /// Unit vector at `angle` radians scaled by `length`
    pub fn from_angle(angle: f32, length: f32) -> Self {
        let (sin, cos) = angle.sin_cos();
        Self {
            x: cos * length,
            y: sin * length,
        }
    }
}

impl std::ops::Add for Vec2 {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self { x: self.x + rhs.x, y: self.y + rhs.y }
    }
}

impl std::ops::AddAssign for Vec2 {
    fn add_assign(&mut self, rhs: Self) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl std::ops::Sub for Vec2 {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Self { x: self.x - rhs.x, y: self.y - rhs.y }
    }
}

impl std::ops::Mul<f32> for Vec2 {
    type Output = Self;
    fn mul(self, rhs: f32) -> Self {
        Self { x: self.x * rhs, y: self.y * rhs }
    }
}

impl std::ops::Neg for Vec2 {
    type Output = Self;
    fn neg(self) -> Self {
        Self { x: -self.x, y: -self.y }
    }
}

/// Axis-aligned world rectangle shared read-only by every stage
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WorldBounds {
    pub x_min: f32,
    pub x_max: f32,
    pub y_min: f32,
    pub y_max: f32,
}

impl WorldBounds {
    pub fn new(x_min: f32, x_max: f32, y_min: f32, y_max: f32) -> Self {
        Self { x_min, x_max, y_min, y_max }
    }

    pub fn width(&self) -> f32 {
        self.x_max - self.x_min
    }

    pub fn height(&self) -> f32 {
        self.y_max - self.y_min
    }

    pub fn contains(&self, pos: Vec2) -> bool {
        pos.x >= self.x_min && pos.x <= self.x_max && pos.y >= self.y_min && pos.y <= self.y_max
    }

    /// Nearest point of the rectangle to `pos`
    #[inline]
    pub fn clamp(&self, pos: Vec2) -> Vec2 {
        Vec2 {
            x: pos.x.clamp(self.x_min, self.x_max),
            y: pos.y.clamp(self.y_min, self.y_max),
        }
    }

    /// Same rectangle shrunk (or grown) about the origin
    pub fn scaled(&self, factor: f32) -> Self {
        Self {
            x_min: self.x_min * factor,
            x_max: self.x_max * factor,
            y_min: self.y_min * factor,
            y_max: self.y_max * factor,
        }
    }
}

impl Default for WorldBounds {
    fn default() -> Self {
        Self::new(-80.0, 80.0, -50.0, 50.0)
    }
}

/// Per-entity visual record: 8-bit color plus sprite atlas index
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Visual {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub sprite: u8,
}

impl Visual {
    pub fn new(r: u8, g: u8, b: u8, sprite: u8) -> Self {
        Self { r, g, b, sprite }
    }

    pub fn white(sprite: u8) -> Self {
        Self::new(255, 255, 255, sprite)
    }

    /// Take the color channels of `other`, keep our sprite index
    #[inline]
    pub fn recolor_from(&mut self, other: &Visual) {
        self.r = other.r;
        self.g = other.g;
        self.b = other.b;
    }
}
