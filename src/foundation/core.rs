use std::ops::{Add, Index, Mul, Sub};

/// Integer 2D pixel position, pixel size, or grid coordinate.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct Vec2i {
    /// Horizontal component (width for sizes).
    pub x: i32,
    /// Vertical component (height for sizes).
    pub y: i32,
}

impl Vec2i {
    /// Construct from components.
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Smaller of the two components.
    pub fn min_axis(self) -> i32 {
        self.x.min(self.y)
    }

    /// Larger of the two components.
    pub fn max_axis(self) -> i32 {
        self.x.max(self.y)
    }

    /// Swap components.
    pub const fn transposed(self) -> Self {
        Self {
            x: self.y,
            y: self.x,
        }
    }

    /// Clamp both components to `>= 0` and return them as unsigned extents.
    pub fn extent(self) -> (u32, u32) {
        (self.x.max(0) as u32, self.y.max(0) as u32)
    }
}

impl Add for Vec2i {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Vec2i {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<i32> for Vec2i {
    type Output = Self;

    fn mul(self, rhs: i32) -> Self {
        Self::new(self.x * rhs, self.y * rhs)
    }
}

/// Width/height/depth triple, addressable by name or by index `0..3`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Dim3<T> {
    /// First component (x).
    pub width: T,
    /// Second component (y).
    pub height: T,
    /// Third component (z).
    pub depth: T,
}

impl<T: Copy> Dim3<T> {
    /// Construct from components.
    pub const fn new(width: T, height: T, depth: T) -> Self {
        Self {
            width,
            height,
            depth,
        }
    }

    /// Apply `f` to every component.
    pub fn map<U>(self, f: impl Fn(T) -> U) -> Dim3<U> {
        Dim3 {
            width: f(self.width),
            height: f(self.height),
            depth: f(self.depth),
        }
    }
}

impl Dim3<f64> {
    /// Scale every component, e.g. physical units to pixels.
    pub fn scaled(self, factor: f64) -> Self {
        self.map(|v| v * factor)
    }

    /// Floor every component to an integer.
    pub fn floor_i32(self) -> Dim3<i32> {
        self.map(|v| v.floor() as i32)
    }
}

impl Dim3<i32> {
    /// Width and height as a 2D coordinate, dropping depth.
    pub fn to_vec2(self) -> Vec2i {
        Vec2i::new(self.width, self.height)
    }
}

impl<T> Index<usize> for Dim3<T> {
    type Output = T;

    fn index(&self, index: usize) -> &T {
        match index {
            0 => &self.width,
            1 => &self.height,
            2 => &self.depth,
            _ => panic!("Dim3 index {index} out of range 0..3"),
        }
    }
}

/// Premultiplied RGBA8 (r,g,b already multiplied by a).
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Rgba8Premul {
    /// Red channel premultiplied by alpha.
    pub r: u8,
    /// Green channel premultiplied by alpha.
    pub g: u8,
    /// Blue channel premultiplied by alpha.
    pub b: u8,
    /// Alpha channel.
    pub a: u8,
}

impl Rgba8Premul {
    /// Fully transparent black.
    pub fn transparent() -> Self {
        Self {
            r: 0,
            g: 0,
            b: 0,
            a: 0,
        }
    }

    /// Opaque color from straight channels.
    pub fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Convert straight-alpha RGBA8 into premultiplied RGBA8.
    pub fn from_straight_rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        fn premul(c: u8, a: u8) -> u8 {
            let c = u16::from(c);
            let a = u16::from(a);
            (((c * a) + 127) / 255) as u8
        }

        Self {
            r: premul(r, a),
            g: premul(g, a),
            b: premul(b, a),
            a,
        }
    }

    /// Channels as an `[r, g, b, a]` array.
    pub fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
