//! Two-dimensional texture patterns and the mappings that wrap them onto
//! three-dimensional surfaces.

use std::f64::consts::PI;
use std::sync::Arc;

use lumen_core::Canvas;
use lumen_math::{float_mod, Color, Point};

/// A point in texture space, both coordinates nominally in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UvPoint {
    pub u: f64,
    pub v: f64,
}

impl UvPoint {
    pub fn new(u: f64, v: f64) -> Self {
        Self { u, v }
    }
}

#[derive(Debug, Clone)]
pub enum UvPattern {
    /// `width` by `height` alternating squares.
    Checkers {
        width: f64,
        height: f64,
        a: Color,
        b: Color,
    },
    /// A main color with distinct corners, for checking face orientation.
    AlignCheck {
        main: Color,
        ul: Color,
        ur: Color,
        bl: Color,
        br: Color,
    },
    /// Nearest-pixel lookup into a preloaded image.
    Image(Arc<Canvas>),
}

impl UvPattern {
    pub fn checkers(width: f64, height: f64, a: Color, b: Color) -> Self {
        UvPattern::Checkers {
            width,
            height,
            a,
            b,
        }
    }

    pub fn color_at(&self, p: UvPoint) -> Color {
        match self {
            UvPattern::Checkers {
                width,
                height,
                a,
                b,
            } => {
                let u2 = (p.u * width).floor() as i64;
                let v2 = (p.v * height).floor() as i64;
                if (u2 + v2).rem_euclid(2) == 0 {
                    *a
                } else {
                    *b
                }
            }
            UvPattern::AlignCheck {
                main,
                ul,
                ur,
                bl,
                br,
            } => {
                if p.v > 0.8 {
                    if p.u < 0.2 {
                        return *ul;
                    }
                    if p.u > 0.8 {
                        return *ur;
                    }
                } else if p.v < 0.2 {
                    if p.u < 0.2 {
                        return *bl;
                    }
                    if p.u > 0.8 {
                        return *br;
                    }
                }
                *main
            }
            UvPattern::Image(canvas) => {
                // Image rows run top-down, v runs bottom-up
                let x = p.u * (canvas.width().saturating_sub(1)) as f64;
                let y = (1.0 - p.v) * (canvas.height().saturating_sub(1)) as f64;
                canvas.nearest(x, y)
            }
        }
    }
}

impl PartialEq for UvPattern {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (
                UvPattern::Checkers {
                    width: w1,
                    height: h1,
                    a: a1,
                    b: b1,
                },
                UvPattern::Checkers {
                    width: w2,
                    height: h2,
                    a: a2,
                    b: b2,
                },
            ) => w1 == w2 && h1 == h2 && a1 == a2 && b1 == b2,
            (
                UvPattern::AlignCheck {
                    main: m1,
                    ul: ul1,
                    ur: ur1,
                    bl: bl1,
                    br: br1,
                },
                UvPattern::AlignCheck {
                    main: m2,
                    ul: ul2,
                    ur: ur2,
                    bl: bl2,
                    br: br2,
                },
            ) => m1 == m2 && ul1 == ul2 && ur1 == ur2 && bl1 == bl2 && br1 == br2,
            (UvPattern::Image(a), UvPattern::Image(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

/// How a 3D point on a surface is flattened to texture space.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UvMapping {
    Spherical,
    Planar,
    Cylindrical,
}

impl UvMapping {
    pub fn map(self, p: Point) -> UvPoint {
        match self {
            UvMapping::Spherical => {
                let radius = (p.0).length();
                let phi = (p.y() / radius).acos();
                UvPoint::new(azimuth_u(p), 1.0 - phi / PI)
            }
            UvMapping::Planar => UvPoint::new(float_mod(p.x(), 1.0), float_mod(p.z(), 1.0)),
            UvMapping::Cylindrical => UvPoint::new(azimuth_u(p), float_mod(p.y(), 1.0)),
        }
    }
}

fn azimuth_u(p: Point) -> f64 {
    let theta = p.x().atan2(p.z());
    let raw_u = theta / (2.0 * PI);
    1.0 - (raw_u + 0.5)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CubeFace {
    Left,
    Front,
    Right,
    Back,
    Up,
    Down,
}

impl CubeFace {
    pub const ALL: [CubeFace; 6] = [
        CubeFace::Left,
        CubeFace::Front,
        CubeFace::Right,
        CubeFace::Back,
        CubeFace::Up,
        CubeFace::Down,
    ];

    /// Face of the `[-1, 1]` cube that `p` lies on, by its largest component.
    pub fn from_point(p: Point) -> Self {
        let coord = p.x().abs().max(p.y().abs()).max(p.z().abs());
        if coord == p.x() {
            CubeFace::Right
        } else if coord == -p.x() {
            CubeFace::Left
        } else if coord == p.y() {
            CubeFace::Up
        } else if coord == -p.y() {
            CubeFace::Down
        } else if coord == p.z() {
            CubeFace::Front
        } else {
            CubeFace::Back
        }
    }

    /// Position within this face's square.
    pub fn map(self, p: Point) -> UvPoint {
        let wrap = |x: f64| float_mod(x, 2.0) / 2.0;
        match self {
            CubeFace::Front => UvPoint::new(wrap(p.x() + 1.0), wrap(p.y() + 1.0)),
            CubeFace::Back => UvPoint::new(wrap(1.0 - p.x()), wrap(p.y() + 1.0)),
            CubeFace::Left => UvPoint::new(wrap(p.z() + 1.0), wrap(p.y() + 1.0)),
            CubeFace::Right => UvPoint::new(wrap(1.0 - p.z()), wrap(p.y() + 1.0)),
            CubeFace::Up => UvPoint::new(wrap(p.x() + 1.0), wrap(1.0 - p.z())),
            CubeFace::Down => UvPoint::new(wrap(p.x() + 1.0), wrap(p.z() + 1.0)),
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

/// Six UV patterns, one per cube face.
#[derive(Debug, Clone, PartialEq)]
pub struct CubeMap {
    faces: [UvPattern; 6],
}

impl CubeMap {
    pub fn new(
        left: UvPattern,
        front: UvPattern,
        right: UvPattern,
        back: UvPattern,
        up: UvPattern,
        down: UvPattern,
    ) -> Self {
        Self {
            faces: [left, front, right, back, up, down],
        }
    }

    pub fn face(&self, face: CubeFace) -> &UvPattern {
        &self.faces[face.index()]
    }

    pub fn color_at(&self, p: Point) -> Color {
        let face = CubeFace::from_point(p);
        self.face(face).color_at(face.map(p))
    }
}
