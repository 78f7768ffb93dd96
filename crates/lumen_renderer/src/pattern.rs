//! Procedural and texture-mapped surface colors.
//!
//! A pattern is evaluated in its own space: the world point is first taken
//! into the shape's object space through every ancestor transform, then
//! through the pattern's inverse transform. Two-color patterns hold full
//! sub-patterns, each applying its own inverse transform on top of that.

use lumen_math::{float_mod, Color, Point, Transform};

use crate::uv::{CubeMap, UvMapping, UvPattern};
use crate::{ShapeId, Shapes};

/// Half width of the lines drawn by the grid patterns.
const GRID_LINE_HALFWIDTH: f64 = 0.035;

#[derive(Debug, Clone, PartialEq)]
pub enum PatternKind {
    Solid(Color),
    Stripe(Box<Pattern>, Box<Pattern>),
    Gradient(Box<Pattern>, Box<Pattern>),
    Ring(Box<Pattern>, Box<Pattern>),
    Checker(Box<Pattern>, Box<Pattern>),
    /// Sum of both sub-patterns.
    Blended(Box<Pattern>, Box<Pattern>),
    /// Grid lines on the world xz plane.
    XzGrid,
    YzGrid,
    XyGrid,
    TextureMap(UvPattern, UvMapping),
    CubeMap(Box<CubeMap>),
    /// Returns the pattern-space point as a color.
    Test,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Pattern {
    kind: PatternKind,
    transform: Transform,
}

impl From<Color> for Pattern {
    fn from(color: Color) -> Self {
        Pattern::solid(color)
    }
}

impl Pattern {
    pub fn new(kind: PatternKind) -> Self {
        Self {
            kind,
            transform: Transform::IDENTITY,
        }
    }

    pub fn solid(color: Color) -> Self {
        Self::new(PatternKind::Solid(color))
    }

    pub fn stripe(a: impl Into<Pattern>, b: impl Into<Pattern>) -> Self {
        Self::new(PatternKind::Stripe(Box::new(a.into()), Box::new(b.into())))
    }

    pub fn gradient(a: impl Into<Pattern>, b: impl Into<Pattern>) -> Self {
        Self::new(PatternKind::Gradient(Box::new(a.into()), Box::new(b.into())))
    }

    pub fn ring(a: impl Into<Pattern>, b: impl Into<Pattern>) -> Self {
        Self::new(PatternKind::Ring(Box::new(a.into()), Box::new(b.into())))
    }

    pub fn checker(a: impl Into<Pattern>, b: impl Into<Pattern>) -> Self {
        Self::new(PatternKind::Checker(Box::new(a.into()), Box::new(b.into())))
    }

    pub fn blended(a: impl Into<Pattern>, b: impl Into<Pattern>) -> Self {
        Self::new(PatternKind::Blended(Box::new(a.into()), Box::new(b.into())))
    }

    pub fn texture_map(uv: UvPattern, mapping: UvMapping) -> Self {
        Self::new(PatternKind::TextureMap(uv, mapping))
    }

    pub fn cube_map(map: CubeMap) -> Self {
        Self::new(PatternKind::CubeMap(Box::new(map)))
    }

    pub fn test() -> Self {
        Self::new(PatternKind::Test)
    }

    pub fn with_transform(mut self, transform: Transform) -> Self {
        self.transform = transform;
        self
    }

    pub fn set_transform(&mut self, transform: Transform) {
        self.transform = transform;
    }

    pub fn transform(&self) -> &Transform {
        &self.transform
    }

    pub fn kind(&self) -> &PatternKind {
        &self.kind
    }

    /// Color at a world-space point on `object`.
    pub fn pattern_at_shape(&self, shapes: &Shapes, object: ShapeId, world_point: Point) -> Color {
        let object_point = shapes.world_to_object(object, world_point);
        let pattern_point = self.transform.inverse_point(object_point);
        self.eval(pattern_point, world_point)
    }

    /// Color at a point already in this pattern's space.
    ///
    /// Grid patterns treat the point as world space.
    pub fn pattern_at(&self, point: Point) -> Color {
        self.eval(point, point)
    }

    fn eval(&self, pp: Point, world: Point) -> Color {
        match &self.kind {
            PatternKind::Solid(c) => *c,
            PatternKind::Stripe(a, b) => {
                if float_mod(pp.x().floor(), 2.0) == 0.0 {
                    a.eval_nested(pp, world)
                } else {
                    b.eval_nested(pp, world)
                }
            }
            PatternKind::Gradient(a, b) => {
                let ca = a.eval_nested(pp, world);
                let cb = b.eval_nested(pp, world);
                ca + (cb - ca) * (pp.x() - pp.x().floor())
            }
            PatternKind::Ring(a, b) => {
                let distance = (pp.x() * pp.x() + pp.z() * pp.z()).sqrt();
                if float_mod(distance.floor(), 2.0) == 0.0 {
                    a.eval_nested(pp, world)
                } else {
                    b.eval_nested(pp, world)
                }
            }
            PatternKind::Checker(a, b) => {
                let sum = pp.x().floor() + pp.y().floor() + pp.z().floor();
                if float_mod(sum, 2.0) == 0.0 {
                    a.eval_nested(pp, world)
                } else {
                    b.eval_nested(pp, world)
                }
            }
            PatternKind::Blended(a, b) => a.eval_nested(pp, world) + b.eval_nested(pp, world),
            PatternKind::XzGrid => grid(world.x(), world.z()),
            PatternKind::YzGrid => grid(world.y(), world.z()),
            PatternKind::XyGrid => grid(world.x(), world.y()),
            PatternKind::TextureMap(uv, mapping) => uv.color_at(mapping.map(pp)),
            PatternKind::CubeMap(map) => map.color_at(pp),
            PatternKind::Test => Color::new(pp.x(), pp.y(), pp.z()),
        }
    }

    fn eval_nested(&self, parent_point: Point, world: Point) -> Color {
        self.eval(self.transform.inverse_point(parent_point), world)
    }
}

fn on_grid_line(v: f64) -> bool {
    v <= v.floor() + GRID_LINE_HALFWIDTH || v >= v.ceil() - GRID_LINE_HALFWIDTH
}

fn grid(a: f64, b: f64) -> Color {
    if on_grid_line(a) || on_grid_line(b) {
        Color::ZERO
    } else {
        Color::ONE
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Shape;

    const BLACK: Color = Color::ZERO;
    const WHITE: Color = Color::ONE;

    fn stripes() -> Pattern {
        Pattern::stripe(WHITE, BLACK)
    }

    #[test]
    fn test_stripe_constant_in_y_and_z() {
        let p = stripes();
        for point in [
            Point::new(0.0, 0.0, 0.0),
            Point::new(0.0, 1.0, 0.0),
            Point::new(0.0, 2.0, 0.0),
            Point::new(0.0, 0.0, 1.0),
            Point::new(0.0, 0.0, 2.0),
        ] {
            assert_eq!(p.pattern_at(point), WHITE);
        }
    }

    #[test]
    fn test_stripe_alternates_in_x() {
        let p = stripes();
        let cases = [
            (0.0, WHITE),
            (0.9, WHITE),
            (1.0, BLACK),
            (-0.1, BLACK),
            (-1.0, BLACK),
            (-1.1, WHITE),
        ];
        for (x, expected) in cases {
            assert_eq!(p.pattern_at(Point::new(x, 0.0, 0.0)), expected, "x = {x}");
        }
    }

    #[test]
    fn test_stripe_with_object_transform() {
        let mut shapes = Shapes::new();
        let s = shapes.add(Shape::sphere().with_transform(Transform::scaling(2.0, 2.0, 2.0).unwrap()));
        let c = stripes().pattern_at_shape(&shapes, s, Point::new(1.5, 0.0, 0.0));
        assert_eq!(c, WHITE);
    }

    #[test]
    fn test_stripe_with_pattern_transform() {
        let mut shapes = Shapes::new();
        let s = shapes.add(Shape::sphere());
        let p = stripes().with_transform(Transform::scaling(2.0, 2.0, 2.0).unwrap());
        assert_eq!(p.pattern_at_shape(&shapes, s, Point::new(1.5, 0.0, 0.0)), WHITE);
    }

    #[test]
    fn test_stripe_with_both_transforms() {
        let mut shapes = Shapes::new();
        let s = shapes.add(Shape::sphere().with_transform(Transform::scaling(2.0, 2.0, 2.0).unwrap()));
        let p = stripes().with_transform(Transform::translation(0.5, 0.0, 0.0));
        assert_eq!(p.pattern_at_shape(&shapes, s, Point::new(2.5, 0.0, 0.0)), WHITE);
    }

    #[test]
    fn test_pattern_spaces_with_test_pattern() {
        let mut shapes = Shapes::new();
        let scaled = shapes.add(Shape::sphere().with_transform(Transform::scaling(2.0, 2.0, 2.0).unwrap()));
        let plain = shapes.add(Shape::sphere());

        let c = Pattern::test().pattern_at_shape(&shapes, scaled, Point::new(2.0, 3.0, 4.0));
        assert_eq!(c, Color::new(1.0, 1.5, 2.0));

        let p = Pattern::test().with_transform(Transform::scaling(2.0, 2.0, 2.0).unwrap());
        assert_eq!(p.pattern_at_shape(&shapes, plain, Point::new(2.0, 3.0, 4.0)), Color::new(1.0, 1.5, 2.0));

        let p = Pattern::test().with_transform(Transform::translation(0.5, 1.0, 1.5));
        let c = p.pattern_at_shape(&shapes, scaled, Point::new(2.5, 3.0, 3.5));
        assert_eq!(c, Color::new(0.75, 0.5, 0.25));
    }

    #[test]
    fn test_pattern_on_grouped_shape() {
        let mut shapes = Shapes::new();
        let g = shapes.add(Shape::group().with_transform(Transform::scaling(2.0, 2.0, 2.0).unwrap()));
        let s = shapes.add(Shape::sphere().with_transform(Transform::translation(5.0, 0.0, 0.0)));
        shapes.add_child(g, s).unwrap();
        let c = Pattern::test().pattern_at_shape(&shapes, s, Point::new(12.0, 2.0, 4.0));
        assert_eq!(c, Color::new(1.0, 1.0, 2.0));
    }

    #[test]
    fn test_gradient_interpolates() {
        let p = Pattern::gradient(WHITE, BLACK);
        let cases = [
            (0.0, 1.0),
            (0.25, 0.75),
            (0.5, 0.5),
            (0.75, 0.25),
        ];
        for (x, v) in cases {
            assert_eq!(p.pattern_at(Point::new(x, 0.0, 0.0)), Color::splat(v));
        }
    }

    #[test]
    fn test_ring_extends_in_x_and_z() {
        let p = Pattern::ring(WHITE, BLACK);
        assert_eq!(p.pattern_at(Point::ORIGIN), WHITE);
        assert_eq!(p.pattern_at(Point::new(1.0, 0.0, 0.0)), BLACK);
        assert_eq!(p.pattern_at(Point::new(0.0, 0.0, 1.0)), BLACK);
        assert_eq!(p.pattern_at(Point::new(0.708, 0.0, 0.708)), BLACK);
    }

    #[test]
    fn test_checker_repeats_in_each_axis() {
        let p = Pattern::checker(WHITE, BLACK);
        assert_eq!(p.pattern_at(Point::ORIGIN), WHITE);
        assert_eq!(p.pattern_at(Point::new(0.99, 0.0, 0.0)), WHITE);
        assert_eq!(p.pattern_at(Point::new(1.01, 0.0, 0.0)), BLACK);
        assert_eq!(p.pattern_at(Point::new(0.0, 0.99, 0.0)), WHITE);
        assert_eq!(p.pattern_at(Point::new(0.0, 1.01, 0.0)), BLACK);
        assert_eq!(p.pattern_at(Point::new(0.0, 0.0, 0.99)), WHITE);
        assert_eq!(p.pattern_at(Point::new(0.0, 0.0, 1.01)), BLACK);
    }

    #[test]
    fn test_blended_adds_colors() {
        let p = Pattern::blended(Color::new(0.2, 0.0, 0.0), Color::new(0.0, 0.3, 0.0));
        assert_eq!(p.pattern_at(Point::new(4.0, 5.0, 6.0)), Color::new(0.2, 0.3, 0.0));
    }

    #[test]
    fn test_nested_pattern_uses_own_transform() {
        // Outer stripes at x in [0, 1) use inner stripes scaled down 4x
        let inner = Pattern::stripe(Color::new(1.0, 0.0, 0.0), Color::new(0.0, 0.0, 1.0))
            .with_transform(Transform::scaling(0.25, 1.0, 1.0).unwrap());
        let p = Pattern::stripe(inner, BLACK);
        assert_eq!(p.pattern_at(Point::new(0.1, 0.0, 0.0)), Color::new(1.0, 0.0, 0.0));
        assert_eq!(p.pattern_at(Point::new(0.3, 0.0, 0.0)), Color::new(0.0, 0.0, 1.0));
        assert_eq!(p.pattern_at(Point::new(1.3, 0.0, 0.0)), BLACK);
    }

    #[test]
    fn test_xz_grid_lines() {
        let p = Pattern::new(PatternKind::XzGrid);
        assert_eq!(p.pattern_at(Point::new(0.5, 0.0, 0.5)), WHITE);
        assert_eq!(p.pattern_at(Point::new(1.01, 0.0, 0.5)), BLACK);
        assert_eq!(p.pattern_at(Point::new(0.5, 7.0, 2.99)), BLACK);
        // y is ignored by the xz grid
        assert_eq!(p.pattern_at(Point::new(0.5, 3.0, 0.5)), WHITE);
    }

    #[test]
    fn test_grid_uses_world_point() {
        let mut shapes = Shapes::new();
        let s = shapes.add(Shape::plane().with_transform(Transform::scaling(10.0, 1.0, 10.0).unwrap()));
        let p = Pattern::new(PatternKind::XzGrid);
        assert_eq!(p.pattern_at_shape(&shapes, s, Point::new(0.5, 0.0, 0.5)), WHITE);
        // object-space x is 0.2, away from any line; world x = 2 is on one
        assert_eq!(p.pattern_at_shape(&shapes, s, Point::new(2.0, 0.0, 0.5)), BLACK);
    }

    #[test]
    fn test_texture_map_pattern() {
        let uv = UvPattern::checkers(16.0, 8.0, BLACK, WHITE);
        let p = Pattern::texture_map(uv, UvMapping::Spherical);
        let cases = [
            (Point::new(0.4315, 0.4670, 0.7719), WHITE),
            (Point::new(-0.9654, 0.2552, -0.0534), BLACK),
            (Point::new(0.1039, 0.7090, 0.6975), WHITE),
            (Point::new(-0.4986, -0.7856, -0.3663), BLACK),
            (Point::new(-0.0317, -0.9395, 0.3411), BLACK),
            (Point::new(0.4809, -0.7721, 0.4154), BLACK),
            (Point::new(0.0285, -0.9612, -0.2745), BLACK),
            (Point::new(-0.5734, -0.2162, -0.7903), WHITE),
            (Point::new(0.7688, -0.1470, 0.6223), BLACK),
            (Point::new(-0.7652, 0.2175, 0.6060), BLACK),
        ];
        for (point, expected) in cases {
            assert_eq!(p.pattern_at(point), expected, "at {:?}", point);
        }
    }
}
