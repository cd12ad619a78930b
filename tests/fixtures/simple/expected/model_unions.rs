// Code generated by union-schema. DO NOT EDIT.

/// Closed sum over the `Shape` alternatives.
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    Circle(Circle),
    Square(Square),
    Triangle(Triangle),
}

pub type ShapeList = Vec<Shape>;
pub type ShapeMap = std::collections::BTreeMap<String, Shape>;

impl From<Circle> for Shape {
    fn from(value: Circle) -> Self {
        Shape::Circle(value)
    }
}

impl From<Square> for Shape {
    fn from(value: Square) -> Self {
        Shape::Square(value)
    }
}

impl From<Triangle> for Shape {
    fn from(value: Triangle) -> Self {
        Shape::Triangle(value)
    }
}

/// Discriminant tags of `Shape`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShapeKind {
    Circle,
    Square,
    Triangle,
}

impl ShapeKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ShapeKind::Circle => "circle",
            ShapeKind::Square => "square",
            ShapeKind::Triangle => "triangle",
        }
    }

    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "circle" => Some(ShapeKind::Circle),
            "square" => Some(ShapeKind::Square),
            "triangle" => Some(ShapeKind::Triangle),
            _ => None,
        }
    }
}

impl Shape {
    pub fn r#type(&self) -> ShapeKind {
        match self {
            Shape::Circle(_) => ShapeKind::Circle,
            Shape::Square(_) => ShapeKind::Square,
            Shape::Triangle(_) => ShapeKind::Triangle,
        }
    }
}

/// Closed sum over the `Fill` alternatives.
#[derive(Debug, Clone, PartialEq)]
pub enum Fill {
    SolidFill(SolidFill),
    GradientFill(GradientFill),
}

pub type FillList = Vec<Fill>;
pub type FillMap = std::collections::BTreeMap<String, Fill>;

impl From<SolidFill> for Fill {
    fn from(value: SolidFill) -> Self {
        Fill::SolidFill(value)
    }
}

impl From<GradientFill> for Fill {
    fn from(value: GradientFill) -> Self {
        Fill::GradientFill(value)
    }
}
