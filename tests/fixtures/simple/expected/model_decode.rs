// Code generated by union-schema. DO NOT EDIT.

/// Errors produced when decoding union values from JSON.
#[derive(Debug)]
pub enum UnionDecodeError {
    InvalidDiscriminant { union: &'static str, value: String },
    NoVariantMatched { union: &'static str },
    Json(serde_json::Error),
}

impl std::fmt::Display for UnionDecodeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UnionDecodeError::InvalidDiscriminant { union, value } => {
                write!(f, "invalid {} discriminant value: {:?}", union, value)
            }
            UnionDecodeError::NoVariantMatched { union } => {
                write!(f, "no {} variant matched the payload", union)
            }
            UnionDecodeError::Json(err) => write!(f, "{}", err),
        }
    }
}

impl std::error::Error for UnionDecodeError {}

impl From<serde_json::Error> for UnionDecodeError {
    fn from(err: serde_json::Error) -> Self {
        UnionDecodeError::Json(err)
    }
}

impl Shape {
    pub fn from_value(value: &serde_json::Value) -> Result<Self, UnionDecodeError> {
        let tag = value.get("type").and_then(serde_json::Value::as_str).unwrap_or_default();
        match ShapeKind::from_tag(tag) {
            Some(ShapeKind::Circle) => Ok(Shape::Circle(serde_json::from_value(value.clone())?)),
            Some(ShapeKind::Square) => Ok(Shape::Square(serde_json::from_value(value.clone())?)),
            Some(ShapeKind::Triangle) => Ok(Shape::Triangle(serde_json::from_value(value.clone())?)),
            None => Err(UnionDecodeError::InvalidDiscriminant {
                union: "Shape",
                value: tag.to_string(),
            }),
        }
    }

    pub fn to_value(&self) -> Result<serde_json::Value, UnionDecodeError> {
        let (mut value, kind) = match self {
            Shape::Circle(inner) => (serde_json::to_value(inner)?, ShapeKind::Circle),
            Shape::Square(inner) => (serde_json::to_value(inner)?, ShapeKind::Square),
            Shape::Triangle(inner) => (serde_json::to_value(inner)?, ShapeKind::Triangle),
        };
        if let Some(object) = value.as_object_mut() {
            object.insert(
                "type".to_string(),
                serde_json::Value::String(kind.as_str().to_string()),
            );
        }
        Ok(value)
    }
}

impl serde::Serialize for Shape {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let value = self.to_value().map_err(serde::ser::Error::custom)?;
        serde::Serialize::serialize(&value, serializer)
    }
}

impl Fill {
    pub fn from_value(value: &serde_json::Value) -> Result<Self, UnionDecodeError> {
        if let Ok(inner) = serde_json::from_value::<SolidFill>(value.clone()) {
            return Ok(Fill::SolidFill(inner));
        }
        if let Ok(inner) = serde_json::from_value::<GradientFill>(value.clone()) {
            return Ok(Fill::GradientFill(inner));
        }
        Err(UnionDecodeError::NoVariantMatched { union: "Fill" })
    }

    pub fn to_value(&self) -> Result<serde_json::Value, UnionDecodeError> {
        match self {
            Fill::SolidFill(inner) => Ok(serde_json::to_value(inner)?),
            Fill::GradientFill(inner) => Ok(serde_json::to_value(inner)?),
        }
    }
}

impl serde::Serialize for Fill {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        match self {
            Fill::SolidFill(inner) => serde::Serialize::serialize(inner, serializer),
            Fill::GradientFill(inner) => serde::Serialize::serialize(inner, serializer),
        }
    }
}

impl<'de> serde::Deserialize<'de> for Canvas {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let mut raw: serde_json::Map<String, serde_json::Value> =
            serde::Deserialize::deserialize(deserializer)?;
        let raw_background = raw.remove("background");
        let raw_layers = raw.remove("layers");
        let raw_named = raw.remove("named");
        let background = match raw_background {
            Some(value) => Fill::from_value(&value).map_err(|err| {
                serde::de::Error::custom(format!("field background in Canvas: {}", err))
            })?,
            None => {
                return Err(serde::de::Error::custom("field background in Canvas: required"));
            }
        };
        let layers = match raw_layers {
            None | Some(serde_json::Value::Null) => None,
            Some(value) => {
                let outer = value.as_array().ok_or_else(|| {
                    serde::de::Error::custom("field layers in Canvas: expected array")
                })?;
                let mut decoded = Vec::with_capacity(outer.len());
                for (outer_index, row) in outer.iter().enumerate() {
                    let items = row.as_array().ok_or_else(|| {
                        serde::de::Error::custom(format!(
                            "field layers in Canvas: element {}: expected array",
                            outer_index
                        ))
                    })?;
                    let mut inner = ShapeList::with_capacity(items.len());
                    for (inner_index, item) in items.iter().enumerate() {
                        let element = Shape::from_value(item).map_err(|err| {
                            serde::de::Error::custom(format!(
                                "field layers in Canvas: element {}.{}: {}",
                                outer_index, inner_index, err
                            ))
                        })?;
                        inner.push(element);
                    }
                    decoded.push(inner);
                }
                Some(decoded)
            }
        };
        let named = match raw_named {
            None | Some(serde_json::Value::Null) => None,
            Some(value) => {
                let entries = value.as_object().ok_or_else(|| {
                    serde::de::Error::custom("field named in Canvas: expected object")
                })?;
                let mut decoded = ShapeMap::new();
                for (key, item) in entries {
                    let element = Shape::from_value(item).map_err(|err| {
                        serde::de::Error::custom(format!(
                            "field named in Canvas: key {:?}: {}",
                            key, err
                        ))
                    })?;
                    decoded.insert(key.clone(), element);
                }
                Some(decoded)
            }
        };
        Ok(Canvas { background, layers, named })
    }
}

impl<'de> serde::Deserialize<'de> for Scene {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let mut raw: serde_json::Map<String, serde_json::Value> =
            serde::Deserialize::deserialize(deserializer)?;
        let raw_shapes = raw.remove("shapes");
        #[derive(serde::Deserialize)]
        struct Plain {
            pub config: Option<SceneConfig>,
        }
        let plain: Plain = serde_json::from_value(serde_json::Value::Object(raw))
            .map_err(serde::de::Error::custom)?;
        let shapes = match raw_shapes {
            Some(value) => {
                let items = value.as_array().ok_or_else(|| {
                    serde::de::Error::custom("field shapes in Scene: expected array")
                })?;
                let mut decoded = ShapeList::with_capacity(items.len());
                for (index, item) in items.iter().enumerate() {
                    let element = Shape::from_value(item).map_err(|err| {
                        serde::de::Error::custom(format!(
                            "field shapes in Scene: element {}: {}",
                            index, err
                        ))
                    })?;
                    decoded.push(element);
                }
                decoded
            }
            None => {
                return Err(serde::de::Error::custom("field shapes in Scene: required"));
            }
        };
        Ok(Scene { config: plain.config, shapes })
    }
}

impl<'de> serde::Deserialize<'de> for SceneConfig {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let mut raw: serde_json::Map<String, serde_json::Value> =
            serde::Deserialize::deserialize(deserializer)?;
        let raw_shape = raw.remove("shape");
        let shape = match raw_shape {
            Some(value) => Shape::from_value(&value).map_err(|err| {
                serde::de::Error::custom(format!("field shape in SceneConfig: {}", err))
            })?,
            None => {
                return Err(serde::de::Error::custom("field shape in SceneConfig: required"));
            }
        };
        Ok(SceneConfig { shape })
    }
}
