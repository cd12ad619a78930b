// Code generated by union-schema. DO NOT EDIT.

// Hand-written base model for the scene schema.

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Circle {
    #[serde(rename = "type")]
    pub type_: String,
    pub radius: f64,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Square {
    #[serde(rename = "type")]
    pub type_: String,
    pub side: f64,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Triangle {
    #[serde(rename = "type")]
    pub type_: String,
    pub base: f64,
    pub height: f64,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SolidFill {
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct GradientFill {
    pub stops: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct Canvas {
    pub background: Fill,
    pub layers: Option<Vec<ShapeList>>,
    pub named: Option<ShapeMap>,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct Scene {
    pub config: Option<SceneConfig>,
    pub shapes: ShapeList,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct SceneConfig {
    pub shape: Shape,
}

