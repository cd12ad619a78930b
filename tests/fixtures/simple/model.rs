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

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Canvas {
    pub background: Fill,
    pub layers: Option<Vec<Vec<Shape>>>,
    pub named: Option<std::collections::HashMap<String, Shape>>,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Scene {
    pub config: Option<SceneConfig>,
    pub shapes: Option<Vec<Shape>>,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SceneConfig {
    pub shape: Shape,
}

pub type Shape = serde_json::Value;
pub type Fill = serde_json::Value;
