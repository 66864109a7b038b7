//! Declarative scene descriptions.
//!
//! A scene names a space, optionally tunes its [`SpaceConfig`], and lists the
//! events and text annotations to add, in order.

use crate::config::SpaceConfig;
use crate::error::{SetsError, SetsResult};
use crate::shapes::EventShape;
use crate::space::{EventStyle, SetsSpace, TextAnnotation};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneSpec {
    pub name: String,
    #[serde(default)]
    pub config: SpaceConfig,
    #[serde(default)]
    pub events: Vec<EventSpec>,
    #[serde(default)]
    pub texts: Vec<TextSpec>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventSpec {
    pub name: String,
    pub shape: EventShape,
    #[serde(default)]
    pub style: EventStyle,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextSpec {
    pub name: String,
    #[serde(flatten)]
    pub annotation: TextAnnotation,
}

impl SceneSpec {
    pub fn from_json(json: &str) -> SetsResult<Self> {
        serde_json::from_str(json).map_err(|e| SetsError::Validation(format!("scene: {}", e)))
    }

    /// Build a space holding every event and text of the scene. Stops at the
    /// first event that fails to register.
    pub fn build(&self) -> SetsResult<SetsSpace> {
        let mut space = SetsSpace::with_config(self.name.clone(), self.config)?;
        for event in &self.events {
            space.add_event(&event.name, &event.shape, event.style.clone())?;
        }
        for text in &self.texts {
            space.add_text(&text.name, text.annotation.clone());
        }
        Ok(space)
    }
}
