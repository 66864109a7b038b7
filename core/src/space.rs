//! The sets space: named event regions, text annotations and the current
//! partition.

use crate::config::SpaceConfig;
use crate::error::{SetsError, SetsResult};
use crate::geometry::{Aabb2, PlanarSplitKernel, Point2, Polygon, SplitKernel};
use crate::partition::{self, Partition};
use crate::shapes::EventShape;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::{debug, warn};

/// Diagram domain. Events are expected, not required, to stay inside it.
pub const UNIVERSE: Aabb2 = Aabb2::new([0.0, 0.0], [1.0, 1.0]);

/// Drawing metadata carried alongside an event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EventStyle {
    pub fill_color: String,
    pub alpha: f64,
    pub text: String,
    pub fontsize: f64,
    pub fontcolor: String,
    /// Label anchor. When absent, the centroid of the built geometry, taken
    /// after any rotation.
    pub text_loc: Option<Point2>,
}

impl Default for EventStyle {
    fn default() -> Self {
        Self {
            fill_color: "#1f77b4".to_string(),
            alpha: 0.5,
            text: String::new(),
            fontsize: 10.0,
            fontcolor: "black".to_string(),
            text_loc: None,
        }
    }
}

/// A registered event.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EventRegion {
    name: String,
    geometry: Polygon,
    area: f64,
    style: EventStyle,
    label_position: Point2,
}

impl EventRegion {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn geometry(&self) -> &Polygon {
        &self.geometry
    }

    /// Declared area. For ellipses this is the exact ellipse area, not the
    /// area of the polygon approximation.
    pub fn area(&self) -> f64 {
        self.area
    }

    pub fn style(&self) -> &EventStyle {
        &self.style
    }

    pub fn label_position(&self) -> Point2 {
        self.label_position
    }
}

/// Free text placed on the diagram.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextAnnotation {
    pub loc: Point2,
    pub text: String,
    #[serde(default = "default_fontsize")]
    pub fontsize: f64,
    #[serde(default = "default_fontcolor")]
    pub fontcolor: String,
}

fn default_fontsize() -> f64 {
    10.0
}

fn default_fontcolor() -> String {
    "black".to_string()
}

/// Owns the events of one diagram and their partition.
#[derive(Debug, Clone)]
pub struct SetsSpace {
    name: String,
    config: SpaceConfig,
    events: Vec<EventRegion>,
    index: HashMap<String, usize>,
    texts: Vec<(String, TextAnnotation)>,
    partition: Option<Partition>,
}

impl SetsSpace {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            config: SpaceConfig::default(),
            events: Vec::new(),
            index: HashMap::new(),
            texts: Vec::new(),
            partition: None,
        }
    }

    /// A space with custom tunables. Fails when `config` does not validate.
    pub fn with_config(name: impl Into<String>, config: SpaceConfig) -> SetsResult<Self> {
        config.validate()?;
        Ok(Self {
            config,
            ..Self::new(name)
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn config(&self) -> &SpaceConfig {
        &self.config
    }

    /// Register an event. Fails on a duplicate name without touching the
    /// existing registration. Any current partition is discarded.
    pub fn add_event(&mut self, name: &str, shape: &EventShape, style: EventStyle) -> SetsResult<&EventRegion> {
        if self.index.contains_key(name) {
            return Err(SetsError::NameConflict(name.to_string()));
        }

        let built = shape.build(&self.config)?;
        let bounds = built.geometry.bounds();
        if !UNIVERSE.contains_box(&bounds, self.config.tolerance) {
            warn!(event = name, ?bounds, "event extends outside the unit square");
        }

        let label_position = style.text_loc.unwrap_or_else(|| built.geometry.centroid());
        let idx = self.events.len();
        self.events.push(EventRegion {
            name: name.to_string(),
            geometry: built.geometry,
            area: built.area,
            style,
            label_position,
        });
        self.index.insert(name.to_string(), idx);
        self.partition = None;

        debug!(event = name, area = built.area, "registered event");
        Ok(&self.events[idx])
    }

    #[allow(clippy::too_many_arguments)]
    pub fn add_ellipse(
        &mut self,
        name: &str,
        loc: Point2,
        width: f64,
        height: f64,
        angle: f64,
        resolution: usize,
        style: EventStyle,
    ) -> SetsResult<&EventRegion> {
        let shape = EventShape::Ellipse {
            loc,
            width,
            height,
            angle,
            resolution,
        };
        self.add_event(name, &shape, style)
    }

    pub fn add_polygon(
        &mut self,
        name: &str,
        points: Option<Vec<Point2>>,
        angle: f64,
        style: EventStyle,
    ) -> SetsResult<&EventRegion> {
        self.add_event(name, &EventShape::Polygon { points, angle }, style)
    }

    pub fn add_box(
        &mut self,
        name: &str,
        corners: Option<Vec<Point2>>,
        angle: f64,
        style: EventStyle,
    ) -> SetsResult<&EventRegion> {
        self.add_event(name, &EventShape::Box { corners, angle }, style)
    }

    /// Place a text annotation, replacing one with the same name.
    pub fn add_text(&mut self, name: &str, annotation: TextAnnotation) -> Option<TextAnnotation> {
        match self.texts.iter_mut().find(|(existing, _)| existing == name) {
            Some((_, slot)) => Some(std::mem::replace(slot, annotation)),
            None => {
                self.texts.push((name.to_string(), annotation));
                None
            }
        }
    }

    pub fn texts(&self) -> impl Iterator<Item = (&str, &TextAnnotation)> {
        self.texts.iter().map(|(name, text)| (name.as_str(), text))
    }

    pub fn event(&self, name: &str) -> Option<&EventRegion> {
        self.index.get(name).map(|&idx| &self.events[idx])
    }

    pub fn event_area(&self, name: &str) -> SetsResult<f64> {
        self.event(name)
            .map(EventRegion::area)
            .ok_or_else(|| SetsError::UnknownEvent(name.to_string()))
    }

    /// Events in registration order.
    pub fn events(&self) -> &[EventRegion] {
        &self.events
    }

    /// Compute the partition with the default kernel at the configured tolerance.
    pub fn partition(&mut self) -> SetsResult<&Partition> {
        let kernel = PlanarSplitKernel::new(self.config.tolerance);
        self.partition_with(&kernel)
    }

    /// Compute the partition with `kernel`, replacing any previous one.
    ///
    /// Nothing is published when the kernel fails.
    pub fn partition_with<K: SplitKernel + ?Sized>(&mut self, kernel: &K) -> SetsResult<&Partition> {
        let regions: Vec<&Polygon> = self.events.iter().map(EventRegion::geometry).collect();
        let pieces = partition::refine(&regions, kernel)?;
        let computed = Partition::register(pieces, &self.events)?;
        Ok(self.partition.insert(computed))
    }

    /// The partition computed since the events last changed.
    pub fn partitions(&self) -> SetsResult<&Partition> {
        self.partition.as_ref().ok_or(SetsError::NotPartitioned)
    }
}
