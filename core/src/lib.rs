pub mod config;
pub mod error;
pub mod geometry;
pub mod partition;
pub mod scene;
pub mod shapes;
pub mod space;

pub use config::SpaceConfig;
pub use error::{SetsError, SetsResult};
pub use partition::{Partition, PartitionCell};
pub use scene::SceneSpec;
pub use shapes::EventShape;
pub use space::{EventRegion, EventStyle, SetsSpace, TextAnnotation};
