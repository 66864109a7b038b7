use crate::geometry::{GeometryResult, Point2, Polygon};
use crate::space::EventRegion;
use serde::Serialize;
use std::collections::BTreeMap;

/// One atomic cell of the partition.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PartitionCell {
    /// 1-based, in first-seen order.
    pub id: usize,
    pub label: String,
    pub area: f64,
    /// Label anchor.
    pub centroid: Point2,
    /// A point strictly inside the cell.
    pub interior_point: Point2,
    /// Events containing the cell, in registration order.
    pub members: Vec<String>,
    pub geometry: Polygon,
}

/// Numbered cells of one partition run.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Partition {
    cells: BTreeMap<usize, PartitionCell>,
}

impl Partition {
    /// Number `pieces` 1..=len in order and record which events hold each.
    pub fn register(pieces: Vec<Polygon>, events: &[EventRegion]) -> GeometryResult<Self> {
        let mut cells = BTreeMap::new();
        for (i, geometry) in pieces.into_iter().enumerate() {
            let id = i + 1;
            let interior_point = geometry.interior_point()?;
            let members = events
                .iter()
                .filter(|event| event.geometry().contains_point(interior_point))
                .map(|event| event.name().to_string())
                .collect();
            cells.insert(
                id,
                PartitionCell {
                    id,
                    label: id.to_string(),
                    area: geometry.area(),
                    centroid: geometry.centroid(),
                    interior_point,
                    members,
                    geometry,
                },
            );
        }
        Ok(Self { cells })
    }

    pub fn get(&self, id: usize) -> Option<&PartitionCell> {
        self.cells.get(&id)
    }

    /// Cells in id order.
    pub fn cells(&self) -> impl Iterator<Item = &PartitionCell> {
        self.cells.values()
    }

    pub fn ids(&self) -> impl Iterator<Item = usize> + '_ {
        self.cells.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// The cell held by exactly the named events, if any. Order of `names`
    /// does not matter.
    pub fn cell_for_members(&self, names: &[&str]) -> Option<&PartitionCell> {
        self.cells().find(|cell| {
            cell.members.len() == names.len() && names.iter().all(|name| cell.members.iter().any(|m| m == name))
        })
    }

    /// Cells whose member list includes `name`.
    pub fn cells_of<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a PartitionCell> + 'a {
        self.cells().filter(move |cell| cell.members.iter().any(|m| m == name))
    }

    pub fn total_area(&self) -> f64 {
        self.cells().map(|cell| cell.area).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::space::{EventStyle, SetsSpace};

    fn rect(x0: f64, y0: f64, x1: f64, y1: f64) -> Vec<Point2> {
        vec![[x0, y0], [x1, y0], [x1, y1], [x0, y1]]
    }

    #[test]
    fn test_ids_and_labels_follow_input_order() {
        let mut space = SetsSpace::new("registry");
        space.add_box("A", Some(rect(0.0, 0.0, 0.5, 0.5)), 0.0, EventStyle::default()).unwrap();

        let pieces = vec![Polygon::new(rect(0.0, 0.0, 0.5, 0.5)), Polygon::new(rect(0.6, 0.6, 0.9, 0.9))];
        let partition = Partition::register(pieces, space.events()).unwrap();

        assert_eq!(partition.len(), 2);
        assert_eq!(partition.ids().collect::<Vec<_>>(), vec![1, 2]);
        let first = partition.get(1).unwrap();
        assert_eq!(first.label, "1");
        assert_eq!(first.members, vec!["A".to_string()]);
        assert!((first.area - 0.25).abs() < 1e-12);
        assert!(partition.get(2).unwrap().members.is_empty());
        assert!(partition.get(3).is_none());
        assert!((partition.total_area() - 0.34).abs() < 1e-12);
    }

    #[test]
    fn test_empty_partition() {
        let partition = Partition::register(Vec::new(), &[]).unwrap();
        assert!(partition.is_empty());
        assert_eq!(partition.total_area(), 0.0);
    }

    #[test]
    fn test_serializes_as_id_map() {
        let partition = Partition::register(vec![Polygon::new(rect(0.0, 0.0, 1.0, 1.0))], &[]).unwrap();
        let json = serde_json::to_value(&partition).unwrap();
        assert_eq!(json["1"]["label"], "1");
        assert_eq!(json["1"]["geometry"]["exterior"].as_array().unwrap().len(), 4);
    }
}
