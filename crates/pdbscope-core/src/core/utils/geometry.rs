use nalgebra::{Point3, Vector3};
use serde::Serialize;

/// An axis-aligned box enclosing a set of points.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BoundingBox {
    pub min: [f64; 3],
    pub max: [f64; 3],
}

impl BoundingBox {
    pub fn min_point(&self) -> Point3<f64> {
        Point3::from(self.min)
    }

    pub fn max_point(&self) -> Point3<f64> {
        Point3::from(self.max)
    }

    pub fn extent(&self) -> Vector3<f64> {
        self.max_point() - self.min_point()
    }

    pub fn center(&self) -> Point3<f64> {
        nalgebra::center(&self.min_point(), &self.max_point())
    }
}

pub fn calculate_centroid<'a>(points: impl IntoIterator<Item = &'a Point3<f64>>) -> Option<Point3<f64>> {
    let (sum, count) = points
        .into_iter()
        .fold((Vector3::zeros(), 0usize), |(sum, count), p| {
            (sum + p.coords, count + 1)
        });
    if count == 0 {
        None
    } else {
        Some(Point3::from(sum / count as f64))
    }
}

pub fn calculate_bounding_box<'a>(
    points: impl IntoIterator<Item = &'a Point3<f64>>,
) -> Option<BoundingBox> {
    let mut points = points.into_iter();
    let first = points.next()?;
    let (min, max) = points.fold((*first, *first), |(min, max), p| (min.inf(p), max.sup(p)));
    Some(BoundingBox {
        min: min.coords.into(),
        max: max.coords.into(),
    })
}
