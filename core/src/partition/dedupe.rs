use crate::geometry::{GeometryResult, Polygon, SplitKernel};

/// Drop pieces equal in shape to an earlier one. The first occurrence wins,
/// so arrival order fixes the final cell order. Each piece is validated once,
/// on arrival.
pub fn dedupe<K: SplitKernel + ?Sized>(kernel: &K, pieces: Vec<Polygon>) -> GeometryResult<Vec<Polygon>> {
    let mut unique: Vec<Polygon> = Vec::with_capacity(pieces.len());
    'pieces: for piece in pieces {
        kernel.validate(&piece)?;
        for kept in &unique {
            if kernel.same_shape(kept, &piece)? {
                continue 'pieces;
            }
        }
        unique.push(piece);
    }
    Ok(unique)
}
