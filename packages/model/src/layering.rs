//! Z-order and face filtering shared by the editor and every renderer.

use crate::canvas::Face;
use crate::element::DesignElement;

/// Elements shown on `face`, in collection order
pub fn visible_on(elements: &[DesignElement], face: Face) -> impl Iterator<Item = &DesignElement> {
    elements.iter().filter(move |e| e.visible_on(face))
}

/// Paint order: ascending `z_index`, ties keep collection order
pub fn paint_order<'a, I>(elements: I) -> Vec<&'a DesignElement>
where
    I: IntoIterator<Item = &'a DesignElement>,
{
    let mut ordered: Vec<&DesignElement> = elements.into_iter().collect();
    // sort_by_key is stable
    ordered.sort_by_key(|e| e.z_index);
    ordered
}

/// Highest z-index across the whole collection (both faces)
pub fn max_z_index(elements: &[DesignElement]) -> Option<i64> {
    elements.iter().map(|e| e.z_index).max()
}

/// Lowest z-index across the whole collection (both faces)
pub fn min_z_index(elements: &[DesignElement]) -> Option<i64> {
    elements.iter().map(|e| e.z_index).min()
}
