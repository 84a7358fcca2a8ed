//! Canvas operations: z-order, duplication, bulk append and hit testing.

use labelkit_core::constants::{
    DUPLICATE_OFFSET, ENDPOINT_HIT_DISTANCE, RESIZE_HANDLE_SIZE, ROTATE_HANDLE_OFFSET,
    ROTATE_HANDLE_SIZE,
};

use super::{clamp_into, generate_id, Canvas, HitTarget, ZOrder};
use crate::model::{rotate_point, Element, Endpoint, Handle, Point};

/// Extra reach around the drawn handle squares.
const HANDLE_HIT_SLOP: f64 = 2.0;

impl Canvas {
    /// Swaps an element with its neighbour in z-order.
    ///
    /// Z-indices are first renumbered to `0..n` so that the swap is always
    /// between adjacent, distinct values. Moving the topmost element forward
    /// or the bottommost backward changes nothing.
    pub fn reorder(&mut self, id: &str, direction: ZOrder) {
        let Some(index) = self.elements.iter().position(|e| e.id == id) else {
            tracing::debug!("Ignoring reorder of unknown element {}", id);
            return;
        };
        let neighbour = match direction {
            ZOrder::Forward if index + 1 < self.elements.len() => index + 1,
            ZOrder::Backward if index > 0 => index - 1,
            _ => return,
        };

        for (z, element) in self.elements.iter_mut().enumerate() {
            element.z_index = z as i64;
        }
        let z = self.elements[index].z_index;
        self.elements[index].z_index = self.elements[neighbour].z_index;
        self.elements[neighbour].z_index = z;
        self.sort_by_z();
        tracing::debug!("Moved element {} {:?}", id, direction);
    }

    /// Copies an element, offset by 10px and kept on the canvas, and selects
    /// the copy. Returns the new id.
    pub fn duplicate(&mut self, id: &str) -> Option<String> {
        let mut copy = self.element(id)?.clone();
        let x = clamp_into(copy.x + DUPLICATE_OFFSET, self.width() - copy.width);
        let y = clamp_into(copy.y + DUPLICATE_OFFSET, self.height() - copy.height);
        copy.translate(x - copy.x, y - copy.y);
        copy.id = generate_id();
        Some(self.insert(copy))
    }

    /// Appends elements above the existing ones with fresh ids, keeping
    /// their relative order. Returns the new ids.
    pub fn append_elements(&mut self, mut elements: Vec<Element>) -> Vec<String> {
        elements.sort_by_key(|e| e.z_index);
        let base = self.elements.len() as i64;
        let mut ids = Vec::with_capacity(elements.len());
        for (offset, mut element) in elements.into_iter().enumerate() {
            element.id = generate_id();
            element.z_index = base + offset as i64;
            element.normalize();
            ids.push(element.id.clone());
            self.elements.push(element);
        }
        self.sort_by_z();
        ids
    }

    /// Classifies what lies under a canvas-space point.
    ///
    /// Handles of the selected element win over element bodies; bodies are
    /// tested topmost first.
    pub fn hit_test(&self, p: Point) -> HitTarget {
        if let Some(selected) = self.selected_element() {
            if let Some(target) = handle_hit(selected, p) {
                return target;
            }
        }
        self.elements
            .iter()
            .rev()
            .find(|e| e.contains_point(p))
            .map_or(HitTarget::Empty, |e| HitTarget::Body(e.id.clone()))
    }
}

fn handle_hit(element: &Element, p: Point) -> Option<HitTarget> {
    if let Some(line) = element.line_data() {
        return [Endpoint::Start, Endpoint::End]
            .into_iter()
            .find(|&end| line.endpoint(end).distance_to(&p) <= ENDPOINT_HIT_DISTANCE)
            .map(|end| HitTarget::LineEndpoint(element.id.clone(), end));
    }

    let bounds = element.bounds();
    let local = rotate_point(p, bounds.center(), -element.rotation);

    let knob = Point::new(bounds.center().x, bounds.y - ROTATE_HANDLE_OFFSET);
    if local.distance_to(&knob) <= ROTATE_HANDLE_SIZE / 2.0 {
        return Some(HitTarget::RotateHandle(element.id.clone()));
    }

    let reach = RESIZE_HANDLE_SIZE / 2.0 + HANDLE_HIT_SLOP;
    Handle::ALL
        .into_iter()
        .find(|handle| {
            let anchor = handle.anchor(&bounds);
            (local.x - anchor.x).abs() <= reach && (local.y - anchor.y).abs() <= reach
        })
        .map(|handle| HitTarget::ResizeHandle(element.id.clone(), handle))
}
