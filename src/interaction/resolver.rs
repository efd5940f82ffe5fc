use ordered_float::OrderedFloat;

use crate::core::{AnchorRect, PointerInput, PointerOffset, Scale, SeriesItem};

/// Pointer position relative to the anchor's top-left corner.
#[must_use]
pub fn pointer_offset(input: PointerInput, anchor: AnchorRect) -> PointerOffset {
    PointerOffset {
        x: input.client_x - anchor.x,
        y: input.client_y - anchor.y,
    }
}

/// Buckets a pointer offset onto `tick_count` evenly spaced boundaries.
///
/// `[0, anchor_width]` is split into `tick_count - 1` equal segments and the
/// nearest boundary wins. Rendered tick spacing is uniform even when the
/// underlying domain values are not, so this follows what the user sees
/// rather than the data values.
#[must_use]
pub fn resolve_index(pointer_offset_x: f64, anchor_width: f64, tick_count: usize) -> Option<usize> {
    if tick_count <= 1
        || !pointer_offset_x.is_finite()
        || !anchor_width.is_finite()
        || anchor_width <= 0.0
    {
        return None;
    }

    let last = tick_count - 1;
    let segment_width = anchor_width / last as f64;
    let raw = (pointer_offset_x / segment_width).round();
    Some(raw.clamp(0.0, last as f64) as usize)
}

/// Index of the item whose key is closest to the inverted pointer position.
///
/// Numeric and time keys compare in domain units; keys without a numeric
/// projection compare by pixel position. Ties go to the lower index.
#[must_use]
pub fn nearest_item_index<S: Scale + ?Sized>(
    scale: &S,
    pointer_offset_x: f64,
    items: &[SeriesItem],
) -> Option<usize> {
    if items.is_empty() {
        return None;
    }
    let target = scale.invert(pointer_offset_x)?;
    let target_number = target.as_number();

    let mut best: Option<(OrderedFloat<f64>, usize)> = None;
    for (index, item) in items.iter().enumerate() {
        let distance = match (item.key.as_number(), target_number) {
            (Some(key), Some(target)) => (key - target).abs(),
            _ => match scale.to_position(&item.key) {
                Some(position) => (position - pointer_offset_x).abs(),
                None => continue,
            },
        };
        if !distance.is_finite() {
            continue;
        }
        let distance = OrderedFloat(distance);
        match best {
            Some((current, _)) if current <= distance => {}
            _ => best = Some((distance, index)),
        }
    }
    best.map(|(_, index)| index)
}
