//! Icon grid layout: wraps flowed items into blocks and sizes the desklet container from content.

use crate::model::{
    DeskletItem, ItemPosition, LayoutResult, Orientation, ITEM_MARGIN, MAX_ITEM_SIZE,
};

/// Inputs for one layout pass besides the items themselves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayoutParams {
    /// Primary-axis space before wrapping. Values below one are treated as one.
    pub available_space: i32,
    pub orientation: Orientation,
    /// Edge length shared by every icon in the pass.
    pub item_size: i32,
    /// Docked-list mode: stretch the content axis to this extent instead of sizing to content.
    pub docked_extent: Option<i32>,
}

fn clamp_item_size(item_size: i32) -> i32 {
    item_size.clamp(1, MAX_ITEM_SIZE)
}

fn saturate(value: i64) -> i32 {
    value.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32
}

/// Distance between the leading edges of two neighbouring icons.
pub fn item_unit(item_size: i32) -> i32 {
    clamp_item_size(item_size) + ITEM_MARGIN
}

fn content_length_wide(count: usize, item_size: i32) -> i64 {
    if count == 0 {
        return 0;
    }
    let count = i64::try_from(count).unwrap_or(i64::MAX);
    i64::from(item_unit(item_size))
        .saturating_mul(count)
        .saturating_sub(i64::from(ITEM_MARGIN))
}

/// Unwrapped primary-axis length of `count` icons, without the outer margins. Saturates at
/// `i32::MAX`.
pub fn content_length(count: usize, item_size: i32) -> i32 {
    saturate(content_length_wide(count, item_size))
}

/// Number of blocks the content needs: `ceil(content_length / available_space)`, at least one.
///
/// A lone icon never wraps, so it always reports a single block.
pub fn block_count(count: usize, item_size: i32, available_space: i32) -> u32 {
    if count <= 1 {
        return 1;
    }
    let length = content_length_wide(count, item_size);
    let space = i64::from(available_space.max(1));
    let blocks = length.saturating_add(space - 1) / space;
    u32::try_from(blocks.max(1)).unwrap_or(u32::MAX)
}

/// Lays out `items` along `params.orientation`.
///
/// Skipped items are neither measured nor positioned. Each flowed item advances the running
/// length by one unit; once the run meets `available_space - unit` the next item starts a new
/// block, except after the last item so no empty trailing block appears.
pub fn compute_layout(items: &[DeskletItem], params: &LayoutParams) -> LayoutResult {
    let item_size = clamp_item_size(params.item_size);
    let unit = item_unit(item_size);
    let available_space = params.available_space.max(1);
    let wrap_threshold = available_space - unit;

    let flowed: Vec<&DeskletItem> = items.iter().filter(|item| !item.skip).collect();
    let blocks = block_count(flowed.len(), item_size, available_space);

    let mut item_positions = Vec::with_capacity(flowed.len());
    let mut primary = ITEM_MARGIN;
    let mut run: i32 = 0;
    let mut max_run: i32 = 0;
    let mut block: u32 = 0;
    let mut content_pixel_length: i32 = 0;

    for (index, item) in flowed.iter().enumerate() {
        let secondary = saturate(
            i64::from(ITEM_MARGIN) + i64::from(block) * i64::from(unit),
        );
        let (x, y) = match params.orientation {
            Orientation::Horizontal => (primary, secondary),
            Orientation::Vertical => (secondary, primary),
        };
        item_positions.push((item.id, ItemPosition { x, y, block }));

        primary = primary.saturating_add(unit);
        run = run.saturating_add(unit);
        max_run = max_run.max(run);
        content_pixel_length = content_pixel_length.max(primary);

        let is_last = index + 1 == flowed.len();
        if run >= wrap_threshold && !is_last {
            primary = ITEM_MARGIN;
            run = 0;
            block = block.saturating_add(1);
        }
    }

    let occupied_blocks = block.saturating_add(1);
    // The walk may fill more rows than the ratio estimate when space is tight.
    let wrap_axis = saturate(
        i64::from(ITEM_MARGIN) + i64::from(blocks.max(occupied_blocks)) * i64::from(unit),
    );
    let content_axis = params
        .docked_extent
        .unwrap_or_else(|| max_run.saturating_add(ITEM_MARGIN));
    let (container_width, container_height) = match params.orientation {
        Orientation::Horizontal => (content_axis, wrap_axis),
        Orientation::Vertical => (wrap_axis, content_axis),
    };

    LayoutResult {
        orientation: params.orientation,
        blocks,
        occupied_blocks,
        container_width,
        container_height,
        content_pixel_length,
        item_positions,
    }
}
