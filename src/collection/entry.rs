//! 高度图条目
//!
//! 每个条目由 槽位编号 - 标签 - 图层 三部分组成，例如 `1 - elevation1 - layer`。

use std::sync::Arc;

/// 标签前缀，标签 = 前缀 + 槽位编号
pub const LABEL_PREFIX: &str = "elevation";

/// 一个条目在扁平布局中占用的物理位置数
///
/// 条目 k 占用物理位置 `3k`、`3k + 1`、`3k + 2`。
pub const ENTRY_STRIDE: usize = 3;

/// Builds the label for a slot, e.g. `elevation4`.
pub fn label_for(slot: usize) -> String {
    format!("{LABEL_PREFIX}{slot}")
}

/// One elevation layer registered in a collection.
///
/// The slot is the layer's logical number, not its position: positional inserts
/// shift later entries without touching their slot or label.
#[derive(Debug)]
pub struct Entry<L> {
    slot: usize,
    label: String,
    layer: Arc<L>,
}

impl<L> Entry<L> {
    pub fn new(slot: usize, layer: Arc<L>) -> Self {
        Self {
            slot,
            label: label_for(slot),
            layer,
        }
    }

    pub fn slot(&self) -> usize {
        self.slot
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn layer(&self) -> &Arc<L> {
        &self.layer
    }

    /// 是否引用同一个图层（按引用比较，而不是按值）
    pub fn holds(&self, layer: &Arc<L>) -> bool {
        Arc::ptr_eq(&self.layer, layer)
    }

    /// 重新分配槽位编号，并同步标签
    pub(crate) fn assign_slot(&mut self, slot: usize) {
        if self.slot != slot {
            self.slot = slot;
            self.label = label_for(slot);
        }
    }
}

impl<L> Clone for Entry<L> {
    fn clone(&self) -> Self {
        Self {
            slot: self.slot,
            label: self.label.clone(),
            layer: Arc::clone(&self.layer),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_is_derived_from_slot() {
        let entry = Entry::new(7, Arc::new(()));
        assert_eq!(entry.slot(), 7);
        assert_eq!(entry.label(), "elevation7");
    }

    #[test]
    fn test_holds_compares_by_reference() {
        let layer = Arc::new(String::from("srtm"));
        let twin = Arc::new(String::from("srtm"));
        let entry = Entry::new(0, Arc::clone(&layer));

        assert!(entry.holds(&layer));
        // 值相同但不是同一个图层
        assert!(!entry.holds(&twin));
    }

    #[test]
    fn test_assign_slot_regenerates_label() {
        let mut entry = Entry::new(2, Arc::new(()));
        entry.assign_slot(5);
        assert_eq!(entry.slot(), 5);
        assert_eq!(entry.label(), "elevation5");
    }
}
