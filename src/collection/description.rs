//! 高度图集合的构造参数与配置

use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// How slot numbers behave when entries move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SlotNumbering {
    /// Slots and labels are fixed when an entry is inserted. Later inserts and
    /// removals shift entries without renumbering them, so slots can repeat or
    /// leave gaps.
    #[default]
    Preserve,
    /// After every insert or removal each entry's slot is reset to its entry
    /// index and its label regenerated.
    Renumber,
}

/// 集合配置（可随宿主设置一起持久化）
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CollectionOptions {
    pub numbering: SlotNumbering,
}

/// Input for [`HeightmapCollection::new`](super::HeightmapCollection::new).
///
/// Every field except `options` is required; a missing one is reported as
/// [`CollectionError::MissingArgument`](super::CollectionError::MissingArgument).
#[derive(Debug)]
pub struct CollectionDescription<L> {
    /// 集合标识符
    pub id: Option<String>,
    /// 集合编号（同一地图上可以有多个集合）
    pub index: Option<u32>,
    /// 初始图层，按顺序分配槽位 0..n-1
    pub heightmaps: Option<Vec<Arc<L>>>,
    pub options: CollectionOptions,
}

impl<L> CollectionDescription<L> {
    pub fn new(id: impl Into<String>, index: u32, heightmaps: Vec<Arc<L>>) -> Self {
        Self {
            id: Some(id.into()),
            index: Some(index),
            heightmaps: Some(heightmaps),
            options: CollectionOptions::default(),
        }
    }

    pub fn with_options(mut self, options: CollectionOptions) -> Self {
        self.options = options;
        self
    }
}

impl<L> Default for CollectionDescription<L> {
    fn default() -> Self {
        Self {
            id: None,
            index: None,
            heightmaps: None,
            options: CollectionOptions::default(),
        }
    }
}
