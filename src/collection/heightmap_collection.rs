//! 高度图集合
//!
//! 按顺序保存若干高度图层，每个图层带有槽位编号和标签，供地形控制器决定绘制顺序。
//!
//! Positions handed to [`HeightmapCollection::insert_at_position`] and
//! [`HeightmapCollection::remove_at_position`] are *physical* positions: entry
//! `k` starts at `3k`, as if the collection were a flat
//! `[slot, label, layer, slot, label, layer, ...]` array.

use std::sync::Arc;

use super::description::{CollectionDescription, CollectionOptions, SlotNumbering};
use super::entry::{Entry, ENTRY_STRIDE};
use super::error::{CollectionError, Result};
use super::events::{Event, HeightmapAdded, HeightmapRemoved};
use super::provider::LayerFactory;

/// An ordered set of elevation layers.
///
/// Layers are compared by reference ([`Arc::ptr_eq`]); the collection keeps a
/// clone of the caller's `Arc` and never builds or drops a layer on its own.
#[derive(Debug)]
pub struct HeightmapCollection<L> {
    collection_id: String,
    collection_index: u32,
    options: CollectionOptions,
    entries: Vec<Entry<L>>,
    heightmap_added: Event<HeightmapAdded<L>>,
    heightmap_removed: Event<HeightmapRemoved>,
}

impl<L> HeightmapCollection<L> {
    /// 创建集合，初始图层依次获得槽位 0..n-1
    pub fn new(description: CollectionDescription<L>) -> Result<Self> {
        let CollectionDescription {
            id,
            index,
            heightmaps,
            options,
        } = description;

        let collection_id = id.ok_or(CollectionError::MissingArgument("id"))?;
        let collection_index = index.ok_or(CollectionError::MissingArgument("index"))?;
        let heightmaps = heightmaps.ok_or(CollectionError::MissingArgument("heightmaps"))?;

        let entries: Vec<Entry<L>> = heightmaps
            .into_iter()
            .enumerate()
            .map(|(slot, layer)| Entry::new(slot, layer))
            .collect();

        log::debug!(
            "created heightmap collection '{}' (#{}) with {} layer(s)",
            collection_id,
            collection_index,
            entries.len()
        );

        Ok(Self {
            collection_id,
            collection_index,
            options,
            entries,
            heightmap_added: Event::new(),
            heightmap_removed: Event::new(),
        })
    }

    pub fn collection_id(&self) -> &str {
        &self.collection_id
    }

    pub fn collection_index(&self) -> u32 {
        self.collection_index
    }

    pub fn options(&self) -> &CollectionOptions {
        &self.options
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Length of the flattened layout, always `3 * len()`.
    pub fn physical_len(&self) -> usize {
        self.entries.len() * ENTRY_STRIDE
    }

    pub fn entries(&self) -> &[Entry<L>] {
        &self.entries
    }

    pub fn iter(&self) -> impl Iterator<Item = &Entry<L>> {
        self.entries.iter()
    }

    pub fn layers(&self) -> impl Iterator<Item = &Arc<L>> {
        self.entries.iter().map(Entry::layer)
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(Entry::label)
    }

    pub fn contains(&self, layer: &Arc<L>) -> bool {
        self.entries.iter().any(|entry| entry.holds(layer))
    }

    /// Physical position of the last entry holding `layer`.
    pub fn position_of(&self, layer: &Arc<L>) -> Option<usize> {
        self.entries
            .iter()
            .rposition(|entry| entry.holds(layer))
            .map(|index| index * ENTRY_STRIDE)
    }

    pub fn heightmap_added(&self) -> &Event<HeightmapAdded<L>> {
        &self.heightmap_added
    }

    pub fn heightmap_added_mut(&mut self) -> &mut Event<HeightmapAdded<L>> {
        &mut self.heightmap_added
    }

    pub fn heightmap_removed(&self) -> &Event<HeightmapRemoved> {
        &self.heightmap_removed
    }

    pub fn heightmap_removed_mut(&mut self) -> &mut Event<HeightmapRemoved> {
        &mut self.heightmap_removed
    }

    /// 按物理位置插入图层
    ///
    /// - `position >= physical_len()`: appended with the next slot number.
    /// - `0 < position < physical_len()`: the position is snapped to an entry
    ///   boundary (`3k` stays, `3k + 1` moves back to `3k`, `3k + 2` moves
    ///   forward to `3k + 3`) and the new entry takes slot `k`. Entries that get
    ///   pushed back keep their own slot and label.
    /// - anything else is [`CollectionError::OutOfRange`].
    pub fn insert_at_position(&mut self, layer: Arc<L>, position: i64) -> Result<()> {
        self.ensure_absent(&layer)?;

        let physical_len = self.physical_len();
        let index = if position >= physical_len as i64 {
            self.entries.len()
        } else if position > 0 {
            let position = position as usize;
            match position % ENTRY_STRIDE {
                0 => position / ENTRY_STRIDE,
                1 => (position - 1) / ENTRY_STRIDE,
                _ => (position + 1) / ENTRY_STRIDE,
            }
        } else {
            return Err(CollectionError::OutOfRange {
                index: position,
                max: physical_len,
            });
        };

        self.insert_entry(index, Entry::new(index, Arc::clone(&layer)));
        self.heightmap_added.raise(&HeightmapAdded {
            layer,
            position: Some(position),
        });
        Ok(())
    }

    /// 按槽位编号插入图层
    ///
    /// A slot below `len()` inserts at entry index `slot`; anything larger is
    /// appended. Either way the entry stores `slot` as given, so a slot far past
    /// the end is kept verbatim.
    pub fn insert_by_slot_index(&mut self, layer: Arc<L>, slot: i64) -> Result<()> {
        self.ensure_absent(&layer)?;
        if slot < 0 {
            return Err(CollectionError::OutOfRange {
                index: slot,
                max: self.entries.len(),
            });
        }

        let slot_value = slot as usize;
        let index = slot_value.min(self.entries.len());
        self.insert_entry(index, Entry::new(slot_value, Arc::clone(&layer)));
        self.heightmap_added.raise(&HeightmapAdded {
            layer,
            position: Some(slot),
        });
        Ok(())
    }

    /// 在末尾添加图层，槽位为 `len()`
    pub fn append(&mut self, layer: Arc<L>) -> Result<()> {
        self.ensure_absent(&layer)?;
        self.push_layer(layer);
        Ok(())
    }

    /// Removes the entry starting at physical `position` and returns its layer.
    pub fn remove_at_position(&mut self, position: i64) -> Result<Arc<L>> {
        if self.entries.is_empty() {
            return Err(CollectionError::EmptyCollection);
        }
        if position < 0 {
            return Err(CollectionError::NegativeIndex(position));
        }
        let physical_len = self.physical_len();
        if position as usize >= physical_len {
            return Err(CollectionError::OutOfRange {
                index: position,
                max: physical_len,
            });
        }
        if position as usize % ENTRY_STRIDE != 0 {
            return Err(CollectionError::MisalignedIndex(position));
        }

        let entry = self.remove_entry(position as usize / ENTRY_STRIDE);
        self.renumber_if_needed();
        Ok(Arc::clone(entry.layer()))
    }

    /// Removes every entry holding `layer`, from the back. Returns how many were
    /// removed; each removal raises its own [`HeightmapRemoved`].
    pub fn remove_by_payload(&mut self, layer: &Arc<L>) -> usize {
        let removed = self.remove_matching(|entry| entry.holds(layer));
        self.renumber_if_needed();
        if removed == 0 {
            log::debug!(
                "remove_by_payload: layer not found in collection '{}'",
                self.collection_id
            );
        }
        removed
    }

    /// 只保留槽位为 `slot` 的条目，其余全部删除
    ///
    /// The upper bound is the physical length, so slots stored verbatim past
    /// the end can still be selected. Survivors keep their slot and label in
    /// every numbering mode. Returns the number of removed entries.
    pub fn select_by_slot_index(&mut self, slot: i64) -> Result<usize> {
        if slot < 0 {
            return Err(CollectionError::NegativeIndex(slot));
        }
        let physical_len = self.physical_len();
        if slot as usize > physical_len {
            return Err(CollectionError::OutOfRange {
                index: slot,
                max: physical_len,
            });
        }

        let slot = slot as usize;
        Ok(self.remove_matching(|entry| entry.slot() != slot))
    }

    /// 只保留标签为 `label` 的条目，其余全部删除
    pub fn select_by_label(&mut self, label: &str) -> usize {
        self.remove_matching(|entry| entry.label() != label)
    }

    /// Returns the layer of the last entry with this slot, if any.
    pub fn get_payload_by_slot_index(&self, slot: i64) -> Result<Option<Arc<L>>> {
        if slot < 0 {
            return Err(CollectionError::NegativeIndex(slot));
        }
        let len = self.entries.len();
        if slot as usize > len {
            return Err(CollectionError::OutOfRange {
                index: slot,
                max: len,
            });
        }

        let slot = slot as usize;
        Ok(self
            .entries
            .iter()
            .rev()
            .find(|entry| entry.slot() == slot)
            .map(|entry| Arc::clone(entry.layer())))
    }

    /// Returns the slot of the last entry holding `layer`, if any.
    pub fn get_slot_index_by_payload(&self, layer: &Arc<L>) -> Option<usize> {
        self.entries
            .iter()
            .rev()
            .find(|entry| entry.holds(layer))
            .map(Entry::slot)
    }

    /// 用地形提供者创建新图层，并以槽位 `slot` 插入集合
    pub fn add_terrain_provider<P, F>(
        &mut self,
        factory: &F,
        provider: P,
        slot: i64,
    ) -> Result<Arc<L>>
    where
        F: LayerFactory<P, Layer = L>,
    {
        if slot < 0 {
            return Err(CollectionError::NegativeIndex(slot));
        }
        let len = self.entries.len();
        if slot as usize > len {
            return Err(CollectionError::OutOfRange {
                index: slot,
                max: len,
            });
        }

        let layer = Arc::new(factory.create_layer(provider));
        self.insert_by_slot_index(Arc::clone(&layer), slot)?;
        Ok(layer)
    }

    /// 用地形提供者创建新图层，并添加到末尾
    pub fn add_terrain<P, F>(&mut self, factory: &F, provider: P) -> Arc<L>
    where
        F: LayerFactory<P, Layer = L>,
    {
        let layer = Arc::new(factory.create_layer(provider));
        self.push_layer(Arc::clone(&layer));
        layer
    }

    fn ensure_absent(&self, layer: &Arc<L>) -> Result<()> {
        if self.contains(layer) {
            return Err(CollectionError::DuplicatePayload);
        }
        Ok(())
    }

    fn push_layer(&mut self, layer: Arc<L>) {
        let index = self.entries.len();
        self.insert_entry(index, Entry::new(index, Arc::clone(&layer)));
        self.heightmap_added.raise(&HeightmapAdded {
            layer,
            position: None,
        });
    }

    fn insert_entry(&mut self, index: usize, entry: Entry<L>) {
        log::debug!(
            "inserting '{}' at position {} of collection '{}'",
            entry.label(),
            index * ENTRY_STRIDE,
            self.collection_id
        );
        self.entries.insert(index, entry);
        self.renumber_if_needed();
    }

    fn remove_entry(&mut self, index: usize) -> Entry<L> {
        let entry = self.entries.remove(index);
        let position = index * ENTRY_STRIDE;
        log::debug!(
            "removed '{}' from position {} of collection '{}'",
            entry.label(),
            position,
            self.collection_id
        );
        self.heightmap_removed.raise(&HeightmapRemoved { position });
        entry
    }

    /// 从后往前删除所有满足 `doomed` 的条目，返回删除数量
    ///
    /// 先选出要删除的条目再修改，不做重新编号，由调用者决定。
    fn remove_matching(&mut self, doomed: impl Fn(&Entry<L>) -> bool) -> usize {
        let indices: Vec<usize> = self
            .entries
            .iter()
            .enumerate()
            .filter(|&(_, entry)| doomed(entry))
            .map(|(index, _)| index)
            .collect();
        for &index in indices.iter().rev() {
            self.remove_entry(index);
        }
        indices.len()
    }

    fn renumber_if_needed(&mut self) {
        if self.options.numbering == SlotNumbering::Renumber {
            for (index, entry) in self.entries.iter_mut().enumerate() {
                entry.assign_slot(index);
            }
        }
    }
}
