//! Ordered registry of elevation layers.
//!
//! A [`HeightmapCollection`] keeps `slot - label - layer` entries in display
//! order and notifies listeners whenever entries are added or removed.

mod description;
mod entry;
mod error;
mod events;
mod heightmap_collection;
mod provider;

pub use description::{CollectionDescription, CollectionOptions, SlotNumbering};
pub use entry::{label_for, Entry, ENTRY_STRIDE, LABEL_PREFIX};
pub use error::{CollectionError, Result};
pub use events::{Event, HeightmapAdded, HeightmapRemoved, Listener, ListenerId};
pub use heightmap_collection::HeightmapCollection;
pub use provider::LayerFactory;
