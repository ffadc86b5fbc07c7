#![warn(clippy::all, rust_2018_idioms)]

pub mod collection;

pub use collection::{
    CollectionDescription, CollectionError, CollectionOptions, HeightmapCollection, LayerFactory,
    SlotNumbering,
};
