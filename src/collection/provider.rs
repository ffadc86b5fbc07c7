//! Layer creation hook used by [`HeightmapCollection::add_terrain`].
//!
//! The collection never looks inside a layer; the host engine decides how a
//! terrain provider is wrapped into something it can draw.
//!
//! [`HeightmapCollection::add_terrain`]: super::HeightmapCollection::add_terrain

/// Wraps a terrain provider `P` into a layer the collection can hold.
pub trait LayerFactory<P> {
    type Layer;

    fn create_layer(&self, provider: P) -> Self::Layer;
}

impl<P, L, F> LayerFactory<P> for F
where
    F: Fn(P) -> L,
{
    type Layer = L;

    fn create_layer(&self, provider: P) -> L {
        self(provider)
    }
}
