//! Replays a typical editing session on a heightmap collection and prints the
//! layout after each step. Run with `RUST_LOG=debug` to see the collection's own
//! logging.

use std::sync::Arc;

use heightmap_stack::collection::{
    CollectionDescription, HeightmapAdded, HeightmapCollection, HeightmapRemoved,
};

#[derive(Debug)]
struct DemoLayer {
    provider: &'static str,
}

fn print_layout(step: &str, collection: &HeightmapCollection<DemoLayer>) {
    println!("{step}:");
    for (index, entry) in collection.iter().enumerate() {
        println!(
            "  [{:>2}] {} - {} - {}",
            index * 3,
            entry.slot(),
            entry.label(),
            entry.layer().provider
        );
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let srtm = Arc::new(DemoLayer { provider: "srtm" });
    let gtopo = Arc::new(DemoLayer { provider: "gtopo30" });
    let etopo = Arc::new(DemoLayer { provider: "etopo1" });

    let mut collection = HeightmapCollection::new(CollectionDescription::new(
        "elevation",
        1,
        vec![Arc::clone(&srtm), Arc::clone(&gtopo), Arc::clone(&etopo)],
    ))?;

    collection
        .heightmap_added_mut()
        .add_listener(|event: &HeightmapAdded<DemoLayer>| {
            log::info!("added {} at {:?}", event.layer.provider, event.position);
        });
    collection
        .heightmap_removed_mut()
        .add_listener(|event: &HeightmapRemoved| {
            log::info!("removed entry at position {}", event.position);
        });

    print_layout("initial", &collection);

    let aster = Arc::new(DemoLayer { provider: "aster" });
    collection.insert_at_position(Arc::clone(&aster), 3)?;
    print_layout("insert aster at position 3", &collection);

    let factory = |provider: &'static str| DemoLayer { provider };
    collection.add_terrain(&factory, "bathymetry");
    print_layout("add bathymetry terrain", &collection);

    collection.remove_at_position(0)?;
    print_layout("remove position 0", &collection);

    if let Err(err) = collection.remove_at_position(4) {
        println!("remove position 4 rejected: {err}");
    }

    collection.select_by_slot_index(1)?;
    print_layout("select slot 1", &collection);

    Ok(())
}
