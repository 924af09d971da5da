#[path = "1_map_events.rs"]
mod map_events;

#[path = "2_store_entity_counts.rs"]
mod store_entity_counts;

#[path = "3_graph_out.rs"]
mod graph_out;
