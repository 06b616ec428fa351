pub mod contact_graph;
pub mod match_finder;
