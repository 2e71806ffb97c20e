/// UI support module
///
/// Holds the table view-model: column metadata, sort rules and the
/// grouped row layout. Widget construction itself lives in main.rs.

pub mod table;
