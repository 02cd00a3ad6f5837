/// Rendering: controls, charts, and the record table.
pub mod panels;
pub mod pie;
pub mod plot;
pub mod table;
