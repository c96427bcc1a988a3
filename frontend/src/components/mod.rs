pub mod header;
pub mod notice;
pub mod outlet;
