pub mod add;
pub mod collab;
pub mod common;
pub mod link;
pub mod list;
pub mod menu;
pub mod search;
pub mod select;
