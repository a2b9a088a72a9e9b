pub mod booking;
pub mod field;
pub mod item;
pub mod notification;
pub mod room;
