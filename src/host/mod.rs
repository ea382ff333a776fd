// Hosts: concrete document models the placement pipeline drives.

pub mod canvas;
pub mod image_size;
