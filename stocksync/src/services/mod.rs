// Business logic services layer
//
// Reusable logic decoupled from the HTTP surface.

pub mod sync;
