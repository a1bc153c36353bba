/// The runtime value type.
///
/// Defines `Value`, the closed set of things a variable can hold, together
/// with truthiness, language equality and the text rendering used for output.
pub mod core;

/// Array values.
///
/// Arrays are ordered key-value maps with an auto-incrementing integer index
/// used by push and pop.
pub mod array;

/// Function values and their captured scope.
pub mod function;

/// Values crossing the boundary to and from the host program.
pub mod host;
