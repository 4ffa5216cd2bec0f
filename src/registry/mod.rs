/// Type registry module
/// Owns type identity, top level names and the assignability rules
pub mod registry;

#[cfg(test)]
mod tests;
