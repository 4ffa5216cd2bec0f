/// Path reported for positions inside the prelude.
pub const PRELUDE_PATH: &str = "std/prelude.lang";

/// Source of the standard library surface, compiled ahead of every program.
pub const PRELUDE_SOURCE: &str = include_str!("../../std/prelude.lang");

/// Struct names that support vector arithmetic unless configured otherwise.
pub const DEFAULT_VECTOR_ALIASES: [&str; 2] = ["vec2", "vec3"];
