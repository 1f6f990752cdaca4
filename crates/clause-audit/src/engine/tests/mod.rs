mod archetype;
mod common;
