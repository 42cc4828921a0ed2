//! Asset parsers producing CPU-side data.
//! OBJ scene importer: one forward pass over an in-memory byte buffer.

pub mod mesh;
pub mod obj;
mod scan;
