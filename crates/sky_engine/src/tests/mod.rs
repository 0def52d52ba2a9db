//! Cross-module movement scenarios
//!
//! Drive the controller, resolver and octree together over many frames.
