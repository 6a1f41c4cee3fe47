//! Property tests that run random operations against a tree and a model multiset.

// Shared with the unit tests so both generate operations the same way.
#[path = "../../src/test/quick.rs"]
mod quick;

mod ordered;

use quick::Op;
