// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Reusable mocks for exercising the scheduler: a recording host element, a
//! recording view renderer, and canned middleware steps.

// Attach sources.
pub mod host_fixtures;
pub mod middleware_fixtures;

// Re-export.
pub use host_fixtures::*;
pub use middleware_fixtures::*;
