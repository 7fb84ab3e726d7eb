// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

/// Type alias to make it easy to work with [`miette::Result`] at the crate's
/// fallible seams. Works hand in hand with [`crate::RenderError`] (which also
/// implements [`miette::Diagnostic`]) and any other error type.
///
/// Render passes themselves never leak an error through this alias — pass
/// failures are consumed by the scheduler's failure protocol and surfaced as
/// [`crate::RenderOutcome`]. `CommonResult` is for everything around them
/// (setup, logging bootstrap, host integration).
pub type CommonResult<T> = miette::Result<T>;
