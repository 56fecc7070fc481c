// Copyright (c) The playwright-adapter Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use playwright_metadata::{ReportSpec, ReportSuite};
use std::{iter::FusedIterator, slice};

/// A spec paired with the title of the suite that directly contains it.
#[derive(Copy, Clone, Debug)]
pub struct FlatSpec<'a> {
    /// The spec.
    pub spec: &'a ReportSpec,

    /// The title of the immediate parent suite (not the full suite path).
    pub suite_title: &'a str,
}

/// Returns every spec reachable from `suite`, in depth-first pre-order.
///
/// A suite's own specs are produced before any of its child suites are visited, and children are
/// visited in the order they are listed.
pub fn flatten_specs(suite: &ReportSuite) -> FlattenSpecs<'_> {
    FlattenSpecs {
        current: None,
        stack: vec![suite],
    }
}

/// Iterator returned by [`flatten_specs`].
///
/// Walks the suite tree with an explicit stack, so deeply nested `describe` blocks don't grow the
/// call stack.
#[derive(Clone, Debug)]
pub struct FlattenSpecs<'a> {
    current: Option<(&'a str, slice::Iter<'a, ReportSpec>)>,
    stack: Vec<&'a ReportSuite>,
}

impl<'a> Iterator for FlattenSpecs<'a> {
    type Item = FlatSpec<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some((suite_title, specs)) = &mut self.current {
                if let Some(spec) = specs.next() {
                    return Some(FlatSpec {
                        spec,
                        suite_title: *suite_title,
                    });
                }
            }

            let suite = self.stack.pop()?;
            // Reversed so that the first child is popped first.
            self.stack.extend(suite.suites.iter().rev());
            self.current = Some((suite.title.as_str(), suite.specs.iter()));
        }
    }
}

impl FusedIterator for FlattenSpecs<'_> {}
