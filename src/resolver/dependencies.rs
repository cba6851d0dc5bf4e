//! Transitive dependency walk over a resolved project.

use std::collections::{HashSet, VecDeque};
use std::rc::Rc;

use tracing::{debug, trace, warn};
use url::Url;

use super::exclusion::{self, ExclusionLink};
use super::{PomLookup, ProjectPom};
use crate::pom::{Coordinate, Dependency, Pom, Scope};
use crate::substitution::PropertySource;

/// A dependency waiting to be expanded, with the chain that introduced it.
struct Pending {
    dependency: Dependency,
    chain: Option<Rc<ExclusionLink>>,
}

impl ProjectPom {
    /// Collect every descriptor reachable from this project's dependencies
    /// in `scope`.
    ///
    /// The walk is breadth-first. `${..}` macros in each dependency's
    /// coordinate are substituted through [`ProjectPom::lookup`]. A dependency
    /// is skipped when the chain that introduced it excludes its
    /// `groupId:artifactId` (see [`ExclusionLink::excludes`]), when its scope
    /// differs from `scope`, or when it is optional. The rest are fetched from
    /// this project's repositories followed by `extra_repositories`.
    ///
    /// Descriptors come back in discovery order, each coordinate once. A
    /// dependency that cannot be fetched is logged and skipped.
    pub fn dependencies(
        &self,
        scope: Scope,
        extra_repositories: &[Url],
        lookup: &dyn PomLookup,
        system: &dyn PropertySource,
    ) -> Vec<Pom> {
        let repositories: Vec<Url> =
            self.repositories().iter().chain(extra_repositories).cloned().collect();

        let mut queue: VecDeque<Pending> = self
            .pom()
            .dependencies()
            .iter()
            .cloned()
            .map(|dependency| Pending {
                dependency,
                chain: None,
            })
            .collect();
        let mut requested: HashSet<Coordinate> = HashSet::new();
        let mut found = Vec::new();

        while let Some(Pending {
            dependency,
            chain,
        }) = queue.pop_front()
        {
            let coordinate = Coordinate::new(
                self.replace(&dependency.group_id, system),
                self.replace(&dependency.artifact_id, system),
                self.replace(&dependency.version, system),
            );

            if exclusion::excludes(chain.as_deref(), &coordinate.name()) {
                debug!("Excluded {coordinate}");
                continue;
            }
            if dependency.scope != scope || dependency.optional {
                trace!("Skipping {dependency}{}", if dependency.optional { " (optional)" } else { "" });
                continue;
            }
            if !requested.insert(coordinate.clone()) {
                continue;
            }

            match lookup.fetch(&coordinate, &repositories) {
                Ok(Some(pom)) => {
                    debug!("Found {coordinate} with {} dependencies", pom.dependencies().len());
                    let link = ExclusionLink::new(chain, dependency);
                    queue.extend(pom.dependencies().iter().cloned().map(|dependency| Pending {
                        dependency,
                        chain: Some(Rc::clone(&link)),
                    }));
                    found.push(pom);
                }
                Ok(None) => warn!("Cannot find {coordinate} from {}", introducer(chain.as_deref())),
                Err(e) => {
                    warn!("Cannot find {coordinate} from {}: {e:#}", introducer(chain.as_deref()));
                }
            }
        }

        found
    }
}

fn introducer(chain: Option<&ExclusionLink>) -> String {
    chain.map_or_else(|| "top".to_string(), |link| link.dependency().to_string())
}
