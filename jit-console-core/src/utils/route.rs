//! Location fragment routing.
//!
//! Recognized fragments:
//! - `#reload...` forces the environment dialog
//! - `#!/environments/<name>[/<rest>]` selects an environment and resource
//! - any other `#!...` fragment is a route without an environment

/// Fragment prefix that forces environment reselection.
pub const FORCE_RESELECT_MARKER: &str = "#reload";

/// Fragment prefix of resource routes.
pub const ROUTE_MARKER: &str = "#!";

const ENVIRONMENTS_PREFIX: &str = "/environments/";

/// What the location fragment asks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HashRoute {
    /// Ignore any remembered environment and ask the user
    ForceReselect,
    /// An environment and the (decoded) resource path within it
    Environment { name: String, resource: String },
    /// A `#!` route that does not name an environment
    UnknownRoute,
    /// No route fragment
    Unrouted,
}

impl HashRoute {
    pub fn parse(hash: Option<&str>) -> Self {
        let Some(hash) = hash else {
            return Self::Unrouted;
        };

        if hash.starts_with(FORCE_RESELECT_MARKER) {
            return Self::ForceReselect;
        }

        let Some(raw) = hash.strip_prefix(ROUTE_MARKER) else {
            return Self::Unrouted;
        };

        let Ok(resource) = urlencoding::decode(raw) else {
            log::debug!("Route is not valid UTF-8 after decoding: {hash}");
            return Self::UnknownRoute;
        };

        match environment_of(&resource) {
            Some(name) => Self::Environment {
                name: name.to_string(),
                resource: resource.into_owned(),
            },
            None => Self::UnknownRoute,
        }
    }
}

/// `<name>` of `/environments/<name>[/<rest>]`, if non-empty.
fn environment_of(path: &str) -> Option<&str> {
    let rest = path.strip_prefix(ENVIRONMENTS_PREFIX)?;
    let name = rest.split('/').next().unwrap_or(rest);
    (!name.is_empty()).then_some(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn environment(name: &str, resource: &str) -> HashRoute {
        HashRoute::Environment {
            name: name.to_string(),
            resource: resource.to_string(),
        }
    }

    #[test]
    fn environment_with_sub_resource() {
        assert_eq!(
            HashRoute::parse(Some("#!/environments/prod-1/groups")),
            environment("prod-1", "/environments/prod-1/groups")
        );
    }

    #[test]
    fn environment_root() {
        assert_eq!(
            HashRoute::parse(Some("#!/environments/dev")),
            environment("dev", "/environments/dev")
        );
        assert_eq!(
            HashRoute::parse(Some("#!/environments/dev/")),
            environment("dev", "/environments/dev/")
        );
    }

    #[test]
    fn resource_is_decoded() {
        assert_eq!(
            HashRoute::parse(Some("#!/environments/my%20env/groups/a%2Fb")),
            environment("my env", "/environments/my env/groups/a/b")
        );
    }

    #[test]
    fn force_reselect_marker() {
        assert_eq!(HashRoute::parse(Some("#reload")), HashRoute::ForceReselect);
        assert_eq!(HashRoute::parse(Some("#reload-now")), HashRoute::ForceReselect);
    }

    #[test]
    fn unrouted_fragments() {
        for hash in [None, Some(""), Some("#"), Some("#/environments/prod")] {
            assert_eq!(HashRoute::parse(hash), HashRoute::Unrouted, "{hash:?}");
        }
    }

    #[test]
    fn routes_without_environment() {
        for hash in [
            "#!",
            "#!/",
            "#!/about",
            "#!/environments/",
            "#!/environments//groups",
            "#!/groups/prod",
        ] {
            assert_eq!(HashRoute::parse(Some(hash)), HashRoute::UnknownRoute, "{hash}");
        }
    }

    #[test]
    fn invalid_utf8_after_decoding_is_unknown_route() {
        assert_eq!(
            HashRoute::parse(Some("#!/environments/%FF")),
            HashRoute::UnknownRoute
        );
    }
}
