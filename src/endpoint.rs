use url::Url;

use crate::command::Command;
use crate::error::{Error, Result};

/// API version segment spoken by this client
pub const DEFAULT_API_VERSION: &str = "v2";

/// Base location of a TestRail instance plus the API version to address
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    base: Url,
    api_version: String,
}

impl Endpoint {
    /// An instance hosted by TestRail: `https://{client_id}.testrail.com/`
    pub fn hosted(client_id: &str) -> Result<Self> {
        if client_id.is_empty() || client_id.contains(['/', ':', '.']) {
            return Err(Error::config(format!("Invalid TestRail client id: {:?}", client_id)));
        }
        let base = Url::parse(&format!("https://{}.testrail.com/", client_id))?;
        Ok(Self::new(base))
    }

    /// A self-hosted instance, e.g. `https://10.0.0.5/testrail/`
    ///
    /// Only the part before `index.php` belongs here; a missing trailing
    /// slash is added.
    pub fn new(mut base: Url) -> Self {
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        base.set_query(None);
        base.set_fragment(None);
        Self {
            base,
            api_version: DEFAULT_API_VERSION.to_string(),
        }
    }

    /// Parse a self-hosted base URL
    pub fn parse(base: &str) -> Result<Self> {
        Ok(Self::new(Url::parse(base)?))
    }

    /// Address a different API version segment
    pub fn with_api_version(mut self, api_version: impl Into<String>) -> Self {
        self.api_version = api_version.into();
        self
    }

    /// Get the base URL
    pub fn base(&self) -> &Url {
        &self.base
    }

    /// Get the API version segment
    pub fn api_version(&self) -> &str {
        &self.api_version
    }

    /// Full request URL for a command and its already formatted parameters
    ///
    /// Non-empty parameters are joined with `/`, except filter-only
    /// parameters (starting with `&`) which attach directly to the command.
    pub fn build_url(&self, command: Command, params: &str) -> String {
        let arguments = if params.is_empty() || params.starts_with('&') {
            params.to_string()
        } else {
            format!("/{}", params)
        };
        format!(
            "{}index.php?/api/{}/{}{}",
            self.base, self.api_version, command, arguments
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hosted_endpoint() {
        let endpoint = Endpoint::hosted("acme").unwrap();
        assert_eq!(endpoint.base().as_str(), "https://acme.testrail.com/");
        assert_eq!(
            endpoint.build_url(Command::GetProjects, ""),
            "https://acme.testrail.com/index.php?/api/v2/get_projects"
        );
    }

    #[test]
    fn test_hosted_rejects_bad_client_id() {
        assert!(matches!(Endpoint::hosted(""), Err(Error::Config(_))));
        assert!(matches!(Endpoint::hosted("acme.evil.com/"), Err(Error::Config(_))));
    }

    #[test]
    fn test_params_are_slash_prefixed() {
        let endpoint = Endpoint::hosted("acme").unwrap();
        assert!(endpoint.build_url(Command::GetCase, "7").ends_with("/get_case/7"));
        assert!(endpoint
            .build_url(Command::GetCases, "16&suite_id=1231")
            .ends_with("/get_cases/16&suite_id=1231"));
        assert!(endpoint
            .build_url(Command::GetResults, "16&limit=5")
            .ends_with("/api/v2/get_results/16&limit=5"));
    }

    #[test]
    fn test_filter_only_params_attach_directly() {
        let endpoint = Endpoint::hosted("acme").unwrap();
        assert!(endpoint
            .build_url(Command::GetUserByEmail, "&email=a%40b.com")
            .ends_with("/get_user_by_email&email=a%40b.com"));
    }

    #[test]
    fn test_self_hosted_gets_trailing_slash() {
        let endpoint = Endpoint::parse("https://10.0.0.5/testrail").unwrap();
        assert_eq!(
            endpoint.build_url(Command::GetSuite, "3"),
            "https://10.0.0.5/testrail/index.php?/api/v2/get_suite/3"
        );
    }

    #[test]
    fn test_api_version_override() {
        let endpoint = Endpoint::parse("http://localhost:8080/").unwrap().with_api_version("v3");
        assert_eq!(endpoint.api_version(), "v3");
        assert_eq!(
            endpoint.build_url(Command::GetUsers, ""),
            "http://localhost:8080/index.php?/api/v3/get_users"
        );
    }
}
