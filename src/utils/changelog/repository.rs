// repository metadata used to build comparison links

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// hosting information of the repository being released
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepositoryInfo {
    /// e.g. `github.com`
    pub host: String,
    /// e.g. `owner/project`
    pub repository: String,
}

impl RepositoryInfo {
    pub fn new(host: impl Into<String>, repository: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            repository: repository.into(),
        }
    }

    /// derive host and repository from a git remote url
    ///
    /// supports `https://host/owner/repo.git`, `ssh://git@host/owner/repo.git`
    /// and the scp-like `git@host:owner/repo.git`.
    pub fn parse_remote(url: &str) -> Result<Self> {
        let invalid = || Error::InvalidRemote {
            url: url.to_string(),
        };
        let trimmed = url.trim();

        let (host, path) = if let Some((_, rest)) = trimmed.split_once("://") {
            let (authority, path) = rest.split_once('/').ok_or_else(invalid)?;
            let host = authority.rsplit('@').next().unwrap_or(authority);
            // drop an explicit port
            let host = host.split(':').next().unwrap_or(host);
            (host, path)
        } else {
            let (authority, path) = trimmed.split_once(':').ok_or_else(invalid)?;
            let host = authority.rsplit('@').next().unwrap_or(authority);
            (host, path)
        };

        let path = path.trim_matches('/');
        let path = path.strip_suffix(".git").unwrap_or(path);

        if host.is_empty() || path.is_empty() || !path.contains('/') {
            return Err(invalid());
        }

        Ok(Self::new(host, path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_https_remote() {
        let info = RepositoryInfo::parse_remote("https://github.com/release-it/release-it.git").unwrap();
        assert_eq!(info, RepositoryInfo::new("github.com", "release-it/release-it"));
    }

    #[test]
    fn test_parse_scp_remote() {
        let info = RepositoryInfo::parse_remote("git@gitlab.com:group/sub/project.git").unwrap();
        assert_eq!(info.host, "gitlab.com");
        assert_eq!(info.repository, "group/sub/project");
    }

    #[test]
    fn test_parse_ssh_remote_with_port() {
        let info = RepositoryInfo::parse_remote("ssh://git@example.org:2222/user/project").unwrap();
        assert_eq!(info, RepositoryInfo::new("example.org", "user/project"));
    }

    #[test]
    fn test_parse_invalid_remote() {
        assert!(RepositoryInfo::parse_remote("not a remote").is_err());
        assert!(RepositoryInfo::parse_remote("https://github.com/").is_err());
    }
}
