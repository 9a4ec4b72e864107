//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check the route table builds (valid patterns, unique names and paths)
//! - Validate addresses, base path and value ranges
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is a pure function: AppConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;

use tracing_subscriber::EnvFilter;

use crate::config::schema::AppConfig;
use crate::routing::RouteTableError;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("server.bind_address '{0}' is not a socket address")]
    InvalidBindAddress(String),

    #[error("observability.metrics_address '{0}' is not a socket address")]
    InvalidMetricsAddress(String),

    #[error("observability.log_level '{0}' is not a valid filter")]
    InvalidLogLevel(String),

    #[error("server.request_timeout_secs must be greater than zero")]
    ZeroTimeout,

    #[error("server.index_file must not be empty")]
    EmptyIndexFile,

    #[error("router.max_history must be greater than zero")]
    ZeroMaxHistory,

    #[error("router.base_path '{0}' must not contain '?' or '#'")]
    InvalidBasePath(String),

    #[error("router.routes: {0}")]
    Routes(#[from] RouteTableError),
}

pub fn validate_config(config: &AppConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.server.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidBindAddress(
            config.server.bind_address.clone(),
        ));
    }
    if config.server.request_timeout_secs == 0 {
        errors.push(ValidationError::ZeroTimeout);
    }
    if config.server.index_file.trim().is_empty() {
        errors.push(ValidationError::EmptyIndexFile);
    }

    if config.router.base_path.contains(['?', '#']) {
        errors.push(ValidationError::InvalidBasePath(
            config.router.base_path.clone(),
        ));
    }
    if config.router.max_history == 0 {
        errors.push(ValidationError::ZeroMaxHistory);
    }
    if let Err(e) = config.route_table() {
        errors.push(e.into());
    }

    if EnvFilter::try_new(&config.observability.log_level).is_err() {
        errors.push(ValidationError::InvalidLogLevel(
            config.observability.log_level.clone(),
        ));
    }
    if config.observability.metrics_enabled
        && config.observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::InvalidMetricsAddress(
            config.observability.metrics_address.clone(),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::RouteConfig;
    use crate::routing::View;

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate_config(&AppConfig::default()).is_ok());
    }

    #[test]
    fn test_collects_all_errors() {
        let mut config = AppConfig::default();
        config.server.bind_address = "not-an-address".into();
        config.server.request_timeout_secs = 0;
        config.router.max_history = 0;
        config.router.base_path = "/app?x".into();

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 4);
        assert!(errors.contains(&ValidationError::ZeroTimeout));
        assert!(errors.contains(&ValidationError::ZeroMaxHistory));
    }

    #[test]
    fn test_route_errors_surface() {
        let mut config = AppConfig::default();
        config.router.routes = vec![
            RouteConfig {
                path: "/".into(),
                name: "Home".into(),
                view: View::Home,
            },
            RouteConfig {
                path: "/settings".into(),
                name: "Home".into(),
                view: View::Settings,
            },
        ];
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(
            errors,
            vec![ValidationError::Routes(RouteTableError::DuplicateName("Home".into()))]
        );
    }

    #[test]
    fn test_metrics_address_checked_only_when_enabled() {
        let mut config = AppConfig::default();
        config.observability.metrics_address = "bogus".into();
        assert!(validate_config(&config).is_ok());

        config.observability.metrics_enabled = true;
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors, vec![ValidationError::InvalidMetricsAddress("bogus".into())]);
    }
}
