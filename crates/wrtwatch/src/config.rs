//! CLI-side config resolution: global flags layered over the selected
//! profile, producing a `wrtwatch_core::RouterConfig`.
//!
//! Core never sees these types; it receives a pre-built `RouterConfig`.

use std::time::Duration;

use secrecy::SecretString;

use wrtwatch_config::{Config, Profile, config_path, parse_router_url, profile_to_router_config};
use wrtwatch_core::{AuthCredentials, RouterConfig, TlsVerification};

use crate::cli::GlobalOpts;
use crate::error::CliError;

pub use wrtwatch_config::{load_config, load_config_or_default, save_config};

// ── Profile resolution ───────────────────────────────────────────────

/// Resolve the active profile name from CLI flags and config.
pub fn active_profile_name(global: &GlobalOpts, config: &Config) -> String {
    global
        .profile
        .clone()
        .or_else(|| config.default_profile.clone())
        .unwrap_or_else(|| "default".into())
}

/// Build the router config for this invocation.
///
/// A `--router` flag works without any config file. Otherwise the active
/// profile must exist; flags still override its values.
pub fn build_router_config(global: &GlobalOpts, cfg: &Config) -> Result<RouterConfig, CliError> {
    let profile_name = active_profile_name(global, cfg);

    let mut router = match (cfg.profiles.get(&profile_name), global.router.as_deref()) {
        (Some(profile), _) => {
            let creds = resolve_credentials(profile, &profile_name, global);
            profile_to_router_config(profile, &cfg.defaults, creds)?
        }
        (None, Some(url)) => {
            let profile = Profile {
                router: url.into(),
                username: global.username.clone(),
                ..Profile::default()
            };
            let creds = global.password.clone().map(|pw| AuthCredentials {
                username: profile.username().to_owned(),
                password: SecretString::from(pw),
            });
            profile_to_router_config(&profile, &cfg.defaults, creds)?
        }
        (None, None) if global.profile.is_some() => {
            return Err(CliError::ProfileNotFound {
                name: profile_name,
                available: available_profiles(cfg),
            });
        }
        (None, None) => {
            return Err(CliError::NoConfig {
                path: config_path().display().to_string(),
            });
        }
    };

    apply_overrides(&mut router, global)?;
    Ok(router)
}

fn apply_overrides(router: &mut RouterConfig, global: &GlobalOpts) -> Result<(), CliError> {
    if let Some(ref url) = global.router {
        router.url = parse_router_url(url)?;
    }
    if global.insecure {
        router.tls = TlsVerification::DangerAcceptInvalid;
    }
    if let Some(secs) = global.timeout {
        router.timeout = Duration::from_secs(secs);
    }
    if let Some(ref username) = global.username {
        if let Some(ref mut creds) = router.credentials {
            creds.username.clone_from(username);
        }
    }
    Ok(())
}

/// Credential chain with the `--password` flag in front of the profile chain.
fn resolve_credentials(
    profile: &Profile,
    profile_name: &str,
    global: &GlobalOpts,
) -> Option<AuthCredentials> {
    let username = global
        .username
        .clone()
        .unwrap_or_else(|| profile.username().to_owned());

    let password = match global.password {
        Some(ref pw) => Some(SecretString::from(pw.clone())),
        None => wrtwatch_config::resolve_password(profile, profile_name),
    }?;

    Some(AuthCredentials { username, password })
}

pub fn available_profiles(cfg: &Config) -> String {
    if cfg.profiles.is_empty() {
        "(none)".into()
    } else {
        cfg.profiles.keys().cloned().collect::<Vec<_>>().join(", ")
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::cli::{ColorMode, OutputFormat};
    use secrecy::ExposeSecret;

    fn global() -> GlobalOpts {
        GlobalOpts {
            profile: None,
            router: None,
            username: None,
            password: None,
            output: OutputFormat::Table,
            color: ColorMode::Never,
            verbose: 0,
            quiet: false,
            yes: false,
            insecure: false,
            timeout: None,
        }
    }

    fn config_with(name: &str, router: &str) -> Config {
        let mut cfg = Config::default();
        cfg.profiles.insert(
            name.into(),
            Profile {
                router: router.into(),
                password: Some("from-file".into()),
                ..Profile::default()
            },
        );
        cfg
    }

    #[test]
    fn router_flag_without_profile() {
        let mut g = global();
        g.router = Some("192.168.1.1".into());
        g.password = Some("pw".into());
        let cfg = build_router_config(&g, &Config::default()).unwrap();
        assert_eq!(cfg.url.as_str(), "http://192.168.1.1/");
        let creds = cfg.credentials.unwrap();
        assert_eq!(creds.username, "root");
        assert_eq!(creds.password.expose_secret(), "pw");
    }

    #[test]
    fn flags_override_profile() {
        let mut g = global();
        g.password = Some("flag".into());
        g.username = Some("admin".into());
        g.timeout = Some(2);
        let cfg = build_router_config(&g, &config_with("default", "10.0.0.1")).unwrap();
        assert_eq!(cfg.url.as_str(), "http://10.0.0.1/");
        assert_eq!(cfg.timeout, Duration::from_secs(2));
        let creds = cfg.credentials.unwrap();
        assert_eq!(creds.username, "admin");
        assert_eq!(creds.password.expose_secret(), "flag");
    }

    #[test]
    fn missing_everything_is_no_config() {
        let err = build_router_config(&global(), &Config::default()).unwrap_err();
        assert!(matches!(err, CliError::NoConfig { .. }));
    }

    #[test]
    fn unknown_named_profile() {
        let mut g = global();
        g.profile = Some("office".into());
        let err = build_router_config(&g, &config_with("home", "r")).unwrap_err();
        assert!(
            matches!(err, CliError::ProfileNotFound { ref available, .. } if available == "home")
        );
    }
}
