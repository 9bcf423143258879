use std::net::IpAddr;

#[derive(Debug, Clone)]
pub struct Config {
    pub host: IpAddr,
    pub port: u16,
    pub max_body_size: usize,
    pub log_level: String,
    pub utm_source: String,
    pub beehiiv: BeehiivConfig,
}

#[derive(Debug, Clone)]
pub struct BeehiivConfig {
    pub api_base: String,
    pub credentials: Option<BeehiivCredentials>,
}

#[derive(Debug, Clone)]
pub struct BeehiivCredentials {
    pub api_key: String,
    pub publication_id: String,
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        let host: IpAddr = env_or("SUBRELAY_HOST", "0.0.0.0")
            .parse()
            .map_err(|e| format!("Invalid SUBRELAY_HOST: {e}"))?;

        let port: u16 = env_or("SUBRELAY_PORT", "3000")
            .parse()
            .map_err(|e| format!("Invalid SUBRELAY_PORT: {e}"))?;

        let max_body_size: usize = env_or("SUBRELAY_MAX_BODY_SIZE", "65536")
            .parse()
            .map_err(|e| format!("Invalid SUBRELAY_MAX_BODY_SIZE: {e}"))?;

        let log_level = env_or("SUBRELAY_LOG_LEVEL", "info");

        let utm_source = env_or("SUBRELAY_UTM_SOURCE", "asap-jobs-landing");

        let api_base = env_or("BEEHIIV_API_BASE", "https://api.beehiiv.com");

        // The service still starts without credentials; subscribe requests
        // then get 500 "Server not configured" and no outbound call is made.
        let credentials = match (
            std::env::var("BEEHIIV_API_KEY").ok(),
            std::env::var("BEEHIIV_PUBLICATION_ID").ok(),
        ) {
            (Some(api_key), Some(publication_id)) => Some(BeehiivCredentials {
                api_key,
                publication_id,
            }),
            _ => None,
        };

        Ok(Config {
            host,
            port,
            max_body_size,
            log_level,
            utm_source,
            beehiiv: BeehiivConfig {
                api_base,
                credentials,
            },
        })
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
