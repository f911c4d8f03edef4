use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
/// Fails at startup if required variables are missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub groq_api_key: String,
    /// Optional: the reader proxy works unauthenticated at a lower rate limit.
    pub jina_api_key: Option<String>,
    pub reader_base_url: String,
    pub pocketbase_url: String,
    pub database_url: String,
    pub reports_dir: String,
    pub pdf_renderer: String,
    /// Six-field cron expression (sec min hour dom mon dow), UTC.
    pub hunt_schedule: String,
    pub notify_email: Option<String>,
    pub brevo_api_key: Option<String>,
    pub email_sender: String,
    pub allowed_origins: Vec<String>,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            groq_api_key: require_env("GROQ_API_KEY")?,
            jina_api_key: optional_env("JINA_API_KEY"),
            reader_base_url: env_or("READER_BASE_URL", "https://r.jina.ai"),
            pocketbase_url: env_or("POCKETBASE_URL", "http://127.0.0.1:8090"),
            database_url: env_or("DATABASE_URL", "sqlite://brain.db"),
            reports_dir: env_or("REPORTS_DIR", "generated_reports"),
            pdf_renderer: env_or("PDF_RENDERER", "wkhtmltopdf"),
            hunt_schedule: env_or("HUNT_SCHEDULE", "0 0 8 * * *"),
            notify_email: optional_env("NOTIFY_EMAIL"),
            brevo_api_key: optional_env("BREVO_API_KEY"),
            email_sender: env_or("EMAIL_SENDER", "notification@jobos.online"),
            allowed_origins: parse_origins(&env_or(
                "ALLOWED_ORIGINS",
                "http://localhost:5173,http://127.0.0.1:5173,https://yash.jobos.online",
            )),
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8000".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: env_or("RUST_LOG", "info"),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

/// Unset and blank values are both treated as absent.
fn optional_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn env_or(key: &str, default: &str) -> String {
    optional_env(key).unwrap_or_else(|| default.to_string())
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|o| !o.is_empty())
        .map(String::from)
        .collect()
}
