use std::path::PathBuf;

/// Load environment variables from .env files in multiple locations
///
/// Priority order (highest to lowest):
/// 1. Environment variables already set
/// 2. Current directory .env
/// 3. ~/.vitrine/.env
///
/// dotenvy never overwrites a variable that is already set, so earlier
/// sources win. Runs before tracing is initialized; the caller logs the
/// returned paths.
pub fn load_dotenv() -> Vec<PathBuf> {
    let mut loaded_from = Vec::new();

    if let Ok(path) = dotenvy::dotenv() {
        loaded_from.push(path);
    }

    if let Some(env_file) = config_dir().map(|dir| dir.join(".env")) {
        if env_file.exists() && dotenvy::from_path(&env_file).is_ok() {
            loaded_from.push(env_file);
        }
    }

    loaded_from
}

/// Get the vitrine config directory path (~/.vitrine)
pub fn config_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".vitrine"))
}
