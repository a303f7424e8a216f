use serde::Deserialize;
use std::fs;

#[derive(Debug, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub env: EnvConfig,
    #[serde(default)]
    pub visual: VisualConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub artist: ArtistConfig,
}

#[derive(Debug, Deserialize)]
pub struct EnvConfig {
    #[serde(default = "default_seed")]
    pub seed: u64,
    #[serde(default = "default_cols")]
    pub cols: i32,
    #[serde(default = "default_rows")]
    pub rows: i32,
}

#[derive(Debug, Deserialize)]
pub struct VisualConfig {
    #[serde(default = "default_bg_r")]
    pub background_r: u8,
    #[serde(default = "default_bg_g")]
    pub background_g: u8,
    #[serde(default = "default_bg_b")]
    pub background_b: u8,
    #[serde(default = "default_nib_radius")]
    pub nib_radius: f32,
}

#[derive(Debug, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_enable_episode_log")]
    pub enable_episode_log: bool,
    #[serde(default = "default_episode_log_path")]
    pub episode_log_path: String,
}

#[derive(Debug, Deserialize)]
pub struct ArtistConfig {
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,
    #[serde(default = "default_num_triangles")]
    pub num_triangles: usize,
    #[serde(default = "default_image_width")]
    pub image_width: u32,
    #[serde(default = "default_image_height")]
    pub image_height: u32,
    #[serde(default = "default_output_dir")]
    pub output_dir: String,
}

// Default values
fn default_seed() -> u64 { 42 }
fn default_cols() -> i32 { 50 }
fn default_rows() -> i32 { 50 }
fn default_bg_r() -> u8 { 30 }
fn default_bg_g() -> u8 { 30 }
fn default_bg_b() -> u8 { 30 }
fn default_nib_radius() -> f32 { 5.0 }
fn default_enable_episode_log() -> bool { true }
fn default_episode_log_path() -> String { "episode_log.json".to_string() }
fn default_batch_size() -> usize { 25 }
fn default_num_triangles() -> usize { 5 }
fn default_image_width() -> u32 { 512 }
fn default_image_height() -> u32 { 512 }
fn default_output_dir() -> String { "data/train_set_01".to_string() }

impl Default for EnvConfig {
    fn default() -> Self {
        Self {
            seed: default_seed(),
            cols: default_cols(),
            rows: default_rows(),
        }
    }
}

impl Default for VisualConfig {
    fn default() -> Self {
        Self {
            background_r: default_bg_r(),
            background_g: default_bg_g(),
            background_b: default_bg_b(),
            nib_radius: default_nib_radius(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enable_episode_log: default_enable_episode_log(),
            episode_log_path: default_episode_log_path(),
        }
    }
}

impl Default for ArtistConfig {
    fn default() -> Self {
        Self {
            batch_size: default_batch_size(),
            num_triangles: default_num_triangles(),
            image_width: default_image_width(),
            image_height: default_image_height(),
            output_dir: default_output_dir(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            env: EnvConfig::default(),
            visual: VisualConfig::default(),
            logging: LoggingConfig::default(),
            artist: ArtistConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from file, or use defaults if file doesn't exist
    pub fn load() -> Self {
        match fs::read_to_string("config.toml") {
            Ok(contents) => {
                match toml::from_str(&contents) {
                    Ok(config) => {
                        println!("Loaded configuration from config.toml");
                        config
                    }
                    Err(e) => {
                        eprintln!("Warning: Failed to parse config.toml: {}", e);
                        eprintln!("Using default configuration");
                        Config::default()
                    }
                }
            }
            Err(_) => {
                println!("No config.toml found, using default configuration");
                Config::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_toml_uses_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.env.cols, 50);
        assert_eq!(config.env.rows, 50);
        assert_eq!(config.env.seed, 42);
        assert!(config.logging.enable_episode_log);
    }

    #[test]
    fn test_partial_section_override() {
        let config: Config = toml::from_str("[env]\ncols = 12\n").unwrap();
        assert_eq!(config.env.cols, 12);
        assert_eq!(config.env.rows, 50);
        assert_eq!(config.artist.batch_size, 25);
    }
}
