use crate::errors::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub database: String,
    #[serde(default = "default_backup_dir")]
    pub backup_dir: String,
    /// Directory of the offline sheet mirror; mirroring is off when unset.
    #[serde(default)]
    pub mirror_dir: Option<String>,
    #[serde(default = "default_currency")]
    pub currency: String,
    #[serde(default = "default_valor")]
    pub default_valor_deslocamento: f64,
    #[serde(default)]
    pub validation: ValidationRules,
    /// `null` means "same day, any hour".
    #[serde(default = "default_window")]
    pub duplicate_window_minutes: Option<u32>,
    #[serde(default = "default_value_bands")]
    pub value_bands: Vec<ValueBand>,
    #[serde(default = "default_promotores")]
    pub promotores: Vec<String>,
    #[serde(default = "default_pdvs")]
    pub pdvs: Vec<String>,

    /// Where this configuration was loaded from and will be saved to.
    #[serde(skip)]
    pub file: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationRules {
    pub min_name_length: usize,
    pub max_name_length: usize,
    pub min_deslocamento: f64,
    pub max_deslocamento: f64,
    pub min_entradas: u32,
    pub max_entradas: u32,
    pub max_photos_per_checkin: usize,
    pub max_file_size_mb: u64,
    pub allowed_image_types: Vec<String>,
}

impl Default for ValidationRules {
    fn default() -> Self {
        Self {
            min_name_length: 3,
            max_name_length: 50,
            min_deslocamento: 0.0,
            max_deslocamento: 999.99,
            min_entradas: 1,
            max_entradas: 10,
            max_photos_per_checkin: 20,
            max_file_size_mb: 10,
            allowed_image_types: vec!["png".into(), "jpg".into(), "jpeg".into()],
        }
    }
}

/// Travel-cost band `[min, max)`; `max: null` leaves it open-ended.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValueBand {
    pub min: f64,
    pub max: Option<f64>,
    pub label: String,
}

impl ValueBand {
    pub fn contains(&self, v: f64) -> bool {
        v >= self.min && self.max.is_none_or(|m| v < m)
    }
}

fn default_backup_dir() -> String {
    Config::config_dir()
        .join("backups")
        .to_string_lossy()
        .to_string()
}
fn default_currency() -> String {
    "R$".to_string()
}
fn default_valor() -> f64 {
    50.0
}
fn default_window() -> Option<u32> {
    Some(30)
}

fn default_value_bands() -> Vec<ValueBand> {
    vec![
        ValueBand {
            min: 0.0,
            max: Some(50.0),
            label: "Até R$ 50".into(),
        },
        ValueBand {
            min: 50.0,
            max: Some(100.0),
            label: "R$ 50 - R$ 100".into(),
        },
        ValueBand {
            min: 100.0,
            max: Some(150.0),
            label: "R$ 100 - R$ 150".into(),
        },
        ValueBand {
            min: 150.0,
            max: None,
            label: "Acima de R$ 150".into(),
        },
    ]
}

fn default_promotores() -> Vec<String> {
    [
        "João Silva",
        "Maria Santos",
        "Pedro Oliveira",
        "Ana Costa",
        "Carlos Mendes",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

fn default_pdvs() -> Vec<String> {
    [
        "Supermercado Central",
        "Supermercado Zona Sul",
        "Supermercado Zona Norte",
        "Farmácia São João",
        "Farmácia Popular",
        "Drogaria Preço Bom",
        "Loja de Conveniência 24h",
        "Minimercado Bairro Alto",
        "Mercadinho da Esquina",
        "Atacadão Família",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database: Self::database_file().to_string_lossy().to_string(),
            backup_dir: default_backup_dir(),
            mirror_dir: None,
            currency: default_currency(),
            default_valor_deslocamento: default_valor(),
            validation: ValidationRules::default(),
            duplicate_window_minutes: default_window(),
            value_bands: default_value_bands(),
            promotores: default_promotores(),
            pdvs: default_pdvs(),
            file: Self::config_file(),
        }
    }
}

impl Config {
    /// Return the standard configuration directory depending on the platform
    pub fn config_dir() -> PathBuf {
        if cfg!(target_os = "windows") {
            let appdata = env::var("APPDATA").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(appdata).join("pdvcontrol")
        } else {
            let home = env::var("HOME").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(home).join(".pdvcontrol")
        }
    }

    /// Return the full path of the config file
    pub fn config_file() -> PathBuf {
        Self::config_dir().join("pdvcontrol.conf")
    }

    /// Return the full path of the JSON record file
    pub fn database_file() -> PathBuf {
        Self::config_dir().join("pdvcontrol.json")
    }

    /// Load configuration from `path`, or return defaults if it does not exist.
    pub fn load(path: &Path) -> AppResult<Self> {
        let mut cfg = if path.exists() {
            let content = fs::read_to_string(path)?;
            serde_yaml::from_str::<Config>(&content)?
        } else {
            debug!(path = %path.display(), "no configuration file, using defaults");
            Config::default()
        };
        cfg.file = path.to_path_buf();
        Ok(cfg)
    }

    /// Persist to the file this configuration was loaded from.
    pub fn save(&self) -> AppResult<()> {
        if let Some(parent) = self.file.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }
        let yaml = serde_yaml::to_string(self)?;
        fs::write(&self.file, yaml)?;
        debug!(path = %self.file.display(), "configuration saved");
        Ok(())
    }

    /// Write a fresh configuration file at `path`.
    ///
    /// A relative `custom_db` is resolved against the configuration directory.
    pub fn init_all(path: &Path, custom_db: Option<&str>) -> AppResult<Self> {
        let dir = path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .map(Path::to_path_buf)
            .unwrap_or_else(Self::config_dir);
        fs::create_dir_all(&dir)?;

        let database = match custom_db {
            Some(name) => {
                let p = Path::new(name);
                if p.is_absolute() {
                    p.to_path_buf()
                } else {
                    dir.join(p)
                }
            }
            None => dir.join("pdvcontrol.json"),
        };

        let cfg = Config {
            database: database.to_string_lossy().to_string(),
            backup_dir: dir.join("backups").to_string_lossy().to_string(),
            file: path.to_path_buf(),
            ..Config::default()
        };
        cfg.save()?;
        Ok(cfg)
    }

    pub fn add_promotor(&mut self, name: &str) -> AppResult<()> {
        add_unique(&mut self.promotores, name, "Promoter")
    }

    pub fn remove_promotor(&mut self, name: &str) -> bool {
        remove_entry(&mut self.promotores, name)
    }

    pub fn add_pdv(&mut self, name: &str) -> AppResult<()> {
        add_unique(&mut self.pdvs, name, "PDV")
    }

    pub fn remove_pdv(&mut self, name: &str) -> bool {
        remove_entry(&mut self.pdvs, name)
    }
}

fn add_unique(list: &mut Vec<String>, name: &str, kind: &str) -> AppResult<()> {
    let name = name.trim();
    if name.is_empty() {
        return Err(AppError::Config(format!("{kind} name must not be empty")));
    }
    if list.iter().any(|n| n == name) {
        return Err(AppError::Config(format!("{kind} '{name}' already exists")));
    }
    list.push(name.to_string());
    Ok(())
}

fn remove_entry(list: &mut Vec<String>, name: &str) -> bool {
    let before = list.len();
    list.retain(|n| n != name.trim());
    list.len() != before
}
