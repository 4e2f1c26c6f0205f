use crate::config::{Config, ValidationRules};
use crate::errors::{AppError, AppResult};
use crate::utils::formatting::format_currency;
use regex::Regex;
use std::path::Path;

/// Input checks applied by the CLI before a record reaches the store.
pub struct Validator {
    rules: ValidationRules,
    currency: String,
    letters_only: Regex,
}

fn invalid(msg: impl Into<String>) -> AppError {
    AppError::Validation(msg.into())
}

impl Validator {
    pub fn from_config(cfg: &Config) -> AppResult<Self> {
        let letters_only = Regex::new(r"^[a-zA-ZÀ-ÿ\s]+$")
            .map_err(|e| AppError::Other(format!("name pattern: {e}")))?;
        Ok(Self {
            rules: cfg.validation.clone(),
            currency: cfg.currency.clone(),
            letters_only,
        })
    }

    fn check_length(&self, name: &str) -> AppResult<()> {
        let len = name.chars().count();
        if len < self.rules.min_name_length {
            return Err(invalid(format!(
                "name must have at least {} characters",
                self.rules.min_name_length
            )));
        }
        if len > self.rules.max_name_length {
            return Err(invalid(format!(
                "name must have at most {} characters",
                self.rules.max_name_length
            )));
        }
        Ok(())
    }

    /// Non-blank, length bounds, letters (accents included) and spaces only.
    pub fn promotor_name(&self, name: &str) -> AppResult<()> {
        if name.trim().is_empty() {
            return Err(invalid("promoter name must not be empty"));
        }
        self.check_length(name)?;
        if !self.letters_only.is_match(name) {
            return Err(invalid("promoter name must contain only letters"));
        }
        Ok(())
    }

    pub fn pdv_name(&self, name: &str) -> AppResult<()> {
        if name.trim().is_empty() {
            return Err(invalid("PDV name must not be empty"));
        }
        self.check_length(name)
    }

    pub fn valor_deslocamento(&self, valor: f64) -> AppResult<()> {
        if !valor.is_finite() {
            return Err(invalid("invalid travel cost"));
        }
        if valor < self.rules.min_deslocamento {
            return Err(invalid(format!(
                "minimum travel cost is {}",
                format_currency(&self.currency, self.rules.min_deslocamento)
            )));
        }
        if valor > self.rules.max_deslocamento {
            return Err(invalid(format!(
                "maximum travel cost is {}",
                format_currency(&self.currency, self.rules.max_deslocamento)
            )));
        }
        Ok(())
    }

    pub fn num_entradas(&self, n: u32) -> AppResult<()> {
        if n < self.rules.min_entradas {
            return Err(invalid(format!(
                "minimum of {} entry(ies)",
                self.rules.min_entradas
            )));
        }
        if n > self.rules.max_entradas {
            return Err(invalid(format!(
                "maximum of {} entries",
                self.rules.max_entradas
            )));
        }
        Ok(())
    }

    pub fn photo_count(&self, count: usize) -> AppResult<()> {
        if count > self.rules.max_photos_per_checkin {
            return Err(invalid(format!(
                "at most {} photos per check-in",
                self.rules.max_photos_per_checkin
            )));
        }
        Ok(())
    }

    /// Extension whitelist and size limit for a photo about to be uploaded.
    pub fn photo_file(&self, path: &Path, size_bytes: u64) -> AppResult<()> {
        let ext = path
            .extension()
            .map(|e| e.to_string_lossy().to_lowercase())
            .unwrap_or_default();

        if !self.rules.allowed_image_types.iter().any(|t| *t == ext) {
            return Err(invalid(format!(
                "file type not allowed for {}; use: {}",
                path.display(),
                self.rules.allowed_image_types.join(", ")
            )));
        }

        let max_bytes = self.rules.max_file_size_mb * 1024 * 1024;
        if size_bytes > max_bytes {
            return Err(invalid(format!(
                "{} is too large; maximum is {} MB",
                path.display(),
                self.rules.max_file_size_mb
            )));
        }
        Ok(())
    }
}
