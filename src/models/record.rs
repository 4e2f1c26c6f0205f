use crate::errors::{AppError, AppResult};
use chrono::{Local, NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use serde::{Deserialize, Serialize};

/// One check-in, as stored in the JSON backing file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub id: String,
    #[serde(with = "date_format")]
    pub data: NaiveDate,
    #[serde(with = "time_format")]
    pub hora: NaiveTime,
    pub promotor: String,
    pub pdv: String,
    #[serde(default)]
    pub valor_deslocamento: f64,
    #[serde(default = "default_entradas")]
    pub num_entradas: u32,
    #[serde(default)]
    pub observacoes: String,
    #[serde(default)]
    pub fotos: Vec<String>,
    pub created_at: NaiveDateTime,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<NaiveDateTime>,
}

fn default_entradas() -> u32 {
    1
}

/// Fields supplied by the caller of `Database::add`.
#[derive(Debug, Clone, PartialEq)]
pub struct NewRecord {
    pub data: NaiveDate,
    pub hora: NaiveTime,
    pub promotor: String,
    pub pdv: String,
    pub valor_deslocamento: f64,
    pub num_entradas: u32,
    pub observacoes: String,
    pub fotos: Vec<String>,
}

impl NewRecord {
    /// A check-in with zero travel cost, one entry, no notes and no photos.
    pub fn new(data: NaiveDate, hora: NaiveTime, promotor: &str, pdv: &str) -> Self {
        Self {
            data,
            hora: drop_subsec(hora),
            promotor: promotor.to_string(),
            pdv: pdv.to_string(),
            valor_deslocamento: 0.0,
            num_entradas: default_entradas(),
            observacoes: String::new(),
            fotos: Vec::new(),
        }
    }

    /// Same as `new`, stamped with the current local date and time.
    pub fn now(promotor: &str, pdv: &str) -> Self {
        let now = Local::now().naive_local();
        Self::new(now.date(), now.time(), promotor, pdv)
    }

    pub fn id(&self) -> String {
        Record::make_id(&self.data, &self.hora, &self.promotor)
    }

    pub fn check(&self) -> AppResult<()> {
        check_text("promotor", &self.promotor)?;
        check_text("pdv", &self.pdv)?;
        check_valor(self.valor_deslocamento)?;
        check_entradas(self.num_entradas)
    }

    /// The stored form of this check-in, as `Database::add` would save it.
    pub fn into_record(self, created_at: NaiveDateTime) -> Record {
        Record {
            id: self.id(),
            data: self.data,
            hora: drop_subsec(self.hora),
            promotor: self.promotor,
            pdv: self.pdv,
            valor_deslocamento: self.valor_deslocamento,
            num_entradas: self.num_entradas,
            observacoes: self.observacoes,
            fotos: self.fotos,
            created_at,
            updated_at: None,
        }
    }
}

impl Record {
    /// `{data}_{hora}_{promotor}` with `:` → `-` and ` ` → `_`.
    pub fn make_id(data: &NaiveDate, hora: &NaiveTime, promotor: &str) -> String {
        format!(
            "{}_{}_{}",
            data.format(date_format::FORMAT),
            hora.format(time_format::FORMAT),
            promotor
        )
        .replace(':', "-")
        .replace(' ', "_")
    }

    pub fn date_str(&self) -> String {
        self.data.format(date_format::FORMAT).to_string()
    }

    pub fn time_str(&self) -> String {
        self.hora.format(time_format::FORMAT).to_string()
    }

    pub fn num_fotos(&self) -> usize {
        self.fotos.len()
    }
}

/// Partial update for `Database::update`. `None` leaves the field untouched;
/// the id is not patchable.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordPatch {
    pub data: Option<NaiveDate>,
    pub hora: Option<NaiveTime>,
    pub promotor: Option<String>,
    pub pdv: Option<String>,
    pub valor_deslocamento: Option<f64>,
    pub num_entradas: Option<u32>,
    pub observacoes: Option<String>,
    pub fotos: Option<Vec<String>>,
}

impl RecordPatch {
    pub fn is_empty(&self) -> bool {
        *self == RecordPatch::default()
    }

    pub fn check(&self) -> AppResult<()> {
        if let Some(p) = &self.promotor {
            check_text("promotor", p)?;
        }
        if let Some(p) = &self.pdv {
            check_text("pdv", p)?;
        }
        if let Some(v) = self.valor_deslocamento {
            check_valor(v)?;
        }
        if let Some(n) = self.num_entradas {
            check_entradas(n)?;
        }
        Ok(())
    }

    pub(crate) fn apply(&self, rec: &mut Record) {
        if let Some(d) = self.data {
            rec.data = d;
        }
        if let Some(h) = self.hora {
            rec.hora = drop_subsec(h);
        }
        if let Some(p) = &self.promotor {
            rec.promotor = p.clone();
        }
        if let Some(p) = &self.pdv {
            rec.pdv = p.clone();
        }
        if let Some(v) = self.valor_deslocamento {
            rec.valor_deslocamento = v;
        }
        if let Some(n) = self.num_entradas {
            rec.num_entradas = n;
        }
        if let Some(o) = &self.observacoes {
            rec.observacoes = o.clone();
        }
        if let Some(f) = &self.fotos {
            rec.fotos = f.clone();
        }
    }
}

fn drop_subsec(t: NaiveTime) -> NaiveTime {
    t.with_nanosecond(0).unwrap_or(t)
}

fn check_text(field: &str, value: &str) -> AppResult<()> {
    if value.trim().is_empty() {
        return Err(AppError::Validation(format!("{field} must not be empty")));
    }
    Ok(())
}

fn check_valor(v: f64) -> AppResult<()> {
    if !v.is_finite() || v < 0.0 {
        return Err(AppError::Validation(format!(
            "valor_deslocamento must be a non-negative number, got {v}"
        )));
    }
    Ok(())
}

fn check_entradas(n: u32) -> AppResult<()> {
    if n < 1 {
        return Err(AppError::Validation(
            "num_entradas must be at least 1".to_string(),
        ));
    }
    Ok(())
}

pub mod date_format {
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serializer};

    pub const FORMAT: &str = "%Y-%m-%d";

    pub fn serialize<S: Serializer>(d: &NaiveDate, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&d.format(FORMAT).to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<NaiveDate, D::Error> {
        let raw = String::deserialize(d)?;
        NaiveDate::parse_from_str(raw.trim(), FORMAT).map_err(serde::de::Error::custom)
    }
}

pub mod time_format {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub const FORMAT: &str = "%H:%M:%S";

    pub fn serialize<S: Serializer>(t: &NaiveTime, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&t.format(FORMAT).to_string())
    }

    /// Accepts `HH:MM:SS` and the shorter `HH:MM`.
    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<NaiveTime, D::Error> {
        let raw = String::deserialize(d)?;
        let raw = raw.trim();
        NaiveTime::parse_from_str(raw, FORMAT)
            .or_else(|_| NaiveTime::parse_from_str(raw, "%H:%M"))
            .map_err(serde::de::Error::custom)
    }
}
